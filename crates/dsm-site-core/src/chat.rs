//! WhatsApp chat widget.

/// Message to send: the trimmed input, or `default` when blank.
pub fn compose_message(input: &str, default: &str) -> String {
    let text = input.trim();
    if text.is_empty() { default.to_owned() } else { text.to_owned() }
}

/// Deep link opening a WhatsApp chat. `encoded_text` must already be
/// URI-component encoded.
pub fn whatsapp_link(phone: &str, encoded_text: &str) -> String {
    format!(
        "https://api.whatsapp.com/send/?phone={phone}&text={encoded_text}&type=phone_number&app_absent=0"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "Hola Deutsche Schule Managua, necesito ayuda.";

    #[test]
    fn blank_input_uses_default() {
        assert_eq!(compose_message("   ", DEFAULT), DEFAULT);
        assert_eq!(compose_message(" Hola ", DEFAULT), "Hola");
    }

    #[test]
    fn link_format() {
        assert_eq!(
            whatsapp_link("50588565989", "Hola%20mundo"),
            "https://api.whatsapp.com/send/?phone=50588565989&text=Hola%20mundo&type=phone_number&app_absent=0"
        );
    }
}
