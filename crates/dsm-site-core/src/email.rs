//! Institutional email rule: only `@dsm.edu.ni` addresses are accepted.

use regex::Regex;
use std::sync::LazyLock;

static INSTITUTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@dsm\.edu\.ni$").expect("institutional email pattern compiles")
});

/// Message set as the input's custom validity when the address is rejected.
pub const INVALID_EMAIL_MESSAGE: &str = "El correo debe terminar en @padre.dsm.edu.ni";

/// Outcome of checking the `correo` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailCheck {
    /// Nothing entered yet. Valid, no error shown.
    Empty,
    Valid,
    Invalid,
}

impl EmailCheck {
    pub fn is_valid(self) -> bool {
        self != EmailCheck::Invalid
    }

    pub fn shows_error(self) -> bool {
        self == EmailCheck::Invalid
    }

    /// Custom-validity string for the input; empty clears it.
    pub fn validity_message(self) -> &'static str {
        match self {
            EmailCheck::Invalid => INVALID_EMAIL_MESSAGE,
            EmailCheck::Empty | EmailCheck::Valid => "",
        }
    }
}

/// Check a raw input value. Surrounding whitespace is ignored.
pub fn check_email(value: &str) -> EmailCheck {
    let value = value.trim();
    if value.is_empty() {
        EmailCheck::Empty
    } else if INSTITUTIONAL.is_match(value) {
        EmailCheck::Valid
    } else {
        EmailCheck::Invalid
    }
}

pub fn is_valid_institutional_email(value: &str) -> bool {
    check_email(value).is_valid()
}
