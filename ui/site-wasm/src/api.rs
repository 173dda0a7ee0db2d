//! Outbound HTTP: the contact-form endpoint and the embed reachability probe.

use async_trait::async_trait;
use dsm_site_core::{ContactEndpoint, ContactFields, SubmitError, SubmitReply};
use gloo_net::http::Request;
use web_sys::RequestMode;

/// Apps Script web app receiving the contact form.
pub struct AppsScriptEndpoint {
    url: String,
}

impl AppsScriptEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl ContactEndpoint for AppsScriptEndpoint {
    async fn submit(&self, fields: &ContactFields) -> Result<SubmitReply, SubmitError> {
        let body =
            serde_json::to_string(fields).map_err(|e| SubmitError::Transport(e.to_string()))?;
        // A plain string body (no JSON content type) avoids a CORS preflight,
        // which Apps Script does not answer.
        let resp = Request::post(&self.url)
            .body(body)
            .map_err(|e| SubmitError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        resp.json::<SubmitReply>().await.map_err(|e| {
            SubmitError::Transport(format!("{} {}: {e}", resp.status(), resp.status_text()))
        })
    }
}

/// Whether `url` answers at all. Uses `no-cors`, so the response is opaque;
/// only a network failure counts as unreachable.
pub async fn is_reachable(url: &str) -> bool {
    Request::get(url).mode(RequestMode::NoCors).send().await.is_ok()
}
