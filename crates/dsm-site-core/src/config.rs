//! Site configuration.
//!
//! Every field has a default matching the production site. A page may
//! override any subset with an inline JSON block; unknown keys are ignored.

use crate::draft::{DEFAULT_DRAFT_KEY, DraftSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbyrIn_ZpzHcokGIa37RsJFvPTGA66I1y367RK8PFCZSf0JOPQuyMRxMxfBzAeW1WnP9/exec";
pub const DEFAULT_IMAGE_BASE: &str = "https://padrescolegio.dsm.edu.ni/images";
pub const DEFAULT_SLIDE_COUNT: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Contact-form submission URL.
    pub endpoint: String,
    /// Page loaded after an accepted submission.
    pub thank_you_page: String,
    pub draft_key: String,
    pub draft_ttl_ms: u64,
    pub draft_debounce_ms: u64,
    pub flip_dwell_ms: u64,
    pub slides: Vec<String>,
    pub slide_interval_ms: u64,
    pub whatsapp_phone: String,
    pub whatsapp_default_message: String,
    pub embed_url: String,
    /// `tracing` filter directive for the console logger.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            thank_you_page: "gracias.html".to_owned(),
            draft_key: DEFAULT_DRAFT_KEY.to_owned(),
            draft_ttl_ms: 60_000,
            draft_debounce_ms: 300,
            flip_dwell_ms: 60_000,
            slides: (1..=DEFAULT_SLIDE_COUNT)
                .map(|n| format!("{DEFAULT_IMAGE_BASE}/{n}.jpg"))
                .collect(),
            slide_interval_ms: 5_000,
            whatsapp_phone: "50588565989".to_owned(),
            whatsapp_default_message: "Hola Deutsche Schule Managua, necesito ayuda.".to_owned(),
            embed_url: "http://190.212.46.18:8080/".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn draft_settings(&self) -> DraftSettings {
        DraftSettings {
            key: self.draft_key.clone(),
            ttl: Duration::from_millis(self.draft_ttl_ms),
            debounce: Duration::from_millis(self.draft_debounce_ms),
        }
    }

    pub fn flip_dwell(&self) -> Duration {
        Duration::from_millis(self.flip_dwell_ms)
    }

    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms)
    }
}
