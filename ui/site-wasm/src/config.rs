//! Page-level configuration.
//!
//! Pages may embed overrides as
//! `<script type="application/json" id="site-config">{...}</script>`.
//! Without that element the built-in defaults apply.

use crate::dom;
use dsm_site_core::SiteConfig;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Read the page's overrides. Runs before logging is installed, so parse
/// errors are returned for the caller to report.
pub fn load() -> Result<SiteConfig, serde_json::Error> {
    match dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
        Some(raw) => SiteConfig::from_json(&raw),
        None => Ok(SiteConfig::default()),
    }
}
