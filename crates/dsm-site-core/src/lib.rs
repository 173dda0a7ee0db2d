//! DSM parents' site core.
//!
//! Browser-independent state machines and rules behind the site's widgets:
//! flip cards, the contact-form draft, email validation, slideshow, reveal
//! animations, menu and chat link. The `site-wasm` crate binds these to the
//! DOM; everything here runs and tests natively.

pub mod chat;
pub mod config;
pub mod draft;
pub mod email;
pub mod endpoint;
pub mod error;
pub mod flip;
pub mod menu;
pub mod reveal;
pub mod slideshow;
pub mod store;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::SiteConfig;
pub use draft::{ContactField, ContactFields, Draft, DraftManager, DraftSettings};
pub use email::{EmailCheck, check_email, is_valid_institutional_email};
pub use endpoint::{ContactEndpoint, SubmitReply};
pub use error::{DraftError, SubmitError};
pub use flip::{CardId, CardView, FlipCards};
pub use store::KeyValueStore;
pub use timer::{Clock, Scheduler};
