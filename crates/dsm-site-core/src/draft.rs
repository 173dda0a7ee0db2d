//! Contact-form draft persistence.
//!
//! Field edits are saved to the key/value store after a short debounce, a
//! fresh draft is restored once at load, and the draft is cleared when the
//! form is accepted by the endpoint. Drafts older than the expiry window are
//! deleted instead of restored.

use crate::email::{self, EmailCheck};
use crate::endpoint::ContactEndpoint;
use crate::error::{DraftError, SubmitError};
use crate::store::KeyValueStore;
use crate::timer::{Clock, Scheduler};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_DRAFT_KEY: &str = "formAyudaData";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Nombre,
    Correo,
    Destinatario,
    Mensaje,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Nombre,
        ContactField::Correo,
        ContactField::Destinatario,
        ContactField::Mensaje,
    ];

    /// Form control name and JSON key.
    pub fn name(self) -> &'static str {
        match self {
            ContactField::Nombre => "nombre",
            ContactField::Correo => "correo",
            ContactField::Destinatario => "destinatario",
            ContactField::Mensaje => "mensaje",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Current form values; also the submission body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFields {
    pub nombre: String,
    pub correo: String,
    pub destinatario: String,
    pub mensaje: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Nombre => &self.nombre,
            ContactField::Correo => &self.correo,
            ContactField::Destinatario => &self.destinatario,
            ContactField::Mensaje => &self.mensaje,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Nombre => &mut self.nombre,
            ContactField::Correo => &mut self.correo,
            ContactField::Destinatario => &mut self.destinatario,
            ContactField::Mensaje => &mut self.mensaje,
        };
        *slot = value.into();
    }
}

/// Stored form snapshot. Fields missing from older or hand-edited entries
/// stay `None` and are skipped on restore.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub destinatario: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
    /// Unix milliseconds of the save. Zero means unknown and counts as
    /// expired.
    #[serde(default)]
    pub timestamp: u64,
}

impl Draft {
    pub fn snapshot(fields: &ContactFields, timestamp: u64) -> Self {
        Self {
            nombre: Some(fields.nombre.clone()),
            correo: Some(fields.correo.clone()),
            destinatario: Some(fields.destinatario.clone()),
            mensaje: Some(fields.mensaje.clone()),
            timestamp,
        }
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Nombre => self.nombre.as_deref(),
            ContactField::Correo => self.correo.as_deref(),
            ContactField::Destinatario => self.destinatario.as_deref(),
            ContactField::Mensaje => self.mensaje.as_deref(),
        }
    }

    pub fn is_fresh(&self, now_ms: u64, ttl: Duration) -> bool {
        self.timestamp != 0
            && u128::from(now_ms.saturating_sub(self.timestamp)) <= ttl.as_millis()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftSettings {
    pub key: String,
    pub ttl: Duration,
    pub debounce: Duration,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_DRAFT_KEY.to_owned(),
            ttl: Duration::from_secs(60),
            debounce: Duration::from_millis(300),
        }
    }
}

struct Inner<K, S: Scheduler, C> {
    store: K,
    scheduler: S,
    clock: C,
    settings: DraftSettings,
    pending_save: RefCell<Option<S::Handle>>,
}

impl<K: KeyValueStore, S: Scheduler, C: Clock> Inner<K, S, C> {
    fn save(&self, fields: &ContactFields) {
        let draft = Draft::snapshot(fields, self.clock.now_ms());
        let written = serde_json::to_string(&draft)
            .map_err(DraftError::from)
            .and_then(|json| self.store.set(&self.settings.key, &json));
        match written {
            Ok(()) => debug!(key = %self.settings.key, "form draft saved"),
            Err(e) => warn!(error = %e, "could not save form draft"),
        }
    }

    fn cancel_pending_save(&self) {
        let pending = self.pending_save.borrow_mut().take();
        drop(pending);
    }
}

/// Owns the debounce timer for one form on one page.
pub struct DraftManager<K, S: Scheduler, C> {
    inner: Rc<Inner<K, S, C>>,
}

impl<K, S, C> DraftManager<K, S, C>
where
    K: KeyValueStore + 'static,
    S: Scheduler + 'static,
    C: Clock + 'static,
{
    pub fn new(store: K, scheduler: S, clock: C, settings: DraftSettings) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                scheduler,
                clock,
                settings,
                pending_save: RefCell::new(None),
            }),
        }
    }

    /// Read the stored draft once at load. Returns it only when fresh;
    /// expired drafts are deleted, unreadable ones are logged and ignored.
    pub fn restore(&self) -> Option<Draft> {
        let inner = &self.inner;
        let raw = inner.store.get(&inner.settings.key)?;
        let draft: Draft = match serde_json::from_str(&raw) {
            Ok(draft) => draft,
            Err(e) => {
                warn!(error = %DraftError::from(e), "ignoring stored form draft");
                return None;
            }
        };

        if draft.is_fresh(inner.clock.now_ms(), inner.settings.ttl) {
            info!("restoring form draft");
            Some(draft)
        } else {
            info!("discarding expired form draft");
            inner.store.remove(&inner.settings.key);
            None
        }
    }

    /// A form control changed. Re-arms the debounced save with the current
    /// values and, when `correo` changed, returns its check for the inline
    /// error.
    pub fn on_field_input(
        &self,
        fields: &ContactFields,
        changed: Option<ContactField>,
    ) -> Option<EmailCheck> {
        let check =
            (changed == Some(ContactField::Correo)).then(|| email::check_email(&fields.correo));

        let snapshot = fields.clone();
        let weak: Weak<Inner<K, S, C>> = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.settings.debounce,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.pending_save.borrow_mut().take();
                    inner.save(&snapshot);
                }
            }),
        );
        let previous = self.inner.pending_save.borrow_mut().replace(handle);
        drop(previous);

        check
    }

    /// Validate and send the form. On acceptance the draft (and any pending
    /// save) is cleared; on any failure it is kept so nothing typed is lost.
    pub async fn on_submit<E>(
        &self,
        fields: &ContactFields,
        endpoint: &E,
    ) -> Result<(), SubmitError>
    where
        E: ContactEndpoint + ?Sized,
    {
        if !email::is_valid_institutional_email(&fields.correo) {
            return Err(SubmitError::InvalidEmail);
        }

        let reply = match endpoint.submit(fields).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "contact form submission failed");
                return Err(e);
            }
        };

        if reply.is_ok() {
            self.inner.cancel_pending_save();
            self.inner.store.remove(&self.inner.settings.key);
            info!("contact form accepted");
            Ok(())
        } else {
            let message = reply.message.unwrap_or(reply.status);
            warn!(%message, "contact form rejected");
            Err(SubmitError::Rejected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ManualScheduler, MemoryStore, ScriptedEndpoint};

    const NOW: u64 = 1_760_000_000_000;

    type Manager = DraftManager<Rc<MemoryStore>, ManualScheduler, ManualScheduler>;

    fn setup() -> (Manager, Rc<MemoryStore>, ManualScheduler) {
        let store = Rc::new(MemoryStore::default());
        let scheduler = ManualScheduler::starting_at(NOW);
        let manager = DraftManager::new(
            Rc::clone(&store),
            scheduler.clone(),
            scheduler.clone(),
            DraftSettings::default(),
        );
        (manager, store, scheduler)
    }

    fn fields(nombre: &str, correo: &str) -> ContactFields {
        ContactFields {
            nombre: nombre.into(),
            correo: correo.into(),
            destinatario: "secretaria".into(),
            mensaje: "Consulta sobre horarios".into(),
        }
    }

    fn stored(store: &MemoryStore) -> Option<Draft> {
        store
            .get(DEFAULT_DRAFT_KEY)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn put(store: &MemoryStore, raw: &str) {
        store.set(DEFAULT_DRAFT_KEY, raw).unwrap();
    }

    #[test]
    fn restore_without_draft_is_noop() {
        let (manager, _, _) = setup();
        assert_eq!(manager.restore(), None);
    }

    #[test]
    fn restore_returns_fresh_draft() {
        let (manager, store, _) = setup();
        let draft = Draft::snapshot(&fields("Ana", "ana@dsm.edu.ni"), NOW - 30_000);
        put(&store, &serde_json::to_string(&draft).unwrap());

        assert_eq!(manager.restore(), Some(draft));
        assert!(store.contains(DEFAULT_DRAFT_KEY));
    }

    #[test]
    fn restore_accepts_draft_exactly_at_expiry() {
        let (manager, store, _) = setup();
        put(&store, &format!(r#"{{"nombre":"Ana","timestamp":{}}}"#, NOW - 60_000));
        assert!(manager.restore().is_some());
    }

    #[test]
    fn expired_draft_is_deleted() {
        let (manager, store, _) = setup();
        let draft = Draft::snapshot(&fields("Ana", ""), NOW - 61_000);
        put(&store, &serde_json::to_string(&draft).unwrap());

        assert_eq!(manager.restore(), None);
        assert!(!store.contains(DEFAULT_DRAFT_KEY));
    }

    #[test]
    fn draft_without_timestamp_is_expired() {
        let (manager, store, _) = setup();
        put(&store, r#"{"nombre":"Ana"}"#);
        assert_eq!(manager.restore(), None);
        assert!(!store.contains(DEFAULT_DRAFT_KEY));
    }

    #[test]
    fn malformed_draft_is_ignored() {
        let (manager, store, _) = setup();
        put(&store, "{not json");
        assert_eq!(manager.restore(), None);
    }

    #[test]
    fn partial_draft_skips_missing_fields() {
        let (manager, store, _) = setup();
        put(&store, &format!(r#"{{"correo":"a@dsm.edu.ni","timestamp":{}}}"#, NOW - 1_000));
        let draft = manager.restore().unwrap();
        assert_eq!(draft.get(ContactField::Correo), Some("a@dsm.edu.ni"));
        assert_eq!(draft.get(ContactField::Nombre), None);
        assert_eq!(draft.get(ContactField::Mensaje), None);
    }

    #[test]
    fn inputs_within_debounce_coalesce_into_one_write() {
        let (manager, store, scheduler) = setup();
        manager.on_field_input(&fields("A", ""), Some(ContactField::Nombre));
        scheduler.advance(Duration::from_millis(100));
        manager.on_field_input(&fields("An", ""), Some(ContactField::Nombre));
        scheduler.advance(Duration::from_millis(100));
        manager.on_field_input(&fields("Ana", ""), Some(ContactField::Nombre));
        assert_eq!(store.writes(), 0);

        scheduler.advance(Duration::from_millis(299));
        assert_eq!(store.writes(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(store.writes(), 1);
        assert_eq!(scheduler.pending(), 0);

        let draft = stored(&store).unwrap();
        assert_eq!(draft.nombre.as_deref(), Some("Ana"));
        assert_eq!(draft.timestamp, NOW + 500);
    }

    #[test]
    fn spaced_inputs_each_write() {
        let (manager, store, scheduler) = setup();
        manager.on_field_input(&fields("A", ""), None);
        scheduler.advance(Duration::from_millis(300));
        manager.on_field_input(&fields("B", ""), None);
        scheduler.advance(Duration::from_millis(300));
        assert_eq!(store.writes(), 2);
        assert_eq!(stored(&store).unwrap().nombre.as_deref(), Some("B"));
    }

    #[test]
    fn correo_input_reports_check() {
        let (manager, _, _) = setup();
        assert_eq!(
            manager.on_field_input(&fields("", "a@other.com"), Some(ContactField::Correo)),
            Some(EmailCheck::Invalid)
        );
        assert_eq!(
            manager.on_field_input(&fields("", ""), Some(ContactField::Correo)),
            Some(EmailCheck::Empty)
        );
        assert_eq!(
            manager.on_field_input(&fields("x", "a@other.com"), Some(ContactField::Nombre)),
            None
        );
    }

    #[tokio::test]
    async fn accepted_submit_clears_draft() {
        let (manager, store, scheduler) = setup();
        let form = fields("Ana", "ana@dsm.edu.ni");
        manager.on_field_input(&form, None);
        scheduler.advance(Duration::from_millis(300));
        assert!(store.contains(DEFAULT_DRAFT_KEY));

        let endpoint = ScriptedEndpoint::replying("ok", None);
        assert_eq!(manager.on_submit(&form, &endpoint).await, Ok(()));
        assert!(!store.contains(DEFAULT_DRAFT_KEY));
        assert_eq!(endpoint.sent.borrow().as_slice(), &[form]);
    }

    #[tokio::test]
    async fn accepted_submit_cancels_pending_save() {
        let (manager, store, scheduler) = setup();
        let form = fields("Ana", "ana@dsm.edu.ni");
        manager.on_field_input(&form, None);

        let endpoint = ScriptedEndpoint::replying("ok", None);
        manager.on_submit(&form, &endpoint).await.unwrap();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(store.writes(), 0);
        assert!(!store.contains(DEFAULT_DRAFT_KEY));
    }

    #[tokio::test]
    async fn rejected_submit_keeps_draft() {
        let (manager, store, scheduler) = setup();
        let form = fields("Ana", "ana@dsm.edu.ni");
        manager.on_field_input(&form, None);
        scheduler.advance(Duration::from_millis(300));

        let endpoint = ScriptedEndpoint::replying("error", Some("x"));
        let err = manager.on_submit(&form, &endpoint).await.unwrap_err();
        assert_eq!(err, SubmitError::Rejected("x".into()));
        assert!(err.alert_text().unwrap().contains('x'));
        assert!(store.contains(DEFAULT_DRAFT_KEY));
    }

    #[tokio::test]
    async fn transport_failure_keeps_draft() {
        let (manager, store, scheduler) = setup();
        let form = fields("Ana", "ana@dsm.edu.ni");
        manager.on_field_input(&form, None);
        scheduler.advance(Duration::from_millis(300));

        let endpoint = ScriptedEndpoint::unreachable();
        let err = manager.on_submit(&form, &endpoint).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert!(store.contains(DEFAULT_DRAFT_KEY));
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_endpoint() {
        let (manager, store, scheduler) = setup();
        let form = fields("Ana", "ana@gmail.com");
        manager.on_field_input(&form, None);
        scheduler.advance(Duration::from_millis(300));

        let endpoint = ScriptedEndpoint::replying("ok", None);
        assert_eq!(
            manager.on_submit(&form, &endpoint).await,
            Err(SubmitError::InvalidEmail)
        );
        assert!(endpoint.sent.borrow().is_empty());
        assert_eq!(store.writes(), 1);
        assert!(store.contains(DEFAULT_DRAFT_KEY));
    }

    #[test]
    fn field_names_round_trip() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::from_name(field.name()), Some(field));
        }
        assert_eq!(ContactField::from_name("telefono"), None);
    }
}
