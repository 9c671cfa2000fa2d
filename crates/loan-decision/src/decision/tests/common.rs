use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::decision::registry::{
    AgeReconciliation, ClientRegistry, InMemoryClientRegistry, RegistryError,
};
use crate::decision::{DecisionEngine, DecisionLimits, DecisionRequest};

pub(super) const UNKNOWN_CODE: &str = "38001085718";
pub(super) const ZERO_MODIFIER_CODE: &str = "49002010965";
pub(super) const NEW_CLIENT_CODE: &str = "49002010976";
pub(super) const RETURNING_CLIENT_CODE: &str = "49002010987";
pub(super) const HIGH_MODIFIER_CODE: &str = "49002010998";
pub(super) const LOW_CAPACITY_CODE: &str = "39002010056";

pub(super) const BIRTH_DATE: &str = "01.02.1990";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

pub(super) fn client_registry() -> InMemoryClientRegistry {
    InMemoryClientRegistry::from_json_str(
        r#"{"Clients_Information": [
            {"Personal_ID": "49002010965", "Age": "01.02.1990", "CM": 0},
            {"Personal_ID": "49002010976", "Age": "", "CM": 100},
            {"Personal_ID": "49002010987", "Age": "01.02.1990", "CM": 300},
            {"Personal_ID": "49002010998", "Age": "", "CM": 1000},
            {"Personal_ID": "39002010056", "Age": "", "CM": 33}
        ]}"#,
    )
    .expect("fixture dataset parses")
}

pub(super) fn request(personal_code: &str, age: &str, amount: u64, period: u32) -> DecisionRequest {
    DecisionRequest::new(personal_code, age, amount, period)
}

pub(super) fn build_engine() -> (DecisionEngine<RecordingRegistry>, Arc<RecordingRegistry>) {
    let registry = Arc::new(RecordingRegistry::new(client_registry()));
    let engine = DecisionEngine::new(registry.clone(), DecisionLimits::default());
    (engine, registry)
}

/// In-memory registry that counts save-hook invocations.
pub(super) struct RecordingRegistry {
    inner: InMemoryClientRegistry,
    persisted: AtomicUsize,
    fail_saves: bool,
}

impl RecordingRegistry {
    pub(super) fn new(inner: InMemoryClientRegistry) -> Self {
        Self {
            inner,
            persisted: AtomicUsize::new(0),
            fail_saves: false,
        }
    }

    pub(super) fn failing_saves(inner: InMemoryClientRegistry) -> Self {
        Self {
            fail_saves: true,
            ..Self::new(inner)
        }
    }

    pub(super) fn persist_calls(&self) -> usize {
        self.persisted.load(Ordering::SeqCst)
    }
}

impl ClientRegistry for RecordingRegistry {
    fn credit_modifier(&self, personal_id: &str) -> Result<Option<u32>, RegistryError> {
        self.inner.credit_modifier(personal_id)
    }

    fn reconcile_age(
        &self,
        personal_id: &str,
        submitted_age: &str,
    ) -> Result<AgeReconciliation, RegistryError> {
        self.inner.reconcile_age(personal_id, submitted_age)
    }

    fn age_of(&self, personal_id: &str) -> Result<Option<String>, RegistryError> {
        self.inner.age_of(personal_id)
    }

    fn persist(&self) -> Result<(), RegistryError> {
        self.persisted.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(RegistryError::Unavailable("save rejected".to_string()));
        }
        self.inner.persist()
    }
}

pub(super) struct UnavailableRegistry;

impl ClientRegistry for UnavailableRegistry {
    fn credit_modifier(&self, _personal_id: &str) -> Result<Option<u32>, RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }

    fn reconcile_age(
        &self,
        _personal_id: &str,
        _submitted_age: &str,
    ) -> Result<AgeReconciliation, RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }

    fn age_of(&self, _personal_id: &str) -> Result<Option<String>, RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }

    fn persist(&self) -> Result<(), RegistryError> {
        Err(RegistryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
