use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, error, info};

use super::domain::{ClientDataset, ClientRecord};

const BUNDLED_CLIENT_DATA: &str = include_str!("../../data/client_data.json");

/// Storage abstraction so the engine can be exercised in isolation.
pub trait ClientRegistry: Send + Sync {
    /// `None` when no record matches or nothing was loaded.
    fn credit_modifier(&self, personal_id: &str) -> Result<Option<u32>, RegistryError>;
    /// Binds `submitted_age` to the record the first time, then only confirms it.
    fn reconcile_age(
        &self,
        personal_id: &str,
        submitted_age: &str,
    ) -> Result<AgeReconciliation, RegistryError>;
    fn age_of(&self, personal_id: &str) -> Result<Option<String>, RegistryError>;
    /// Save hook for registered ages. Best-effort: a failed save is logged and
    /// the decision still stands.
    fn persist(&self) -> Result<(), RegistryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeReconciliation {
    /// Stored age was empty and now holds the submission.
    Registered,
    /// Stored age equals the submission.
    Confirmed,
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("age is required for first-time users")]
    AgeRequired,
    #[error("submitted age conflicts with the stored age")]
    AgeConflict,
    #[error("client registry unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open client dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse client dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

struct ClientEntry {
    personal_id: String,
    credit_modifier: u32,
    age: Mutex<String>,
}

impl ClientEntry {
    fn stored_age(&self) -> Result<String, RegistryError> {
        self.age
            .lock()
            .map(|age| age.clone())
            .map_err(|_| poisoned(&self.personal_id))
    }
}

fn poisoned(personal_id: &str) -> RegistryError {
    RegistryError::Unavailable(format!("age lock poisoned for client {personal_id}"))
}

/// Client table loaded once; only an empty age may later be filled in.
#[derive(Default)]
pub struct InMemoryClientRegistry {
    entries: Vec<ClientEntry>,
}

impl InMemoryClientRegistry {
    pub fn from_dataset(dataset: ClientDataset) -> Self {
        let entries = dataset
            .clients
            .into_iter()
            .map(|record| ClientEntry {
                personal_id: record.personal_id,
                credit_modifier: record.credit_modifier,
                age: Mutex::new(record.age),
            })
            .collect();

        Self { entries }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset: ClientDataset = serde_json::from_reader(reader)?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let dataset: ClientDataset = serde_json::from_str(raw)?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Dataset compiled into the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json_str(BUNDLED_CLIENT_DATA)
    }

    /// Startup loader: a dataset that cannot be read leaves the registry empty,
    /// so every request is answered with "no valid loan".
    pub fn load(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        };

        match loaded {
            Ok(registry) => {
                info!(clients = registry.len(), source = ?path, "client data loaded");
                registry
            }
            Err(err) => {
                error!(error = %err, source = ?path, "client data unavailable, starting empty");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of every record in dataset order.
    pub fn snapshot(&self) -> Result<Vec<ClientRecord>, RegistryError> {
        self.entries
            .iter()
            .map(|entry| {
                Ok(ClientRecord {
                    personal_id: entry.personal_id.clone(),
                    age: entry.stored_age()?,
                    credit_modifier: entry.credit_modifier,
                })
            })
            .collect()
    }

    fn find(&self, personal_id: &str) -> Option<&ClientEntry> {
        self.entries
            .iter()
            .find(|entry| entry.personal_id == personal_id)
    }
}

impl ClientRegistry for InMemoryClientRegistry {
    fn credit_modifier(&self, personal_id: &str) -> Result<Option<u32>, RegistryError> {
        Ok(self.find(personal_id).map(|entry| entry.credit_modifier))
    }

    fn reconcile_age(
        &self,
        personal_id: &str,
        submitted_age: &str,
    ) -> Result<AgeReconciliation, RegistryError> {
        let Some(entry) = self.find(personal_id) else {
            return Ok(AgeReconciliation::NotFound);
        };

        let mut stored = entry.age.lock().map_err(|_| poisoned(personal_id))?;
        if stored.is_empty() {
            if submitted_age.is_empty() {
                return Err(RegistryError::AgeRequired);
            }
            *stored = submitted_age.to_string();
            return Ok(AgeReconciliation::Registered);
        }

        if *stored != submitted_age {
            return Err(RegistryError::AgeConflict);
        }
        Ok(AgeReconciliation::Confirmed)
    }

    fn age_of(&self, personal_id: &str) -> Result<Option<String>, RegistryError> {
        self.find(personal_id)
            .map(ClientEntry::stored_age)
            .transpose()
    }

    fn persist(&self) -> Result<(), RegistryError> {
        // TODO: write registered ages back once a client database is provisioned.
        debug!(
            clients = self.len(),
            "client persistence not configured, keeping ages in memory"
        );
        Ok(())
    }
}
