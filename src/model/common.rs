use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

/// Name of a work package attribute as used by filters and schemas (e.g. "status")
pub type AttributeName = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Audit information attached to persisted board objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Audit {
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::now()
    }
}
