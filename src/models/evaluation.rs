use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Severity;

/// Outcome of a clinical evaluation instrument. The scoring algorithm is
/// external; only the resulting numeric score and severity label are
/// consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub score: f64,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}
