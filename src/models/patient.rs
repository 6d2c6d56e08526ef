use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient in a professional's caseload.
///
/// "Active" is derived, never stored: a patient is active when they have
/// a completed-or-confirmed appointment within the rolling lookback
/// window (see `config::ACTIVE_PATIENT_LOOKBACK_DAYS`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
