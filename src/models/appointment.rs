use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, Modality};

/// A scheduled session between a professional and a patient.
///
/// Status transitions are monotonic in time in a consistent dataset
/// (a past-dated appointment is never `pending`), but the engine
/// tolerates inconsistent data and simply counts what it sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_min: u32,
    pub modality: Modality,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether this appointment counts toward patient activity
    /// (completed or confirmed; cancelled/no-show/pending never do).
    pub fn counts_as_activity(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Completed | AppointmentStatus::Confirmed
        )
    }
}
