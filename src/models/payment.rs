use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::PaymentStatus;

/// A processed charge from the payment provider. Only the output record
/// is consumed here; the checkout and webhook flow lives elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Absent when the payment belongs to a subscription instead of a
    /// single appointment.
    pub appointment_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    /// Settlement instant; `None` until the payment settles.
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
