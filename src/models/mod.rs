//! Strict internal record shapes consumed by the analytics engine.
//!
//! External collaborators own and mutate these records; the engine only
//! reads them. Every field here is non-optional unless the domain itself
//! allows absence (e.g. a payment not yet settled has no `paid_at`).
//! Raw fetched records with missing fields never reach these shapes
//! directly — they pass through the normalization step at the source
//! boundary first (see `crate::source`).

pub mod appointment;
pub mod enums;
pub mod evaluation;
pub mod patient;
pub mod payment;
pub mod professional;

pub use appointment::Appointment;
pub use enums::{AppointmentStatus, DeltaKind, Modality, PaymentStatus, RiskState, Severity};
pub use evaluation::Evaluation;
pub use patient::Patient;
pub use payment::Payment;
pub use professional::SessionRate;

use thiserror::Error;

/// Parse failure for a categorical field value.
#[derive(Error, Debug)]
#[error("invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: &'static str,
    pub value: String,
}
