//! Record Fetcher boundary — the only place the engine touches I/O.
//!
//! External collaborators deliver loosely-typed raw records; the single
//! normalization step here maps them into the strict shapes under
//! `crate::models`, substituting neutral values for missing fields so the
//! aggregation layers can assume well-typed, non-null inputs. A malformed
//! record is never dropped and never raises an error.

pub mod memory;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::models::{
    Appointment, AppointmentStatus, Evaluation, Modality, Patient, Payment, PaymentStatus,
    SessionRate, Severity,
};
use crate::window::DateRange;

/// Failure at the fetch boundary. Always recovered locally by the caller:
/// the affected collection is treated as empty, the overall result is
/// still returned with degraded fields, and the failure is surfaced as a
/// non-fatal diagnostic — never thrown to the UI.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("fetch timed out after {0} ms")]
    Timeout(u64),

    #[error("backend rejected request: {0}")]
    Backend(String),
}

/// Query capabilities the engine consumes, parameterized by professional
/// identity and optional time range. Implementations filter server-side;
/// fetches within one public call are independent and may be dispatched
/// concurrently.
pub trait DataSource: Send + Sync {
    /// Appointments for the professional, optionally limited to a range.
    ///
    /// A ranged fetch returns only appointments whose scheduled instant
    /// falls inside the range; records without a scheduled instant appear
    /// only in unranged fetches, where they count toward lifetime tallies.
    fn fetch_appointments(
        &self,
        professional_id: Uuid,
        range: Option<&DateRange>,
    ) -> impl Future<Output = Result<Vec<RawAppointment>, SourceError>> + Send;

    /// Payments scoped to the professional's caseload, optionally limited
    /// to a settlement range.
    ///
    /// Unsettled records (`paid_at == None`) must be attributed to every
    /// windowed request: the engine reads the pending-payment count for
    /// the current month off the ranged fetch, and an implementation that
    /// drops undated records would report it as zero.
    fn fetch_payments(
        &self,
        professional_id: Uuid,
        range: Option<&DateRange>,
    ) -> impl Future<Output = Result<Vec<RawPayment>, SourceError>> + Send;

    fn fetch_latest_evaluation(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<RawEvaluation>, SourceError>> + Send;

    fn fetch_session_rate(
        &self,
        professional_id: Uuid,
    ) -> impl Future<Output = Result<Option<SessionRate>, SourceError>> + Send;

    fn fetch_patients(
        &self,
        professional_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Patient>, SourceError>> + Send;
}

// ---------------------------------------------------------------------------
// Raw record shapes
// ---------------------------------------------------------------------------

/// Appointment as delivered by the backend, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAppointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_min: Option<u32>,
    pub modality: Option<String>,
    pub status: Option<String>,
}

/// Payment as delivered by the backend, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Evaluation as delivered by the backend, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvaluation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub score: Option<f64>,
    pub severity: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Parse a categorical field, substituting the default for absent or
/// unrecognized values.
fn parse_or<T>(value: Option<&str>, default: T, field: &str) -> T
where
    T: std::str::FromStr + Copy,
{
    match value {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            tracing::debug!(value = s, field, "unrecognized value; substituting default");
            default
        }),
    }
}

pub fn normalize_appointment(raw: RawAppointment) -> Appointment {
    let scheduled_at = raw.scheduled_at.unwrap_or_else(|| {
        tracing::debug!(id = %raw.id, "appointment without scheduled instant");
        DateTime::<Utc>::UNIX_EPOCH
    });
    Appointment {
        id: raw.id,
        professional_id: raw.professional_id,
        patient_id: raw.patient_id,
        scheduled_at,
        duration_min: raw.duration_min.unwrap_or(config::DEFAULT_SESSION_MINUTES),
        modality: parse_or(raw.modality.as_deref(), Modality::Remote, "modality"),
        status: parse_or(
            raw.status.as_deref(),
            AppointmentStatus::Pending,
            "appointment status",
        ),
    }
}

pub fn normalize_payment(raw: RawPayment) -> Payment {
    Payment {
        id: raw.id,
        patient_id: raw.patient_id,
        appointment_id: raw.appointment_id,
        amount: raw.amount.unwrap_or(0.0),
        currency: raw
            .currency
            .unwrap_or_else(|| config::DEFAULT_CURRENCY.to_string()),
        status: parse_or(
            raw.status.as_deref(),
            PaymentStatus::Pending,
            "payment status",
        ),
        paid_at: raw.paid_at,
    }
}

pub fn normalize_evaluation(raw: RawEvaluation) -> Evaluation {
    Evaluation {
        id: raw.id,
        patient_id: raw.patient_id,
        score: raw.score.unwrap_or(0.0),
        severity: parse_or(raw.severity.as_deref(), Severity::Minimal, "severity"),
        created_at: raw.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    }
}

pub fn normalize_appointments(raw: Vec<RawAppointment>) -> Vec<Appointment> {
    raw.into_iter().map(normalize_appointment).collect()
}

pub fn normalize_payments(raw: Vec<RawPayment>) -> Vec<Payment> {
    raw.into_iter().map(normalize_payment).collect()
}
