//! In-memory `DataSource` backed by plain record vectors.
//!
//! Serves engine tests and preview screens: records are loaded up front,
//! reads filter by professional and range the way the hosted backend
//! does. Per-capability failure switches simulate backend outages for
//! degradation testing.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Patient, SessionRate};
use crate::window::DateRange;

use super::{DataSource, RawAppointment, RawEvaluation, RawPayment, SourceError};

/// Which fetch capabilities should fail with `SourceError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureModes {
    pub appointments: bool,
    pub payments: bool,
    pub evaluations: bool,
    pub session_rate: bool,
    pub patients: bool,
}

/// Construct-then-read store; no interior mutability, so it is trivially
/// `Send + Sync` and every fetch is idempotent.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub patients: Vec<(Uuid, Patient)>,
    pub appointments: Vec<RawAppointment>,
    pub payments: Vec<(Uuid, RawPayment)>,
    pub evaluations: Vec<RawEvaluation>,
    pub rates: HashMap<Uuid, SessionRate>,
    pub fail: FailureModes,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patient under a professional's caseload.
    pub fn add_patient(&mut self, professional_id: Uuid, patient: Patient) {
        self.patients.push((professional_id, patient));
    }

    pub fn add_appointment(&mut self, appointment: RawAppointment) {
        self.appointments.push(appointment);
    }

    /// Payments carry no professional reference of their own; the backend
    /// scopes them by caseload, so the store keys them explicitly.
    pub fn add_payment(&mut self, professional_id: Uuid, payment: RawPayment) {
        self.payments.push((professional_id, payment));
    }

    pub fn add_evaluation(&mut self, evaluation: RawEvaluation) {
        self.evaluations.push(evaluation);
    }

    pub fn set_rate(&mut self, professional_id: Uuid, rate: SessionRate) {
        self.rates.insert(professional_id, rate);
    }

    fn unavailable(what: &str) -> SourceError {
        SourceError::Unavailable(format!("{what} backend offline"))
    }
}

impl DataSource for MemorySource {
    async fn fetch_appointments(
        &self,
        professional_id: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<RawAppointment>, SourceError> {
        if self.fail.appointments {
            return Err(Self::unavailable("appointments"));
        }
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.professional_id == professional_id)
            .filter(|a| match (range, a.scheduled_at) {
                (Some(r), Some(at)) => r.contains(at),
                // An undated appointment belongs to no window; it only
                // shows up in unranged lifetime fetches.
                (Some(_), None) => false,
                (None, _) => true,
            })
            .cloned()
            .collect())
    }

    async fn fetch_payments(
        &self,
        professional_id: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<RawPayment>, SourceError> {
        if self.fail.payments {
            return Err(Self::unavailable("payments"));
        }
        Ok(self
            .payments
            .iter()
            .filter(|(prof, _)| *prof == professional_id)
            .map(|(_, p)| p)
            .filter(|p| match (range, p.paid_at) {
                (Some(r), Some(at)) => r.contains(at),
                // Unsettled payments are attributed to the requested
                // window, mirroring the backend's pending-charge query.
                (Some(_), None) => true,
                (None, _) => true,
            })
            .cloned()
            .collect())
    }

    async fn fetch_latest_evaluation(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<RawEvaluation>, SourceError> {
        if self.fail.evaluations {
            return Err(Self::unavailable("evaluations"));
        }
        Ok(self
            .evaluations
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .max_by_key(|e| e.created_at)
            .cloned())
    }

    async fn fetch_session_rate(
        &self,
        professional_id: Uuid,
    ) -> Result<Option<SessionRate>, SourceError> {
        if self.fail.session_rate {
            return Err(Self::unavailable("session rate"));
        }
        Ok(self.rates.get(&professional_id).cloned())
    }

    async fn fetch_patients(&self, professional_id: Uuid) -> Result<Vec<Patient>, SourceError> {
        if self.fail.patients {
            return Err(Self::unavailable("patients"));
        }
        Ok(self
            .patients
            .iter()
            .filter(|(prof, _)| *prof == professional_id)
            .map(|(_, p)| p.clone())
            .collect())
    }
}
