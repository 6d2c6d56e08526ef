//! Aggregator — grouping and reduction of fetched records.
//!
//! Everything here is pure and synchronous over already-fetched data.
//! Grouped outputs use ordered collections so the same input yields the
//! same result regardless of arrival order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, Payment, PaymentStatus};
use crate::window::DateRange;

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

/// Per-status appointment counters for one set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub no_show: u32,
}

/// Lifetime appointment tally for one patient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatientTally {
    pub total: u32,
    pub completed: u32,
    pub confirmed: u32,
    pub cancelled: u32,
    pub no_show: u32,
    pub last_scheduled_at: Option<DateTime<Utc>>,
}

/// Partitions appointments by status.
pub fn status_counts(appointments: &[Appointment]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for appt in appointments {
        counts.total += 1;
        match appt.status {
            AppointmentStatus::Pending => counts.pending += 1,
            AppointmentStatus::Confirmed => counts.confirmed += 1,
            AppointmentStatus::Completed => counts.completed += 1,
            AppointmentStatus::Cancelled => counts.cancelled += 1,
            AppointmentStatus::NoShow => counts.no_show += 1,
        }
    }
    counts
}

/// Groups appointments by patient into per-patient tallies.
pub fn group_by_patient(appointments: &[Appointment]) -> BTreeMap<Uuid, PatientTally> {
    let mut tallies: BTreeMap<Uuid, PatientTally> = BTreeMap::new();
    for appt in appointments {
        let tally = tallies.entry(appt.patient_id).or_default();
        tally.total += 1;
        match appt.status {
            AppointmentStatus::Completed => tally.completed += 1,
            AppointmentStatus::Confirmed => tally.confirmed += 1,
            AppointmentStatus::Cancelled => tally.cancelled += 1,
            AppointmentStatus::NoShow => tally.no_show += 1,
            AppointmentStatus::Pending => {}
        }
        if tally
            .last_scheduled_at
            .map(|last| appt.scheduled_at > last)
            .unwrap_or(true)
        {
            tally.last_scheduled_at = Some(appt.scheduled_at);
        }
    }
    tallies
}

/// Distinct patients with a completed-or-confirmed appointment inside the
/// window. This is the active-patient rule: cancelled, no-show and pending
/// appointments never count toward activity.
pub fn active_patient_ids(
    appointments: &[Appointment],
    window: &DateRange,
) -> BTreeSet<Uuid> {
    appointments
        .iter()
        .filter(|a| a.counts_as_activity() && window.contains(a.scheduled_at))
        .map(|a| a.patient_id)
        .collect()
}

/// Adherence percentage: completed over scheduled, rounded. Defined as 0
/// when nothing was scheduled.
pub fn adherence_rate(completed: u32, scheduled: u32) -> u32 {
    if scheduled == 0 {
        return 0;
    }
    (100.0 * f64::from(completed) / f64::from(scheduled)).round() as u32
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Per-status payment counters for one set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentStatusCounts {
    pub total: u32,
    pub pending: u32,
    pub processing: u32,
    pub completed: u32,
    pub failed: u32,
    pub refunded: u32,
    pub cancelled: u32,
}

/// Partitions payments by status.
pub fn payment_status_counts(payments: &[Payment]) -> PaymentStatusCounts {
    let mut counts = PaymentStatusCounts::default();
    for payment in payments {
        counts.total += 1;
        match payment.status {
            PaymentStatus::Pending => counts.pending += 1,
            PaymentStatus::Processing => counts.processing += 1,
            PaymentStatus::Completed => counts.completed += 1,
            PaymentStatus::Failed => counts.failed += 1,
            PaymentStatus::Refunded => counts.refunded += 1,
            PaymentStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

/// Sum of completed payment amounts. Pending, failed, refunded and
/// cancelled payments contribute nothing.
pub fn completed_payment_total(payments: &[Payment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.is_completed())
        .map(|p| p.amount)
        .sum()
}

/// One patient's completed-payment revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRevenue {
    pub patient_id: Uuid,
    pub total: f64,
    pub payments: u32,
    pub first_paid_at: Option<DateTime<Utc>>,
}

/// Groups completed payments by patient, sums and counts them, then ranks
/// descending by total. Ties are broken by earlier first payment; the sort
/// is stable, so full ties keep encounter order. Truncated to `limit`.
pub fn rank_patients_by_revenue(payments: &[Payment], limit: usize) -> Vec<PatientRevenue> {
    let mut ranking: Vec<PatientRevenue> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for payment in payments.iter().filter(|p| p.is_completed()) {
        let slot = *index.entry(payment.patient_id).or_insert_with(|| {
            ranking.push(PatientRevenue {
                patient_id: payment.patient_id,
                total: 0.0,
                payments: 0,
                first_paid_at: None,
            });
            ranking.len() - 1
        });
        let entry = &mut ranking[slot];
        entry.total += payment.amount;
        entry.payments += 1;
        if let Some(paid_at) = payment.paid_at {
            if entry.first_paid_at.map(|first| paid_at < first).unwrap_or(true) {
                entry.first_paid_at = Some(paid_at);
            }
        }
    }

    ranking.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.first_paid_at.cmp(&b.first_paid_at))
    });
    ranking.truncate(limit);
    ranking
}
