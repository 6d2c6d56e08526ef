//! Patient State Classifier — risk label + progress score per patient.
//!
//! The label comes from the most recent evaluation's severity; the score
//! blends the severity base with the patient's lifetime appointment
//! completion ratio. No evaluation on file is not an error: it is treated
//! like a low-severity outcome.

use crate::aggregate::PatientTally;
use crate::models::{Evaluation, RiskState, Severity};

/// Derived risk state and 0–100 progress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub state: RiskState,
    pub progress: u8,
}

/// Severity-to-base mapping:
/// severe / moderately-severe → CRITICAL 30, moderate → ALERT 50,
/// mild / minimal / none → STABLE 75.
fn base_for(severity: Option<Severity>) -> (RiskState, f64) {
    match severity {
        Some(Severity::Severe) | Some(Severity::ModeratelySevere) => (RiskState::Critical, 30.0),
        Some(Severity::Moderate) => (RiskState::Alert, 50.0),
        _ => (RiskState::Stable, 75.0),
    }
}

/// Classifies one patient from their latest evaluation and lifetime
/// appointment tally. With at least one appointment on file, the final
/// score is the rounded average of the severity base and
/// `100 × completed/total`, clamped to [0, 100].
pub fn classify(
    latest: Option<&Evaluation>,
    appointments: Option<&PatientTally>,
) -> Classification {
    let (state, base) = base_for(latest.map(|e| e.severity));

    let score = match appointments {
        Some(tally) if tally.total > 0 => {
            let ratio = 100.0 * f64::from(tally.completed) / f64::from(tally.total);
            ((base + ratio) / 2.0).round()
        }
        _ => base,
    };

    Classification {
        state,
        progress: score.clamp(0.0, 100.0) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn eval(severity: Severity) -> Evaluation {
        Evaluation {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            score: 12.0,
            severity,
            created_at: Utc::now(),
        }
    }

    fn tally(completed: u32, total: u32) -> PatientTally {
        PatientTally {
            total,
            completed,
            ..PatientTally::default()
        }
    }

    #[test]
    fn severity_mapping_without_appointments() {
        for (severity, state, score) in [
            (Severity::Severe, RiskState::Critical, 30),
            (Severity::ModeratelySevere, RiskState::Critical, 30),
            (Severity::Moderate, RiskState::Alert, 50),
            (Severity::Mild, RiskState::Stable, 75),
            (Severity::Minimal, RiskState::Stable, 75),
        ] {
            let c = classify(Some(&eval(severity)), None);
            assert_eq!(c.state, state, "{severity:?}");
            assert_eq!(c.progress, score, "{severity:?}");
        }
    }

    #[test]
    fn missing_evaluation_defaults_to_stable() {
        let c = classify(None, None);
        assert_eq!(c.state, RiskState::Stable);
        assert_eq!(c.progress, 75);
    }

    #[test]
    fn progress_blends_completion_ratio() {
        // Critical base 30, full adherence: (30 + 100) / 2 = 65.
        let c = classify(Some(&eval(Severity::Severe)), Some(&tally(4, 4)));
        assert_eq!(c.state, RiskState::Critical);
        assert_eq!(c.progress, 65);

        // Stable base 75, half adherence: (75 + 50) / 2 = 62.5 → 63.
        let c = classify(None, Some(&tally(2, 4)));
        assert_eq!(c.progress, 63);
    }

    #[test]
    fn zero_appointments_keeps_base_score() {
        let c = classify(Some(&eval(Severity::Moderate)), Some(&tally(0, 0)));
        assert_eq!(c.progress, 50);
    }

    #[test]
    fn progress_stays_in_bounds() {
        for completed in 0..=6 {
            for severity in [
                None,
                Some(Severity::Minimal),
                Some(Severity::Moderate),
                Some(Severity::Severe),
            ] {
                let e = severity.map(eval);
                let c = classify(e.as_ref(), Some(&tally(completed, 6)));
                assert!(c.progress <= 100);
            }
        }
    }
}
