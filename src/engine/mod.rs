//! Metrics Assembler — composes windows, aggregation, trends and
//! classification into the three dashboard results.
//!
//! Each public call is request-scoped and idempotent given the same
//! underlying records: no caches, no shared mutable state. The only I/O
//! happens at the `DataSource` boundary; independent fetches within one
//! call are dispatched concurrently and joined before assembly. A fetch
//! failure degrades its fields to neutral values and lands in the
//! result's `degraded` list — it never aborts the call.

pub mod types;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use futures_util::join;
use thiserror::Error;
use uuid::Uuid;

use crate::aggregate;
use crate::classify;
use crate::config;
use crate::models::{Appointment, DeltaKind, Payment, SessionRate};
use crate::source::{self, DataSource, SourceError};
use crate::trend;
use crate::window;

pub use types::{
    FinancialSummary, MetricsSnapshot, MonthlyDelta, MonthlyRevenuePoint, PatientRoster,
    PatientSnapshot, TopPatient,
};

/// The only fault that crosses the public boundary. Data-quality issues
/// and backend failures are recovered internally (see module docs).
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("invalid professional id: {0}")]
    InvalidProfessionalId(String),
}

/// Explicit injected default configuration. Substituted when a
/// professional has no configured session rate — a valid business state
/// for a not-yet-onboarded professional, so it is not reported as an
/// error. The default rate is zero, which makes revenue zero.
#[derive(Debug, Clone)]
pub struct EngineDefaults {
    pub session_rate: SessionRate,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            session_rate: SessionRate::zero(config::DEFAULT_CURRENCY),
        }
    }
}

/// The analytics engine over an injected record source.
pub struct AnalyticsEngine<S> {
    source: S,
    defaults: EngineDefaults,
}

fn parse_professional_id(professional_id: &str) -> Result<Uuid, AnalyticsError> {
    Uuid::parse_str(professional_id)
        .map_err(|_| AnalyticsError::InvalidProfessionalId(professional_id.to_string()))
}

/// Recovers a failed fetch with an empty set, recording the diagnostic.
fn recover<T>(
    result: Result<Vec<T>, SourceError>,
    what: &str,
    degraded: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, fetch = what, "fetch failed; substituting empty set");
            degraded.push(format!("{what}: {e}"));
            Vec::new()
        }
    }
}

fn month_delta(current: f64, previous: f64) -> MonthlyDelta {
    let valor = current - previous;
    let porcentaje = if previous > 0.0 {
        (100.0 * valor.abs() / previous).round() as u32
    } else {
        0
    };
    let tipo = if valor > 0.0 {
        DeltaKind::Positivo
    } else if valor < 0.0 {
        DeltaKind::Negativo
    } else {
        DeltaKind::Neutro
    };
    MonthlyDelta {
        valor,
        porcentaje,
        tipo,
    }
}

/// One weekly trend entry before the series are split apart.
struct WeeklyPoint {
    pacientes: u32,
    citas: u32,
    adherencia: u32,
    ingresos: f64,
}

impl<S: DataSource> AnalyticsEngine<S> {
    pub fn new(source: S, defaults: EngineDefaults) -> Self {
        Self { source, defaults }
    }

    // -----------------------------------------------------------------------
    // Patient roster
    // -----------------------------------------------------------------------

    pub async fn patient_roster(
        &self,
        professional_id: &str,
    ) -> Result<PatientRoster, AnalyticsError> {
        self.patient_roster_at(professional_id, Utc::now()).await
    }

    /// Roster computation against a fixed reference instant.
    pub async fn patient_roster_at(
        &self,
        professional_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PatientRoster, AnalyticsError> {
        let prof = parse_professional_id(professional_id)?;
        let mut degraded = Vec::new();

        let (patients_res, appointments_res) = join!(
            self.source.fetch_patients(prof),
            self.source.fetch_appointments(prof, None),
        );
        let patients = recover(patients_res, "patients", &mut degraded);
        let appointments =
            source::normalize_appointments(recover(appointments_res, "appointments", &mut degraded));

        let tallies = aggregate::group_by_patient(&appointments);
        let lookback = window::rolling_days(now, config::ACTIVE_PATIENT_LOOKBACK_DAYS);
        let active = aggregate::active_patient_ids(&appointments, &lookback);

        // One latest-evaluation fetch per patient, dispatched together. A
        // failed fetch degrades that patient to the no-evaluation path
        // instead of dropping them from the roster.
        let evaluations = join_all(
            patients
                .iter()
                .map(|p| self.source.fetch_latest_evaluation(p.id)),
        )
        .await;

        let mut pacientes = Vec::with_capacity(patients.len());
        for (patient, evaluation_res) in patients.into_iter().zip(evaluations) {
            let latest = match evaluation_res {
                Ok(raw) => raw.map(source::normalize_evaluation),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        patient = %patient.id,
                        "evaluation fetch failed; classifying without evaluation"
                    );
                    degraded.push(format!("evaluation for {}: {e}", patient.id));
                    None
                }
            };
            let tally = tallies.get(&patient.id).copied();
            let classification = classify::classify(latest.as_ref(), tally.as_ref());

            pacientes.push(PatientSnapshot {
                id: patient.id,
                activo: active.contains(&patient.id),
                nombre: patient.display_name,
                email: patient.email,
                telefono: patient.phone,
                citas_totales: tally.map(|t| t.total).unwrap_or(0),
                citas_completadas: tally.map(|t| t.completed).unwrap_or(0),
                ultima_cita: tally.and_then(|t| t.last_scheduled_at),
                estado: classification.state,
                progreso: classification.progress,
            });
        }

        Ok(PatientRoster { pacientes, degraded })
    }

    // -----------------------------------------------------------------------
    // Metrics snapshot
    // -----------------------------------------------------------------------

    pub async fn metrics_snapshot(
        &self,
        professional_id: &str,
    ) -> Result<MetricsSnapshot, AnalyticsError> {
        self.metrics_snapshot_at(professional_id, Utc::now()).await
    }

    /// Snapshot computation against a fixed reference instant.
    pub async fn metrics_snapshot_at(
        &self,
        professional_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MetricsSnapshot, AnalyticsError> {
        let prof = parse_professional_id(professional_id)?;
        let mut degraded = Vec::new();

        let lookback = window::rolling_days(now, config::ACTIVE_PATIENT_LOOKBACK_DAYS);
        let this_week = window::current_week(now);
        let coming_week = window::next_week(now);
        let this_month = window::current_month(now);
        let last_month = window::previous_month(now);
        let weekly = trend::weekly_windows(now, config::WEEKLY_TREND_WINDOWS);

        let (rolling_res, week_res, next_res, month_res, prev_res, rate_res, weekly_res) = join!(
            self.source.fetch_appointments(prof, Some(&lookback)),
            self.source.fetch_appointments(prof, Some(&this_week)),
            self.source.fetch_appointments(prof, Some(&coming_week)),
            self.source.fetch_appointments(prof, Some(&this_month)),
            self.source.fetch_appointments(prof, Some(&last_month)),
            self.source.fetch_session_rate(prof),
            join_all(
                weekly
                    .iter()
                    .map(|w| self.source.fetch_appointments(prof, Some(w))),
            ),
        );

        let rolling =
            source::normalize_appointments(recover(rolling_res, "appointments (30-day)", &mut degraded));
        let week = source::normalize_appointments(recover(
            week_res,
            "appointments (current week)",
            &mut degraded,
        ));
        let next = source::normalize_appointments(recover(
            next_res,
            "appointments (next week)",
            &mut degraded,
        ));
        let month = source::normalize_appointments(recover(
            month_res,
            "appointments (current month)",
            &mut degraded,
        ));
        let prev = source::normalize_appointments(recover(
            prev_res,
            "appointments (previous month)",
            &mut degraded,
        ));
        let rate = self.resolve_rate(rate_res, &mut degraded);
        let per_week: Vec<Vec<Appointment>> = weekly_res
            .into_iter()
            .enumerate()
            .map(|(i, res)| {
                source::normalize_appointments(recover(
                    res,
                    &format!("appointments (trend week {i})"),
                    &mut degraded,
                ))
            })
            .collect();

        let month_counts = aggregate::status_counts(&month);
        let prev_counts = aggregate::status_counts(&prev);

        // Each per-window set is already scoped to its week by the fetch,
        // so the patient count is just distinct activity inside it.
        let points = trend::build_series(&per_week, |records| {
            let counts = aggregate::status_counts(records);
            let pacientes = records
                .iter()
                .filter(|a| a.counts_as_activity())
                .map(|a| a.patient_id)
                .collect::<BTreeSet<_>>()
                .len() as u32;
            WeeklyPoint {
                pacientes,
                citas: counts.total,
                adherencia: aggregate::adherence_rate(counts.completed, counts.total),
                ingresos: f64::from(counts.completed) * rate.amount,
            }
        });

        Ok(MetricsSnapshot {
            pacientes_activos: aggregate::active_patient_ids(&rolling, &lookback).len() as u32,
            citas_semana: week.len() as u32,
            citas_proxima_semana: next.len() as u32,
            citas_completadas_mes: month_counts.completed,
            citas_canceladas_mes: month_counts.cancelled,
            inasistencias_mes: month_counts.no_show,
            tasa_adherencia: aggregate::adherence_rate(month_counts.completed, month_counts.total),
            ingresos_mes: f64::from(month_counts.completed) * rate.amount,
            ingresos_mes_anterior: f64::from(prev_counts.completed) * rate.amount,
            tendencia_pacientes: points.iter().map(|p| p.pacientes).collect(),
            tendencia_citas: points.iter().map(|p| p.citas).collect(),
            tendencia_adherencia: points.iter().map(|p| p.adherencia).collect(),
            tendencia_ingresos: points.iter().map(|p| p.ingresos).collect(),
            degraded,
        })
    }

    // -----------------------------------------------------------------------
    // Financial summary
    // -----------------------------------------------------------------------

    pub async fn financial_summary(
        &self,
        professional_id: &str,
    ) -> Result<FinancialSummary, AnalyticsError> {
        self.financial_summary_at(professional_id, Utc::now()).await
    }

    /// Summary computation against a fixed reference instant.
    pub async fn financial_summary_at(
        &self,
        professional_id: &str,
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary, AnalyticsError> {
        let prof = parse_professional_id(professional_id)?;
        let mut degraded = Vec::new();

        let months = trend::monthly_windows(now, config::MONTHLY_TREND_WINDOWS);
        let fetched = join_all(
            months
                .iter()
                .map(|m| self.source.fetch_payments(prof, Some(m))),
        )
        .await;

        let per_month: Vec<Vec<Payment>> = fetched
            .into_iter()
            .zip(&months)
            .map(|(res, m)| {
                source::normalize_payments(recover(
                    res,
                    &format!("payments ({})", m.start.format("%Y-%m")),
                    &mut degraded,
                ))
            })
            .collect();

        let folded = trend::build_series(&per_month, |records| {
            (
                aggregate::completed_payment_total(records),
                aggregate::payment_status_counts(records),
            )
        });
        let tendencia_mensual: Vec<MonthlyRevenuePoint> = months
            .iter()
            .zip(&folded)
            .map(|(m, (ingresos, counts))| MonthlyRevenuePoint {
                mes: m.start.format("%Y-%m").to_string(),
                ingresos: *ingresos,
                pagos: counts.completed,
            })
            .collect();

        let (ingresos_mes_actual, current_counts) = folded
            .last()
            .map(|(total, counts)| (*total, *counts))
            .unwrap_or_default();
        let ingresos_mes_anterior = folded
            .len()
            .checked_sub(2)
            .and_then(|i| folded.get(i))
            .map(|(total, _)| *total)
            .unwrap_or(0.0);

        // Ranking spans the whole lookback; windows never overlap, so the
        // concatenation holds each settled payment exactly once.
        let all_payments: Vec<Payment> = per_month.iter().flatten().cloned().collect();
        let top_pacientes = aggregate::rank_patients_by_revenue(&all_payments, config::TOP_PATIENTS_LIMIT)
            .into_iter()
            .map(|r| TopPatient {
                paciente_id: r.patient_id,
                total: r.total,
                pagos: r.payments,
            })
            .collect();

        Ok(FinancialSummary {
            ingresos_mes_actual,
            ingresos_mes_anterior,
            cambio_mensual: month_delta(ingresos_mes_actual, ingresos_mes_anterior),
            pagos_pendientes: current_counts.pending,
            pagos_completados: current_counts.completed,
            tendencia_mensual,
            top_pacientes,
            degraded,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// A missing rate is valid business state (new professional) and maps
    /// silently to the injected default; a failed fetch is degradation.
    fn resolve_rate(
        &self,
        result: Result<Option<SessionRate>, SourceError>,
        degraded: &mut Vec<String>,
    ) -> SessionRate {
        match result {
            Ok(Some(rate)) => rate,
            Ok(None) => self.defaults.session_rate.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "session rate fetch failed; using default");
                degraded.push(format!("session rate: {e}"));
                self.defaults.session_rate.clone()
            }
        }
    }
}
