//! Public result shapes assembled for the dashboard.
//!
//! Field names follow the dashboard's wire contract (Spanish, camelCase
//! on the wire). Every shape carries a `degraded` list naming the fetches
//! that failed and were substituted with empty sets; the dashboard always
//! has something to render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DeltaKind, RiskState};

/// One patient row of the professional's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub citas_totales: u32,
    pub citas_completadas: u32,
    pub ultima_cita: Option<DateTime<Utc>>,
    /// Completed-or-confirmed appointment within the rolling lookback.
    pub activo: bool,
    pub estado: RiskState,
    /// 0–100 progress score.
    pub progreso: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRoster {
    pub pacientes: Vec<PatientSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

/// Dashboard metrics: counts for the current windows plus four parallel
/// 4-week trend series, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub pacientes_activos: u32,
    pub citas_semana: u32,
    pub citas_proxima_semana: u32,
    pub citas_completadas_mes: u32,
    pub citas_canceladas_mes: u32,
    pub inasistencias_mes: u32,
    /// `round(100 × completed / scheduled)` for the current month; 0 when
    /// nothing was scheduled.
    pub tasa_adherencia: u32,
    pub ingresos_mes: f64,
    pub ingresos_mes_anterior: f64,
    pub tendencia_pacientes: Vec<u32>,
    pub tendencia_citas: Vec<u32>,
    pub tendencia_adherencia: Vec<u32>,
    pub tendencia_ingresos: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

/// Signed month-over-month revenue delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDelta {
    pub valor: f64,
    /// `round(100 × |valor| / previous)` when previous > 0, else 0.
    pub porcentaje: u32,
    pub tipo: DeltaKind,
}

/// One month of the financial trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenuePoint {
    /// Calendar month label, `YYYY-MM`.
    pub mes: String,
    pub ingresos: f64,
    pub pagos: u32,
}

/// One entry of the top-earning-patient ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPatient {
    pub paciente_id: Uuid,
    pub total: f64,
    pub pagos: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub ingresos_mes_actual: f64,
    pub ingresos_mes_anterior: f64,
    pub cambio_mensual: MonthlyDelta,
    pub pagos_pendientes: u32,
    pub pagos_completados: u32,
    /// Six months, oldest first.
    pub tendencia_mensual: Vec<MonthlyRevenuePoint>,
    /// At most five patients, descending by completed-payment total.
    pub top_pacientes: Vec<TopPatient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}
