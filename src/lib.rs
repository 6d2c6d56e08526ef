//! Professional analytics engine for the Alma wellbeing platform.
//!
//! Turns raw appointment, payment and evaluation records into the
//! metrics, trends and rankings shown on a practitioner's dashboard:
//! active-patient counts, weekly trend series, adherence rate,
//! month-over-month revenue deltas, per-patient risk classification and
//! the top-earning-patient ranking.
//!
//! Derived results are ephemeral: every call recomputes from the current
//! records behind the injected [`DataSource`]; nothing is cached or
//! persisted. A partial backend failure degrades the affected fields to
//! neutral values instead of failing the call, so the dashboard always
//! has something to render.

pub mod aggregate; // grouping + reduction of fetched records
pub mod classify; // patient risk state + progress score
pub mod config;
pub mod engine; // metrics assembler + public API
pub mod models;
pub mod source; // record fetcher boundary + normalization
pub mod trend; // rolling window sets + series folding
pub mod window; // calendar boundary arithmetic

pub use engine::{
    AnalyticsEngine, AnalyticsError, EngineDefaults, FinancialSummary, MetricsSnapshot,
    PatientRoster, PatientSnapshot,
};
pub use source::{DataSource, SourceError};
pub use window::DateRange;
