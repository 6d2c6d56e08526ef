//! Engine-level constants and defaults.

/// Engine identity
pub const ENGINE_NAME: &str = "alma-analytics";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rolling lookback used for the active-patient rule. Distinct from the
/// calendar-month boundaries used by monthly metrics; both windowing rules
/// are product behavior and must not be unified.
pub const ACTIVE_PATIENT_LOOKBACK_DAYS: u32 = 30;

/// Number of weekly windows in the dashboard trend series.
pub const WEEKLY_TREND_WINDOWS: u32 = 4;

/// Number of monthly windows in the financial trend series.
pub const MONTHLY_TREND_WINDOWS: u32 = 6;

/// Maximum entries in the top-earning-patient ranking.
pub const TOP_PATIENTS_LIMIT: usize = 5;

/// Session length substituted when a fetched appointment omits its duration.
pub const DEFAULT_SESSION_MINUTES: u32 = 50;

/// Currency substituted when a fetched record omits its currency code.
pub const DEFAULT_CURRENCY: &str = "COP";

/// Default tracing filter for consumers that do not set RUST_LOG.
pub fn default_log_filter() -> String {
    format!("{}=info", ENGINE_NAME.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_window_counts() {
        assert_eq!(WEEKLY_TREND_WINDOWS, 4);
        assert_eq!(MONTHLY_TREND_WINDOWS, 6);
        assert_eq!(TOP_PATIENTS_LIMIT, 5);
    }

    #[test]
    fn log_filter_targets_crate() {
        assert_eq!(default_log_filter(), "alma_analytics=info");
    }
}
