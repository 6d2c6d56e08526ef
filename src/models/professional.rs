use serde::{Deserialize, Serialize};

/// Configured per-session rate for a professional. Used to convert a
/// completed-appointment count into revenue; currency is pass-through,
/// never converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRate {
    pub amount: f64,
    pub currency: String,
}

impl SessionRate {
    pub fn zero(currency: &str) -> Self {
        Self {
            amount: 0.0,
            currency: currency.to_string(),
        }
    }
}
