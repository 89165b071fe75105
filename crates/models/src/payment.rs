use serde::{Deserialize, Serialize};

/// Company-wide payment totals from `/api/v1/payments/company/summary`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub company_id: String,
    pub total_amount: f64,
    pub total_payments: u64,
    pub total_refunds: u64,
    pub currency: String,
}

impl PaymentSummary {
    /// Zero-valued summary used when the payments endpoint is unavailable.
    pub fn empty(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            total_amount: 0.0,
            total_payments: 0,
            total_refunds: 0,
            currency: "USD".into(),
        }
    }
}
