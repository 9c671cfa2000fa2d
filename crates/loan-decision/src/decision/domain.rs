use serde::{Deserialize, Serialize};

/// Applicant request as submitted over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub personal_code: String,
    /// Birth date in `dd.MM.yyyy` form; empty when the applicant omitted it.
    #[serde(default)]
    pub age: String,
    pub loan_amount: u64,
    /// Months.
    pub loan_period: u32,
}

impl DecisionRequest {
    pub fn new(
        personal_code: impl Into<String>,
        age: impl Into<String>,
        loan_amount: u64,
        loan_period: u32,
    ) -> Self {
        Self {
            personal_code: personal_code.into(),
            age: age.into(),
            loan_amount,
            loan_period,
        }
    }
}

/// Largest approvable loan for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub amount: u64,
    pub period: u32,
}

/// Client row of the static dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "Personal_ID")]
    pub personal_id: String,
    /// Empty until the client's first decision binds a birth date to the record.
    #[serde(rename = "Age", default)]
    pub age: String,
    #[serde(rename = "CM")]
    pub credit_modifier: u32,
}

/// Dataset envelope: `{"Clients_Information": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDataset {
    #[serde(rename = "Clients_Information", default)]
    pub clients: Vec<ClientRecord>,
}
