use serde::{Deserialize, Serialize};

use super::domain::LoanOffer;
use super::registry::RegistryError;

/// Every way a decision can end without an offer.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("Invalid personal ID code!")]
    InvalidPersonalCode,
    #[error("Invalid loan amount!")]
    InvalidLoanAmount,
    #[error("Invalid loan period!")]
    InvalidLoanPeriod,
    #[error("{0}")]
    InvalidAge(AgeError),
    #[error("No valid loan found!")]
    NoValidLoan(NoLoanReason),
    #[error("client registry failure: {0}")]
    Registry(#[from] RegistryError),
}

impl DecisionError {
    /// Rejections caused by the request itself rather than the client's standing.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DecisionError::InvalidPersonalCode
                | DecisionError::InvalidLoanAmount
                | DecisionError::InvalidLoanPeriod
                | DecisionError::InvalidAge(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("Age is required for first-time users.")]
    Missing,
    #[error("Invalid Age. Please retry")]
    OutsideWindow,
    #[error("Existing age data conflict. Please contact support.")]
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoLoanReason {
    UnknownClient,
    ZeroCreditModifier,
    PeriodExceeded { maximum_loan_period: u32 },
}

impl NoLoanReason {
    pub fn summary(&self) -> String {
        match self {
            NoLoanReason::UnknownClient => "no client record for personal code".to_string(),
            NoLoanReason::ZeroCreditModifier => "client has no credit capacity".to_string(),
            NoLoanReason::PeriodExceeded {
                maximum_loan_period,
            } => format!("minimum amount unreachable within {maximum_loan_period} months"),
        }
    }
}

/// Wire form of a decision: either the approved pair or a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub approved_amount: Option<u64>,
    pub approved_period: Option<u32>,
    pub error_message: Option<String>,
}

impl DecisionResponse {
    pub fn approved(offer: LoanOffer) -> Self {
        Self {
            approved_amount: Some(offer.amount),
            approved_period: Some(offer.period),
            error_message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            approved_amount: None,
            approved_period: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.error_message.is_none()
    }
}

impl From<&Result<LoanOffer, DecisionError>> for DecisionResponse {
    fn from(result: &Result<LoanOffer, DecisionError>) -> Self {
        match result {
            Ok(offer) => Self::approved(*offer),
            Err(err) => Self::rejected(err.to_string()),
        }
    }
}

impl From<Result<LoanOffer, DecisionError>> for DecisionResponse {
    fn from(result: Result<LoanOffer, DecisionError>) -> Self {
        Self::from(&result)
    }
}
