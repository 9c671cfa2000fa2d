//! Loan decisioning: request validation, client lookup, one-time age binding,
//! and the search for the largest approvable amount and period.

pub(crate) mod age;
pub mod batch;
pub mod domain;
pub mod engine;
mod limits;
mod outcome;
pub mod personal_code;
pub mod registry;
pub mod router;
mod validation;

#[cfg(test)]
mod tests;

pub use age::{age_in_years, is_age_approved, parse_birth_date, BIRTH_DATE_FORMAT};
pub use batch::{decide_all, parse_requests, BatchDecision};
pub use domain::{ClientDataset, ClientRecord, DecisionRequest, LoanOffer};
pub use engine::DecisionEngine;
pub use limits::DecisionLimits;
pub use outcome::{AgeError, DecisionError, DecisionResponse, NoLoanReason};
pub use personal_code::{EstonianPersonalCodeValidator, PersonalCodeValidator};
pub use registry::{
    AgeReconciliation, ClientRegistry, DatasetError, InMemoryClientRegistry, RegistryError,
};
pub use router::decision_router;
