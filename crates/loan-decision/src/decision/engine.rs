use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use super::domain::{DecisionRequest, LoanOffer};
use super::limits::DecisionLimits;
use super::outcome::{AgeError, DecisionError, NoLoanReason};
use super::personal_code::{EstonianPersonalCodeValidator, PersonalCodeValidator};
use super::registry::{AgeReconciliation, ClientRegistry, RegistryError};
use super::validation::validate_request;

/// Sizes the largest approvable loan for a client. Holds no per-request state.
pub struct DecisionEngine<R> {
    registry: Arc<R>,
    codes: Arc<dyn PersonalCodeValidator>,
    limits: DecisionLimits,
}

impl<R> DecisionEngine<R>
where
    R: ClientRegistry + 'static,
{
    pub fn new(registry: Arc<R>, limits: DecisionLimits) -> Self {
        Self::with_validator(registry, Arc::new(EstonianPersonalCodeValidator), limits)
    }

    pub fn with_validator(
        registry: Arc<R>,
        codes: Arc<dyn PersonalCodeValidator>,
        limits: DecisionLimits,
    ) -> Self {
        Self {
            registry,
            codes,
            limits,
        }
    }

    pub fn limits(&self) -> &DecisionLimits {
        &self.limits
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn decide(&self, request: &DecisionRequest) -> Result<LoanOffer, DecisionError> {
        self.decide_on(request, Local::now().date_naive())
    }

    /// Same as [`decide`](Self::decide) with ages measured against `today`.
    pub fn decide_on(
        &self,
        request: &DecisionRequest,
        today: NaiveDate,
    ) -> Result<LoanOffer, DecisionError> {
        let result = self.run(request, today);

        match &result {
            Ok(offer) => info!(
                personal_code = %request.personal_code,
                amount = offer.amount,
                period = offer.period,
                "loan approved"
            ),
            Err(DecisionError::NoValidLoan(reason)) => warn!(
                personal_code = %request.personal_code,
                reason = %reason.summary(),
                "no valid loan"
            ),
            Err(err) => warn!(
                personal_code = %request.personal_code,
                error = %err,
                "loan request rejected"
            ),
        }

        result
    }

    fn run(&self, request: &DecisionRequest, today: NaiveDate) -> Result<LoanOffer, DecisionError> {
        validate_request(request, self.codes.as_ref(), &self.limits, today)?;

        let credit_modifier = match self.registry.credit_modifier(&request.personal_code)? {
            None => return Err(DecisionError::NoValidLoan(NoLoanReason::UnknownClient)),
            Some(0) => return Err(DecisionError::NoValidLoan(NoLoanReason::ZeroCreditModifier)),
            Some(modifier) => modifier,
        };

        match self
            .registry
            .reconcile_age(&request.personal_code, request.age.trim())
        {
            // Best-effort: the age is already bound in the registry.
            Ok(AgeReconciliation::Registered) => {
                if let Err(err) = self.registry.persist() {
                    error!(
                        personal_code = %request.personal_code,
                        error = %err,
                        "registered age could not be saved"
                    );
                }
            }
            Ok(AgeReconciliation::Confirmed) => {}
            Ok(AgeReconciliation::NotFound) => {
                return Err(DecisionError::NoValidLoan(NoLoanReason::UnknownClient))
            }
            Err(RegistryError::AgeRequired) => {
                return Err(DecisionError::InvalidAge(AgeError::Missing))
            }
            Err(RegistryError::AgeConflict) => {
                return Err(DecisionError::InvalidAge(AgeError::Conflict))
            }
            Err(err) => return Err(err.into()),
        }

        size_loan(credit_modifier, request.loan_period, &self.limits)
            .map_err(DecisionError::NoValidLoan)
    }
}

fn highest_valid_amount(credit_modifier: u32, period: u32) -> u64 {
    u64::from(credit_modifier) * u64::from(period)
}

/// Extends the period until the client's capacity clears the minimum amount,
/// then caps the amount at the platform maximum.
pub(crate) fn size_loan(
    credit_modifier: u32,
    requested_period: u32,
    limits: &DecisionLimits,
) -> Result<LoanOffer, NoLoanReason> {
    if credit_modifier == 0 {
        return Err(NoLoanReason::ZeroCreditModifier);
    }

    let exceeded = NoLoanReason::PeriodExceeded {
        maximum_loan_period: limits.maximum_loan_period,
    };

    let mut period = requested_period;
    while highest_valid_amount(credit_modifier, period) < limits.minimum_loan_amount {
        if period >= limits.maximum_loan_period {
            return Err(exceeded);
        }
        period += 1;
    }

    if period > limits.maximum_loan_period {
        return Err(exceeded);
    }

    Ok(LoanOffer {
        amount: limits
            .maximum_loan_amount
            .min(highest_valid_amount(credit_modifier, period)),
        period,
    })
}
