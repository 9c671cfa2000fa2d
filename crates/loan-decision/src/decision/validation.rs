use chrono::NaiveDate;

use super::age::is_age_approved;
use super::domain::DecisionRequest;
use super::limits::DecisionLimits;
use super::outcome::{AgeError, DecisionError};
use super::personal_code::PersonalCodeValidator;

/// Checks a request against the platform limits, reporting the first violated rule.
pub(crate) fn validate_request(
    request: &DecisionRequest,
    codes: &dyn PersonalCodeValidator,
    limits: &DecisionLimits,
    today: NaiveDate,
) -> Result<(), DecisionError> {
    if !codes.is_valid(&request.personal_code) {
        return Err(DecisionError::InvalidPersonalCode);
    }

    if !limits.amount_in_range(request.loan_amount) {
        return Err(DecisionError::InvalidLoanAmount);
    }

    if !limits.period_in_range(request.loan_period) {
        return Err(DecisionError::InvalidLoanPeriod);
    }

    if request.age.trim().is_empty() {
        return Err(DecisionError::InvalidAge(AgeError::Missing));
    }

    if !is_age_approved(&request.age, today, limits) {
        return Err(DecisionError::InvalidAge(AgeError::OutsideWindow));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::personal_code::EstonianPersonalCodeValidator;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    fn check(request: &DecisionRequest) -> Result<(), DecisionError> {
        validate_request(
            request,
            &EstonianPersonalCodeValidator,
            &DecisionLimits::default(),
            today(),
        )
    }

    fn valid_request() -> DecisionRequest {
        DecisionRequest::new("49002010976", "01.02.1990", 4000, 12)
    }

    #[test]
    fn accepts_request_within_limits() {
        assert!(check(&valid_request()).is_ok());
    }

    #[test]
    fn amount_and_period_bounds_are_inclusive() {
        for (amount, period) in [(2000, 12), (10000, 60)] {
            let request = DecisionRequest {
                loan_amount: amount,
                loan_period: period,
                ..valid_request()
            };
            assert!(check(&request).is_ok(), "{amount}/{period} should pass");
        }
    }

    #[test]
    fn rejects_out_of_range_amounts() {
        for amount in [1999, 10001] {
            let request = DecisionRequest {
                loan_amount: amount,
                ..valid_request()
            };
            assert!(matches!(
                check(&request),
                Err(DecisionError::InvalidLoanAmount)
            ));
        }
    }

    #[test]
    fn rejects_out_of_range_periods() {
        for period in [11, 61] {
            let request = DecisionRequest {
                loan_period: period,
                ..valid_request()
            };
            assert!(matches!(
                check(&request),
                Err(DecisionError::InvalidLoanPeriod)
            ));
        }
    }

    #[test]
    fn reports_first_violation_in_rule_order() {
        let everything_wrong = DecisionRequest::new("12345", "", 1, 1);
        assert!(matches!(
            check(&everything_wrong),
            Err(DecisionError::InvalidPersonalCode)
        ));

        let bad_amount_and_period = DecisionRequest::new("49002010976", "", 1, 1);
        assert!(matches!(
            check(&bad_amount_and_period),
            Err(DecisionError::InvalidLoanAmount)
        ));

        let bad_period_and_age = DecisionRequest::new("49002010976", "", 4000, 1);
        assert!(matches!(
            check(&bad_period_and_age),
            Err(DecisionError::InvalidLoanPeriod)
        ));
    }

    #[test]
    fn distinguishes_missing_age_from_ineligible_age() {
        let missing = DecisionRequest {
            age: String::new(),
            ..valid_request()
        };
        assert!(matches!(
            check(&missing),
            Err(DecisionError::InvalidAge(AgeError::Missing))
        ));

        let too_young = DecisionRequest {
            age: "18.10.2007".to_string(),
            ..valid_request()
        };
        assert!(matches!(
            check(&too_young),
            Err(DecisionError::InvalidAge(AgeError::OutsideWindow))
        ));

        let garbled = DecisionRequest {
            age: "sometime in 1990".to_string(),
            ..valid_request()
        };
        assert!(matches!(
            check(&garbled),
            Err(DecisionError::InvalidAge(AgeError::OutsideWindow))
        ));
    }
}
