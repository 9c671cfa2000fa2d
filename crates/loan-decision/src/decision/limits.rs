use serde::{Deserialize, Serialize};

/// Platform limits bounding every request and every offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLimits {
    pub minimum_loan_amount: u64,
    pub maximum_loan_amount: u64,
    /// Months.
    pub minimum_loan_period: u32,
    /// Months.
    pub maximum_loan_period: u32,
    pub minimum_age: u32,
    pub expected_lifetime_years: u32,
    pub maximum_loan_period_years: u32,
    pub minimum_loan_period_years: u32,
}

impl Default for DecisionLimits {
    fn default() -> Self {
        Self {
            minimum_loan_amount: 2000,
            maximum_loan_amount: 10000,
            minimum_loan_period: 12,
            maximum_loan_period: 60,
            minimum_age: 18,
            expected_lifetime_years: 80,
            maximum_loan_period_years: 5,
            minimum_loan_period_years: 1,
        }
    }
}

impl DecisionLimits {
    /// Youngest whole-year age that still clears the legal minimum over the shortest term.
    pub fn youngest_approvable_age(&self) -> u32 {
        self.minimum_age + self.minimum_loan_period_years
    }

    /// Oldest whole-year age whose longest term still ends within the expected lifetime.
    pub fn oldest_approvable_age(&self) -> Option<u32> {
        self.expected_lifetime_years
            .checked_sub(self.maximum_loan_period_years)
    }

    pub fn amount_in_range(&self, amount: u64) -> bool {
        (self.minimum_loan_amount..=self.maximum_loan_amount).contains(&amount)
    }

    pub fn period_in_range(&self, period: u32) -> bool {
        (self.minimum_loan_period..=self.maximum_loan_period).contains(&period)
    }

    /// Rejects limit sets under which no request could ever be valid.
    pub fn check(&self) -> Result<(), String> {
        if self.minimum_loan_amount > self.maximum_loan_amount {
            return Err(format!(
                "minimum loan amount {} exceeds maximum {}",
                self.minimum_loan_amount, self.maximum_loan_amount
            ));
        }
        if self.minimum_loan_period == 0 {
            return Err("minimum loan period must be at least 1".to_string());
        }
        if self.minimum_loan_period > self.maximum_loan_period {
            return Err(format!(
                "minimum loan period {} exceeds maximum {}",
                self.minimum_loan_period, self.maximum_loan_period
            ));
        }
        match self.oldest_approvable_age() {
            Some(oldest) if oldest >= self.youngest_approvable_age() => Ok(()),
            _ => Err("age window is empty".to_string()),
        }
    }
}
