use chrono::NaiveDate;

/// Format/checksum check for the identifier a client applies with.
pub trait PersonalCodeValidator: Send + Sync {
    fn is_valid(&self, personal_code: &str) -> bool;
}

const FIRST_PASS_WEIGHTS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const SECOND_PASS_WEIGHTS: [u32; 10] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// Estonian personal code (`GYYMMDDSSSC`): century/gender digit, birth date,
/// serial number and a modulo-11 check digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstonianPersonalCodeValidator;

impl EstonianPersonalCodeValidator {
    fn digits(personal_code: &str) -> Option<[u32; 11]> {
        if personal_code.len() != 11 {
            return None;
        }

        let mut digits = [0u32; 11];
        for (slot, ch) in digits.iter_mut().zip(personal_code.chars()) {
            *slot = ch.to_digit(10)?;
        }
        Some(digits)
    }

    fn century_start(gender_digit: u32) -> Option<i32> {
        match gender_digit {
            1 | 2 => Some(1800),
            3 | 4 => Some(1900),
            5 | 6 => Some(2000),
            _ => None,
        }
    }

    fn birth_date(digits: &[u32; 11]) -> Option<NaiveDate> {
        let century = Self::century_start(digits[0])?;
        let year = century + (digits[1] * 10 + digits[2]) as i32;
        let month = digits[3] * 10 + digits[4];
        let day = digits[5] * 10 + digits[6];
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn weighted_remainder(digits: &[u32; 11], weights: &[u32; 10]) -> u32 {
        digits
            .iter()
            .zip(weights.iter())
            .map(|(digit, weight)| digit * weight)
            .sum::<u32>()
            % 11
    }

    fn check_digit(digits: &[u32; 11]) -> u32 {
        match Self::weighted_remainder(digits, &FIRST_PASS_WEIGHTS) {
            10 => match Self::weighted_remainder(digits, &SECOND_PASS_WEIGHTS) {
                10 => 0,
                remainder => remainder,
            },
            remainder => remainder,
        }
    }
}

impl PersonalCodeValidator for EstonianPersonalCodeValidator {
    fn is_valid(&self, personal_code: &str) -> bool {
        let Some(digits) = Self::digits(personal_code) else {
            return false;
        };

        Self::birth_date(&digits).is_some() && Self::check_digit(&digits) == digits[10]
    }
}
