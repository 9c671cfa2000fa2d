use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::limits::DecisionLimits;

/// Textual format of submitted and stored birth dates (`01.02.1990`).
pub const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Strict `dd.MM.yyyy`: unpadded days or months are rejected, so a valid date
/// has exactly one textual form and stored ages compare by string equality.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, BIRTH_DATE_FORMAT) {
        Ok(date) if date.format(BIRTH_DATE_FORMAT).to_string() == trimmed => Some(date),
        Ok(_) => {
            warn!(input = raw, "birth date is not zero-padded dd.mm.yyyy");
            None
        }
        Err(err) => {
            warn!(input = raw, error = %err, "birth date could not be parsed");
            None
        }
    }
}

/// Whole years elapsed between `birth_date` and `today`; `None` for future dates.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth_date > today {
        return None;
    }

    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Fails closed: unparsable input and future dates are never approved.
pub fn is_age_approved(birth_date: &str, today: NaiveDate, limits: &DecisionLimits) -> bool {
    let Some(oldest) = limits.oldest_approvable_age() else {
        return false;
    };

    parse_birth_date(birth_date)
        .and_then(|date| age_in_years(date, today))
        .map(|age| age >= limits.youngest_approvable_age() && age <= oldest)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    fn born_years_ago(years: i32) -> String {
        format!("17.10.{}", 2026 - years)
    }

    #[test]
    fn boundary_ages_follow_default_window() {
        let limits = DecisionLimits::default();
        assert!(is_age_approved(&born_years_ago(19), today(), &limits));
        assert!(is_age_approved(&born_years_ago(75), today(), &limits));
        assert!(!is_age_approved(&born_years_ago(18), today(), &limits));
        assert!(!is_age_approved(&born_years_ago(76), today(), &limits));
    }

    #[test]
    fn birthday_tomorrow_has_not_aged_yet() {
        let limits = DecisionLimits::default();
        // Turns 19 on 18.10.2026.
        assert!(!is_age_approved("18.10.2007", today(), &limits));
        assert!(is_age_approved("17.10.2007", today(), &limits));
    }

    #[test]
    fn unparsable_and_future_dates_fail_closed() {
        let limits = DecisionLimits::default();
        assert!(!is_age_approved("", today(), &limits));
        assert!(!is_age_approved("1990-02-01", today(), &limits));
        assert!(!is_age_approved("31.02.1990", today(), &limits));
        assert!(!is_age_approved("01.01.2030", today(), &limits));
    }

    #[test]
    fn unpadded_dates_are_rejected() {
        let limits = DecisionLimits::default();
        assert_eq!(parse_birth_date("1.2.1990"), None);
        assert_eq!(parse_birth_date("01.2.1990"), None);
        assert_eq!(parse_birth_date("1.02.1990"), None);
        assert!(!is_age_approved("1.2.1990", today(), &limits));
        assert_eq!(
            parse_birth_date(" 01.02.1990 "),
            NaiveDate::from_ymd_opt(1990, 2, 1)
        );
    }

    #[test]
    fn age_in_years_counts_whole_years() {
        let birth = NaiveDate::from_ymd_opt(1990, 2, 1).expect("valid date");
        assert_eq!(age_in_years(birth, today()), Some(36));
        let leap = NaiveDate::from_ymd_opt(2004, 2, 29).expect("valid date");
        let day_before = NaiveDate::from_ymd_opt(2022, 2, 28).expect("valid date");
        assert_eq!(age_in_years(leap, day_before), Some(17));
    }
}
