//! Calendar-day primitives for contract lifecycle classification.
//!
//! These are the only time-dependent building blocks in the crate. Both
//! take `today` explicitly so every downstream computation stays
//! deterministic under test.

use chrono::NaiveDate;

use crate::types::ContractStatus;

/// Calendar-day difference `target - today`. Negative means past.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Classify a contract's lifecycle status from its end date.
///
/// Boundaries are inclusive on the lower band: exactly 30 days out is
/// `expiring_30`, not `expiring_60`.
pub fn contract_status(end_date: NaiveDate, today: NaiveDate) -> ContractStatus {
    let days = days_until(end_date, today);
    if days < 0 {
        ContractStatus::Expired
    } else if days <= 30 {
        ContractStatus::Expiring30
    } else if days <= 60 {
        ContractStatus::Expiring60
    } else if days <= 90 {
        ContractStatus::Expiring90
    } else {
        ContractStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn days_until_counts_calendar_days() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(days_until(target, today()), 19);
        assert_eq!(days_until(today(), today()), 0);
        let past = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(days_until(past, today()), -2);
    }

    #[test]
    fn status_boundaries_are_inclusive_on_the_lower_band() {
        let cases = [
            (30, ContractStatus::Expiring30),
            (31, ContractStatus::Expiring60),
            (60, ContractStatus::Expiring60),
            (61, ContractStatus::Expiring90),
            (90, ContractStatus::Expiring90),
            (91, ContractStatus::Active),
            (-1, ContractStatus::Expired),
        ];
        for (days, expected) in cases {
            let end = today() + Duration::days(days);
            assert_eq!(
                contract_status(end, today()),
                expected,
                "end date {} days out",
                days
            );
        }
    }

    #[test]
    fn status_on_the_end_date_itself_is_expiring_30() {
        assert_eq!(contract_status(today(), today()), ContractStatus::Expiring30);
    }
}
