//! Watering status derivation.
//!
//! Pure date arithmetic only: no store access, no clock access. Callers
//! sample "now" once per logical operation and pass the local calendar day
//! in, so every value derived within one operation agrees on what today is.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use shared::WateringStatus;

use crate::domain::models::Plant;

/// Days until the next watering is due, both endpoints normalized to local
/// midnight. Negative means the watering is late. `None` when the plant has
/// never been watered.
pub fn days_until_watering(
    last_watered_at: Option<NaiveDateTime>,
    next_watering_at: Option<NaiveDateTime>,
    frequency_days: u32,
    today: NaiveDate,
) -> Option<i64> {
    let last = last_watered_at?;
    let next = next_watering_at
        .map(|n| n.date())
        .unwrap_or_else(|| last.date() + Duration::days(i64::from(frequency_days)));
    Some((next - today).num_days())
}

/// Classify a plant's watering urgency.
///
/// A plant that has never been watered is always `Critical`, regardless of
/// frequency. Otherwise the bucket is chosen from the day offset between
/// today and the next due date, first match wins:
///
/// - `days_until < -2` -> `Critical`
/// - `days_until <  0` -> `Overdue`
/// - `days_until <= 1` -> `DueSoon`
/// - otherwise         -> `Watered`
///
/// The `Critical`/`Overdue` boundary is exclusive at -2: exactly 2 days
/// late is still `Overdue`, 3 days late is `Critical`.
pub fn derive_watering_status(
    last_watered_at: Option<NaiveDateTime>,
    next_watering_at: Option<NaiveDateTime>,
    frequency_days: u32,
    today: NaiveDate,
) -> WateringStatus {
    let days_until =
        match days_until_watering(last_watered_at, next_watering_at, frequency_days, today) {
            Some(d) => d,
            None => return WateringStatus::Critical,
        };

    if days_until < -2 {
        WateringStatus::Critical
    } else if days_until < 0 {
        WateringStatus::Overdue
    } else if days_until <= 1 {
        WateringStatus::DueSoon
    } else {
        WateringStatus::Watered
    }
}

/// Derive the status for a plant record.
pub fn derive_for_plant(plant: &Plant, today: NaiveDate) -> WateringStatus {
    derive_watering_status(
        plant.last_watered_at,
        plant.next_watering_at,
        plant.watering_frequency_days,
        today,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_never_watered_is_critical_regardless_of_frequency() {
        let today = date(2024, 6, 15);
        for freq in [1, 7, 30, 365] {
            assert_eq!(
                derive_watering_status(None, None, freq, today),
                WateringStatus::Critical
            );
        }
        // An explicit next date does not rescue a never-watered plant.
        assert_eq!(
            derive_watering_status(None, Some(dt(2024, 6, 20, 9)), 7, today),
            WateringStatus::Critical
        );
    }

    #[test]
    fn test_status_regions_are_exact() {
        let today = date(2024, 6, 15);
        // Pin the due date via next_watering_at and walk the day offsets.
        let cases = [
            (-4, WateringStatus::Critical),
            (-3, WateringStatus::Critical),
            (-2, WateringStatus::Overdue),
            (-1, WateringStatus::Overdue),
            (0, WateringStatus::DueSoon),
            (1, WateringStatus::DueSoon),
            (2, WateringStatus::Watered),
            (10, WateringStatus::Watered),
        ];
        for (offset, expected) in cases {
            let next = today + Duration::days(offset);
            let status = derive_watering_status(
                Some(dt(2024, 6, 1, 12)),
                Some(next.and_hms_opt(9, 0, 0).unwrap()),
                7,
                today,
            );
            assert_eq!(status, expected, "offset {} days", offset);
        }
    }

    #[test]
    fn test_next_due_falls_back_to_last_plus_frequency() {
        let today = date(2024, 6, 15);
        // Watered on the 10th with a 7 day interval: due on the 17th.
        assert_eq!(
            days_until_watering(Some(dt(2024, 6, 10, 8)), None, 7, today),
            Some(2)
        );
        assert_eq!(
            derive_watering_status(Some(dt(2024, 6, 10, 8)), None, 7, today),
            WateringStatus::Watered
        );
    }

    #[test]
    fn test_explicit_next_date_wins_over_frequency() {
        let today = date(2024, 6, 15);
        // Frequency says the 17th, explicit next says the 12th.
        assert_eq!(
            derive_watering_status(Some(dt(2024, 6, 10, 8)), Some(dt(2024, 6, 12, 8)), 7, today),
            WateringStatus::Critical
        );
    }

    #[test]
    fn test_time_of_day_does_not_shift_the_bucket() {
        let today = date(2024, 6, 15);
        for hour in [0, 9, 23] {
            let status = derive_watering_status(
                Some(dt(2024, 6, 1, hour)),
                Some(dt(2024, 6, 14, hour)),
                7,
                today,
            );
            assert_eq!(status, WateringStatus::Overdue, "hour {}", hour);
        }
    }

    #[test]
    fn test_month_and_year_rollover() {
        // Watered Dec 28 with a 7 day interval: due Jan 4.
        let last = dt(2023, 12, 28, 10);
        assert_eq!(
            days_until_watering(Some(last), None, 7, date(2024, 1, 2)),
            Some(2)
        );
        assert_eq!(
            derive_watering_status(Some(last), None, 7, date(2024, 1, 2)),
            WateringStatus::Watered
        );
        assert_eq!(
            derive_watering_status(Some(last), None, 7, date(2024, 1, 8)),
            WateringStatus::Critical
        );
    }

    #[test]
    fn test_seven_day_cycle_scenario() {
        // Watered today with a 7 day interval, then the clock advances.
        let watered_on = date(2024, 6, 1);
        let last = watered_on.and_hms_opt(9, 0, 0).unwrap();
        let next = Some((watered_on + Duration::days(7)).and_hms_opt(9, 0, 0).unwrap());

        let expect = [
            (0, WateringStatus::Watered),
            (5, WateringStatus::Watered),
            (6, WateringStatus::DueSoon),
            (7, WateringStatus::DueSoon),
            (8, WateringStatus::Overdue),
            (9, WateringStatus::Overdue),
            (10, WateringStatus::Critical),
        ];
        for (days_later, expected) in expect {
            let today = watered_on + Duration::days(days_later);
            assert_eq!(
                derive_watering_status(Some(last), next, 7, today),
                expected,
                "day {}",
                days_later
            );
        }
    }
}
