use chrono::{Datelike, Duration, NaiveDate, Weekday};
use deliveryscan::application::calendar::recent_trading_days;

#[test]
fn test_calendar_properties_hold_across_two_years() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    for offset in 0..730 {
        let reference = start + Duration::days(offset);
        for n in [1usize, 5, 30] {
            let days = recent_trading_days(n, reference);
            assert_eq!(days.len(), n, "ref {reference}, n {n}");
            for pair in days.windows(2) {
                assert!(pair[0] < pair[1], "not strictly ascending for ref {reference}");
            }
            for d in &days {
                assert!(d.date() < reference);
                assert!(!matches!(d.date().weekday(), Weekday::Sat | Weekday::Sun));
            }
        }
    }
}

#[test]
fn test_monday_reference_skips_weekend() {
    // 2024-06-10 is a Monday
    let reference = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let days: Vec<String> = recent_trading_days(5, reference)
        .iter()
        .map(|d| d.to_string())
        .collect();
    assert_eq!(
        days,
        vec!["2024-06-03", "2024-06-04", "2024-06-05", "2024-06-06", "2024-06-07"]
    );
}

#[test]
fn test_window_spans_weekends_without_gaps() {
    // Six sessions before Wednesday 2024-06-12: Tue 4th .. Tue 11th
    let reference = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    let days = recent_trading_days(6, reference);
    assert_eq!(days.first().unwrap().to_string(), "2024-06-04");
    assert_eq!(days.last().unwrap().to_string(), "2024-06-11");
}
