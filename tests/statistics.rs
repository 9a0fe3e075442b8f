use crimson_tree::Summary;
use crimson_tree::statistics::REPORT_PIVOT;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn report_for_mixed_input() {
    let summary = Summary::parse("10 20\n30 40\t50 60 61 62.5 62.5 10");
    assert_eq!(summary.count(), 8);
    assert_eq!(summary.median(), Some(45.0));
    assert_eq!(summary.closest_less(REPORT_PIVOT), Some(40.0));
    assert_eq!(summary.closest_greater(REPORT_PIVOT), Some(50.0));

    let report = summary.to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "# of values: 8");
    assert_eq!(lines[2], "median: 45");
    assert_eq!(lines[3], "closest < 42: 40");
    assert_eq!(lines[4], "closest > 42: 50");
}

#[test]
fn report_without_neighbors() {
    let report = Summary::parse("42 42 42").to_string();
    assert_eq!(
        report,
        "# of values: 1\naverage: 42\nmedian: 42\nclosest < 42: None\nclosest > 42: None\n"
    );
}

#[test]
fn report_for_empty_input() {
    assert_eq!(Summary::parse("   \n").to_string(), "The file is empty.\n");
    assert_eq!(Summary::parse("not a number 1 2").to_string(), "The file is empty.\n");
}

proptest! {
    #[test]
    fn statistics_match_sorted_distinct_values(values in proptest::collection::vec(-1_000i32..1_000, 1..300)) {
        let mut distinct: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();

        let summary: Summary = values.iter().map(|&v| f64::from(v)).collect();
        prop_assert_eq!(summary.count(), distinct.len());

        let n = distinct.len();
        let expected_median = if n % 2 == 1 {
            distinct[n / 2]
        } else {
            (distinct[n / 2 - 1] + distinct[n / 2]) / 2.0
        };
        prop_assert_eq!(summary.median(), Some(expected_median));

        let expected_less = distinct.iter().rev().find(|&&v| v < REPORT_PIVOT).copied();
        let expected_greater = distinct.iter().find(|&&v| v > REPORT_PIVOT).copied();
        prop_assert_eq!(summary.closest_less(REPORT_PIVOT), expected_less);
        prop_assert_eq!(summary.closest_greater(REPORT_PIVOT), expected_greater);

        #[allow(clippy::cast_precision_loss)]
        let expected_average = distinct.iter().sum::<f64>() / n as f64;
        let average = summary.average().unwrap();
        prop_assert!((average - expected_average).abs() < 1e-9);
    }
}

#[test]
fn nan_and_infinity_end_the_input() {
    let summary = Summary::parse("1 2 nan 3");
    assert_eq!(summary.count(), 2);
    assert_eq!(summary.average(), Some(1.5));

    assert_eq!(Summary::parse("4 inf 5").count(), 1);
    assert_eq!(Summary::parse("-infinity 5").to_string(), "The file is empty.\n");
}

#[test]
fn leading_number_of_a_token_is_kept() {
    let summary = Summary::parse("1,2,3 4");
    assert_eq!(summary.count(), 1);
    assert_eq!(summary.median(), Some(1.0));

    let summary = Summary::parse("10 12abc 99");
    assert_eq!(summary.count(), 2);
    assert_eq!(summary.closest_greater(0.0), Some(10.0));
    assert_eq!(summary.closest_less(100.0), Some(12.0));

    // A second number glued to the first is read too.
    assert_eq!(Summary::parse("1.5.25 -3e1").count(), 3);
}

#[test]
fn report_shows_six_significant_digits() {
    let report = Summary::parse("3.14159265 7917.5 0.5 1 2").to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[1], "average: 1584.83");
    assert_eq!(lines[2], "median: 2");
    assert_eq!(lines[3], "closest < 42: 3.14159");
    assert_eq!(lines[4], "closest > 42: 7917.5");
}
