use fintrack_core::chart::{area_path, cardinal_spline, color_for, pie_slices, PALETTE};
use fintrack_core::stats::monthly_spend_last_six_months;
use fintrack_core::{ChartFrame, Point, Tracker};
use chrono::NaiveDate;

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn carousel_spending_renders_as_one_curve() {
    let today = sample_date(2026, 3, 18);
    let mut tracker = Tracker::new();
    tracker.add_transaction("Rent", 300.0, "Housing", sample_date(2026, 3, 1));
    tracker.add_transaction("Groceries", 85.0, "Food", sample_date(2026, 2, 11));
    tracker.add_transaction("Flights", 420.0, "Travel", sample_date(2025, 11, 23));

    let months = monthly_spend_last_six_months(&tracker.transactions, today);
    let values: Vec<f64> = months.iter().map(|month| month.spending).collect();

    let frame = ChartFrame::default();
    let points = frame.layout_points(&values);
    assert_eq!(points.len(), 7);
    assert_eq!(points[0].x, 60.0);
    assert_eq!(points[6].x, 670.0);

    let curve = cardinal_spline(&points, 0.5, false);
    assert!(curve.starts_with("M 60 "));
    assert_eq!(curve.matches(" C ").count(), 6);
    assert!(curve.ends_with(&format!(", {} {}", points[6].x, points[6].y)));

    let area = area_path(&frame, &points, &curve);
    assert!(area.starts_with("M 60 220 L "));
    assert!(area.ends_with("L 670 220 Z"));
}

#[test]
fn curve_passes_through_first_and_last_point() {
    let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
    let curve = cardinal_spline(&points, 0.5, false);
    assert!(curve.starts_with("M 0 0"));
    assert!(curve.ends_with(", 10 10"));
}

#[test]
fn degenerate_series_produce_empty_paths() {
    let frame = ChartFrame::default();
    assert_eq!(cardinal_spline(&[], 0.5, false), "");
    assert_eq!(cardinal_spline(&[Point::new(1.0, 2.0)], 0.5, false), "");
    assert_eq!(area_path(&frame, &[], ""), "");
}

#[test]
fn pie_slices_cover_the_whole_circle() {
    let today = sample_date(2026, 3, 18);
    let mut tracker = Tracker::new();
    tracker.add_transaction("Groceries", 60.0, "Food", today);
    tracker.add_transaction("Bus pass", 40.0, "Transport", today);

    let stats = tracker.stats_at(today);
    let slices = pie_slices(&stats.category_totals);

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].category, "Food");
    assert_eq!(slices[0].start_pct, 0.0);
    assert_eq!(slices[0].end_pct, 60.0);
    assert_eq!(slices[1].category, "Transport");
    assert_eq!(slices[1].end_pct, 100.0);
    assert_eq!(slices[0].color, PALETTE[0]);
    assert_eq!(slices[1].color, PALETTE[1]);
}

#[test]
fn empty_tracker_draws_no_pie() {
    let tracker = Tracker::new();
    let stats = tracker.stats_at(sample_date(2026, 3, 18));
    assert!(pie_slices(&stats.category_totals).is_empty());
}

#[test]
fn category_colors_come_from_the_palette() {
    let color = color_for("Food");
    assert!(PALETTE.contains(&color));
    assert_eq!(color, color_for("Food"));
    assert_eq!(color_for("Food"), "#f59e0b");
}
