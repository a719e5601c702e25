//! Frame geometry, area fills, and category coloring.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Point;

/// The ten chart colors. Categories pick one by label hash, pie slices by
/// their rank in the sorted slice order.
pub const PALETTE: [&str; 10] = [
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#f97316", "#84cc16",
    "#ec4899", "#14b8a6",
];

/// Fixed drawing frame for the SVG line charts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 280.0,
            pad_left: 60.0,
            pad_right: 30.0,
            pad_top: 30.0,
            pad_bottom: 60.0,
        }
    }
}

impl ChartFrame {
    pub fn inner_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }

    /// The y coordinate of the x axis.
    pub fn baseline_y(&self) -> f64 {
        self.pad_top + self.inner_height()
    }

    /// Spreads `values` evenly across the inner width and scales them against
    /// the largest value. The scale floor is 1, so an all-zero series sits on
    /// the baseline instead of dividing by zero. A single value lands on the
    /// left edge.
    pub fn layout_points(&self, values: &[f64]) -> Vec<Point> {
        let max_val = values.iter().fold(1.0_f64, |acc, v| acc.max(*v));
        let span = values.len().saturating_sub(1).max(1) as f64;
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Point {
                x: self.pad_left + (i as f64 / span) * self.inner_width(),
                y: self.pad_top + self.inner_height() - (v / max_val) * self.inner_height(),
            })
            .collect()
    }
}

/// Closes a curve down to the frame baseline so it can be filled.
///
/// The result starts at the baseline under the left padding, traces the
/// curve, and drops from the last point straight back down. Empty input
/// yields an empty path.
pub fn area_path(frame: &ChartFrame, points: &[Point], curve: &str) -> String {
    if curve.is_empty() || points.is_empty() {
        return String::new();
    }
    let baseline = frame.baseline_y();
    let last = points[points.len() - 1];
    format!(
        "M {} {} L {} L {} {} Z",
        frame.pad_left,
        baseline,
        &curve[2..],
        last.x,
        baseline
    )
}

/// Stable palette color for a category label.
pub fn color_for(label: &str) -> &'static str {
    let mut hash: i32 = 0;
    for unit in label.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    PALETTE[hash.unsigned_abs() as usize % PALETTE.len()]
}

/// One segment of the category pie, spanning a share of the full circle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieSlice {
    pub category: String,
    pub amount: f64,
    pub color: &'static str,
    pub start_pct: f64,
    pub end_pct: f64,
}

/// Turns category totals into pie slices ordered largest first, each covering
/// its percentage of the grand total. A zero total yields no slices.
pub fn pie_slices(category_totals: &[(String, f64)]) -> Vec<PieSlice> {
    let total: f64 = category_totals.iter().map(|(_, amount)| amount).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut ranked: Vec<&(String, f64)> = category_totals.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut start = 0.0;
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (category, amount))| {
            let pct = amount / total * 100.0;
            let slice = PieSlice {
                category: category.clone(),
                amount: *amount,
                color: PALETTE[i % PALETTE.len()],
                start_pct: start,
                end_pct: start + pct,
            };
            start += pct;
            slice
        })
        .collect()
}
