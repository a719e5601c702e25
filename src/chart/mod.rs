//! Chart geometry: spline paths, frame layout, and category colors.

pub mod layout;
pub mod spline;

pub use layout::{area_path, color_for, pie_slices, ChartFrame, PieSlice, PALETTE};
pub use spline::cardinal_spline;

use serde::{Deserialize, Serialize};

/// A 2D point in chart space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
