//! Cardinal spline rendering for the line charts.

use super::Point;

/// Builds a smooth SVG path through `points` as a cardinal spline.
///
/// Every consecutive pair becomes one cubic segment whose control points are
/// derived from the neighbors on either side; at the ends the missing
/// neighbor is replaced by the endpoint itself, so the path passes through
/// the first and last point exactly. Fewer than two points yield an empty
/// path. `_closed` is reserved; no wraparound segment is emitted.
pub fn cardinal_spline(points: &[Point], tension: f64, _closed: bool) -> String {
    if points.len() < 2 {
        return String::new();
    }

    let mut path = format!("M {} {}", points[0].x, points[0].y);
    for i in 0..points.len() - 1 {
        let p0 = if i == 0 { points[0] } else { points[i - 1] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i == points.len() - 2 {
            p2
        } else {
            points[i + 2]
        };

        let cp1x = p1.x + (p2.x - p0.x) / 6.0 * tension;
        let cp1y = p1.y + (p2.y - p0.y) / 6.0 * tension;
        let cp2x = p2.x - (p3.x - p1.x) / 6.0 * tension;
        let cp2y = p2.y - (p3.y - p1.y) / 6.0 * tension;

        path.push_str(&format!(
            " C {} {}, {} {}, {} {}",
            cp1x, cp1y, cp2x, cp2y, p2.x, p2.y
        ));
    }
    path
}
