//! Inline SVG radar chart of a score breakdown. Each axis is one dimension,
//! scaled by that dimension's maximum sub-score.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::scoring::{Dimension, ScoreBreakdown};

const SIZE: f64 = 320.0;
const CENTER: f64 = SIZE / 2.0;
const RADIUS: f64 = 110.0;
const RINGS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Point on axis `index` at `fraction` of the full radius. Axis 0 points up,
/// the rest follow clockwise.
fn axis_point(index: usize, fraction: f64) -> (f64, f64) {
    let angle = -PI / 2.0 + index as f64 * 2.0 * PI / Dimension::ALL.len() as f64;
    (
        CENTER + RADIUS * fraction * angle.cos(),
        CENTER + RADIUS * fraction * angle.sin(),
    )
}

fn polygon(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Vertices of the score polygon, one per dimension in `Dimension::ALL` order
pub fn radar_points(breakdown: &ScoreBreakdown) -> Vec<(f64, f64)> {
    Dimension::ALL
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let fraction = breakdown.get(*d) as f64 / d.max_score() as f64;
            axis_point(i, fraction.clamp(0.0, 1.0))
        })
        .collect()
}

pub fn render_radar_svg(breakdown: &ScoreBreakdown) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg class="radar" viewBox="0 0 {size} {size}" width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg">"#,
        size = SIZE
    );

    for ring in RINGS {
        let points: Vec<(f64, f64)> = (0..Dimension::ALL.len())
            .map(|i| axis_point(i, ring))
            .collect();
        let _ = writeln!(
            svg,
            r##"  <polygon class="ring" points="{}" fill="none" stroke="#ccc" stroke-width="1"/>"##,
            polygon(&points)
        );
    }

    for (i, dimension) in Dimension::ALL.iter().enumerate() {
        let (x, y) = axis_point(i, 1.0);
        let _ = writeln!(
            svg,
            r##"  <line x1="{c:.1}" y1="{c:.1}" x2="{x:.1}" y2="{y:.1}" stroke="#ccc" stroke-width="1"/>"##,
            c = CENTER
        );
        let (lx, ly) = axis_point(i, 1.22);
        let anchor = if (lx - CENTER).abs() < 1.0 {
            "middle"
        } else if lx > CENTER {
            "start"
        } else {
            "end"
        };
        let _ = writeln!(
            svg,
            r#"  <text x="{lx:.1}" y="{ly:.1}" text-anchor="{anchor}" font-size="12">{} ({}/{})</text>"#,
            dimension.label(),
            breakdown.get(*dimension),
            dimension.max_score()
        );
    }

    let _ = writeln!(
        svg,
        r##"  <polygon class="score" points="{}" fill="rgba(214, 69, 65, 0.35)" stroke="#d64541" stroke-width="2"/>"##,
        polygon(&radar_points(breakdown))
    );
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(values: [u32; 5]) -> ScoreBreakdown {
        ScoreBreakdown {
            belt_width: values[0],
            belt_speed: values[1],
            splice_type: values[2],
            abrasiveness: values[3],
            moisture: values[4],
        }
    }

    #[test]
    fn test_first_axis_points_up() {
        let (x, y) = axis_point(0, 1.0);
        assert!((x - CENTER).abs() < 1e-9);
        assert!((y - (CENTER - RADIUS)).abs() < 1e-9);
    }

    #[test]
    fn test_max_breakdown_reaches_outer_ring() {
        let points = radar_points(&breakdown([8, 8, 4, 3, 8]));
        assert_eq!(points.len(), 5);
        for (x, y) in points {
            let r = ((x - CENTER).powi(2) + (y - CENTER).powi(2)).sqrt();
            assert!((r - RADIUS).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_scores_collapse_to_center() {
        let points = radar_points(&breakdown([0, 0, 0, 0, 0]));
        assert_eq!(points[0], (CENTER, CENTER));
    }

    #[test]
    fn test_svg_contains_labels_and_score_polygon() {
        let svg = render_radar_svg(&breakdown([1, 2, 0, 1, 1]));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Belt width (1/8)"));
        assert!(svg.contains("Abrasiveness (1/3)"));
        assert_eq!(svg.matches(r#"class="ring""#).count(), 4);
        assert_eq!(svg.matches(r#"class="score""#).count(), 1);
    }
}
