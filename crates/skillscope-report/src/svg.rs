//! Radar chart generator.
//!
//! Ten spokes in canonical competency order, level rings at 1 through 5,
//! the member's polygon filled in the member color, and an optional dashed
//! ideal-profile overlay.

use std::path::Path;

use anyhow::{Context, Result};

use skillscope_core::competency::CompetencyKey;
use skillscope_core::model::{Member, Scores, MAX_LEVEL};

use crate::xml_escape;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 440.0;
const CENTER_X: f64 = 240.0;
const CENTER_Y: f64 = 230.0;
const RADIUS: f64 = 150.0;
const LABEL_OFFSET: f64 = 24.0;

/// Spoke endpoint for a level on the i-th axis. Axis 0 points straight up;
/// the rest proceed clockwise.
fn spoke_point(axis: usize, level: f64) -> (f64, f64) {
    let angle = -std::f64::consts::FRAC_PI_2
        + (axis as f64) * std::f64::consts::TAU / CompetencyKey::ALL.len() as f64;
    let r = RADIUS * level / MAX_LEVEL as f64;
    (CENTER_X + r * angle.cos(), CENTER_Y + r * angle.sin())
}

fn polygon_points(scores: &Scores) -> String {
    CompetencyKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &key)| {
            let (x, y) = spoke_point(i, scores.get(key) as f64);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a standalone radar chart SVG for one member.
pub fn generate_radar(member: &Member, ideal: Option<&Scores>) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         font-family=\"sans-serif\" font-size=\"12\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"#ffffff\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{CENTER_X}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">{}</text>\n",
        xml_escape(&member.name)
    ));

    // Level rings
    for level in 1..=MAX_LEVEL {
        let ring = Scores::uniform(level);
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"none\" stroke=\"#d0d0d0\" stroke-width=\"1\"/>\n",
            polygon_points(&ring)
        ));
    }

    // Spokes and axis labels
    for (i, key) in CompetencyKey::ALL.iter().enumerate() {
        let (x, y) = spoke_point(i, MAX_LEVEL as f64);
        svg.push_str(&format!(
            "<line x1=\"{CENTER_X}\" y1=\"{CENTER_Y}\" x2=\"{x:.1}\" y2=\"{y:.1}\" \
             stroke=\"#d0d0d0\" stroke-width=\"1\"/>\n"
        ));

        let label_r = (RADIUS + LABEL_OFFSET) / RADIUS * MAX_LEVEL as f64;
        let (lx, ly) = spoke_point(i, label_r);
        svg.push_str(&format!(
            "<text x=\"{lx:.1}\" y=\"{ly:.1}\" text-anchor=\"middle\">{}</text>\n",
            xml_escape(key.display_name())
        ));
    }

    // Ideal overlay under the member polygon
    if let Some(ideal) = ideal {
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"none\" stroke=\"#888888\" stroke-width=\"2\" \
             stroke-dasharray=\"6 4\"/>\n",
            polygon_points(ideal)
        ));
    }

    svg.push_str(&format!(
        "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.35\" stroke=\"{}\" \
         stroke-width=\"2\"/>\n",
        polygon_points(&member.scores),
        xml_escape(&member.color),
        xml_escape(&member.color)
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Write a radar chart to a standalone SVG file.
pub fn write_radar(member: &Member, ideal: Option<&Scores>, path: &Path) -> Result<()> {
    let svg = generate_radar(member, ideal);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)
        .with_context(|| format!("failed to write radar chart to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillscope_core::model::MemberId;

    fn member() -> Member {
        Member::new(MemberId(1), "Ana <QA>".into(), "#4e79a7".into())
    }

    #[test]
    fn radar_contains_rings_spokes_and_labels() {
        let svg = generate_radar(&member(), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        // 5 rings + 1 member polygon
        assert_eq!(svg.matches("<polygon").count(), 6);
        assert_eq!(svg.matches("<line").count(), 10);
        assert!(svg.contains("Data Analysis"));
        assert!(svg.contains("Strategy"));
    }

    #[test]
    fn ideal_overlay_adds_dashed_polygon() {
        let svg = generate_radar(&member(), Some(&Scores::uniform(5)));
        assert_eq!(svg.matches("<polygon").count(), 7);
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn member_name_is_escaped() {
        let svg = generate_radar(&member(), None);
        assert!(svg.contains("Ana &lt;QA&gt;"));
        assert!(!svg.contains("Ana <QA>"));
    }

    #[test]
    fn top_spoke_points_straight_up() {
        let (x, y) = spoke_point(0, MAX_LEVEL as f64);
        assert!((x - CENTER_X).abs() < 1e-6);
        assert!((y - (CENTER_Y - RADIUS)).abs() < 1e-6);
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("ana.svg");
        write_radar(&member(), None, &path).unwrap();
        assert!(path.exists());
    }
}
