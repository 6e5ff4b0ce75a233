//! Composite-axes scatter chart generator.
//!
//! Places each member by the two derived axes: technical mean on x, human
//! mean on y. Both axes run the level range 1 to 5.

use std::path::Path;

use anyhow::{Context, Result};

use skillscope_core::aggregate::composite_axes;
use skillscope_core::model::{Member, MAX_LEVEL, MIN_LEVEL};

use crate::xml_escape;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 50.0;
const PLOT: f64 = WIDTH - 2.0 * MARGIN;

/// Map a level-scale value (1..=5) onto plot coordinates.
fn plot_x(value: f64) -> f64 {
    MARGIN + (value - MIN_LEVEL as f64) / (MAX_LEVEL - MIN_LEVEL) as f64 * PLOT
}

fn plot_y(value: f64) -> f64 {
    // SVG y grows downward; the axis should grow upward.
    HEIGHT - MARGIN - (value - MIN_LEVEL as f64) / (MAX_LEVEL - MIN_LEVEL) as f64 * PLOT
}

/// Generate a standalone scatter chart SVG for the given members.
pub fn generate_scatter(members: &[&Member]) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         font-family=\"sans-serif\" font-size=\"12\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"#ffffff\"/>\n"
    ));

    // Grid lines at each whole level, both directions
    for level in MIN_LEVEL..=MAX_LEVEL {
        let x = plot_x(level as f64);
        let y = plot_y(level as f64);
        svg.push_str(&format!(
            "<line x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" \
             stroke=\"#e0e0e0\" stroke-width=\"1\"/>\n",
            plot_y(MAX_LEVEL as f64),
            plot_y(MIN_LEVEL as f64)
        ));
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" \
             stroke=\"#e0e0e0\" stroke-width=\"1\"/>\n",
            plot_x(MIN_LEVEL as f64),
            plot_x(MAX_LEVEL as f64)
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{level}</text>\n",
            HEIGHT - MARGIN + 20.0
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{level}</text>\n",
            MARGIN - 10.0,
            y + 4.0
        ));
    }

    // Axis titles
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\">Technical</text>\n",
        WIDTH / 2.0,
        HEIGHT - 8.0
    ));
    svg.push_str(&format!(
        "<text x=\"14\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" \
         transform=\"rotate(-90 14 {:.1})\">Human</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0
    ));

    // Member dots with name labels
    for member in members {
        let axes = composite_axes(&member.scores);
        let x = plot_x(axes.technical);
        let y = plot_y(axes.human);
        svg.push_str(&format!(
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"6\" fill=\"{}\"/>\n",
            xml_escape(&member.color)
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
            y - 10.0,
            xml_escape(&member.name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write a scatter chart to a standalone SVG file.
pub fn write_scatter(members: &[&Member], path: &Path) -> Result<()> {
    let svg = generate_scatter(members);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)
        .with_context(|| format!("failed to write scatter chart to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillscope_core::model::{MemberId, Scores};

    fn member(id: u32, name: &str) -> Member {
        Member::new(MemberId(id), name.into(), "#f28e2b".into())
    }

    #[test]
    fn scatter_plots_one_dot_per_member() {
        let a = member(1, "Ana");
        let b = member(2, "Ben");
        let svg = generate_scatter(&[&a, &b]);

        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("Ana"));
        assert!(svg.contains("Ben"));
        assert!(svg.contains("Technical"));
        assert!(svg.contains("Human"));
    }

    #[test]
    fn all_fives_lands_in_the_top_right_corner() {
        let mut m = member(1, "Max");
        m.scores = Scores::uniform(5);
        let svg = generate_scatter(&[&m]);

        let top_right = format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\"",
            plot_x(5.0),
            plot_y(5.0)
        );
        assert!(svg.contains(&top_right));
        // Highest human score maps to the smallest y.
        assert!(plot_y(5.0) < plot_y(1.0));
    }

    #[test]
    fn empty_member_list_still_renders_grid() {
        let svg = generate_scatter(&[]);
        assert!(svg.contains("<line"));
        assert_eq!(svg.matches("<circle").count(), 0);
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.svg");
        let m = member(1, "Ana");
        write_scatter(&[&m], &path).unwrap();
        assert!(path.exists());
    }
}
