//! The `skillscope timeline` command.

use std::path::Path;

use anyhow::Result;

use skillscope_core::model::MemberId;
use skillscope_core::timeline::{build_timeline, TimelinePoint};

use crate::store_file;

pub fn execute(store_path: &Path, id: u32, format: &str) -> Result<()> {
    let store = store_file::load(store_path)?;
    let points = build_timeline(MemberId(id), store.history(), store.members())?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        _ => {
            // text format
            let name = store
                .member(MemberId(id))
                .map(|m| m.name.clone())
                .unwrap_or_default();
            println!("Timeline for {name} (id {id}):");
            for point in &points {
                println!("  {:<12} {:.1}", point.label(), point.average);
            }
            if let Some(growth) = growth_rate(&points) {
                println!("Growth: {growth:+.1}");
            }
        }
    }
    Ok(())
}

/// Last minus first average; only meaningful with at least two points.
fn growth_rate(points: &[TimelinePoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    Some(points.last()?.average - points.first()?.average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_needs_two_points() {
        let single = vec![TimelinePoint {
            date: None,
            average: 3.0,
        }];
        assert!(growth_rate(&single).is_none());

        let pair = vec![
            TimelinePoint {
                date: Some("2024-01-01".parse().unwrap()),
                average: 2.5,
            },
            TimelinePoint {
                date: None,
                average: 4.0,
            },
        ];
        assert_eq!(growth_rate(&pair), Some(1.5));
    }
}
