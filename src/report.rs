//! Console output and file exports for a finished solve.

use std::fs::File;
use std::path::Path;

use colored::*;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::config::{AcoConfig, ExactConfig, Method};
use crate::domain::types::{CoordinateSet, Tour};
use crate::error::Result;
use crate::solver::aco::pheromone::PheromoneField;

pub const ROUTE_CSV: &str = "route.csv";
pub const PHEROMONE_CSV: &str = "pheromones.csv";
pub const BEST_SO_FAR_CSV: &str = "best_so_far.csv";
pub const SUMMARY_JSON: &str = "summary.json";

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub method: Method,
    pub node_count: usize,
    pub length: f64,
    /// Route with node labels counted from 1.
    pub route: Vec<usize>,
    pub seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aco: Option<AcoConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<ExactConfig>,
}

pub fn print_solution(summary: &RunSummary) {
    println!("Chosen Method: {}", summary.method.display_name().bold());
    println!(
        "Time it takes to find the shortest path: {} seconds",
        format!("{:.3}", summary.seconds).cyan()
    );
    println!(
        "Shortest Distance: {}",
        format!("{:.6}", summary.length).green()
    );
    println!("Shortest Path: {:?}", summary.route);
}

/// One row per stop of the closed route: `order,node,x,y`.
pub fn save_route_csv(tour: &Tour, coordinates: &CoordinateSet, path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["order", "node", "x", "y"])?;

    for (order, &node) in tour.route.iter().enumerate() {
        let point = coordinates.points()[node];
        wtr.write_record([
            order.to_string(),
            (node + 1).to_string(),
            point.x.to_string(),
            point.y.to_string(),
        ])?;
    }

    wtr.flush()?;
    info!("Route written to {}", path.display());
    Ok(())
}

/// Upper triangle of the trail matrix: `from,to,pheromone`.
pub fn save_pheromones_csv(pheromones: &PheromoneField, path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["from", "to", "pheromone"])?;

    for from in 0..pheromones.len() {
        for to in (from + 1)..pheromones.len() {
            wtr.write_record([
                (from + 1).to_string(),
                (to + 1).to_string(),
                pheromones.get(from, to).to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    info!("Pheromone matrix written to {}", path.display());
    Ok(())
}

pub fn save_best_so_far_csv(best_so_far_updates: &[(usize, f64)], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["iteration", "new_best_so_far"])?;

    for (iteration, value) in best_so_far_updates {
        wtr.write_record([iteration.to_string(), value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_summary_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    info!("Summary written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CoordinateSet;
    use tempfile::TempDir;

    fn square() -> CoordinateSet {
        CoordinateSet::from_pairs(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_route_csv_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ROUTE_CSV);
        let tour = Tour::new(vec![0, 1, 2, 3, 0], 4.0);

        save_route_csv(&tour, &square(), &path).expect("write route");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "order,node,x,y");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "2,3,1,1");
        assert_eq!(lines[5], "4,1,0,0");
    }

    #[test]
    fn test_pheromone_csv_upper_triangle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PHEROMONE_CSV);
        let field = PheromoneField::initialize(4, 0.5);

        save_pheromones_csv(&field, &path).expect("write pheromones");

        let contents = std::fs::read_to_string(&path).unwrap();
        // header + 4 choose 2
        assert_eq!(contents.lines().count(), 7);
        assert!(contents.contains("1,2,0.5"));
    }

    #[test]
    fn test_summary_json_round_trips_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SUMMARY_JSON);
        let summary = RunSummary {
            method: Method::Exact,
            node_count: 4,
            length: 4.0,
            route: vec![1, 2, 3, 4, 1],
            seconds: 0.01,
            seed: None,
            aco: None,
            exact: Some(ExactConfig::default()),
        };

        save_summary_json(&summary, &path).expect("write json");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["method"], "exact");
        assert_eq!(value["node_count"], 4);
        assert_eq!(value["route"], serde_json::json!([1, 2, 3, 4, 1]));
        assert!(value.get("aco").is_none());
        assert!(value.get("seed").is_none());
    }
}
