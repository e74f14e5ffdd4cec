use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::config::InputSource;
use crate::domain::types::{CoordinateSet, Point, ProblemInstance};
use crate::error::{Error, Result};
use crate::fixtures::data_generator::generate_random_points;

/// Reads one `x,y` pair per line. Surrounding whitespace is ignored and blank
/// lines are skipped; anything else that is not two numbers is an error
/// naming the line.
pub fn load(path: impl AsRef<Path>) -> Result<CoordinateSet> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();
    for row in reader.records() {
        let record = row?;
        let line = record.position().map_or(0, |p| p.line());

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() != 2 {
            return Err(Error::invalid_input(format!(
                "{}:{}: expected 'x,y', found {} fields",
                path.display(),
                line,
                record.len()
            )));
        }

        let x = parse_coordinate(&record[0], path, line)?;
        let y = parse_coordinate(&record[1], path, line)?;
        points.push(Point::new(x, y));
    }

    info!("Loaded {} points from {}", points.len(), path.display());
    CoordinateSet::new(points)
}

fn parse_coordinate(raw: &str, path: &Path, line: u64) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| {
        Error::invalid_input(format!(
            "{}:{}: '{}' is not a number",
            path.display(),
            line,
            raw
        ))
    })?;
    if !value.is_finite() {
        return Err(Error::invalid_input(format!(
            "{}:{}: coordinate {} is not finite",
            path.display(),
            line,
            value
        )));
    }
    Ok(value)
}

/// Resolve the configured input into a problem instance with its distance matrix.
pub fn setup(input: &InputSource, seed: u64) -> Result<ProblemInstance> {
    let coordinates = match input {
        InputSource::File(path) => load(path)?,
        InputSource::Random(count) => {
            debug!("Generating {} random points with seed {}", count, seed);
            generate_random_points(*count, seed)?
        }
    };

    let instance = ProblemInstance::new(coordinates);
    info!("Setup completed with {} points", instance.len());
    Ok(instance)
}
