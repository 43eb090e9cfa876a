//! Point-file parsing.
//!
//! One vector per line, components separated by commas or whitespace.
//! Blank lines and `#` comments are skipped. All vectors must share one
//! dimensionality.

use crate::core::{FraclusError, Result};
use crate::database::InMemoryDatabase;
use std::fs;
use std::path::Path;

pub fn load_points(path: &Path) -> Result<InMemoryDatabase> {
    let contents = fs::read_to_string(path)?;
    parse_points(&contents)
}

pub fn parse_points(contents: &str) -> Result<InMemoryDatabase> {
    let mut points: Vec<Vec<f64>> = Vec::new();
    let mut expected: Option<usize> = None;
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let components = parse_line(line, number)?;
        match expected {
            None => expected = Some(components.len()),
            Some(expected) if expected != components.len() => {
                return Err(FraclusError::DimensionMismatch {
                    line: number,
                    expected,
                    found: components.len(),
                });
            }
            Some(_) => {}
        }
        points.push(components);
    }
    Ok(InMemoryDatabase::new(points))
}

fn parse_line(line: &str, number: usize) -> Result<Vec<f64>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| FraclusError::Parse {
                line: number,
                message: format!("invalid component {token:?}"),
            })
        })
        .collect()
}
