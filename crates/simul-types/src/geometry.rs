//! Map geometry attached to regions for rendering clients.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A point in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed outline of a region, as an ordered list of vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Polygon {
    /// Vertices in drawing order. The last vertex connects back to the first.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Enclosed area via the shoelace formula. Zero for degenerate outlines.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let doubled: f64 = self
            .points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        doubled.abs() / 2.0
    }
}
