//! Projection output structures

use crate::error::ScenarioResult;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Net worth at the end of one simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub age: i32,
    pub net_worth: f64,
}

/// Complete projection result, one point per age in the range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(years: usize) -> Self {
        Self {
            points: Vec::with_capacity(years),
        }
    }

    pub fn add_point(&mut self, age: i32, net_worth: f64) {
        self.points.push(ProjectionPoint { age, net_worth });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Net worth at a given age, if it was simulated
    pub fn net_worth_at(&self, age: i32) -> Option<f64> {
        let first = self.points.first()?.age;
        let index = usize::try_from(i64::from(age) - i64::from(first)).ok()?;
        self.points.get(index).map(|p| p.net_worth)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let peak = self
            .points
            .iter()
            .copied()
            .reduce(|best, p| if p.net_worth > best.net_worth { p } else { best });
        let trough = self
            .points
            .iter()
            .copied()
            .reduce(|worst, p| if p.net_worth < worst.net_worth { p } else { worst });

        ProjectionSummary {
            years: u32::try_from(self.points.len()).unwrap_or(u32::MAX),
            final_net_worth: self.points.last().map(|p| p.net_worth).unwrap_or(0.0),
            peak,
            trough,
            first_negative_age: self.points.iter().find(|p| p.net_worth < 0.0).map(|p| p.age),
        }
    }

    /// Write `age,netWorth` rows as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> ScenarioResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub final_net_worth: f64,
    /// Highest point; the earliest age wins on ties
    pub peak: Option<ProjectionPoint>,
    /// Lowest point; the earliest age wins on ties
    pub trough: Option<ProjectionPoint>,
    pub first_negative_age: Option<i32>,
}
