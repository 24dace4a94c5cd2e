//! Load scenarios (simulation range plus events) from JSON

use super::{Event, EventId, Params, Timeline};
use crate::error::ScenarioResult;
use crate::projection::SimulationParams;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw scenario document
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    simulation: SimulationParams,
    #[serde(default)]
    events: Vec<EventRow>,
}

/// Raw event entry; the id may be omitted
#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(default)]
    id: Option<EventId>,
    #[serde(rename = "type")]
    event_type: String,
    age: i32,
    #[serde(default)]
    params: Params,
}

/// A loaded scenario ready to project
#[derive(Debug, Clone)]
pub struct Scenario {
    pub simulation: SimulationParams,
    pub timeline: Timeline,
}

impl ScenarioFile {
    fn into_scenario(self) -> ScenarioResult<Scenario> {
        // Missing ids continue after the largest explicit one
        let mut next_id = self
            .events
            .iter()
            .filter_map(|row| row.id)
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(0);

        let events = self
            .events
            .into_iter()
            .map(|row| {
                let id = row.id.unwrap_or_else(|| {
                    let id = EventId(next_id);
                    next_id += 1;
                    id
                });
                Event::new(id, &row.event_type, row.age, row.params)
            })
            .collect();

        if self.simulation.start_age > self.simulation.end_age {
            log::warn!(
                "scenario age range is inverted ({} > {}); projection will be empty",
                self.simulation.start_age,
                self.simulation.end_age
            );
        }

        Ok(Scenario {
            simulation: self.simulation,
            timeline: Timeline::from_events(events)?,
        })
    }
}

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> ScenarioResult<Scenario> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let scenario = load_scenario_from_reader(BufReader::new(file))?;
    log::info!(
        "loaded {} events from {}",
        scenario.timeline.len(),
        path.display()
    );
    Ok(scenario)
}

/// Load a scenario from any reader (e.g., string buffer, network stream)
pub fn load_scenario_from_reader<R: Read>(reader: R) -> ScenarioResult<Scenario> {
    let raw: ScenarioFile = serde_json::from_reader(reader)?;
    raw.into_scenario()
}

/// Load a scenario from a JSON string
pub fn load_scenario_from_str(json: &str) -> ScenarioResult<Scenario> {
    let raw: ScenarioFile = serde_json::from_str(json)?;
    raw.into_scenario()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioError;

    #[test]
    fn test_load_scenario_assigns_missing_ids() {
        let json = r#"{
            "simulation": {"startAge": 20, "endAge": 65, "investmentReturn": 6},
            "events": [
                {"type": "financial-phase", "age": 20, "params": {"startingNetWorth": 5000}},
                {"id": 10, "type": "house", "age": 32, "params": {"purchasePrice": 250000}},
                {"type": "large-expense", "age": 40}
            ]
        }"#;
        let scenario = load_scenario_from_str(json).unwrap();

        assert_eq!(scenario.simulation.start_age, 20);
        assert_eq!(scenario.simulation.end_age, 65);
        assert_eq!(scenario.simulation.investment_return, Some(6.0));

        let ids: Vec<_> = scenario.timeline.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(11), EventId(10), EventId(12)]);
        assert!(scenario.timeline.events()[2].params.is_empty());
    }

    #[test]
    fn test_missing_simulation_uses_defaults() {
        let scenario = load_scenario_from_str(r#"{"events": []}"#).unwrap();
        assert_eq!(scenario.simulation, SimulationParams::default());
        assert!(scenario.timeline.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"events": [
            {"id": 1, "type": "house", "age": 30},
            {"id": 1, "type": "house", "age": 31}
        ]}"#;
        let err = load_scenario_from_str(json).unwrap_err();
        assert!(matches!(err, ScenarioError::DuplicateEventId { .. }));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = load_scenario_from_str(r#"{"events": [{"type": "house"}]}"#).unwrap_err();
        assert!(matches!(err, ScenarioError::Json(_)));
    }
}
