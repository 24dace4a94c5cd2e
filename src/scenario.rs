//! Scenario runner for repeated and batch projections
//!
//! Registers the built-in handlers once, then runs any number of
//! projections against them. Every run is independent and side-effect free.

use crate::events::{Event, Scenario};
use crate::handlers::{HandlerRegistry, HoverStats};
use crate::projection::{ProjectionEngine, ProjectionResult, SimulationParams};
use rayon::prelude::*;

/// Pre-registered scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let scenario = load_scenario("plan.json")?;
/// let result = runner.run_scenario(&scenario);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    registry: HandlerRegistry,
}

impl ScenarioRunner {
    /// Create runner with every built-in event handler
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::with_default_handlers(),
        }
    }

    /// Create runner with a custom registry
    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Project one event snapshot over the given range
    /// Clones the registry internally (handlers are shared, not copied)
    pub fn run(&self, events: &[Event], params: SimulationParams) -> ProjectionResult {
        let engine = ProjectionEngine::new(self.registry.clone(), params);
        engine.project(events)
    }

    pub fn run_scenario(&self, scenario: &Scenario) -> ProjectionResult {
        self.run(scenario.timeline.events(), scenario.simulation)
    }

    /// Project independent scenarios in parallel; results keep input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ProjectionResult> {
        scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect()
    }

    /// Display statistics for an event at an age; empty for unknown types
    pub fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        self.registry
            .get(&event.event_type)
            .map(|handler| handler.hover_stats(event, age))
            .unwrap_or_default()
    }

    /// Get reference to the registry for inspection
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Get mutable reference to the registry for customization
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
