//! Net worth projection engine driven by typed life events
//!
//! This library provides:
//! - An event data model with free-form, defensively read parameters
//! - A polymorphic handler contract and registry, one handler per event type
//! - The yearly projection loop that orders handlers by priority and timing
//! - Scenario loading from JSON and a runner for single and batch projections

pub mod error;
pub mod events;
pub mod handlers;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ScenarioError, ScenarioResult};
pub use events::{Event, EventId, ParamValue, Params, Timeline};
pub use handlers::{EventHandler, HandlerConfig, HandlerRegistry, Timing};
pub use projection::{ProjectionEngine, ProjectionPoint, ProjectionResult, SimulationParams};
pub use scenario::ScenarioRunner;
