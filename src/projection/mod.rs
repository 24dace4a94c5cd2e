//! Projection engine for yearly net worth series

mod context;
mod engine;
mod results;

pub use context::{CalculationContext, Modifiers};
pub use engine::{ProjectionEngine, SimulationParams};
pub use results::{ProjectionPoint, ProjectionResult, ProjectionSummary};
