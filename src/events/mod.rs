//! Event data structures, editable timelines and scenario loading

mod data;
mod timeline;
pub mod loader;

pub use data::{event_types, Event, EventId, ParamValue, Params};
pub use timeline::Timeline;
pub use loader::{load_scenario, load_scenario_from_reader, load_scenario_from_str, Scenario};
