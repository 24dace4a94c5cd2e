//! Editable, ordered collection of events
//!
//! This is the caller-side list the engine takes a snapshot of. Insertion
//! order is preserved and is the tie-break the engine relies on.

use super::{Event, EventId, Params};
use crate::error::{ScenarioError, ScenarioResult};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<Event>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing events, keeping their ids
    pub fn from_events(events: Vec<Event>) -> ScenarioResult<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(event.id) {
                return Err(ScenarioError::DuplicateEventId { id: event.id });
            }
        }

        let next_id = events.iter().map(|e| e.id.0 + 1).max().unwrap_or(0);
        Ok(Self { events, next_id })
    }

    /// Place a new event and return its freshly assigned id
    pub fn add(&mut self, event_type: &str, age: i32, params: Params) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.events.push(Event::new(id, event_type, age, params));
        id
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Merge fields into an event's params. Returns false for unknown ids.
    pub fn update_params(&mut self, id: EventId, updates: Params) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.params.merge(updates);
                true
            }
            None => false,
        }
    }

    /// Move an event to another age. Returns false for unknown ids.
    pub fn move_to(&mut self, id: EventId, age: i32) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.age = age;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    /// Drop every event; ids are not reused afterwards
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
