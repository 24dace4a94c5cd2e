//! Per-year calculation scratch state shared across handlers

use super::SimulationParams;
use crate::events::Event;

/// Shared modifiers handlers may rewrite within one simulated year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Modifiers {
    /// Prevailing investment return (percent) from the simulation parameters
    pub base_return: Option<f64>,

    /// Sum of temporary return adjustments active this year (percentage points)
    pub return_adjustment: f64,
}

/// Context handed to every handler call within one year
///
/// A fresh copy of the run's base context is taken at the start of each
/// year, so nothing written here survives into the next year.
#[derive(Debug, Clone)]
pub struct CalculationContext<'a> {
    pub start_age: i32,
    pub end_age: i32,

    /// Full event snapshot for this run, in input order
    pub all_events: &'a [Event],

    pub modifiers: Modifiers,
}

impl<'a> CalculationContext<'a> {
    /// Base context for a projection run
    pub fn new(params: &SimulationParams, all_events: &'a [Event]) -> Self {
        Self {
            start_age: params.start_age,
            end_age: params.end_age,
            all_events,
            modifiers: Modifiers {
                base_return: params.investment_return,
                return_adjustment: 0.0,
            },
        }
    }

    /// Return rate (percent) for a regime: its own rate if given, else the
    /// simulation's base rate, with this year's adjustments on top
    pub fn effective_return(&self, own_rate: Option<f64>) -> f64 {
        own_rate.or(self.modifiers.base_return).unwrap_or(0.0) + self.modifiers.return_adjustment
    }

    /// Whether no event in the snapshot is placed before `age`
    pub fn is_first_at(&self, age: i32) -> bool {
        !self.all_events.iter().any(|e| e.age < age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventId, Params};

    #[test]
    fn test_effective_return_fallbacks() {
        let params = SimulationParams {
            start_age: 20,
            end_age: 30,
            investment_return: Some(7.0),
        };
        let mut ctx = CalculationContext::new(&params, &[]);

        assert_eq!(ctx.effective_return(Some(4.0)), 4.0);
        assert_eq!(ctx.effective_return(None), 7.0);

        ctx.modifiers.return_adjustment = -20.0;
        assert_eq!(ctx.effective_return(Some(4.0)), -16.0);

        ctx.modifiers.base_return = None;
        ctx.modifiers.return_adjustment = 0.0;
        assert_eq!(ctx.effective_return(None), 0.0);
    }

    #[test]
    fn test_clone_does_not_touch_base() {
        let params = SimulationParams::default();
        let base = CalculationContext::new(&params, &[]);
        let mut year = base.clone();
        year.modifiers.return_adjustment = 5.0;

        assert_eq!(base.modifiers.return_adjustment, 0.0);
    }

    #[test]
    fn test_is_first_at() {
        let events = vec![
            Event::new(EventId(0), "a", 25, Params::new()),
            Event::new(EventId(1), "b", 30, Params::new()),
        ];
        let params = SimulationParams::default();
        let ctx = CalculationContext::new(&params, &events);

        assert!(ctx.is_first_at(25));
        assert!(!ctx.is_first_at(30));
    }
}
