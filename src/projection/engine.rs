//! Core projection engine for yearly net worth projections

use super::context::CalculationContext;
use super::results::ProjectionResult;
use crate::events::Event;
use crate::handlers::{EventHandler, HandlerConfig, HandlerRegistry, Timing};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Simulated age range and prevailing market return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParams {
    /// First simulated age (inclusive)
    pub start_age: i32,

    /// Last simulated age (inclusive)
    pub end_age: i32,

    /// Annual return in percent, used by regimes that give none of their own
    pub investment_return: Option<f64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            start_age: 15,
            end_age: 80,
            investment_return: Some(7.0),
        }
    }
}

impl SimulationParams {
    /// Number of simulated years; zero for an inverted range
    pub fn years(&self) -> usize {
        let span = i64::from(self.end_age) - i64::from(self.start_age) + 1;
        usize::try_from(span).unwrap_or(0)
    }
}

/// An event paired with the handler that resolves it
#[derive(Clone, Copy)]
struct Scheduled<'a> {
    event: &'a Event,
    handler: &'a dyn EventHandler,
    config: HandlerConfig,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    registry: HandlerRegistry,
    params: SimulationParams,
}

impl ProjectionEngine {
    /// Create a new projection engine with given handlers and range
    pub fn new(registry: HandlerRegistry, params: SimulationParams) -> Self {
        Self { registry, params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Run the full projection over a snapshot of events
    ///
    /// Produces one point per age in the range, or nothing when the range
    /// is inverted. The events are only read.
    pub fn project(&self, events: &[Event]) -> ProjectionResult {
        let mut result = ProjectionResult::with_capacity(self.params.years());
        if self.params.start_age > self.params.end_age {
            return result;
        }

        let scheduled = self.schedule(events);
        let base = CalculationContext::new(&self.params, events);
        let mut net_worth = 0.0;

        for age in self.params.start_age..=self.params.end_age {
            net_worth = self.calculate_year(age, net_worth, &scheduled, events, base.clone());
            result.add_point(age, net_worth);
        }

        log::debug!(
            "projected ages {}..={} over {} events, final net worth {:.2}",
            self.params.start_age,
            self.params.end_age,
            scheduled.len(),
            net_worth
        );

        result
    }

    /// Resolve handlers and order by priority, highest first
    ///
    /// Events without a handler are dropped; equal priorities keep input
    /// order (the sort is stable).
    fn schedule<'a>(&'a self, events: &'a [Event]) -> Vec<Scheduled<'a>> {
        let mut scheduled: Vec<Scheduled<'a>> = Vec::with_capacity(events.len());
        for event in events {
            match self.registry.get(&event.event_type) {
                Some(handler) => scheduled.push(Scheduled {
                    event,
                    handler,
                    config: handler.config(),
                }),
                None => log::debug!(
                    "event {} has unregistered type '{}'; it has no effect",
                    event.id,
                    event.event_type
                ),
            }
        }

        scheduled.sort_by_key(|s| Reverse(s.config.priority));
        scheduled
    }

    /// Calculate one simulated year, returning the closing net worth
    fn calculate_year<'a>(
        &self,
        age: i32,
        mut net_worth: f64,
        scheduled: &[Scheduled<'a>],
        events: &'a [Event],
        mut ctx: CalculationContext<'a>,
    ) -> f64 {
        // Before-year hooks
        for s in scheduled.iter().filter(|s| s.event.age <= age) {
            net_worth = s.handler.before_year_calculation(age, net_worth, events, &ctx);
        }

        // One-time impacts that land before growth
        (net_worth, ctx) = apply_immediate(scheduled, Timing::BeforeGrowth, age, net_worth, events, ctx);
        (net_worth, ctx) = apply_immediate(scheduled, Timing::Immediate, age, net_worth, events, ctx);

        // Growth: context modifiers first, then contributions against the
        // same pre-aggregation net worth, added once
        for s in scheduled
            .iter()
            .filter(|s| s.event.age <= age && s.config.modifies_context)
        {
            ctx = s.handler.modify_context(ctx, s.event, age);
        }

        let total_growth: f64 = scheduled
            .iter()
            .filter(|s| s.event.age <= age && s.config.affects_growth)
            .map(|s| s.handler.contribute_to_yearly_growth(net_worth, s.event, age, &ctx))
            .sum();
        net_worth += total_growth;

        (net_worth, ctx) = apply_immediate(scheduled, Timing::AfterGrowth, age, net_worth, events, ctx);

        // Ongoing impacts never fire in the placement year
        for s in scheduled
            .iter()
            .filter(|s| s.event.age < age && s.config.has_ongoing_impact)
        {
            net_worth = s.handler.calculate_ongoing_impact(net_worth, s.event, age, events, &ctx);
        }

        // After-year hooks
        for s in scheduled.iter().filter(|s| s.event.age <= age) {
            net_worth = s.handler.after_year_calculation(age, net_worth, events, &ctx);
        }

        net_worth
    }
}

/// Apply one-time impacts of events placed at `age` with the given timing,
/// each seeing the running total left by the previous one
fn apply_immediate<'a>(
    scheduled: &[Scheduled<'a>],
    timing: Timing,
    age: i32,
    mut net_worth: f64,
    events: &'a [Event],
    mut ctx: CalculationContext<'a>,
) -> (f64, CalculationContext<'a>) {
    for s in scheduled.iter().filter(|s| {
        s.event.age == age && s.config.has_immediate_impact && s.config.timing == timing
    }) {
        ctx = s.handler.modify_context(ctx, s.event, age);
        net_worth = s.handler.calculate_immediate_impact(net_worth, s.event, age, events, &ctx);
    }
    (net_worth, ctx)
}
