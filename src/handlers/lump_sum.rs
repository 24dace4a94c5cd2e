//! One-time cash events: windfalls and large expenses

use super::{stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;

fn timing_label(timing: Timing) -> &'static str {
    match timing {
        Timing::BeforeGrowth => "Before growth calculation",
        Timing::Immediate => "Immediate",
        Timing::AfterGrowth => "After growth calculation",
    }
}

/// One-time income; by default it lands before growth and earns that
/// year's return
#[derive(Debug, Clone, Copy)]
pub struct IncomePulseHandler {
    timing: Timing,
}

impl IncomePulseHandler {
    pub fn new() -> Self {
        Self::with_timing(Timing::BeforeGrowth)
    }

    pub fn with_timing(timing: Timing) -> Self {
        Self { timing }
    }
}

impl Default for IncomePulseHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for IncomePulseHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 500,
            timing: self.timing,
            ..HandlerConfig::default()
        }
    }

    fn calculate_immediate_impact(
        &self,
        net_worth: f64,
        event: &Event,
        age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        let amount = event.params.number_or("amount", 0.0);
        log::trace!("income pulse at age {age}: adding {amount} to {net_worth}");
        net_worth + amount
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        let earns_returns = if self.timing == Timing::AfterGrowth { "No" } else { "Yes, same year" };
        stats([
            ("Income Amount", event.params.display_value("amount")),
            ("Type", "One-time payment".into()),
            ("Impact Timing", timing_label(self.timing).into()),
            ("Earns Returns", ParamValue::from(earns_returns)),
        ])
    }
}

/// One-time expense; by default it leaves after growth so it does not
/// shrink that year's growth base
#[derive(Debug, Clone, Copy)]
pub struct LargeExpenseHandler {
    timing: Timing,
}

impl LargeExpenseHandler {
    pub fn new() -> Self {
        Self::with_timing(Timing::AfterGrowth)
    }

    pub fn with_timing(timing: Timing) -> Self {
        Self { timing }
    }
}

impl Default for LargeExpenseHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for LargeExpenseHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 500,
            timing: self.timing,
            ..HandlerConfig::default()
        }
    }

    fn calculate_immediate_impact(
        &self,
        net_worth: f64,
        event: &Event,
        _age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        net_worth - event.params.number_or("amount", 0.0)
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        stats([
            ("Expense Amount", event.params.display_value("amount")),
            ("Type", "One-time expense".into()),
            ("Impact Timing", timing_label(self.timing).into()),
        ])
    }
}
