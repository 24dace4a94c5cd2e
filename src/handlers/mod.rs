//! Event handlers: how each event type moves net worth and growth
//!
//! Every event type plugs into the yearly loop through [`EventHandler`].
//! Capabilities a type does not use keep their neutral default, and the
//! flags in [`HandlerConfig`] decide which phases consider the handler.

mod registry;
mod regime;
mod lump_sum;
mod loans;
mod assets;
mod recurring;
mod market;

pub use registry::HandlerRegistry;
pub use regime::{active_instance, FinancialPhaseHandler, RetirementHandler};
pub use lump_sum::{IncomePulseHandler, LargeExpenseHandler};
pub use loans::{amortized_payment, CarPurchaseHandler, StudentLoanHandler};
pub use assets::{HouseHandler, InvestmentHandler};
pub use recurring::{RecurringExpenseHandler, SideHustleHandler};
pub use market::MarketEventHandler;

use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Descriptive label → value pairs for an event at an age
pub type HoverStats = BTreeMap<String, ParamValue>;

/// Phase of the yearly loop in which a one-time impact is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    /// Applied before growth, so the amount earns that year's return
    BeforeGrowth,
    /// Default timing, also applied before growth
    Immediate,
    /// Applied after growth, outside that year's growth base
    AfterGrowth,
}

/// Static calculation behavior of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Higher runs earlier within a phase
    pub priority: i32,
    pub timing: Timing,
    pub has_immediate_impact: bool,
    pub has_ongoing_impact: bool,
    pub affects_growth: bool,
    /// Rewrites the shared context for every placed event before growth
    pub modifies_context: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            priority: 100,
            timing: Timing::Immediate,
            has_immediate_impact: true,
            has_ongoing_impact: false,
            affects_growth: false,
            modifies_context: false,
        }
    }
}

/// Capability set every event type implements
///
/// Handlers are stateless across runs and must be total over any age,
/// including ages before the event's placement.
pub trait EventHandler: Send + Sync + Debug {
    fn config(&self) -> HandlerConfig;

    fn priority(&self) -> i32 {
        self.config().priority
    }

    fn timing(&self) -> Timing {
        self.config().timing
    }

    /// Runs once per placed event per year, before any phase-specific math
    fn before_year_calculation(
        &self,
        _age: i32,
        net_worth: f64,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        net_worth
    }

    /// Fires once, in the year equal to the event's age
    fn calculate_immediate_impact(
        &self,
        net_worth: f64,
        _event: &Event,
        _age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        net_worth
    }

    /// Fires every year strictly after the event's age
    fn calculate_ongoing_impact(
        &self,
        net_worth: f64,
        _event: &Event,
        _current_age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        net_worth
    }

    /// Signed growth delta, summed with every other contribution for the year
    fn contribute_to_yearly_growth(
        &self,
        _net_worth: f64,
        _event: &Event,
        _current_age: i32,
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        0.0
    }

    /// Rewrite shared modifiers before growth is computed
    fn modify_context<'a>(
        &self,
        ctx: CalculationContext<'a>,
        _event: &Event,
        _current_age: i32,
    ) -> CalculationContext<'a> {
        ctx
    }

    fn after_year_calculation(
        &self,
        _age: i32,
        net_worth: f64,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        net_worth
    }

    /// Display-only statistics; never affects the projection
    fn hover_stats(&self, _event: &Event, _age: i32) -> HoverStats {
        HoverStats::new()
    }
}

/// Build hover stats from static labels
pub(crate) fn stats<const N: usize>(entries: [(&str, ParamValue); N]) -> HoverStats {
    entries
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect()
}

/// Percentage text such as `"7%"`, `Null` when the field is missing
pub(crate) fn percent_text(value: Option<f64>, suffix: &str) -> ParamValue {
    match value {
        Some(v) => ParamValue::Text(format!("{v}%{suffix}")),
        None => ParamValue::Null,
    }
}
