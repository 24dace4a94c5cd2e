//! Appreciating assets: property and standalone investments

use super::{percent_text, stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;

/// House purchase: down payment up front, then yearly appreciation net of
/// upkeep and property tax
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseHandler;

impl HouseHandler {
    const DEFAULT_DOWN_PAYMENT: f64 = 20.0;
    const DEFAULT_APPRECIATION: f64 = 3.0;
}

impl EventHandler for HouseHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 300,
            timing: Timing::Immediate,
            has_immediate_impact: true,
            has_ongoing_impact: true,
            affects_growth: false,
            modifies_context: false,
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
        let price = event.params.number_or("purchasePrice", 0.0);
        let down_pct = event.params.number_or("downPayment", Self::DEFAULT_DOWN_PAYMENT);
        net_worth - price * down_pct / 100.0
    }

    fn calculate_ongoing_impact(
        &self,
        net_worth: f64,
        event: &Event,
        _current_age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        let params = &event.params;
        let price = params.number_or("purchasePrice", 0.0);
        let appreciation = price * params.number_or("appreciationRate", Self::DEFAULT_APPRECIATION) / 100.0;
        let maintenance = params.number_or("maintenanceCost", 0.0);
        let property_tax = params.number_or("propertyTax", 0.0);

        net_worth + appreciation - maintenance - property_tax
    }

    fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        let params = &event.params;
        let years = event.years_since(age).max(0);
        let rate = params.number_or("appreciationRate", Self::DEFAULT_APPRECIATION);
        let current_value = params.number_or("purchasePrice", 0.0) * (1.0 + rate / 100.0).powf(years as f64);

        stats([
            ("Purchase Price", params.display_value("purchasePrice")),
            ("Current Value", ParamValue::Number(current_value)),
            ("Appreciation Rate", percent_text(params.number("appreciationRate"), "/year")),
            ("Years Owned", ParamValue::Number(years as f64)),
        ])
    }
}

/// Money moved into an investment: no immediate change in worth, a fixed
/// yearly return from placement onwards
#[derive(Debug, Clone, Copy, Default)]
pub struct InvestmentHandler;

impl EventHandler for InvestmentHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 200,
            timing: Timing::Immediate,
            has_immediate_impact: true,
            has_ongoing_impact: false,
            affects_growth: true,
            modifies_context: false,
        }
    }

    fn contribute_to_yearly_growth(
        &self,
        _net_worth: f64,
        event: &Event,
        current_age: i32,
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        if current_age < event.age {
            return 0.0;
        }
        event.params.number_or("amount", 0.0) * event.params.number_or("returnRate", 0.0) / 100.0
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        stats([
            ("Amount", event.params.display_value("amount")),
            ("Return Rate", percent_text(event.params.number("returnRate"), "")),
        ])
    }
}
