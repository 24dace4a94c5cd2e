//! Events active over an age window: recurring expenses and side income

use super::{percent_text, stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;

/// Inclusive age window from `startDate` (defaulting to the placement age)
/// to an optional `endDate`
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveWindow {
    start: f64,
    end: Option<f64>,
}

impl ActiveWindow {
    fn of(event: &Event) -> Self {
        Self {
            start: event.params.number_or("startDate", f64::from(event.age)),
            end: event.params.number("endDate"),
        }
    }

    fn contains(&self, age: i32) -> bool {
        let age = f64::from(age);
        age >= self.start && self.end.map_or(true, |end| age <= end)
    }

    fn status(&self, age: i32) -> &'static str {
        if self.contains(age) {
            "Active"
        } else {
            "Inactive"
        }
    }

    fn period(&self) -> String {
        match self.end {
            Some(end) => format!("{} - {}", self.start, end),
            None => format!("{} - End", self.start),
        }
    }
}

/// Expense charged every year inside its window
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurringExpenseHandler;

impl RecurringExpenseHandler {
    fn annual_amount(event: &Event) -> f64 {
        let amount = event.params.number_or("amount", 0.0);
        match event.params.text("frequency") {
            Some("annually") => amount,
            _ => amount * 12.0,
        }
    }
}

impl EventHandler for RecurringExpenseHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 400,
            timing: Timing::AfterGrowth,
            has_immediate_impact: false,
            has_ongoing_impact: true,
            affects_growth: false,
            modifies_context: false,
        }
    }

    fn calculate_ongoing_impact(
        &self,
        net_worth: f64,
        event: &Event,
        current_age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        if !ActiveWindow::of(event).contains(current_age) {
            return net_worth;
        }
        net_worth - Self::annual_amount(event)
    }

    fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        let window = ActiveWindow::of(event);
        let frequency = event.params.text("frequency").unwrap_or("monthly");
        let amount = event.params.number_or("amount", 0.0);
        stats([
            ("Amount", ParamValue::Text(format!("{amount} ({frequency})"))),
            ("Status", window.status(age).into()),
            ("Period", ParamValue::Text(window.period())),
        ])
    }
}

/// Side income that grows every year inside its window
#[derive(Debug, Clone, Copy, Default)]
pub struct SideHustleHandler;

impl SideHustleHandler {
    fn income_at(event: &Event, window: &ActiveWindow, age: i32) -> f64 {
        let annual_income = event.params.annual_or_monthly("annualIncome", "monthlyIncome");
        let growth_rate = event.params.number_or("growthRate", 0.0);
        let years_active = (f64::from(age) - window.start).max(0.0);
        annual_income * (1.0 + growth_rate / 100.0).powf(years_active)
    }
}

impl EventHandler for SideHustleHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 250,
            timing: Timing::Immediate,
            has_immediate_impact: false,
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
        let window = ActiveWindow::of(event);
        if !window.contains(current_age) {
            return 0.0;
        }
        Self::income_at(event, &window, current_age)
    }

    fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        let window = ActiveWindow::of(event);
        let monthly_now = Self::income_at(event, &window, age) / 12.0;
        let monthly_start = event.params.annual_or_monthly("annualIncome", "monthlyIncome") / 12.0;
        stats([
            ("Starting Income", ParamValue::Text(format!("{monthly_start:.2}/month"))),
            ("Current Income", ParamValue::Text(format!("{monthly_now:.2}/month"))),
            ("Growth Rate", percent_text(event.params.number("growthRate"), "/year")),
            ("Status", window.status(age).into()),
        ])
    }
}
