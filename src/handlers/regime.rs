//! Regime events: working phases and retirement
//!
//! A regime replaces any earlier regime of the same type once reached.
//! Only the active instance contributes growth in a given year.

use super::{percent_text, stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::Event;
use crate::projection::CalculationContext;

const REGIME_CONFIG: HandlerConfig = HandlerConfig {
    priority: 1000,
    timing: Timing::Immediate,
    has_immediate_impact: true,
    has_ongoing_impact: false,
    affects_growth: true,
    modifies_context: false,
};

/// The regime of `event_type` in force at `age`: latest placement age not
/// after `age`, with the last one in input order winning on equal ages
pub fn active_instance<'e>(events: &'e [Event], event_type: &str, age: i32) -> Option<&'e Event> {
    events
        .iter()
        .filter(|e| e.event_type == event_type && e.age <= age)
        .reduce(|active, e| if e.age >= active.age { e } else { active })
}

/// The first event of the whole timeline sets the absolute starting figure;
/// later regimes only change growth parameters
fn opening_net_worth(net_worth: f64, event: &Event, age: i32, all_events: &[Event]) -> f64 {
    let is_first_overall = !all_events.iter().any(|e| e.age < age);
    if is_first_overall {
        event.params.number_or("startingNetWorth", 0.0)
    } else {
        net_worth
    }
}

/// Whether this regime event may contribute growth at `current_age`
fn contributes(event: &Event, current_age: i32, ctx: &CalculationContext<'_>) -> bool {
    let is_active = active_instance(ctx.all_events, &event.event_type, current_age)
        .is_some_and(|active| active.id == event.id);

    // The starting figure is already the closing value of its own year
    let is_opening_year = current_age == event.age && ctx.is_first_at(event.age);

    is_active && !is_opening_year
}

/// Working phase: savings from income plus return on net worth
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialPhaseHandler;

impl EventHandler for FinancialPhaseHandler {
    fn config(&self) -> HandlerConfig {
        REGIME_CONFIG
    }

    fn calculate_immediate_impact(
        &self,
        net_worth: f64,
        event: &Event,
        age: i32,
        all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        opening_net_worth(net_worth, event, age, all_events)
    }

    fn contribute_to_yearly_growth(
        &self,
        net_worth: f64,
        event: &Event,
        current_age: i32,
        ctx: &CalculationContext<'_>,
    ) -> f64 {
        if !contributes(event, current_age, ctx) {
            return 0.0;
        }

        let params = &event.params;
        let annual_income = params.annual_or_monthly("annualIncome", "monthlyIncome");
        let savings_rate = params.number_or("savingsRate", 0.0);
        let investment_return = ctx.effective_return(params.number("investmentReturn"));

        annual_income * savings_rate / 100.0 + net_worth * investment_return / 100.0
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        let params = &event.params;
        stats([
            ("Annual Income", params.display_value("annualIncome")),
            ("Savings Rate", percent_text(params.number("savingsRate"), "")),
            ("Investment Return", percent_text(params.number("investmentReturn"), "")),
        ])
    }
}

/// Retirement: return on net worth minus withdrawals plus pension income
#[derive(Debug, Clone, Copy, Default)]
pub struct RetirementHandler;

impl EventHandler for RetirementHandler {
    fn config(&self) -> HandlerConfig {
        REGIME_CONFIG
    }

    fn calculate_immediate_impact(
        &self,
        net_worth: f64,
        event: &Event,
        age: i32,
        all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        opening_net_worth(net_worth, event, age, all_events)
    }

    fn contribute_to_yearly_growth(
        &self,
        net_worth: f64,
        event: &Event,
        current_age: i32,
        ctx: &CalculationContext<'_>,
    ) -> f64 {
        if !contributes(event, current_age, ctx) {
            return 0.0;
        }

        let params = &event.params;
        let withdrawal = match params.number("withdrawalRate") {
            Some(rate) if rate != 0.0 => net_worth * rate / 100.0,
            _ => params.annual_or_monthly("annualWithdrawal", "monthlyWithdrawal"),
        };
        let pension = params.annual_or_monthly("pensionIncome", "monthlyPensionIncome");
        let investment_return = ctx.effective_return(params.number("investmentReturn"));

        net_worth * investment_return / 100.0 - withdrawal + pension
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        let params = &event.params;
        stats([
            ("Annual Withdrawal", params.display_value("annualWithdrawal")),
            ("Withdrawal Rate", percent_text(params.number("withdrawalRate"), "")),
            ("Pension Income", params.display_value("pensionIncome")),
            ("Investment Return", percent_text(params.number("investmentReturn"), "")),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{event_types, EventId, ParamValue, Params};
    use crate::projection::SimulationParams;
    use approx::assert_relative_eq;

    fn no_base_return() -> SimulationParams {
        SimulationParams {
            start_age: 20,
            end_age: 70,
            investment_return: None,
        }
    }

    fn phase(id: u64, age: i32, params: Params) -> Event {
        Event::new(EventId(id), event_types::FINANCIAL_PHASE, age, params)
    }

    #[test]
    fn test_active_instance_latest_not_after_age() {
        let events = vec![
            phase(0, 20, Params::new()),
            phase(1, 30, Params::new()),
            Event::new(EventId(2), event_types::RETIREMENT, 25, Params::new()),
        ];

        assert!(active_instance(&events, event_types::FINANCIAL_PHASE, 19).is_none());
        assert_eq!(active_instance(&events, event_types::FINANCIAL_PHASE, 29).map(|e| e.id), Some(EventId(0)));
        assert_eq!(active_instance(&events, event_types::FINANCIAL_PHASE, 30).map(|e| e.id), Some(EventId(1)));
        assert_eq!(active_instance(&events, event_types::RETIREMENT, 60).map(|e| e.id), Some(EventId(2)));
    }

    #[test]
    fn test_active_instance_tie_goes_to_last_inserted() {
        let events = vec![phase(5, 30, Params::new()), phase(3, 30, Params::new())];
        let active = active_instance(&events, event_types::FINANCIAL_PHASE, 40).unwrap();
        assert_eq!(active.id, EventId(3));
    }

    #[test]
    fn test_first_event_sets_absolute_net_worth() {
        let events = vec![
            phase(0, 20, Params::new().with("startingNetWorth", 8_000.0)),
            phase(1, 30, Params::new().with("startingNetWorth", 99_999.0)),
        ];
        let params = no_base_return();
        let ctx = CalculationContext::new(&params, &events);
        let handler = FinancialPhaseHandler;

        assert_eq!(handler.calculate_immediate_impact(-300.0, &events[0], 20, &events, &ctx), 8_000.0);
        // A later phase keeps the running value
        assert_eq!(handler.calculate_immediate_impact(12_345.0, &events[1], 30, &events, &ctx), 12_345.0);
    }

    #[test]
    fn test_phase_growth_savings_plus_return() {
        let events = vec![phase(
            0,
            20,
            Params::new()
                .with("annualIncome", 50_000.0)
                .with("savingsRate", 20.0)
                .with("investmentReturn", 5.0),
        )];
        let params = no_base_return();
        let ctx = CalculationContext::new(&params, &events);
        let handler = FinancialPhaseHandler;

        // Opening year of the first event contributes nothing
        assert_eq!(handler.contribute_to_yearly_growth(10_000.0, &events[0], 20, &ctx), 0.0);
        assert_relative_eq!(
            handler.contribute_to_yearly_growth(10_000.0, &events[0], 21, &ctx),
            10_000.0 + 500.0
        );
        // Before placement it is inert
        assert_eq!(handler.contribute_to_yearly_growth(10_000.0, &events[0], 19, &ctx), 0.0);
    }

    #[test]
    fn test_phase_monthly_income_and_base_return() {
        let events = vec![
            Event::new(EventId(9), event_types::HOUSE, 18, Params::new()),
            phase(0, 20, Params::new().with("monthlyIncome", 1_000.0).with("savingsRate", 10.0)),
        ];
        let params = SimulationParams {
            investment_return: Some(7.0),
            ..no_base_return()
        };
        let ctx = CalculationContext::new(&params, &events);

        // Not the first event overall, so its own placement year counts
        let growth = FinancialPhaseHandler.contribute_to_yearly_growth(1_000.0, &events[1], 20, &ctx);
        assert_relative_eq!(growth, 1_200.0 + 70.0);
    }

    #[test]
    fn test_superseded_phase_is_silent() {
        let events = vec![
            phase(0, 20, Params::new().with("annualIncome", 10_000.0).with("savingsRate", 50.0)),
            phase(1, 30, Params::new().with("annualIncome", 20_000.0).with("savingsRate", 50.0)),
        ];
        let params = no_base_return();
        let ctx = CalculationContext::new(&params, &events);
        let handler = FinancialPhaseHandler;

        assert_eq!(handler.contribute_to_yearly_growth(0.0, &events[0], 30, &ctx), 0.0);
        assert_relative_eq!(handler.contribute_to_yearly_growth(0.0, &events[1], 30, &ctx), 10_000.0);
        assert_relative_eq!(handler.contribute_to_yearly_growth(0.0, &events[0], 29, &ctx), 5_000.0);
        assert_eq!(handler.contribute_to_yearly_growth(0.0, &events[1], 29, &ctx), 0.0);
    }

    #[test]
    fn test_retirement_rate_withdrawal_beats_fixed_amount() {
        let events = vec![
            phase(0, 20, Params::new()),
            Event::new(
                EventId(1),
                event_types::RETIREMENT,
                65,
                Params::new()
                    .with("withdrawalRate", 4.0)
                    .with("annualWithdrawal", 40_000.0)
                    .with("monthlyPensionIncome", 1_000.0)
                    .with("investmentReturn", 5.0),
            ),
        ];
        let params = no_base_return();
        let ctx = CalculationContext::new(&params, &events);

        let growth = RetirementHandler.contribute_to_yearly_growth(500_000.0, &events[1], 66, &ctx);
        assert_relative_eq!(growth, 25_000.0 - 20_000.0 + 12_000.0);
    }

    #[test]
    fn test_retirement_fixed_withdrawal_when_rate_zero() {
        let events = vec![
            phase(0, 20, Params::new()),
            Event::new(
                EventId(1),
                event_types::RETIREMENT,
                65,
                Params::new()
                    .with("withdrawalRate", 0.0)
                    .with("monthlyWithdrawal", 3_000.0)
                    .with("investmentReturn", 4.0),
            ),
        ];
        let params = no_base_return();
        let ctx = CalculationContext::new(&params, &events);

        let growth = RetirementHandler.contribute_to_yearly_growth(100_000.0, &events[1], 70, &ctx);
        assert_relative_eq!(growth, 4_000.0 - 36_000.0);
    }

    #[test]
    fn test_hover_stats_tolerate_missing_fields() {
        let event = phase(0, 20, Params::new().with("savingsRate", 15.0));
        let stats = FinancialPhaseHandler.hover_stats(&event, 25);

        assert_eq!(stats["Savings Rate"], ParamValue::Text("15%".to_string()));
        assert_eq!(stats["Annual Income"], ParamValue::Null);
        assert_eq!(RetirementHandler.hover_stats(&event, 25).len(), 4);
    }
}
