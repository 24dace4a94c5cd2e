//! Market shocks: temporary adjustments to the prevailing return

use super::{stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;

/// Shifts the prevailing investment return by `returnAdjustment` points for
/// `duration` years starting at `startAge` (defaulting to the placement age)
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketEventHandler;

impl MarketEventHandler {
    fn window(event: &Event) -> (f64, f64) {
        let start = event.params.number_or("startAge", f64::from(event.age));
        let duration = event.params.number_or("duration", 0.0);
        (start, start + duration)
    }
}

impl EventHandler for MarketEventHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 100,
            timing: Timing::Immediate,
            has_immediate_impact: false,
            has_ongoing_impact: false,
            affects_growth: false,
            modifies_context: true,
        }
    }

    fn modify_context<'a>(
        &self,
        mut ctx: CalculationContext<'a>,
        event: &Event,
        current_age: i32,
    ) -> CalculationContext<'a> {
        let (start, end) = Self::window(event);
        let age = f64::from(current_age);
        if age >= start && age < end {
            ctx.modifiers.return_adjustment += event.params.number_or("returnAdjustment", 0.0);
        }
        ctx
    }

    fn hover_stats(&self, event: &Event, _age: i32) -> HoverStats {
        let (start, end) = Self::window(event);
        let adjustment = event.params.number_or("returnAdjustment", 0.0);
        stats([
            ("Start Age", ParamValue::Number(start)),
            ("Duration", ParamValue::Text(format!("{} years", end - start))),
            ("Return Adjustment", ParamValue::Text(format!("{adjustment}%"))),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{event_types, EventId, Params};
    use crate::projection::SimulationParams;

    #[test]
    fn test_adjustment_only_inside_window() {
        let event = Event::new(
            EventId(0),
            event_types::MARKET_EVENT,
            38,
            Params::new()
                .with("startAge", 40.0)
                .with("duration", 2.0)
                .with("returnAdjustment", -20.0),
        );
        let events = vec![event.clone()];
        let params = SimulationParams::default();
        let base = CalculationContext::new(&params, &events);

        let adjustment_at = |age| {
            MarketEventHandler
                .modify_context(base.clone(), &event, age)
                .modifiers
                .return_adjustment
        };

        assert_eq!(adjustment_at(39), 0.0);
        assert_eq!(adjustment_at(40), -20.0);
        assert_eq!(adjustment_at(41), -20.0);
        assert_eq!(adjustment_at(42), 0.0);
    }

    #[test]
    fn test_adjustments_stack() {
        let events = vec![
            Event::new(EventId(0), event_types::MARKET_EVENT, 40, Params::new().with("duration", 1.0).with("returnAdjustment", -10.0)),
            Event::new(EventId(1), event_types::MARKET_EVENT, 40, Params::new().with("duration", 1.0).with("returnAdjustment", 4.0)),
        ];
        let params = SimulationParams::default();
        let ctx = CalculationContext::new(&params, &events);

        let ctx = MarketEventHandler.modify_context(ctx, &events[0], 40);
        let ctx = MarketEventHandler.modify_context(ctx, &events[1], 40);
        assert_eq!(ctx.modifiers.return_adjustment, -6.0);
        assert_eq!(ctx.effective_return(None), 1.0);
    }
}
