//! Financed purchases: student loans and cars

use super::{percent_text, stats, EventHandler, HandlerConfig, HoverStats, Timing};
use crate::events::{Event, ParamValue};
use crate::projection::CalculationContext;

/// Monthly payment that amortizes `principal` over `term_years` at an
/// annual `rate_pct`
///
/// A zero rate repays in equal installments; a non-positive term has no
/// payment schedule and yields zero.
pub fn amortized_payment(principal: f64, rate_pct: f64, term_years: f64) -> f64 {
    let payments = term_years * 12.0;
    if payments <= 0.0 {
        return 0.0;
    }

    let monthly_rate = rate_pct / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / payments;
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Student loan: the balance is owed at placement, then repaid yearly
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentLoanHandler;

impl StudentLoanHandler {
    fn monthly_payment(event: &Event) -> f64 {
        let params = &event.params;
        params.number("monthlyPayment").unwrap_or_else(|| {
            amortized_payment(
                params.number_or("loanAmount", 0.0),
                params.number_or("interestRate", 0.0),
                params.number_or("repaymentTerm", 0.0),
            )
        })
    }
}

impl EventHandler for StudentLoanHandler {
    fn config(&self) -> HandlerConfig {
        HandlerConfig {
            priority: 450,
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
        net_worth - event.params.number_or("loanAmount", 0.0)
    }

    fn calculate_ongoing_impact(
        &self,
        net_worth: f64,
        event: &Event,
        current_age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        let years_since = event.years_since(current_age);
        let term = event.params.number_or("repaymentTerm", 0.0);
        if years_since <= 0 || years_since as f64 > term {
            return net_worth;
        }

        net_worth - Self::monthly_payment(event) * 12.0
    }

    fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        let params = &event.params;
        let years_since = event.years_since(age).max(0) as f64;
        let loan_amount = params.number_or("loanAmount", 0.0);
        let rate = params.number_or("interestRate", 0.0);
        let term = params.number_or("repaymentTerm", 0.0);
        let monthly_payment = Self::monthly_payment(event);

        let total_paid = monthly_payment * 12.0 * years_since;
        let remaining = loan_amount * (1.0 + rate / 100.0).powf(years_since) - total_paid;

        stats([
            ("Loan Amount", params.display_value("loanAmount")),
            ("Interest Rate", percent_text(params.number("interestRate"), "")),
            ("Monthly Payment", ParamValue::Number(monthly_payment)),
            ("Remaining Balance", ParamValue::Number(remaining.max(0.0))),
            ("Years Left", ParamValue::Number((term - years_since).max(0.0))),
        ])
    }
}

/// Car purchase: down payment up front, then loan payments, running costs
/// and depreciation of the car's value
#[derive(Debug, Clone, Copy, Default)]
pub struct CarPurchaseHandler;

impl CarPurchaseHandler {
    const DEFAULT_DEPRECIATION: f64 = 15.0;

    fn value_after(event: &Event, years: i64) -> f64 {
        let price = event.params.number_or("purchasePrice", 0.0);
        let depreciation = event.params.number_or("depreciationRate", Self::DEFAULT_DEPRECIATION);
        price * (1.0 - depreciation / 100.0).powf(years as f64)
    }
}

impl EventHandler for CarPurchaseHandler {
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
        net_worth - event.params.number_or("downPayment", 0.0)
    }

    fn calculate_ongoing_impact(
        &self,
        net_worth: f64,
        event: &Event,
        current_age: i32,
        _all_events: &[Event],
        _ctx: &CalculationContext<'_>,
    ) -> f64 {
        let years = event.years_since(current_age);
        if years <= 0 {
            return net_worth;
        }

        let params = &event.params;
        let insurance = params.annual_or_monthly("insuranceCost", "monthlyInsuranceCost");
        let maintenance = params.annual_or_monthly("maintenanceCost", "monthlyMaintenanceCost");
        let value_change = Self::value_after(event, years) - Self::value_after(event, years - 1);

        let loan_term = params.number_or("loanTerm", 0.0);
        let loan_payments = if years as f64 > loan_term {
            0.0
        } else {
            amortized_payment(
                params.number_or("loanAmount", 0.0),
                params.number_or("interestRate", 0.0),
                loan_term,
            ) * 12.0
        };

        net_worth - loan_payments - insurance - maintenance + value_change
    }

    fn hover_stats(&self, event: &Event, age: i32) -> HoverStats {
        let years = event.years_since(age).max(0);
        let depreciation = event.params.number("depreciationRate");
        stats([
            ("Purchase Price", event.params.display_value("purchasePrice")),
            ("Current Value", ParamValue::Number(Self::value_after(event, years))),
            ("Depreciation Rate", percent_text(depreciation, "/year")),
            ("Years Owned", ParamValue::Number(years as f64)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{event_types, EventId, Params};
    use crate::projection::SimulationParams;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_amortized_payment() {
        // 200k over 30 years at 6% is the textbook 1199.10/month
        assert_abs_diff_eq!(amortized_payment(200_000.0, 6.0, 30.0), 1_199.10, epsilon = 0.01);
        assert_relative_eq!(amortized_payment(12_000.0, 0.0, 1.0), 1_000.0);
        assert_eq!(amortized_payment(12_000.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_student_loan_payment_window() {
        let event = Event::new(
            EventId(0),
            event_types::STUDENT_LOAN,
            22,
            Params::new()
                .with("loanAmount", 40_000.0)
                .with("repaymentTerm", 10.0)
                .with("monthlyPayment", 424.0),
        );
        let events = vec![event.clone()];
        let params = SimulationParams::default();
        let ctx = CalculationContext::new(&params, &events);
        let handler = StudentLoanHandler;

        assert_eq!(handler.calculate_immediate_impact(0.0, &event, 22, &events, &ctx), -40_000.0);
        assert_eq!(handler.calculate_ongoing_impact(0.0, &event, 22, &events, &ctx), 0.0);
        assert_relative_eq!(handler.calculate_ongoing_impact(0.0, &event, 23, &events, &ctx), -5_088.0);
        assert_relative_eq!(handler.calculate_ongoing_impact(0.0, &event, 32, &events, &ctx), -5_088.0);
        assert_eq!(handler.calculate_ongoing_impact(0.0, &event, 33, &events, &ctx), 0.0);
    }

    #[test]
    fn test_student_loan_derives_missing_payment() {
        let event = Event::new(
            EventId(0),
            event_types::STUDENT_LOAN,
            22,
            Params::new()
                .with("loanAmount", 24_000.0)
                .with("interestRate", 0.0)
                .with("repaymentTerm", 2.0),
        );
        let events = vec![event.clone()];
        let params = SimulationParams::default();
        let ctx = CalculationContext::new(&params, &events);

        let after = StudentLoanHandler.calculate_ongoing_impact(0.0, &event, 23, &events, &ctx);
        assert_relative_eq!(after, -12_000.0);
    }

    #[test]
    fn test_car_loan_then_running_costs() {
        let event = Event::new(
            EventId(0),
            event_types::CAR_PURCHASE,
            30,
            Params::new()
                .with("purchasePrice", 20_000.0)
                .with("downPayment", 5_000.0)
                .with("loanAmount", 12_000.0)
                .with("loanTerm", 1.0)
                .with("interestRate", 0.0)
                .with("insuranceCost", 1_000.0)
                .with("monthlyMaintenanceCost", 50.0)
                .with("depreciationRate", 10.0),
        );
        let events = vec![event.clone()];
        let params = SimulationParams::default();
        let ctx = CalculationContext::new(&params, &events);
        let handler = CarPurchaseHandler;

        assert_eq!(handler.calculate_immediate_impact(10_000.0, &event, 30, &events, &ctx), 5_000.0);

        // Year 1: loan payments, costs and 10% of value lost
        let year_one = handler.calculate_ongoing_impact(0.0, &event, 31, &events, &ctx);
        assert_relative_eq!(year_one, -12_000.0 - 1_000.0 - 600.0 - 2_000.0, epsilon = 1e-9);

        // Year 2: loan paid off, depreciation on the reduced value
        let year_two = handler.calculate_ongoing_impact(0.0, &event, 32, &events, &ctx);
        assert_relative_eq!(year_two, -1_000.0 - 600.0 - 1_800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_car_hover_uses_default_depreciation() {
        let event = Event::new(
            EventId(0),
            event_types::CAR_PURCHASE,
            30,
            Params::new().with("purchasePrice", 10_000.0),
        );
        let stats = CarPurchaseHandler.hover_stats(&event, 31);
        assert_relative_eq!(stats["Current Value"].as_number().unwrap(), 8_500.0);
        assert_eq!(stats["Depreciation Rate"], ParamValue::Null);
        assert_eq!(stats["Years Owned"], ParamValue::Number(1.0));
    }
}
