//! Mapping from event type tag to handler

use super::*;
use crate::events::event_types;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry the engine resolves every event's behavior through
///
/// Populated once during setup; read-only while projections run, so one
/// registry can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in event type
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Register every built-in handler, replacing same-tag entries
    pub fn register_defaults(&mut self) {
        self.register(event_types::FINANCIAL_PHASE, FinancialPhaseHandler);
        self.register(event_types::RETIREMENT, RetirementHandler);
        self.register(event_types::INCOME_PULSE, IncomePulseHandler::new());
        self.register(event_types::LARGE_EXPENSE, LargeExpenseHandler::new());
        self.register(event_types::STUDENT_LOAN, StudentLoanHandler);
        self.register(event_types::RECURRING_EXPENSE, RecurringExpenseHandler);
        self.register(event_types::HOUSE, HouseHandler);
        self.register(event_types::CAR_PURCHASE, CarPurchaseHandler);
        self.register(event_types::SIDE_HUSTLE, SideHustleHandler);
        self.register(event_types::INVESTMENT, InvestmentHandler);
        self.register(event_types::MARKET_EVENT, MarketEventHandler);
    }

    /// Register a handler for a type tag, returning whatever it replaced
    pub fn register<H: EventHandler + 'static>(
        &mut self,
        event_type: &str,
        handler: H,
    ) -> Option<Arc<dyn EventHandler>> {
        self.register_shared(event_type, Arc::new(handler))
    }

    pub fn register_shared(
        &mut self,
        event_type: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Option<Arc<dyn EventHandler>> {
        self.handlers.insert(event_type.to_string(), handler)
    }

    pub fn get(&self, event_type: &str) -> Option<&dyn EventHandler> {
        self.handlers.get(event_type).map(|h| &**h)
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Registered tags, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
