//! Event Registry
//!
//! Named callbacks bridging the two render strategies: live handlers at
//! build time, and alias resolution for `data-event-*` attributes when a
//! rendered tree is wired up through delegation.

use std::collections::HashMap;
use std::rc::Rc;

use vitae_dom::{Handler, HandlerResolver};

#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<String, Handler>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under `alias`, replacing any earlier one.
    pub fn register(&mut self, alias: &str, handler: Handler) {
        if self.handlers.insert(alias.to_string(), handler).is_some() {
            tracing::debug!(alias, "event handler replaced");
        }
    }

    /// Fetch a callback for use in `set_event`. Falls back to a no-op so
    /// builders never fail over a missing registration.
    pub fn handler_or_noop(&self, alias: &str) -> Handler {
        match self.get_handler(alias) {
            Some(handler) => handler,
            None => {
                tracing::warn!(alias, "no handler registered, using no-op");
                Rc::new(|_| {})
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerResolver for EventRegistry {
    fn get_handler(&self, alias: &str) -> Option<Handler> {
        self.handlers.get(alias).cloned()
    }
}

/// Registry carrying the page's standard aliases. The callbacks here are
/// logging stand-ins; real behavior attaches where a live document
/// exists.
pub fn default_registry() -> EventRegistry {
    let mut registry = EventRegistry::new();
    registry.register(
        "change-theme",
        Rc::new(|ctx| tracing::info!(event = %ctx.event, "theme toggle requested")),
    );
    registry.register(
        "change-lang",
        Rc::new(|ctx| tracing::info!(event = %ctx.event, "language toggle requested")),
    );
    registry.register(
        "fold-section",
        Rc::new(|ctx| tracing::info!(event = %ctx.event, "section fold toggled")),
    );
    registry.register(
        "scroll-to-top",
        Rc::new(|ctx| tracing::info!(event = %ctx.event, "scroll to top requested")),
    );
    registry
}
