use std::collections::HashMap;

/// What runs when a registered event fires. Dispatch itself belongs to the
/// host runtime; the template only records the hookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventHandler {
    /// Built-in two-way binding from `v-model`: writes the input's value
    /// back into `field`.
    Model { field: String },
    /// A component method, resolved by name when the event fires.
    Method(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    /// Name of the component whose template registered the handler.
    pub component: String,
    pub handler: EventHandler,
}

impl Listener {
    pub fn new(component: impl Into<String>, handler: EventHandler) -> Self {
        Self {
            component: component.into(),
            handler,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventRegistry {
    handlers: HashMap<String, Vec<Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `listener` for `event`. Registering the same listener twice
    /// (e.g. once per loop iteration) keeps a single entry.
    pub fn register_handler(&mut self, event: impl Into<String>, listener: Listener) {
        let listeners = self.handlers.entry(event.into()).or_default();
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    pub fn handlers(&self, event: &str) -> &[Listener] {
        self.handlers.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Registered event names, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registrations_collapse() {
        let mut reg = EventRegistry::new();
        let listener = Listener::new("App", EventHandler::Method("Add".into()));
        reg.register_handler("click", listener.clone());
        reg.register_handler("click", listener);
        reg.register_handler("click", Listener::new("Row", EventHandler::Method("Add".into())));
        assert_eq!(reg.handlers("click").len(), 2);
        assert!(reg.has("click"));
        assert!(reg.handlers("input").is_empty());
    }
}
