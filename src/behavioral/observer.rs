//! # Observer: event monitoring
//!
//! An [`EventSource`] broadcasts every generated [`Event`] to its attached
//! observers. A logger keeps everything; a notifier only reacts to errors.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Info,
    Warn,
    Error,
    Critical,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Info => "INFO",
            EventType::Warn => "WARN",
            EventType::Error => "ERROR",
            EventType::Critical => "CRITICAL",
        }
    }

    pub fn is_severe(&self) -> bool {
        matches!(self, EventType::Error | EventType::Critical)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: Map<String, Value>,
    pub timestamp: DateTime<Local>,
}

impl Event {
    pub fn new(event_type: EventType, data: Map<String, Value>) -> Self {
        Self {
            event_type,
            data,
            timestamp: Local::now(),
        }
    }

    fn data_string(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.event_type,
            self.data_string()
        )
    }
}

// =============================================================================
// Observers
// =============================================================================

pub trait Observer {
    fn name(&self) -> &str;
    fn update(&self, event: &Event);
}

#[derive(Debug, Default)]
pub struct LoggerObserver {
    name: String,
    logs: RefCell<Vec<String>>,
}

impl LoggerObserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logs: RefCell::new(Vec::new()),
        }
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }
}

impl Observer for LoggerObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, event: &Event) {
        info!(observer = %self.name, "{event}");
        self.logs.borrow_mut().push(event.to_string());
    }
}

#[derive(Debug, Default)]
pub struct NotifierObserver {
    name: String,
    notifications: RefCell<Vec<String>>,
}

impl NotifierObserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notifications: RefCell::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }
}

impl Observer for NotifierObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, event: &Event) {
        if !event.event_type.is_severe() {
            return;
        }
        warn!(
            observer = %self.name,
            event_type = %event.event_type,
            time = %event.timestamp.format(TIMESTAMP_FORMAT),
            "critical event notification"
        );
        self.notifications.borrow_mut().push(format!(
            "Notify: {} - {}",
            event.event_type,
            event.data_string()
        ));
    }
}

// =============================================================================
// Subject
// =============================================================================

#[derive(Default)]
pub struct EventSource {
    observers: Vec<Rc<dyn Observer>>,
}

impl EventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if this exact observer is already attached.
    pub fn attach(&mut self, observer: Rc<dyn Observer>) -> bool {
        if self.position(&observer).is_some() {
            debug!(observer = observer.name(), "already attached");
            return false;
        }
        info!(observer = observer.name(), "attaching observer");
        self.observers.push(observer);
        true
    }

    /// Returns `false` if the observer was not attached.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) -> bool {
        match self.position(observer) {
            Some(index) => {
                info!(observer = observer.name(), "detaching observer");
                self.observers.remove(index);
                true
            }
            None => {
                debug!(observer = observer.name(), "not found for detachment");
                false
            }
        }
    }

    fn position(&self, observer: &Rc<dyn Observer>) -> Option<usize> {
        self.observers
            .iter()
            .position(|attached| Rc::ptr_eq(attached, observer))
    }

    fn notify(&self, event: &Event) {
        debug!(event_type = %event.event_type, observers = self.observers.len(), "notifying");
        for observer in &self.observers {
            observer.update(event);
        }
    }

    /// Builds an event stamped with the current time and notifies observers.
    pub fn generate_event(&self, event_type: EventType, data: Map<String, Value>) -> Event {
        let event = Event::new(event_type, data);
        self.notify(&event);
        event
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn setup() -> (EventSource, Rc<LoggerObserver>, Rc<NotifierObserver>) {
        let mut source = EventSource::new();
        let logger = Rc::new(LoggerObserver::new("logger"));
        let notifier = Rc::new(NotifierObserver::new("notifier"));
        source.attach(logger.clone());
        source.attach(notifier.clone());
        (source, logger, notifier)
    }

    #[test]
    fn test_attach_and_detach() {
        let (mut source, logger, _notifier) = setup();
        assert_eq!(source.observer_count(), 2);

        let logger: Rc<dyn Observer> = logger;
        assert!(!source.attach(Rc::clone(&logger)));
        assert_eq!(source.observer_count(), 2);

        assert!(source.detach(&logger));
        assert!(!source.detach(&logger));
        assert_eq!(source.observer_count(), 1);
    }

    #[test]
    fn test_logger_receives_every_event() {
        let (source, logger, _notifier) = setup();
        let event = source.generate_event(EventType::Info, data(json!({"message": "started"})));
        source.generate_event(EventType::Warn, data(json!({"disk": "90%"})));

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0], event.to_string());
        assert!(logs[0].ends_with(r#"INFO: {"message":"started"}"#));
    }

    #[test]
    fn test_notifier_only_reacts_to_severe_events() {
        let (source, _logger, notifier) = setup();
        source.generate_event(EventType::Info, data(json!({"ok": true})));
        source.generate_event(EventType::Error, data(json!({"code": 500})));
        source.generate_event(EventType::Critical, data(json!({"service": "db"})));

        assert_eq!(
            notifier.notifications(),
            vec![
                r#"Notify: ERROR - {"code":500}"#.to_string(),
                r#"Notify: CRITICAL - {"service":"db"}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_detached_observer_misses_events() {
        let (mut source, logger, _notifier) = setup();
        let handle: Rc<dyn Observer> = logger.clone();
        source.detach(&handle);

        source.generate_event(EventType::Info, Map::new());
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_event_display_format() {
        let event = Event::new(EventType::Warn, data(json!({"k": "v"})));
        let rendered = event.to_string();
        let expected_prefix = format!("[{}]", event.timestamp.format(TIMESTAMP_FORMAT));
        assert!(rendered.starts_with(&expected_prefix));
        assert!(rendered.ends_with(r#"WARN: {"k":"v"}"#));
    }

    #[test]
    fn test_event_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&EventType::Critical).unwrap(), "\"CRITICAL\"");
    }
}
