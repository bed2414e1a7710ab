use std::rc::Rc;

use colored::Colorize;
use design_patterns::behavioral::observer::{EventSource, EventType, LoggerObserver, NotifierObserver, Observer};
use design_patterns::logging;
use serde_json::{json, Map, Value};

fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn main() {
    logging::init();
    println!("{}", "=== Observer: event monitoring ===".bold());

    let logger = Rc::new(LoggerObserver::new("FileLogger"));
    let notifier = Rc::new(NotifierObserver::new("AdminNotifier"));
    let notifier_handle: Rc<dyn Observer> = notifier.clone();

    let mut source = EventSource::new();
    source.attach(logger.clone());
    source.attach(notifier_handle.clone());

    source.generate_event(EventType::Info, data(json!({"message": "service started"})));
    source.generate_event(EventType::Error, data(json!({"message": "disk full", "disk": "/dev/sda1"})));

    source.detach(&notifier_handle);
    source.generate_event(EventType::Critical, data(json!({"message": "database unreachable"})));

    println!("\n{}", "Logger saw:".cyan());
    for line in logger.logs() {
        println!("  {line}");
    }
    println!("\n{}", "Notifier sent:".cyan());
    for line in notifier.notifications() {
        println!("  {}", line.red());
    }
}
