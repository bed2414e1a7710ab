use std::thread;

use colored::Colorize;
use design_patterns::creational::singleton::{ConfigurationManager, CONFIG_ENV_VAR};
use design_patterns::logging;
use serde_json::Value;

fn main() {
    logging::init();
    println!("{}", "=== Singleton: configuration manager ===".bold());
    println!("(set {CONFIG_ENV_VAR} to a TOML file to override the defaults)");

    let first = ConfigurationManager::instance();
    println!("API key: {:?}", first.get_setting("api_key"));

    first.set_setting("timeout", 30);
    let second = ConfigurationManager::instance();
    println!(
        "Same instance: {}",
        if std::ptr::eq(first, second) { "yes".green() } else { "no".red() }
    );
    println!("Timeout via second handle: {:?}", second.get_setting("timeout"));

    let workers: Vec<_> = (0..4)
        .map(|i| thread::spawn(move || ConfigurationManager::instance().set_setting(format!("worker_{i}"), true)))
        .collect();
    for worker in workers {
        if worker.join().is_err() {
            println!("{}", "a worker thread panicked".red());
        }
    }
    println!("Initialized {} time(s)", ConfigurationManager::initialization_count());

    println!("\nAll settings:");
    println!("{}", Value::Object(second.all_settings()));
}
