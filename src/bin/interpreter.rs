use anyhow::Result;
use colored::Colorize;
use design_patterns::behavioral::interpreter::{QueryEngine, Record};
use design_patterns::logging;
use serde_json::json;

fn users() -> Result<Vec<Record>> {
    let data = json!([
        {"name": "Alice", "age": 30, "city": "New York", "active": true},
        {"name": "Bob", "age": 25, "city": "London", "active": false},
        {"name": "Charlie", "age": 35, "city": "New York", "active": true},
        {"name": "David", "age": 40, "city": "Paris", "active": true},
        {"name": "Eve", "age": 22, "city": "London", "active": true}
    ]);
    Ok(serde_json::from_value(data)?)
}

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Interpreter: query language ===".bold());

    let data = users()?;
    let engine = QueryEngine::new();
    let queries = [
        "city = 'New York'",
        "age > 28",
        "active = true AND city = 'London'",
        "(age < 25 OR age > 38) AND active = true",
        "NOT city = 'Paris'",
        "((age > 30)",
    ];

    for query in queries {
        println!("\n{} {}", "Query:".cyan(), query);
        match engine.filter(&data, query) {
            Ok(matches) if matches.is_empty() => println!("  (no matches)"),
            Ok(matches) => {
                for record in matches {
                    println!("  {}", serde_json::Value::Object(record));
                }
            }
            Err(err) => println!("  {} {err}", "error:".red()),
        }
    }
    Ok(())
}
