use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use design_patterns::creational::factory_method::{DocumentProcessor, HtmlProcessor, JsonProcessor, TextProcessor};
use design_patterns::logging;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Factory Method: document processor ===".bold());

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output_files"));

    let title = "Quarterly Report Q1 2025";
    let content: Vec<String> = [
        "This report summarizes the key activities and results for the first quarter.",
        "Sales Performance: Met targets, with significant growth in the North region.",
        "Marketing Campaigns: Launched 'Spring Forward' initiative, results pending.",
        "Product Development: Version 2.1 of the flagship product entered beta testing.",
        "Financial Overview: Stable revenue, slight increase in operational costs.",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect();

    let processors: [Box<dyn DocumentProcessor>; 3] =
        [Box::new(TextProcessor), Box::new(JsonProcessor), Box::new(HtmlProcessor)];
    for processor in &processors {
        let path = processor.process_and_save(title, &content, &output_dir, "quarterly_report_q1")?;
        println!("{} {} -> {}", "saved".green(), processor.name(), path.display());
    }
    Ok(())
}
