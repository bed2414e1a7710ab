use anyhow::Result;
use colored::Colorize;
use design_patterns::behavioral::template_method::{CsvExporter, DataExporter, JsonExporter};
use design_patterns::logging;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Template Method: data export ===".bold());

    let mut csv = CsvExporter::new();
    println!("{}", csv.export_data()?.green());
    println!("{}", csv.saved().unwrap_or_default());

    let mut json = JsonExporter::new();
    println!("\n{}", json.export_data()?.green());
    println!("{}", json.saved().unwrap_or_default());
    Ok(())
}
