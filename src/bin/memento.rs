use colored::Colorize;
use design_patterns::behavioral::memento::{Document, History};
use design_patterns::logging;

fn main() {
    logging::init();
    println!("{}", "=== Memento: document editor ===".bold());

    let mut history = History::new(Document::new("Hello"));
    history.document_mut().write(", world");
    history.save();
    history.document_mut().write("! This is a longer sentence.");
    history.save();

    println!("Current: {}", history.document().content().green());
    for line in history.log() {
        println!("  {line}");
    }

    history.undo();
    println!("\nAfter undo: {}", history.document().content().yellow());
    history.undo();
    println!("After undo: {}", history.document().content().yellow());
    let more = history.undo();
    println!("Undo past the first state: {more}");

    history.redo();
    println!("\nAfter redo: {}", history.document().content().green());

    history.document_mut().write(" (edited)");
    history.save();
    println!("Saving discards redo history, redo depth = {}", history.redo_depth());
}
