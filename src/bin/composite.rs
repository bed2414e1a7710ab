use anyhow::Result;
use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::composite::FileSystemComponent;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Composite: file system ===".bold());

    let mut private = FileSystemComponent::directory("Private");
    private.add(FileSystemComponent::file("archive.zip", 10240))?;

    let mut documents = FileSystemComponent::directory("Documents");
    documents.add(FileSystemComponent::file("document.txt", 1024))?;
    documents.add(FileSystemComponent::file("report.pdf", 2048))?;
    documents.add(private)?;

    let mut pictures = FileSystemComponent::directory("Pictures");
    pictures.add(FileSystemComponent::file("image.jpg", 5120))?;

    let mut root = FileSystemComponent::directory("root");
    root.add(documents)?;
    root.add(pictures)?;

    println!("{}", root.display());

    println!("\n{}", "Sizes".cyan());
    println!("  root: {} bytes", root.size());
    let documents = root.child(0)?;
    println!("  {}: {} bytes", documents.name(), documents.size());
    println!("  {}: {} bytes", documents.child(0)?.name(), documents.child(0)?.size());

    let mut file = FileSystemComponent::file("notes.txt", 12);
    if let Err(err) = file.add(FileSystemComponent::file("x", 1)) {
        println!("\n{} {err}", "expected error:".yellow());
    }

    root.remove("Pictures")?;
    println!("\n{}\n{}", "After removing Pictures".cyan(), root.display());
    Ok(())
}
