use std::time::Instant;

use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::proxy::{Image, ProxyImage};

fn timed_display(image: &ProxyImage) {
    let start = Instant::now();
    let shown = image.display();
    println!("  {shown} ({:.2?})", start.elapsed());
}

fn main() {
    logging::init();
    println!("{}", "=== Proxy: lazy image loading ===".bold());

    let images = [
        ProxyImage::new("photo_high_res_001.jpg"),
        ProxyImage::new("photo_high_res_002.jpg"),
        ProxyImage::new("document_scan_003.png"),
    ];

    println!("\n{}", "Filenames (no loading)".cyan());
    for image in &images {
        println!("  {} loaded={}", image.filename(), image.is_loaded());
    }

    println!("\n{}", "First display of image 1".cyan());
    timed_display(&images[0]);
    println!("\n{}", "Second display of image 1".cyan());
    timed_display(&images[0]);

    println!("\n{}", "Remaining images".cyan());
    for image in &images[1..] {
        timed_display(image);
    }
    println!("\n{}", "Demo finished.".green());
}
