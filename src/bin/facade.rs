use anyhow::Result;
use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::facade::VideoStreamingService;

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Facade: video streaming ===".bold());

    let mut service = VideoStreamingService::new();
    let result = service.upload_and_process_video("test_user", "password", "/path/to/video.webm", "My Awesome Video")?;
    println!("{}", "Video uploaded successfully!".green());
    println!("  Video ID: {}", result.video_id);
    println!("  Storage URL: {}", result.storage_url);
    for url in &result.cdn_urls {
        println!("  CDN: {url}");
    }
    println!("  Notifications sent: {}", service.notifications().len());

    let stream_url = service.stream_video("test_user", "password", &result.video_id)?;
    println!("\nStream URL: {}", stream_url.cyan());

    println!("\n{}", "Authentication failure".cyan());
    if let Err(err) = service.upload_and_process_video("wrong_user", "wrong_password", "/path/to/video.webm", "x") {
        println!("  {} {err}", "expected error:".yellow());
    }

    println!("\n{}", "Restricted video".cyan());
    service.restrict_video(result.video_id.as_str());
    if let Err(err) = service.stream_video("test_user", "password", &result.video_id) {
        println!("  {} {err}", "expected error:".yellow());
    }
    Ok(())
}
