//! # Proxy: lazy image loading
//!
//! [`ProxyImage`] stands in for a [`RealImage`] and only pays the loading
//! cost the first time the image is displayed.

use std::cell::OnceCell;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1500);

pub trait Image {
    fn display(&self) -> String;
    fn filename(&self) -> &str;
}

#[derive(Debug)]
pub struct RealImage {
    filename: String,
}

impl RealImage {
    /// Loads immediately, blocking for `load_delay`.
    pub fn load(filename: impl Into<String>, load_delay: Duration) -> Self {
        let filename = filename.into();
        info!(%filename, delay_ms = load_delay.as_millis() as u64, "loading image from disk");
        thread::sleep(load_delay);
        info!(%filename, "finished loading image");
        Self { filename }
    }
}

impl Image for RealImage {
    fn display(&self) -> String {
        format!("Displaying image: '{}'", self.filename)
    }

    fn filename(&self) -> &str {
        &self.filename
    }
}

#[derive(Debug)]
pub struct ProxyImage {
    filename: String,
    load_delay: Duration,
    real: OnceCell<RealImage>,
}

impl ProxyImage {
    pub fn new(filename: impl Into<String>) -> Self {
        Self::with_load_delay(filename, DEFAULT_LOAD_DELAY)
    }

    pub fn with_load_delay(filename: impl Into<String>, load_delay: Duration) -> Self {
        let filename = filename.into();
        debug!(%filename, "proxy created, image not loaded yet");
        Self {
            filename,
            load_delay,
            real: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.real.get().is_some()
    }
}

impl Image for ProxyImage {
    fn display(&self) -> String {
        if self.is_loaded() {
            debug!(filename = %self.filename, "real image already loaded");
        }
        self.real
            .get_or_init(|| RealImage::load(self.filename.clone(), self.load_delay))
            .display()
    }

    /// Never triggers a load.
    fn filename(&self) -> &str {
        &self.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_proxy_does_not_load_on_creation() {
        let proxy = ProxyImage::with_load_delay("test_init.jpg", Duration::ZERO);
        assert!(!proxy.is_loaded());
        assert_eq!(proxy.filename(), "test_init.jpg");
        assert!(!proxy.is_loaded());
    }

    #[test]
    fn test_proxy_loads_on_first_display() {
        let proxy = ProxyImage::with_load_delay("first.png", Duration::ZERO);
        assert_eq!(proxy.display(), "Displaying image: 'first.png'");
        assert!(proxy.is_loaded());
    }

    #[test]
    fn test_second_display_skips_loading() {
        let proxy = ProxyImage::with_load_delay("reuse.gif", Duration::from_millis(50));

        let start = Instant::now();
        proxy.display();
        assert!(start.elapsed() >= Duration::from_millis(50));

        let start = Instant::now();
        assert_eq!(proxy.display(), "Displaying image: 'reuse.gif'");
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_real_image_and_proxy_are_interchangeable() {
        let images: Vec<Box<dyn Image>> = vec![
            Box::new(RealImage::load("a.png", Duration::ZERO)),
            Box::new(ProxyImage::with_load_delay("b.png", Duration::ZERO)),
        ];
        let shown: Vec<String> = images.iter().map(|i| i.display()).collect();
        assert_eq!(
            shown,
            vec!["Displaying image: 'a.png'", "Displaying image: 'b.png'"]
        );
    }
}
