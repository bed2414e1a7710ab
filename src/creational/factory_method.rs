//! # Factory Method: document processor
//!
//! Each [`DocumentProcessor`] decides which [`Document`] to create; the shared
//! `process_and_save` workflow never names a concrete document type.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait Document {
    fn title(&self) -> &str;
    fn content(&self) -> &[String];
    fn extension(&self) -> &'static str;
    fn render(&self) -> Result<String, DocumentError>;

    /// Writes the document to `base_path` plus this document's extension and
    /// returns the full path.
    fn save(&self, base_path: &Path) -> Result<PathBuf, DocumentError> {
        let path = with_extension(base_path, self.extension());
        let rendered = self.render()?;
        fs::write(&path, rendered).map_err(|source| DocumentError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "document saved");
        Ok(path)
    }
}

// Appends rather than replaces, so "report.v2" becomes "report.v2.txt".
fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut raw = base.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DocumentData {
    title: String,
    content: Vec<String>,
}

impl DocumentData {
    fn new(title: &str, content: &[String]) -> Self {
        debug!(title, lines = content.len(), "document created");
        Self {
            title: title.to_string(),
            content: content.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDocument(DocumentData);

#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument(DocumentData);

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument(DocumentData);

impl Document for TextDocument {
    fn title(&self) -> &str {
        &self.0.title
    }

    fn content(&self) -> &[String] {
        &self.0.content
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self) -> Result<String, DocumentError> {
        let title = &self.0.title;
        let underline = "=".repeat(title.chars().count() + 2);
        let mut out = format!("Title: {title}\n{underline}\n\n");
        for line in &self.0.content {
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Document for JsonDocument {
    fn title(&self) -> &str {
        &self.0.title
    }

    fn content(&self) -> &[String] {
        &self.0.content
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self) -> Result<String, DocumentError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.0.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Document for HtmlDocument {
    fn title(&self) -> &str {
        &self.0.title
    }

    fn content(&self) -> &[String] {
        &self.0.content
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self) -> Result<String, DocumentError> {
        let title = html_escape::encode_text(&self.0.title);
        let mut out = format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n    \
             <meta charset=\"UTF-8\">\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
             <title>{title}</title>\n    \
             <style>\n        \
             body {{ font-family: sans-serif; line-height: 1.6; padding: 20px; }}\n        \
             h1 {{ color: #333; }}\n        \
             p {{ margin-bottom: 10px; }}\n    \
             </style>\n\
             </head>\n\
             <body>\n    \
             <h1>{title}</h1>\n"
        );
        for line in &self.0.content {
            out.push_str(&format!("    <p>{}</p>\n", html_escape::encode_text(line)));
        }
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }
}

// =============================================================================
// Creators
// =============================================================================

pub trait DocumentProcessor {
    fn name(&self) -> &'static str;

    /// The factory method.
    fn create_document(&self, title: &str, content: &[String]) -> Box<dyn Document>;

    fn process_and_save(
        &self,
        title: &str,
        content: &[String],
        output_dir: &Path,
        filename_base: &str,
    ) -> Result<PathBuf, DocumentError> {
        fs::create_dir_all(output_dir).map_err(|source| DocumentError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let document = self.create_document(title, content);
        info!(processor = self.name(), "processing document");
        document.save(&output_dir.join(filename_base))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextProcessor;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProcessor;

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlProcessor;

impl DocumentProcessor for TextProcessor {
    fn name(&self) -> &'static str {
        "TextProcessor"
    }

    fn create_document(&self, title: &str, content: &[String]) -> Box<dyn Document> {
        Box::new(TextDocument(DocumentData::new(title, content)))
    }
}

impl DocumentProcessor for JsonProcessor {
    fn name(&self) -> &'static str {
        "JsonProcessor"
    }

    fn create_document(&self, title: &str, content: &[String]) -> Box<dyn Document> {
        Box::new(JsonDocument(DocumentData::new(title, content)))
    }
}

impl DocumentProcessor for HtmlProcessor {
    fn name(&self) -> &'static str {
        "HtmlProcessor"
    }

    fn create_document(&self, title: &str, content: &[String]) -> Box<dyn Document> {
        Box::new(HtmlDocument(DocumentData::new(title, content)))
    }
}
