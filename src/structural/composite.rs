//! # Composite: file system
//!
//! Files and directories share one type, so callers ask either for its size
//! or its listing without checking which one they hold.

use itertools::Itertools;
use thiserror::Error;

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileSystemError {
    #[error("'{0}' is a file and cannot have children")]
    NotADirectory(String),

    #[error("'{name}' not found in '{directory}'")]
    ChildNotFound { directory: String, name: String },

    #[error("index {index} out of range for '{directory}' ({len} children)")]
    IndexOutOfRange {
        directory: String,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemComponent {
    File { name: String, size: u64 },
    Directory {
        name: String,
        children: Vec<FileSystemComponent>,
    },
}

impl FileSystemComponent {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::File {
            name: name.into(),
            size,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::Directory {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Bytes for a file; the recursive total for a directory.
    pub fn size(&self) -> u64 {
        match self {
            Self::File { size, .. } => *size,
            Self::Directory { children, .. } => children.iter().map(Self::size).sum(),
        }
    }

    pub fn add(&mut self, component: FileSystemComponent) -> Result<(), FileSystemError> {
        self.children_mut()?.push(component);
        Ok(())
    }

    /// Removes the first child called `name` and hands it back.
    pub fn remove(&mut self, name: &str) -> Result<FileSystemComponent, FileSystemError> {
        let directory = self.name().to_string();
        let children = self.children_mut()?;
        let position = children
            .iter()
            .position(|child| child.name() == name)
            .ok_or_else(|| FileSystemError::ChildNotFound {
                directory,
                name: name.to_string(),
            })?;
        Ok(children.remove(position))
    }

    pub fn child(&self, index: usize) -> Result<&FileSystemComponent, FileSystemError> {
        match self {
            Self::File { name, .. } => Err(FileSystemError::NotADirectory(name.clone())),
            Self::Directory { name, children } => {
                children
                    .get(index)
                    .ok_or_else(|| FileSystemError::IndexOutOfRange {
                        directory: name.clone(),
                        index,
                        len: children.len(),
                    })
            }
        }
    }

    /// Mutable access to a nested entry, for building trees in place.
    pub fn child_mut(&mut self, index: usize) -> Result<&mut FileSystemComponent, FileSystemError> {
        let directory = self.name().to_string();
        let children = self.children_mut()?;
        let len = children.len();
        children
            .get_mut(index)
            .ok_or(FileSystemError::IndexOutOfRange {
                directory,
                index,
                len,
            })
    }

    /// One line per entry: `- name (n bytes)` for files and
    /// `+ name (n bytes total)` for directories, children indented by two
    /// spaces per level.
    pub fn display(&self) -> String {
        self.display_lines(0).join("\n")
    }

    fn display_lines(&self, depth: usize) -> Vec<String> {
        let indent = INDENT.repeat(depth);
        match self {
            Self::File { name, size } => vec![format!("{indent}- {name} ({size} bytes)")],
            Self::Directory { name, children } => {
                let header = format!("{indent}+ {name} ({} bytes total)", self.size());
                std::iter::once(header)
                    .chain(children.iter().flat_map(|child| child.display_lines(depth + 1)))
                    .collect_vec()
            }
        }
    }

    fn children_mut(&mut self) -> Result<&mut Vec<FileSystemComponent>, FileSystemError> {
        match self {
            Self::File { name, .. } => Err(FileSystemError::NotADirectory(name.clone())),
            Self::Directory { children, .. } => Ok(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileSystemComponent {
        let mut private = FileSystemComponent::directory("private");
        private.add(FileSystemComponent::file("secret.dat", 1000)).unwrap();

        let mut docs = FileSystemComponent::directory("docs");
        docs.add(FileSystemComponent::file("doc1.txt", 100)).unwrap();
        docs.add(FileSystemComponent::file("doc2.pdf", 200)).unwrap();
        docs.add(private).unwrap();

        let mut pics = FileSystemComponent::directory("pics");
        pics.add(FileSystemComponent::file("pic1.jpg", 500)).unwrap();

        let mut root = FileSystemComponent::directory("root");
        root.add(FileSystemComponent::file("root_file.log", 10)).unwrap();
        root.add(docs).unwrap();
        root.add(pics).unwrap();
        root
    }

    #[test]
    fn test_file_properties() {
        let file = FileSystemComponent::file("test.txt", 100);
        assert_eq!(file.name(), "test.txt");
        assert_eq!(file.size(), 100);
        assert!(!file.is_directory());
    }

    #[test]
    fn test_file_cannot_have_children() {
        let mut file = FileSystemComponent::file("test.txt", 100);
        let expected = FileSystemError::NotADirectory("test.txt".to_string());
        assert_eq!(file.add(FileSystemComponent::file("x", 1)), Err(expected.clone()));
        assert_eq!(file.remove("x"), Err(expected.clone()));
        assert_eq!(file.child(0), Err(expected));
    }

    #[test]
    fn test_empty_directory_has_zero_size() {
        assert_eq!(FileSystemComponent::directory("docs").size(), 0);
    }

    #[test]
    fn test_nested_sizes() {
        let root = sample_tree();
        assert_eq!(root.size(), 10 + (100 + 200 + 1000) + 500);
        assert_eq!(root.child(1).unwrap().size(), 1300);
        assert_eq!(root.child(1).unwrap().child(2).unwrap().size(), 1000);
    }

    #[test]
    fn test_child_access_and_bounds() {
        let mut dir = FileSystemComponent::directory("docs");
        dir.add(FileSystemComponent::file("file1.txt", 50)).unwrap();
        dir.add(FileSystemComponent::file("file2.txt", 150)).unwrap();

        assert_eq!(dir.child(1).unwrap().name(), "file2.txt");
        assert!(matches!(
            dir.child(2),
            Err(FileSystemError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_remove_child() {
        let mut dir = FileSystemComponent::directory("docs");
        dir.add(FileSystemComponent::file("file1.txt", 50)).unwrap();
        dir.add(FileSystemComponent::file("file2.txt", 150)).unwrap();

        let removed = dir.remove("file1.txt").unwrap();
        assert_eq!(removed.size(), 50);
        assert_eq!(dir.child(0).unwrap().name(), "file2.txt");
        assert!(dir.child(1).is_err());
        assert!(matches!(
            dir.remove("file1.txt"),
            Err(FileSystemError::ChildNotFound { .. })
        ));
    }

    #[test]
    fn test_child_mut_updates_nested_size() {
        let mut root = sample_tree();
        root.child_mut(2)
            .unwrap()
            .add(FileSystemComponent::file("pic2.jpg", 40))
            .unwrap();
        assert_eq!(root.size(), 1850);
    }

    #[test]
    fn test_display() {
        let mut docs = FileSystemComponent::directory("docs");
        docs.add(FileSystemComponent::file("file1.txt", 50)).unwrap();
        let mut root = FileSystemComponent::directory("root");
        root.add(docs).unwrap();
        root.add(FileSystemComponent::file("a.log", 5)).unwrap();

        assert_eq!(
            root.display(),
            "+ root (55 bytes total)\n  + docs (50 bytes total)\n    - file1.txt (50 bytes)\n  - a.log (5 bytes)"
        );
    }
}
