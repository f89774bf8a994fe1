//! File type association for Drools rule files

use std::path::Path;

/// A recognized file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    /// Short display name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default extension, without the dot
    pub default_extension: &'static str,
}

/// Drools rule files
pub const DROOLS: FileType = FileType {
    name: "Drools File",
    description: "Drools rule file",
    default_extension: "drl",
};

impl FileType {
    /// Check if a path has this file type's extension (case-insensitive)
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.default_extension))
    }
}

/// Detect the file type of a path
pub fn detect(path: &Path) -> Option<&'static FileType> {
    DROOLS.matches(path).then_some(&DROOLS)
}
