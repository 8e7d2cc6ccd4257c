//! Core domain types for write modes and collection results.

use serde::Deserialize;

/// How the output document is materialized.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate the output up front and write block by block. A failed read
    /// leaves the blocks written so far on disk.
    #[default]
    Streaming,
    /// Build the document in memory and replace the output only on success.
    Atomic,
}

/// What happened to each manifest entry, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub collected: Vec<String>,
    pub skipped: Vec<String>,
    pub bytes: usize, // content bytes only, delimiters excluded
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Collected(String),
    Skipped(String),
    Finished(String),
}
