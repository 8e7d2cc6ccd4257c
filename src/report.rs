//! Status notices for a collection run.

use std::path::Path;

#[cfg(test)]
use crate::types::StatusEvent;

/// Receives one notice per manifest entry and one when the pass completes.
pub trait StatusReporter {
    fn collected(&mut self, entry: &str);
    fn skipped(&mut self, entry: &str);
    fn finished(&mut self, output: &Path);
}

/// Human-readable status lines on stdout.
pub struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn collected(&mut self, entry: &str) {
        println!("Collected: {}", entry);
    }

    fn skipped(&mut self, entry: &str) {
        println!("Skipped (not found): {}", entry);
    }

    fn finished(&mut self, output: &Path) {
        println!("\nAll done! Collected content saved to '{}'.", output.display());
    }
}

/// Keeps every notice in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<StatusEvent>,
}

#[cfg(test)]
impl StatusReporter for RecordingReporter {
    fn collected(&mut self, entry: &str) {
        self.events.push(StatusEvent::Collected(entry.to_string()));
    }

    fn skipped(&mut self, entry: &str) {
        self.events.push(StatusEvent::Skipped(entry.to_string()));
    }

    fn finished(&mut self, output: &Path) {
        self.events
            .push(StatusEvent::Finished(output.display().to_string()));
    }
}
