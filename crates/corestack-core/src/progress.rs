//! Progress reporting for lifecycle steps
//!
//! The lifecycle runner never prints. It reports through a [`ProgressReporter`]
//! supplied by the caller: the CLI passes a cliclack spinner reporter, plain
//! terminals get [`ConsoleReporter`], and tests use [`RecordingReporter`].

use crate::lifecycle::Step;
use colored::Colorize;
use std::sync::Mutex;

/// Receives step transitions from the lifecycle runner
pub trait ProgressReporter: Send + Sync {
    /// A step is starting
    fn begin(&self, step: Step);

    /// A step finished successfully
    fn complete(&self, step: Step, detail: &str);

    /// A step failed; the run continues unless the step is fatal
    fn fail(&self, step: Step, message: &str);

    /// A step was not attempted
    fn skip(&self, _step: Step, _reason: &str) {}

    /// Advisory information that does not change a step's outcome
    fn note(&self, _message: &str) {}
}

/// Plain colored console output, one line per transition
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn begin(&self, step: Step) {
        println!("{} {}...", "->".blue(), step.label());
    }

    fn complete(&self, step: Step, detail: &str) {
        if detail.is_empty() {
            println!("   {} {}", "done".green(), step.label());
        } else {
            println!("   {} {}", "done".green(), detail);
        }
    }

    fn fail(&self, step: Step, message: &str) {
        eprintln!("   {} {}", "failed".red(), step.label());
        for line in message.lines() {
            eprintln!("     {}", line);
        }
    }

    fn skip(&self, step: Step, reason: &str) {
        println!("   {} {} ({})", "skipped".dimmed(), step.label(), reason);
    }

    fn note(&self, message: &str) {
        println!("   {} {}", "note:".yellow(), message);
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn begin(&self, _step: Step) {}
    fn complete(&self, _step: Step, _detail: &str) {}
    fn fail(&self, _step: Step, _message: &str) {}
}

/// A recorded progress event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Begin(Step),
    Complete(Step, String),
    Fail(Step, String),
    Skip(Step, String),
    Note(String),
}

/// Keeps every event in order, for embedding callers and tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ProgressReporter for RecordingReporter {
    fn begin(&self, step: Step) {
        self.push(ProgressEvent::Begin(step));
    }

    fn complete(&self, step: Step, detail: &str) {
        self.push(ProgressEvent::Complete(step, detail.to_string()));
    }

    fn fail(&self, step: Step, message: &str) {
        self.push(ProgressEvent::Fail(step, message.to_string()));
    }

    fn skip(&self, step: Step, reason: &str) {
        self.push(ProgressEvent::Skip(step, reason.to_string()));
    }

    fn note(&self, message: &str) {
        self.push(ProgressEvent::Note(message.to_string()));
    }
}
