//! # Command: task scheduler
//!
//! Each task is wrapped in a [`Command`] that knows its receiver and arguments.
//! The [`TaskScheduler`] invoker only queues and runs commands; it never looks
//! at what they do.

use std::collections::VecDeque;
use std::rc::Rc;

use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("receiver failed: {0}")]
    Receiver(String),
}

impl CommandError {
    fn empty(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        }
    }
}

// =============================================================================
// Receivers
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait EmailService {
    fn send_email(&self, recipient: &str, subject: &str, body: &str) -> Result<(), CommandError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReportGenerator {
    fn generate_report(&self, report_type: &str, output_path: &str) -> Result<(), CommandError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait DatabaseService {
    fn run_backup(&self, backup_name: &str) -> Result<(), CommandError>;
}

/// Receiver implementations that only report what they would do.
#[derive(Debug, Default)]
pub struct ConsoleEmailService;

#[derive(Debug, Default)]
pub struct ConsoleReportGenerator;

#[derive(Debug, Default)]
pub struct ConsoleDatabaseService;

impl EmailService for ConsoleEmailService {
    fn send_email(&self, recipient: &str, subject: &str, body: &str) -> Result<(), CommandError> {
        if recipient.is_empty() {
            return Err(CommandError::empty("recipient"));
        }
        info!(recipient, subject, body, "email sent");
        Ok(())
    }
}

impl ReportGenerator for ConsoleReportGenerator {
    fn generate_report(&self, report_type: &str, output_path: &str) -> Result<(), CommandError> {
        if output_path.is_empty() {
            return Err(CommandError::empty("output_path"));
        }
        info!(report_type, output_path, "report generated");
        Ok(())
    }
}

impl DatabaseService for ConsoleDatabaseService {
    fn run_backup(&self, backup_name: &str) -> Result<(), CommandError> {
        if backup_name.is_empty() {
            return Err(CommandError::empty("backup_name"));
        }
        info!(backup_name, "database backup completed");
        Ok(())
    }
}

// =============================================================================
// Commands
// =============================================================================

pub trait Command {
    fn name(&self) -> &str;
    fn execute(&self) -> Result<(), CommandError>;
}

pub struct SendEmailCommand {
    service: Rc<dyn EmailService>,
    recipient: String,
    subject: String,
    body: String,
}

impl SendEmailCommand {
    pub fn new(
        service: Rc<dyn EmailService>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            service,
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

impl Command for SendEmailCommand {
    fn name(&self) -> &str {
        "SendEmailCommand"
    }

    fn execute(&self) -> Result<(), CommandError> {
        self.service
            .send_email(&self.recipient, &self.subject, &self.body)
    }
}

pub struct GenerateReportCommand {
    service: Rc<dyn ReportGenerator>,
    report_type: String,
    output_path: String,
}

impl GenerateReportCommand {
    pub fn new(
        service: Rc<dyn ReportGenerator>,
        report_type: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            service,
            report_type: report_type.into(),
            output_path: output_path.into(),
        }
    }
}

impl Command for GenerateReportCommand {
    fn name(&self) -> &str {
        "GenerateReportCommand"
    }

    fn execute(&self) -> Result<(), CommandError> {
        self.service
            .generate_report(&self.report_type, &self.output_path)
    }
}

pub struct RunDatabaseBackupCommand {
    service: Rc<dyn DatabaseService>,
    backup_name: String,
}

impl RunDatabaseBackupCommand {
    pub fn new(service: Rc<dyn DatabaseService>, backup_name: impl Into<String>) -> Self {
        Self {
            service,
            backup_name: backup_name.into(),
        }
    }
}

impl Command for RunDatabaseBackupCommand {
    fn name(&self) -> &str {
        "RunDatabaseBackupCommand"
    }

    fn execute(&self) -> Result<(), CommandError> {
        self.service.run_backup(&self.backup_name)
    }
}

// =============================================================================
// Invoker
// =============================================================================

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub completed: Vec<String>,
    pub failed: Vec<(String, CommandError)>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len()
    }
}

#[derive(Default)]
pub struct TaskScheduler {
    tasks: VecDeque<Box<dyn Command>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&mut self, command: Box<dyn Command>) {
        info!(task = command.name(), "adding task");
        self.tasks.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Runs every queued command in FIFO order and empties the queue.
    /// A failing command is recorded and the remaining ones still run.
    pub fn run_pending_tasks(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        if self.tasks.is_empty() {
            info!("No tasks to run.");
            return summary;
        }

        while let Some(task) = self.tasks.pop_front() {
            let name = task.name().to_string();
            match task.execute() {
                Ok(()) => {
                    info!(task = %name, "task completed");
                    summary.completed.push(name);
                }
                Err(err) => {
                    error!(task = %name, error = %err, "task failed");
                    summary.failed.push((name, err));
                }
            }
        }

        summary
    }
}
