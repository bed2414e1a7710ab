use std::rc::Rc;

use colored::Colorize;
use design_patterns::behavioral::command::{
    ConsoleDatabaseService, ConsoleEmailService, ConsoleReportGenerator, GenerateReportCommand,
    RunDatabaseBackupCommand, SendEmailCommand, TaskScheduler,
};
use design_patterns::logging;

fn main() {
    logging::init();
    println!("{}", "=== Command: task scheduler ===".bold());

    let email = Rc::new(ConsoleEmailService);
    let reports = Rc::new(ConsoleReportGenerator);
    let database = Rc::new(ConsoleDatabaseService);

    let mut scheduler = TaskScheduler::new();
    scheduler.add_task(Box::new(SendEmailCommand::new(
        email.clone(),
        "admin@example.com",
        "System Update",
        "The system will be updated tonight.",
    )));
    scheduler.add_task(Box::new(GenerateReportCommand::new(reports, "Sales", "/reports/sales_q1.pdf")));
    scheduler.add_task(Box::new(RunDatabaseBackupCommand::new(database, "daily_backup")));
    scheduler.add_task(Box::new(SendEmailCommand::new(email, "", "Broken", "No recipient")));

    println!("Queued {} tasks", scheduler.pending());
    let summary = scheduler.run_pending_tasks();

    for name in &summary.completed {
        println!("  {} {name}", "ok".green());
    }
    for (name, err) in &summary.failed {
        println!("  {} {name}: {err}", "failed".red());
    }

    println!("\nRunning again with an empty queue:");
    let again = scheduler.run_pending_tasks();
    println!("  {} tasks run", again.total());
}
