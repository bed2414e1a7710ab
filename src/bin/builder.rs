use colored::Colorize;
use design_patterns::creational::builder::{DynamicWorkflow, DynamicWorkflowBuilder, StepOutcome};
use design_patterns::logging;
use serde_json::json;

fn print_outcomes(outcomes: &[StepOutcome]) {
    for outcome in outcomes {
        match outcome {
            StepOutcome::Executed { step, summary } => println!("  {} {step}: {summary}", "ran".green()),
            StepOutcome::Skipped { step, step_type } => {
                println!("  {} {step}: unknown step type '{step_type}'", "skipped".yellow())
            }
            StepOutcome::Failed { step, error } => println!("  {} {step}: {error}", "failed".red()),
        }
    }
}

fn main() {
    logging::init();
    println!("{}", "=== Builder: dynamic workflow ===".bold());

    let onboarding = DynamicWorkflow::builder()
        .add_step(
            "send_email",
            json!({"to": "new.user@example.com", "subject": "Welcome!", "body": "Thanks for joining our platform."}),
        )
        .add_step("run_script", json!({"path": "/scripts/provision_account.sh"}))
        .add_step("notify_slack", json!({"channel": "#onboarding", "message": "A new user signed up."}))
        .build();
    println!("\n{}", "Onboarding workflow".cyan());
    print_outcomes(&onboarding.execute());

    let mut base = DynamicWorkflowBuilder::new();
    base.add_step("run_script", json!({"path": "/scripts/backup.sh"}));
    let minimal = base.build();
    let extended = base
        .add_step("launch_rocket", json!({}))
        .add_step("notify_slack", json!({}))
        .build();

    println!("\n{}", "Minimal maintenance workflow".cyan());
    print_outcomes(&minimal.execute());
    println!("\n{}", "Extended maintenance workflow".cyan());
    print_outcomes(&extended.execute());

    println!("\n{}", "Empty workflow".cyan());
    print_outcomes(&DynamicWorkflowBuilder::new().build().execute());
}
