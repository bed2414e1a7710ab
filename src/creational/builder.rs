//! # Builder: dynamic workflow
//!
//! [`DynamicWorkflowBuilder`] collects steps one call at a time and snapshots
//! them into an immutable [`DynamicWorkflow`]. The builder stays usable after
//! `build`, so one partial workflow can seed several variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info, warn};

const PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("parameter '{name}' must be a string, got {found}")]
    InvalidParam { name: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Executed { step: usize, summary: String },
    Skipped { step: usize, step_type: String },
    Failed { step: usize, error: WorkflowError },
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct DynamicWorkflowBuilder {
    steps: Vec<WorkflowStep>,
}

impl DynamicWorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `params` should be a JSON object; anything else is stored as no params.
    pub fn add_step(&mut self, step_type: impl Into<String>, params: Value) -> &mut Self {
        let step_type = step_type.into();
        info!(%step_type, %params, "builder: adding step");
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.steps.push(WorkflowStep { step_type, params });
        self
    }

    pub fn build(&self) -> DynamicWorkflow {
        if self.steps.is_empty() {
            warn!("builder: building an empty workflow");
        }
        info!(steps = self.steps.len(), "builder: workflow built");
        DynamicWorkflow {
            steps: self.steps.clone(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicWorkflow {
    steps: Vec<WorkflowStep>,
}

impl DynamicWorkflow {
    pub fn builder() -> DynamicWorkflowBuilder {
        DynamicWorkflowBuilder::new()
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Runs every step in order. Unknown step types are skipped and a failing
    /// step does not stop the ones after it.
    pub fn execute(&self) -> Vec<StepOutcome> {
        if self.steps.is_empty() {
            info!("workflow has no steps");
            return Vec::new();
        }

        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let number = index + 1;
                info!(step = number, step_type = %step.step_type, "executing step");
                let handler: fn(&Map<String, Value>) -> Result<String, WorkflowError> =
                    match step.step_type.as_str() {
                        "send_email" => send_email,
                        "run_script" => run_script,
                        "notify_slack" => notify_slack,
                        other => {
                            warn!(step = number, step_type = other, "unknown step type, skipping");
                            return StepOutcome::Skipped {
                                step: number,
                                step_type: other.to_string(),
                            };
                        }
                    };

                match handler(&step.params) {
                    Ok(summary) => StepOutcome::Executed {
                        step: number,
                        summary,
                    },
                    Err(err) => {
                        error!(step = number, error = %err, "step failed");
                        StepOutcome::Failed {
                            step: number,
                            error: err,
                        }
                    }
                }
            })
            .collect()
    }
}

fn string_param(params: &Map<String, Value>, name: &str, default: &str) -> Result<String, WorkflowError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(WorkflowError::InvalidParam {
            name: name.to_string(),
            found: other.to_string(),
        }),
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn send_email(params: &Map<String, Value>) -> Result<String, WorkflowError> {
    let to = string_param(params, "to", "<default_email>")?;
    let subject = string_param(params, "subject", "<default_subject>")?;
    let body = string_param(params, "body", "")?;
    Ok(format!(
        "Simulating sending email to '{to}' with subject '{subject}': '{}...'",
        preview(&body)
    ))
}

fn run_script(params: &Map<String, Value>) -> Result<String, WorkflowError> {
    let path = string_param(params, "path", "<default_script_path>")?;
    Ok(format!("Simulating running script: '{path}'"))
}

fn notify_slack(params: &Map<String, Value>) -> Result<String, WorkflowError> {
    let channel = string_param(params, "channel", "#general")?;
    let message = string_param(params, "message", "")?;
    Ok(format!(
        "Simulating notifying Slack channel '{channel}': '{}...'",
        preview(&message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chains_and_preserves_order() {
        let workflow = DynamicWorkflow::builder()
            .add_step("send_email", json!({"to": "ops@example.com"}))
            .add_step("run_script", json!({"path": "/opt/cleanup.sh"}))
            .add_step("notify_slack", json!({}))
            .build();

        let types: Vec<&str> = workflow.steps().iter().map(|s| s.step_type.as_str()).collect();
        assert_eq!(types, vec!["send_email", "run_script", "notify_slack"]);
    }

    #[test]
    fn test_execute_uses_defaults() {
        let workflow = DynamicWorkflow::builder()
            .add_step("send_email", json!({}))
            .add_step("notify_slack", json!({"message": "deploy finished"}))
            .build();

        assert_eq!(
            workflow.execute(),
            vec![
                StepOutcome::Executed {
                    step: 1,
                    summary: "Simulating sending email to '<default_email>' with subject '<default_subject>': '...'"
                        .to_string(),
                },
                StepOutcome::Executed {
                    step: 2,
                    summary: "Simulating notifying Slack channel '#general': 'deploy finished...'".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_step_is_skipped() {
        let workflow = DynamicWorkflow::builder()
            .add_step("launch_rocket", json!({}))
            .add_step("run_script", json!({"path": "a.sh"}))
            .build();

        let outcomes = workflow.execute();
        assert_eq!(
            outcomes[0],
            StepOutcome::Skipped {
                step: 1,
                step_type: "launch_rocket".to_string()
            }
        );
        assert!(matches!(outcomes[1], StepOutcome::Executed { step: 2, .. }));
    }

    #[test]
    fn test_bad_param_fails_only_that_step() {
        let workflow = DynamicWorkflow::builder()
            .add_step("run_script", json!({"path": 42}))
            .add_step("run_script", json!({"path": "ok.sh"}))
            .build();

        let outcomes = workflow.execute();
        assert!(matches!(outcomes[0], StepOutcome::Failed { step: 1, .. }));
        assert!(matches!(outcomes[1], StepOutcome::Executed { step: 2, .. }));
    }

    #[test]
    fn test_empty_workflow() {
        let workflow = DynamicWorkflowBuilder::new().build();
        assert!(workflow.steps().is_empty());
        assert!(workflow.execute().is_empty());
    }

    #[test]
    fn test_build_snapshots_steps() {
        let mut builder = DynamicWorkflowBuilder::new();
        builder.add_step("run_script", json!({"path": "one.sh"}));
        let first = builder.build();

        builder.add_step("run_script", json!({"path": "two.sh"}));
        let second = builder.build();

        assert_eq!(first.steps().len(), 1);
        assert_eq!(second.steps().len(), 2);
    }

    #[test]
    fn test_workflow_deserializes_from_json() {
        let workflow: DynamicWorkflow = serde_json::from_value(json!({
            "steps": [{"type": "run_script", "params": {"path": "x.sh"}}, {"type": "notify_slack"}]
        }))
        .unwrap();
        assert_eq!(workflow.steps().len(), 2);
        assert!(workflow.steps()[1].params.is_empty());
    }
}
