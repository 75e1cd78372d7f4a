//! formguard CLI
//!
//! Command-line tool for checking form data against a rule set.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use formguard_core::{contact_config, FieldState, FormConfig, FormSpec, ValidationEngine};
use formguard_ui::{
    field_defs, render_form, FormController, SimulatedSubmitter, SubmitOutcome, Submitter,
};

/// Declarative validation for web forms.
#[derive(Parser)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rule set file (the built-in contact form if not specified).
    #[arg(short, long, env = "FORMGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List fields with their rules and messages.
    Rules,

    /// Validate a single field value.
    Check {
        /// Field name.
        field: String,

        /// Value to validate.
        value: String,
    },

    /// Validate a JSON object of field values.
    Validate {
        /// Path to the values file.
        data: PathBuf,
    },

    /// Print the form markup, optionally filled from a values file.
    Render {
        /// Path to the values file.
        data: Option<PathBuf>,

        /// Form action URL.
        #[arg(short, long, default_value = "#")]
        action: String,
    },

    /// Fill the form and send it through the simulated submitter.
    Submit {
        /// Path to the values file.
        data: PathBuf,

        /// Probability of a simulated server error, from 0 to 1.
        #[arg(long, default_value_t = 0.1)]
        failure_rate: f64,

        /// Simulated network latency in milliseconds.
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref())?;
    let spec = config.build().context("invalid rule set")?;
    debug!(fields = spec.len(), "rule set loaded");
    let engine = ValidationEngine::new(spec);

    match cli.command {
        Commands::Rules => {
            print!("{}", describe_rules(engine.spec()));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { field, value } => {
            let state = engine.validate_field(&field, &value)?;
            println!("{}", status_line(&state));
            Ok(exit_code(!state.is_invalid()))
        }

        Commands::Validate { data } => {
            let values = read_values(&data)?;
            let result = engine.validate_form(&values);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_valid {
                info!(errors = ?result.errors, "form is invalid");
            }
            Ok(exit_code(result.is_valid))
        }

        Commands::Render { data, action } => {
            let mut controller =
                FormController::new(engine, SimulatedSubmitter::new(Duration::ZERO, 0.0));
            if let Some(data) = data {
                fill(&mut controller, &read_values(&data)?)?;
            }
            let defs = field_defs(&config, controller.engine().spec());
            println!("{}", render_form(&defs, &controller, &action));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Submit {
            data,
            failure_rate,
            delay_ms,
        } => {
            let submitter = SimulatedSubmitter::new(Duration::from_millis(delay_ms), failure_rate);
            let mut controller = FormController::new(engine, submitter);
            fill(&mut controller, &read_values(&data)?)?;

            let outcome = controller.submit().await;
            if let Some(notification) = outcome.notification() {
                println!(
                    "{} {}: {}",
                    notification.kind.icon(),
                    notification.title,
                    notification.message
                );
            }
            match outcome {
                SubmitOutcome::Sent { ack, .. } => {
                    println!("reference: {}", ack.reference);
                    Ok(ExitCode::SUCCESS)
                }
                SubmitOutcome::Invalid { result, .. } => {
                    for state in result.fields.iter().filter(|state| state.is_invalid()) {
                        println!("{}", status_line(state));
                    }
                    Ok(ExitCode::FAILURE)
                }
                SubmitOutcome::Failed { .. } | SubmitOutcome::Ignored => Ok(ExitCode::FAILURE),
            }
        }
    }
}

/// Loads the rule set from a file, or the built-in contact form.
fn load_config(path: Option<&Path>) -> anyhow::Result<FormConfig> {
    match path {
        Some(path) => {
            info!("Loading rule set from {}", path.display());
            Ok(FormConfig::from_path(path)?)
        }
        None => Ok(contact_config()),
    }
}

/// Reads a JSON object of field values.
fn read_values(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON object of strings", path.display()))
}

/// Replays typing and leaving each field that has a value, in declaration
/// order.
fn fill<S: Submitter>(
    controller: &mut FormController<S>,
    values: &HashMap<String, String>,
) -> anyhow::Result<()> {
    let names: Vec<String> = controller
        .engine()
        .spec()
        .field_names()
        .map(str::to_string)
        .collect();
    for name in names {
        if let Some(value) = values.get(&name) {
            controller.input(&name, value)?;
            controller.blur(&name)?;
        }
    }
    Ok(())
}

fn describe_rules(spec: &FormSpec) -> String {
    let mut out = String::new();
    for field in spec.fields() {
        let marker = if field.is_required() { " *" } else { "" };
        out.push_str(&format!("{}{}\n", field.name, marker));
        if field.rules.is_empty() {
            out.push_str("  (no rules)\n");
        }
        for rule in &field.rules {
            out.push_str(&format!(
                "  {:<14} {}\n",
                rule.to_string(),
                field.message_for(&rule.kind())
            ));
        }
    }
    out
}

fn status_line(state: &FieldState) -> String {
    match state.message() {
        Some(message) => format!("✗ {}: {}", state.field, message),
        None => format!("✓ {}: {}", state.field, state.status.as_str()),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
