//! `actions` and `config` subcommands.

use pagepilot_actions_browser::register_default_actions;
use pagepilot_config::{Config, ConfigValidator};
use pagepilot_core::{ActionRegistry, ActionRegistryBuilder};
use pagepilot_runtime::StepLoopConfig;

use crate::cli::OutputFormat;

/// Build the live registry with the configured exclusions applied.
pub(crate) fn build_registry(config: &Config) -> Result<ActionRegistry, Box<dyn std::error::Error>> {
    let mut builder = ActionRegistryBuilder::with_excluded(config.actions.excluded.iter().cloned());
    register_default_actions(&mut builder)?;
    Ok(builder.build())
}

/// Step loop settings derived from `[agent]`.
pub(crate) fn step_loop_config(config: &Config) -> StepLoopConfig {
    StepLoopConfig::default()
        .with_max_failures(config.agent.max_failures)
        .with_max_actions_per_step(config.agent.max_actions_per_step)
        .with_vision(config.agent.use_vision)
}

pub(crate) fn handle_actions(
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = build_registry(config)?;

    match format {
        OutputFormat::Text => {
            for spec in registry.all() {
                println!("{}", spec.name());
                println!("    {}", spec.description());
                println!("    params: {}", spec.schema().as_value());
            }
            println!();
            println!("{} actions registered", registry.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        }
    }

    Ok(())
}

pub(crate) fn handle_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !result.is_valid() {
        return Err(format!("{} configuration error(s)", result.errors.len()).into());
    }

    let loop_config = step_loop_config(config);
    println!("max_steps = {}", config.agent.max_steps);
    println!("max_failures = {}", loop_config.max_failures);
    println!("max_actions_per_step = {}", loop_config.max_actions_per_step);
    println!("use_vision = {}", loop_config.use_vision);
    println!("excluded = {:?}", config.actions.excluded);
    println!(
        "logging = {} ({})",
        config.logging.level, config.logging.format
    );

    Ok(())
}
