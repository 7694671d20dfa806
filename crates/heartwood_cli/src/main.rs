//! `heartwood` command-line entry point.
//!
//! # Responsibility
//! - Scaffold service files through `heartwood_core::ServiceGenerator`.
//! - Check input mappings against contracts declared in JSON.

mod args;

use anyhow::{bail, Context, Result};
use args::{Cli, Command, GenerateArgs, ValidateArgs};
use clap::Parser;
use heartwood_core::{
    init_logging, AttributeMap, GeneratorConfig, LoggingConfig, ServiceGenerator, ServiceRegistry,
};
use serde_json::{json, Value};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(heartwood_core::default_log_level());
    let logging = LoggingConfig::new(level, cli.log_dir.as_deref()).map_err(anyhow::Error::msg)?;
    init_logging(&logging).map_err(anyhow::Error::msg)?;

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Validate(args) => validate(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let generator = ServiceGenerator::new(GeneratorConfig {
        root: args.root,
        services_dir: args.services_dir,
        force: args.force,
    });
    let generated = generator.generate(&args.name)?;

    let verb = if generated.overwritten {
        "Overwrote"
    } else {
        "Created"
    };
    println!(
        "{verb} {} at {}",
        generated.name.type_name(),
        generated.path.display()
    );
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let declarations = std::fs::read_to_string(&args.contracts)
        .with_context(|| format!("failed to read `{}`", args.contracts.display()))?;
    let input = parse_input(&args.input)?;

    let report = validation_report(&declarations, &args.variant, &input)
        .with_context(|| format!("validation against `{}` failed", args.contracts.display()))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Constructs `variant` from `input` and describes the resulting instance.
fn validation_report(declarations: &str, variant: &str, input: &AttributeMap) -> Result<Value> {
    let mut registry = ServiceRegistry::new();
    registry.load_declarations(declarations)?;

    let instance = registry.construct(variant, input)?;
    Ok(json!({
        "variant": instance.variant(),
        "contract": instance.contract(),
        "attributes": instance.attributes(),
    }))
}

fn parse_input(raw: &str) -> Result<AttributeMap> {
    let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("input must be a JSON object, got `{other}`"),
    }
}
