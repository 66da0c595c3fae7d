//! rpmreqs - Main entry point
//!
//! Reads a marker tree or specifier clauses, applies the configuration and
//! prints the RPM rendering on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use rpmreqs::cli::{Cli, Commands};
use rpmreqs::config_file::{GeneratorConfig, ResolvedConfig, TemplateSettings};
use rpmreqs::{
    MarkerTree, SpecifierSet, requirement_to_rpm, simplify_marker_to_rpm_condition,
    specifier_to_rpm_version,
};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    // Allows RUST_LOG env var to override
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Marker {
            config,
            flavour,
            templates,
            marker,
        } => {
            let resolved = load_config(config.as_deref(), flavour.as_deref(), templates.into())?;
            let tree = read_marker(&marker)?;
            let condition =
                simplify_marker_to_rpm_condition(Some(&tree), &resolved.environments, &resolved.templates)
                    .with_context(|| format!("Cannot translate marker {tree}"))?;
            println!("{condition}");
        }
        Commands::Specifier {
            config,
            flavour,
            templates,
            python_dist,
            package,
            specifiers,
        } => {
            let specifiers = SpecifierSet::parse_clauses(&specifiers)?;
            let requirement = if python_dist {
                let resolved = load_config(config.as_deref(), flavour.as_deref(), templates.into())?;
                requirement_to_rpm(&package, &specifiers, &resolved.templates)
            } else {
                specifier_to_rpm_version(&package, &specifiers)
            };
            println!("{requirement}");
        }
        Commands::Validate { config } => {
            info!("Validating configuration file: {:?}", config);
            GeneratorConfig::load_from_file(&config)?.validate()?;
            info!("Configuration validation successful");
            println!("✓ Configuration file is valid: {:?}", config);
        }
    }
    Ok(())
}

/// Load the configuration (or the defaults), then apply the flavour and the
/// command-line template overrides, in that order
fn load_config(
    path: Option<&Path>,
    flavour: Option<&str>,
    overrides: TemplateSettings,
) -> Result<ResolvedConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration: {:?}", path);
            GeneratorConfig::load_from_file(path)?
        }
        None if flavour.is_some() => anyhow::bail!("--flavour needs a --config file"),
        None => GeneratorConfig::new(),
    };
    config.resolve_with(flavour, &overrides)
}

fn read_marker(path: &Path) -> Result<MarkerTree> {
    let json = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read marker from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read marker from {:?}", path))?
    };
    MarkerTree::from_json(&json).with_context(|| format!("Invalid marker tree in {:?}", path))
}
