use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config_file::TemplateSettings;
use crate::template::Template;

/// rpmreqs - Python dependency constraints in RPM spec syntax
#[derive(Parser)]
#[command(name = "rpmreqs")]
#[command(about = "Translate Python markers and version specifiers into RPM dependency syntax")]
#[command(version)]
pub struct Cli {
    /// Log simplification decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simplify a marker tree to an RPM condition (prints true, false or the condition)
    Marker {
        /// Configuration file with environments and templates
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flavour section of the configuration to apply
        #[arg(short, long)]
        flavour: Option<String>,

        #[command(flatten)]
        templates: TemplateArgs,

        /// Marker tree as JSON, or '-' for stdin
        marker: PathBuf,
    },
    /// Translate version specifiers into an RPM requirement
    Specifier {
        /// Configuration file with templates
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flavour section of the configuration to apply
        #[arg(short, long)]
        flavour: Option<String>,

        #[command(flatten)]
        templates: TemplateArgs,

        /// Name the package through the python_package template
        #[arg(long)]
        python_dist: bool,

        /// Package the requirement is on
        package: String,

        /// Specifier clauses, e.g. '>=1.0' '<2.0'
        specifiers: Vec<String>,
    },
    /// Validate a configuration file and all of its flavours
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

/// Template overrides; they win over the configuration file and its flavour
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template for the interpreter ABI token, e.g. 'python(abi) = {major}.{minor}'
    #[arg(long, value_name = "TEMPLATE")]
    pub python_abi: Option<Template>,

    /// Template for architecture conditions, e.g. '{arch}'
    #[arg(long, value_name = "TEMPLATE")]
    pub python_arch: Option<Template>,

    /// Template for Python distribution names, e.g. 'python3-{name}'
    #[arg(long, value_name = "TEMPLATE")]
    pub python_package: Option<Template>,
}

impl From<TemplateArgs> for TemplateSettings {
    fn from(args: TemplateArgs) -> Self {
        Self {
            python_abi: args.python_abi,
            python_arch: args.python_arch,
            python_package: args.python_package,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
