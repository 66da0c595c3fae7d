//! Configuration file handling for the translation inputs.
//!
//! A configuration names the known build environments and the templates used
//! to render RPM names. Named flavours overlay their own entries on top of the
//! base section, so one file can serve several distributions.
//!
//! ```json
//! {
//!   "flavour": "fedora",
//!   "python_version": "3.11",
//!   "templates": { "python_abi": "python(abi)", "python_arch": "{arch}" },
//!   "environments": { "python_version": ["3.10", "3.11"], "extras": ["test"] },
//!   "flavours": {
//!     "fedora": { "templates": { "python_package": "python3-{name}" } }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::environment::{EnvValue, Environments};
use crate::error::RpmReqsError;
use crate::template::{
    DEFAULT_PYTHON_ABI, DEFAULT_PYTHON_ARCH, DEFAULT_PYTHON_PACKAGE, InterpreterVersion,
    RpmTemplates, Template,
};

/// Templates as written in the file; unset entries use the defaults.
///
/// Template syntax is checked while the file is parsed. Which placeholders a
/// template may use depends on the interpreter version, so that part is
/// checked when the configuration is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_abi: Option<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_arch: Option<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_package: Option<Template>,
}

impl TemplateSettings {
    /// Replace the entries `other` sets
    pub fn overlay(&mut self, other: &TemplateSettings) {
        if other.python_abi.is_some() {
            self.python_abi.clone_from(&other.python_abi);
        }
        if other.python_arch.is_some() {
            self.python_arch.clone_from(&other.python_arch);
        }
        if other.python_package.is_some() {
            self.python_package.clone_from(&other.python_package);
        }
    }
}

/// Overrides applied when a flavour is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavourSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default)]
    pub templates: TemplateSettings,
    #[serde(default)]
    pub environments: Environments,
}

/// Translation configuration that can be saved/loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Flavour applied when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavour: Option<String>,
    /// Interpreter version for `{major}` / `{minor}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default)]
    pub templates: TemplateSettings,
    #[serde(default)]
    pub environments: Environments,
    #[serde(default)]
    pub flavours: BTreeMap<String, FlavourSettings>,
}

/// Configuration with the flavour applied and templates validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub environments: Environments,
    pub templates: RpmTemplates,
}

impl GeneratorConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid configuration file {:?}", path.as_ref()))
    }

    /// Validate the configuration: the default selection and every flavour
    /// must resolve
    pub fn validate(&self) -> Result<()> {
        if let Some(flavour) = &self.flavour {
            if !self.flavours.contains_key(flavour) {
                return Err(RpmReqsError::config(format!("unknown default flavour '{flavour}'")).into());
            }
        }

        let no_overrides = TemplateSettings::default();
        self.resolve(None).context("Default configuration is invalid")?;
        for name in self.flavours.keys() {
            self.resolve_flavour(Some(name), &no_overrides)
                .with_context(|| format!("Flavour '{name}' is invalid"))?;
        }
        Ok(())
    }

    /// Apply `flavour` (or the configured default) and build the templates
    pub fn resolve(&self, flavour: Option<&str>) -> Result<ResolvedConfig> {
        self.resolve_with(flavour, &TemplateSettings::default())
    }

    /// Like [`GeneratorConfig::resolve`], with `overrides` taking precedence
    /// over the templates of the file and of the flavour
    pub fn resolve_with(
        &self,
        flavour: Option<&str>,
        overrides: &TemplateSettings,
    ) -> Result<ResolvedConfig> {
        self.resolve_flavour(flavour.or(self.flavour.as_deref()), overrides)
    }

    fn resolve_flavour(
        &self,
        flavour: Option<&str>,
        overrides: &TemplateSettings,
    ) -> Result<ResolvedConfig> {
        let mut templates = self.templates.clone();
        let mut environments = self.environments.clone();
        let mut python_version = self.python_version.clone();

        if let Some(name) = flavour {
            let settings = self
                .flavours
                .get(name)
                .ok_or_else(|| RpmReqsError::config(format!("unknown flavour '{name}'")))?;
            debug!(flavour = name, "applying configuration flavour");
            templates.overlay(&settings.templates);
            environments.merge(&settings.environments);
            if settings.python_version.is_some() {
                python_version.clone_from(&settings.python_version);
            }
        }
        templates.overlay(overrides);

        // A single known python_version doubles as the interpreter version
        let python_version = python_version.or_else(|| match environments.get("python_version") {
            Some(EnvValue::Single(version)) => Some(version.clone()),
            _ => None,
        });
        let interpreter = python_version
            .as_deref()
            .map(str::parse::<InterpreterVersion>)
            .transpose()?;

        let templates = RpmTemplates::from_templates(
            template_or_default(templates.python_abi, DEFAULT_PYTHON_ABI)?,
            template_or_default(templates.python_arch, DEFAULT_PYTHON_ARCH)?,
            template_or_default(templates.python_package, DEFAULT_PYTHON_PACKAGE)?,
            interpreter,
        )?;

        Ok(ResolvedConfig {
            environments,
            templates,
        })
    }
}

fn template_or_default(template: Option<Template>, default: &str) -> Result<Template> {
    match template {
        Some(template) => Ok(template),
        None => Ok(default.parse()?),
    }
}
