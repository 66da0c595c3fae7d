//! Validated name templates.
//!
//! Templates use `{placeholder}` substitution with `{{` and `}}` for literal
//! braces, so RPM macros are written `%{{python3_version}}`. The placeholder
//! set is closed and every template is checked when [`RpmTemplates`] is
//! built: rendering never fails.
//!
//! | Template | Allowed placeholders |
//! |----------|----------------------|
//! | `python_abi` | `major`, `minor` |
//! | `python_arch` | `arch`, `major`, `minor` |
//! | `python_package` | `name`, `major`, `minor` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

use crate::error::{Result, RpmReqsError};

/// Recognized template placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Placeholder {
    /// Architecture name, e.g. `x86_64`
    Arch,
    /// Interpreter major version
    Major,
    /// Interpreter minor version
    Minor,
    /// Python distribution name
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Placeholders used by this template, in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Fail if the template uses a placeholder outside `allowed`
    pub fn check_placeholders(&self, template_name: &str, allowed: &[Placeholder]) -> Result<()> {
        match self.placeholders().find(|p| !allowed.contains(p)) {
            Some(p) => Err(RpmReqsError::template(format!(
                "placeholder {{{p}}} is not allowed in {template_name} template '{}'",
                self.source
            ))),
            None => Ok(()),
        }
    }

    /// Render with a value for every placeholder
    pub fn render_with<'a>(&self, mut value: impl FnMut(Placeholder) -> &'a str) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(value(*p)),
            }
        }
        out
    }
}

impl FromStr for Template {
    type Err = RpmReqsError;

    fn from_str(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(RpmReqsError::template(format!(
                                    "unclosed '{{' in template '{source}'"
                                )));
                            }
                        }
                    }
                    let placeholder = Placeholder::from_str(&name).map_err(|_| {
                        RpmReqsError::template(format!(
                            "unknown placeholder {{{name}}} in template '{source}'"
                        ))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' => {
                    return Err(RpmReqsError::template(format!(
                        "single '}}' in template '{source}'"
                    )));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for Template {
    type Error = RpmReqsError;

    fn try_from(source: String) -> Result<Self> {
        source.parse()
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Interpreter version used for `{major}` and `{minor}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterpreterVersion {
    pub major: u64,
    pub minor: u64,
}

impl FromStr for InterpreterVersion {
    type Err = RpmReqsError;

    /// Parse `"3.11"` (trailing components such as `"3.11.4"` are ignored)
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('.');
        let mut component = || {
            parts
                .next()
                .and_then(|part| part.parse::<u64>().ok())
                .ok_or_else(|| RpmReqsError::config(format!("invalid interpreter version '{s}'")))
        };
        let major = component()?;
        let minor = component()?;
        Ok(Self { major, minor })
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

pub const DEFAULT_PYTHON_ABI: &str = "python(abi)";
pub const DEFAULT_PYTHON_ARCH: &str = "{arch}";
pub const DEFAULT_PYTHON_PACKAGE: &str = "python%{{python3_version}}dist({name})";

/// The validated template set used by the translators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmTemplates {
    abi_token: String,
    python_arch: Template,
    python_package: Template,
    major: String,
    minor: String,
}

impl RpmTemplates {
    /// Validate the templates and pre-render the ABI token.
    ///
    /// Fails on placeholders a template may not use, and on `{major}` /
    /// `{minor}` when no interpreter version is configured.
    pub fn new(
        python_abi: &str,
        python_arch: &str,
        python_package: &str,
        interpreter: Option<InterpreterVersion>,
    ) -> Result<Self> {
        Self::from_templates(
            python_abi.parse()?,
            python_arch.parse()?,
            python_package.parse()?,
            interpreter,
        )
    }

    /// Same as [`RpmTemplates::new`] for templates that are already parsed
    pub fn from_templates(
        abi: Template,
        arch: Template,
        package: Template,
        interpreter: Option<InterpreterVersion>,
    ) -> Result<Self> {
        use Placeholder::*;

        abi.check_placeholders("python_abi", &[Major, Minor])?;
        arch.check_placeholders("python_arch", &[Arch, Major, Minor])?;
        package.check_placeholders("python_package", &[Name, Major, Minor])?;

        if interpreter.is_none() {
            for (template_name, template) in
                [("python_abi", &abi), ("python_arch", &arch), ("python_package", &package)]
            {
                if template.placeholders().any(|p| matches!(p, Major | Minor)) {
                    return Err(RpmReqsError::template(format!(
                        "{template_name} template '{template}' needs an interpreter version"
                    )));
                }
            }
        }

        let (major, minor) = interpreter
            .map(|v| (v.major.to_string(), v.minor.to_string()))
            .unwrap_or_default();

        let mut templates = Self {
            abi_token: String::new(),
            python_arch: arch,
            python_package: package,
            major,
            minor,
        };
        templates.abi_token = templates.render(&abi, "");
        Ok(templates)
    }

    fn render(&self, template: &Template, argument: &str) -> String {
        template.render_with(|p| match p {
            Placeholder::Major => self.major.as_str(),
            Placeholder::Minor => self.minor.as_str(),
            Placeholder::Arch | Placeholder::Name => argument,
        })
    }

    /// Package token standing for the interpreter ABI
    pub fn abi_token(&self) -> &str {
        &self.abi_token
    }

    /// Architecture token for `arch`
    pub fn arch_token(&self, arch: &str) -> String {
        self.render(&self.python_arch, arch)
    }

    /// RPM package name for the Python distribution `name`
    pub fn package_name(&self, name: &str) -> String {
        self.render(&self.python_package, name)
    }
}

impl Default for RpmTemplates {
    fn default() -> Self {
        Self {
            abi_token: DEFAULT_PYTHON_ABI.to_string(),
            python_arch: Template {
                source: DEFAULT_PYTHON_ARCH.to_string(),
                segments: vec![Segment::Placeholder(Placeholder::Arch)],
            },
            python_package: Template {
                source: DEFAULT_PYTHON_PACKAGE.to_string(),
                segments: vec![
                    Segment::Literal("python%{python3_version}dist(".to_string()),
                    Segment::Placeholder(Placeholder::Name),
                    Segment::Literal(")".to_string()),
                ],
            },
            major: String::new(),
            minor: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_escaped_braces() {
        let template: Template = "python%{{python3_version}}dist({name})".parse().unwrap();
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec![Placeholder::Name]);
        assert_eq!(
            template.render_with(|_| "numpy"),
            "python%{python3_version}dist(numpy)"
        );
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = "python{micro}".parse::<Template>().unwrap_err();
        assert!(err.to_string().contains("unknown placeholder {micro}"));
    }

    #[test]
    fn test_unbalanced_braces_rejected() {
        assert!("python{major".parse::<Template>().is_err());
        assert!("python}".parse::<Template>().is_err());
    }

    #[test]
    fn test_placeholder_not_allowed_for_template() {
        let err = RpmTemplates::new("python{arch}", "{arch}", "{name}", None).unwrap_err();
        assert!(matches!(err, RpmReqsError::Template(_)));
    }

    #[test]
    fn test_version_placeholders_need_interpreter() {
        assert!(RpmTemplates::new("python{major}{minor}", "{arch}", "{name}", None).is_err());

        let version: InterpreterVersion = "3.11.4".parse().unwrap();
        let templates =
            RpmTemplates::new("python{major}.{minor}dist", "{arch}", "python{major}-{name}", Some(version))
                .unwrap();
        assert_eq!(templates.abi_token(), "python3.11dist");
        assert_eq!(templates.package_name("requests"), "python3-requests");
    }

    #[test]
    fn test_arch_token() {
        let templates = RpmTemplates::new("python(abi)", "%{{_arch}}-{arch}", "{name}", None).unwrap();
        assert_eq!(templates.arch_token("aarch64"), "%{_arch}-aarch64");
    }

    #[test]
    fn test_default_matches_parsed_defaults() {
        let parsed =
            RpmTemplates::new(DEFAULT_PYTHON_ABI, DEFAULT_PYTHON_ARCH, DEFAULT_PYTHON_PACKAGE, None)
                .unwrap();
        assert_eq!(RpmTemplates::default(), parsed);
        assert_eq!(parsed.package_name("wheel"), "python%{python3_version}dist(wheel)");
    }

    #[test]
    fn test_interpreter_version_parse() {
        assert_eq!(
            "3.9".parse::<InterpreterVersion>().unwrap(),
            InterpreterVersion { major: 3, minor: 9 }
        );
        assert!("3".parse::<InterpreterVersion>().is_err());
        assert!("three.nine".parse::<InterpreterVersion>().is_err());
    }
}
