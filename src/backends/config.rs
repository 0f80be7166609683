use crate::core::types::ResolvedOperation;
use crate::error::{Result, UvstartError};
use serde::Serialize;
use std::fmt;

/// Generic operations every backend knows how to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Add,
    AddDev,
    Remove,
    Sync,
    SyncDev,
    Run,
    List,
    Version,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Add,
        Operation::AddDev,
        Operation::Remove,
        Operation::Sync,
        Operation::SyncDev,
        Operation::Run,
        Operation::List,
        Operation::Version,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::AddDev => "add-dev",
            Self::Remove => "remove",
            Self::Sync => "sync",
            Self::SyncDev => "sync-dev",
            Self::Run => "run",
            Self::List => "list",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a template does with caller-supplied arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgPolicy {
    /// Caller arguments go after the prefix, token for token
    AppendTrailing,
    /// The command is complete as declared
    NoArgs,
}

/// Literal prefix tokens (program first) plus an argument policy.
///
/// Rendering never goes through a shell: every token stays a discrete
/// argv entry, so whitespace or metacharacters in a package name are
/// passed through literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandTemplate {
    prefix: Vec<String>,
    policy: ArgPolicy,
}

impl CommandTemplate {
    pub fn new(prefix: &[&str], policy: ArgPolicy) -> Self {
        Self {
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            policy,
        }
    }

    /// Template whose caller arguments are appended at the end
    pub fn trailing(prefix: &[&str]) -> Self {
        Self::new(prefix, ArgPolicy::AppendTrailing)
    }

    /// Template that runs as declared
    pub fn fixed(prefix: &[&str]) -> Self {
        Self::new(prefix, ArgPolicy::NoArgs)
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    pub fn policy(&self) -> ArgPolicy {
        self.policy
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// The program this template invokes.
    pub fn program(&self) -> Option<&str> {
        self.prefix.first().map(String::as_str)
    }

    /// Build the concrete invocation: prefix followed by `args`.
    pub fn render(&self, backend: &str, operation: Operation, args: &[String]) -> Result<ResolvedOperation> {
        let Some((program, fixed_args)) = self.prefix.split_first() else {
            return Err(UvstartError::ConfigError(format!(
                "Backend '{}' has an empty '{}' template",
                backend, operation
            )));
        };

        if self.policy == ArgPolicy::NoArgs && !args.is_empty() {
            return Err(UvstartError::TemplateArity {
                backend: backend.to_string(),
                operation: operation.to_string(),
            });
        }

        let mut argv: Vec<String> = fixed_args.to_vec();
        argv.extend(args.iter().cloned());

        Ok(ResolvedOperation::new(program.clone(), argv))
    }
}

/// One template per generic operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandTemplates {
    pub add: CommandTemplate,
    pub add_dev: CommandTemplate,
    pub remove: CommandTemplate,
    pub sync: CommandTemplate,
    pub sync_dev: CommandTemplate,
    pub run: CommandTemplate,
    pub list: CommandTemplate,
    pub version: CommandTemplate,
}

impl CommandTemplates {
    pub fn get(&self, operation: Operation) -> &CommandTemplate {
        match operation {
            Operation::Add => &self.add,
            Operation::AddDev => &self.add_dev,
            Operation::Remove => &self.remove,
            Operation::Sync => &self.sync,
            Operation::SyncDev => &self.sync_dev,
            Operation::Run => &self.run,
            Operation::List => &self.list,
            Operation::Version => &self.version,
        }
    }
}

/// Static description of one package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendDescriptor {
    /// Backend identifier (e.g., "uv", "poetry")
    pub id: String,

    /// Files in the project root that prove this backend is in use.
    /// Checked in order; any hit wins.
    pub detection_files: Vec<String>,

    /// Substrings of pyproject.toml that suggest this backend
    pub detection_patterns: Vec<String>,

    /// How to install the tool itself. Shown to the user, never executed.
    pub install_hint: String,

    pub templates: CommandTemplates,

    /// Generated artifacts removed by `clean`, relative to the project root
    pub cleanup_paths: Vec<String>,
}

impl BackendDescriptor {
    pub fn template(&self, operation: Operation) -> &CommandTemplate {
        self.templates.get(operation)
    }

    /// Program name used by the version template, which is the bare tool.
    pub fn program(&self) -> &str {
        self.templates
            .version
            .program()
            .unwrap_or(self.id.as_str())
    }

    /// Whether the backend's program can be found on PATH.
    pub fn is_installed(&self) -> bool {
        which::which(self.program()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_template_appends_arguments_verbatim() {
        let template = CommandTemplate::trailing(&["uv", "add"]);
        let op = template
            .render("uv", Operation::Add, &["my pkg; rm -rf /".to_string()])
            .unwrap();
        assert_eq!(op.program(), "uv");
        assert_eq!(op.args(), ["add", "my pkg; rm -rf /"]);
    }

    #[test]
    fn fixed_template_rejects_arguments() {
        let template = CommandTemplate::fixed(&["uv", "--version"]);
        let err = template
            .render("uv", Operation::Version, &["extra".to_string()])
            .unwrap_err();
        assert!(matches!(err, UvstartError::TemplateArity { .. }));
    }

    #[test]
    fn fixed_template_renders_without_arguments() {
        let template = CommandTemplate::fixed(&["uv", "pip", "list"]);
        let op = template.render("uv", Operation::List, &[]).unwrap();
        assert_eq!(op.argv(), vec!["uv", "pip", "list"]);
    }

    #[test]
    fn empty_template_is_a_config_error() {
        let template = CommandTemplate::trailing(&[]);
        let err = template.render("broken", Operation::Add, &[]).unwrap_err();
        assert!(matches!(err, UvstartError::ConfigError(_)));
    }

    #[test]
    fn operation_names_are_kebab_case() {
        assert_eq!(Operation::AddDev.to_string(), "add-dev");
        assert_eq!(Operation::SyncDev.as_str(), "sync-dev");
    }
}
