use std::fmt;

/// Where the backend for an operation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HintSource {
    Flag,
    ProjectConfig,
    DefaultSetting,
    /// No hint; the core detects on its own
    Detection,
}

impl fmt::Display for HintSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "--backend"),
            Self::ProjectConfig => write!(f, "project config"),
            Self::DefaultSetting => write!(f, "default_backend setting"),
            Self::Detection => write!(f, "detection"),
        }
    }
}

/// Precedence: `--backend` flag, then the project config pin, then
/// detection. The settings default only applies when detection found
/// nothing, so a detected project is never overridden by it.
pub(super) fn choose_hint(
    flag: Option<&str>,
    pinned: Option<&str>,
    default: Option<&str>,
    detected: bool,
) -> (Option<String>, HintSource) {
    fn non_empty(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(flag) = non_empty(flag) {
        return (Some(flag.to_string()), HintSource::Flag);
    }
    if let Some(pinned) = non_empty(pinned) {
        return (Some(pinned.to_string()), HintSource::ProjectConfig);
    }
    if !detected && let Some(default) = non_empty(default) {
        return (Some(default.to_string()), HintSource::DefaultSetting);
    }

    (None, HintSource::Detection)
}
