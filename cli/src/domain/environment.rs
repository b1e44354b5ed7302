//! Deployment description the service descriptor is rendered from.
//!
//! Pure types and validators only: no I/O or async.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, LaunchError};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_RUN_MODES: &[&str] = &["prod", "staging", "devel"];

/// Environment variable the job receives its run mode through.
pub const RUN_MODE_VAR: &str = "RUN_MODE";

/// Environment variable the job receives its own label through.
pub const LABEL_VAR: &str = "LAUNCHD_LABEL";

/// Suffix of the installed descriptor's file name.
pub const DESCRIPTOR_EXTENSION: &str = ".plist";

/// Longest label whose `<label>.plist` still fits in a 255-byte file name.
pub const MAX_LABEL_LEN: usize = 255 - DESCRIPTOR_EXTENSION.len();

/// Reverse-DNS job label; doubles as the descriptor file stem, so no path
/// separators are allowed.
pub static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, checked by the tests below.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex")
});

/// POSIX environment variable name.
pub static ENV_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

// ── Run mode ─────────────────────────────────────────────────────────────────

/// Deployment flavour exported to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Prod,
    Staging,
    Devel,
}

impl RunMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Staging => "staging",
            Self::Devel => "devel",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(Self::Prod),
            "staging" => Ok(Self::Staging),
            "devel" => Ok(Self::Devel),
            other => Err(ConfigError::InvalidValue {
                key: "run_mode".to_string(),
                value: other.to_string(),
                valid: VALID_RUN_MODES.join(", "),
            }),
        }
    }
}

// ── Environment ──────────────────────────────────────────────────────────────

/// Everything needed to render a launchd job definition.
///
/// Owned by the caller and shared read-only with the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// launchd job label, e.g. `io.example.agent`.
    pub label: String,
    #[serde(default)]
    pub run_mode: RunMode,
    /// Absolute path of the executable launchd starts.
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Directory receiving `<label>.log`; stdout/stderr are not redirected when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Extra variables exported to the job, in addition to the run mode and label.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub keep_alive: bool,
    #[serde(default = "default_true")]
    pub run_at_load: bool,
}

fn default_true() -> bool {
    true
}

impl Environment {
    /// Minimal environment: label plus program, everything else defaulted.
    #[must_use]
    pub fn new(label: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            run_mode: RunMode::default(),
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            log_dir: None,
            env: BTreeMap::new(),
            keep_alive: true,
            run_at_load: true,
        }
    }

    /// File name of the installed descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if the label is not a valid file stem.
    pub fn descriptor_file_name(&self) -> Result<String, LaunchError> {
        validate_label(&self.label).map_err(LaunchError::DescriptorGeneration)?;
        Ok(format!("{}{DESCRIPTOR_EXTENSION}", self.label))
    }

    /// Log file path, when a log directory is configured.
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.log", self.label)))
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a job label.
///
/// # Errors
///
/// Returns a description of the problem if the label is empty, too long or
/// contains characters outside `[A-Za-z0-9._-]`.
pub fn validate_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("label is required".to_string());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!("label exceeds {MAX_LABEL_LEN} characters"));
    }
    if !LABEL_RE.is_match(label) || label.contains("..") {
        return Err(format!(
            "label '{label}' must match ^[A-Za-z0-9][A-Za-z0-9._-]*$"
        ));
    }
    Ok(())
}

/// Validates every field the descriptor depends on, collecting all violations.
///
/// # Errors
///
/// Returns `DescriptorGeneration` listing every violation if any check fails.
pub fn validate_environment(env: &Environment) -> Result<(), LaunchError> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = validate_label(&env.label) {
        errors.push(e);
    }
    if env.program.as_os_str().is_empty() {
        errors.push("program is required".to_string());
    } else {
        check_absolute("program", &env.program, &mut errors);
    }
    if let Some(dir) = &env.working_dir {
        check_absolute("working_dir", dir, &mut errors);
    }
    if let Some(dir) = &env.log_dir {
        check_absolute("log_dir", dir, &mut errors);
    }
    for (i, arg) in env.args.iter().enumerate() {
        check_xml_text(&format!("args[{i}]"), arg, &mut errors);
    }
    for (name, value) in &env.env {
        if !ENV_NAME_RE.is_match(name) {
            errors.push(format!("env name '{name}' is not a valid variable name"));
        } else if name == RUN_MODE_VAR || name == LABEL_VAR {
            errors.push(format!("env name '{name}' is reserved"));
        }
        check_xml_text(&format!("env value for '{name}'"), value, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LaunchError::DescriptorGeneration(errors.join("; ")))
    }
}

fn check_absolute(field: &str, path: &Path, errors: &mut Vec<String>) {
    if !path.is_absolute() {
        errors.push(format!("{field} '{}' must be an absolute path", path.display()));
    } else if let Some(text) = path.to_str() {
        check_xml_text(field, text, errors);
    } else {
        errors.push(format!("{field} '{}' is not valid UTF-8", path.display()));
    }
}

/// Characters XML 1.0 allows in text: tab, newline, carriage return, and
/// everything from U+0020 except the noncharacters U+FFFE and U+FFFF.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

fn check_xml_text(field: &str, text: &str, errors: &mut Vec<String>) {
    if let Some(c) = text.chars().find(|&c| !is_xml_char(c)) {
        errors.push(format!(
            "{field} contains U+{:04X}, which a property list cannot hold",
            u32::from(c)
        ));
    }
}
