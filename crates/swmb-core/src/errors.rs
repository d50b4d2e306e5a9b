//! Structured error types shared across swmb crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SwmbError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, keys, parameter names).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the file involved in the failure under the `path` key.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for deck generation.
///
/// Every failure is fatal: callers propagate it and abort the generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SwmbError {
    /// Raster header lacks a required key (origin pair, size or cell size).
    #[error("missing header key: {0}")]
    MissingHeaderKey(ErrorInfo),
    /// Raster header or body holds non-numeric content.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Declared and observed grid dimensions disagree.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(ErrorInfo),
    /// The metadata sidecar file does not exist.
    #[error("missing metadata file: {0}")]
    MissingMetadataFile(ErrorInfo),
    /// A retained metadata line does not hold exactly two tokens.
    #[error("malformed metadata line: {0}")]
    MalformedMetadataLine(ErrorInfo),
    /// Sequence-valued parameters disagree on their length.
    #[error("mismatched sweep lengths: {0}")]
    MismatchedSweepLengths(ErrorInfo),
    /// The requested rheology law is not in the law table.
    #[error("unknown rheology law: {0}")]
    UnknownRheologyLaw(ErrorInfo),
    /// The sweep would produce no runs.
    #[error("empty sweep: {0}")]
    EmptySweep(ErrorInfo),
    /// A labelled parameter holds a value that cannot be rendered as a number.
    #[error("invalid label value: {0}")]
    InvalidLabelValue(ErrorInfo),
    /// The sweep plan is structurally inconsistent.
    #[error("invalid plan: {0}")]
    InvalidPlan(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SwmbError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SwmbError::MissingHeaderKey(info)
            | SwmbError::Parse(info)
            | SwmbError::ShapeMismatch(info)
            | SwmbError::MissingMetadataFile(info)
            | SwmbError::MalformedMetadataLine(info)
            | SwmbError::MismatchedSweepLengths(info)
            | SwmbError::UnknownRheologyLaw(info)
            | SwmbError::EmptySweep(info)
            | SwmbError::InvalidLabelValue(info)
            | SwmbError::InvalidPlan(info)
            | SwmbError::Io(info)
            | SwmbError::Serde(info) => info,
        }
    }

    /// Adds a context entry to the payload of any variant.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let info = match &mut self {
            SwmbError::MissingHeaderKey(info)
            | SwmbError::Parse(info)
            | SwmbError::ShapeMismatch(info)
            | SwmbError::MissingMetadataFile(info)
            | SwmbError::MalformedMetadataLine(info)
            | SwmbError::MismatchedSweepLengths(info)
            | SwmbError::UnknownRheologyLaw(info)
            | SwmbError::EmptySweep(info)
            | SwmbError::InvalidLabelValue(info)
            | SwmbError::InvalidPlan(info)
            | SwmbError::Io(info)
            | SwmbError::Serde(info) => info,
        };
        info.context.insert(key.into(), value.into());
        self
    }

    /// Wraps an I/O failure on `path` under the provided code.
    pub fn io(code: &str, path: &Path, err: std::io::Error) -> Self {
        SwmbError::Io(ErrorInfo::new(code, err.to_string()).with_path(path))
    }
}
