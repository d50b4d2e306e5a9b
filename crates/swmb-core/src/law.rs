//! Rheology laws and their simulator codes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SwmbError};

/// Constitutive laws understood by the simulator out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RheologyLaw {
    /// Dry Coulomb friction.
    #[serde(rename = "coulomb")]
    Coulomb,
    /// Coulomb friction plus turbulent drag.
    #[serde(rename = "voellmy")]
    Voellmy,
    /// Bingham viscoplastic fluid.
    #[serde(rename = "bingham")]
    Bingham,
    /// Granular mu(I) rheology.
    #[serde(rename = "muI")]
    MuI,
}

impl RheologyLaw {
    /// All built-in laws.
    pub const ALL: [RheologyLaw; 4] = [
        RheologyLaw::Coulomb,
        RheologyLaw::Voellmy,
        RheologyLaw::Bingham,
        RheologyLaw::MuI,
    ];

    /// Name used for the law subdirectory and in plans.
    pub fn name(self) -> &'static str {
        match self {
            RheologyLaw::Coulomb => "coulomb",
            RheologyLaw::Voellmy => "voellmy",
            RheologyLaw::Bingham => "bingham",
            RheologyLaw::MuI => "muI",
        }
    }

    /// Integer selector the simulator expects in `icomp`.
    pub fn code(self) -> i64 {
        match self {
            RheologyLaw::Coulomb => 1,
            RheologyLaw::Voellmy => 8,
            RheologyLaw::Bingham => 6,
            RheologyLaw::MuI => 7,
        }
    }
}

impl fmt::Display for RheologyLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RheologyLaw {
    type Err = SwmbError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RheologyLaw::ALL
            .into_iter()
            .find(|law| law.name() == name)
            .ok_or_else(|| unknown_law(name, RheologyLaw::ALL.iter().map(|law| law.name())))
    }
}

/// A law resolved through a [`LawTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLaw {
    /// Law name, also the output subdirectory.
    pub name: String,
    /// Simulator selector written as `icomp`.
    pub code: i64,
}

/// Law name to simulator code table.
///
/// Defaults to the built-in laws; plans may add entries for simulator builds
/// that expose further laws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LawTable {
    codes: BTreeMap<String, i64>,
}

impl Default for LawTable {
    fn default() -> Self {
        Self {
            codes: RheologyLaw::ALL
                .into_iter()
                .map(|law| (law.name().to_string(), law.code()))
                .collect(),
        }
    }
}

impl LawTable {
    /// Adds or overrides a law code.
    pub fn with_law(mut self, name: impl Into<String>, code: i64) -> Self {
        self.codes.insert(name.into(), code);
        self
    }

    /// Looks up a law by name.
    pub fn resolve(&self, name: &str) -> Result<ResolvedLaw, SwmbError> {
        self.codes
            .get(name)
            .map(|code| ResolvedLaw {
                name: name.to_string(),
                code: *code,
            })
            .ok_or_else(|| unknown_law(name, self.codes.keys().map(String::as_str)))
    }
}

fn unknown_law<'a>(name: &str, known: impl Iterator<Item = &'a str>) -> SwmbError {
    let known: Vec<&str> = known.collect();
    SwmbError::UnknownRheologyLaw(
        ErrorInfo::new("swmb_core.unknown_law", format!("rheology law '{name}' is not defined"))
            .with_context("law", name)
            .with_hint(format!("expected one of: {}", known.join(", "))),
    )
}
