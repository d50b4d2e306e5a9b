#![deny(missing_docs)]
#![doc = "Shared error taxonomy, parameter values and configuration tables for swmb deck generation."]

pub mod config;
pub mod errors;
pub mod law;
pub mod numfmt;
mod serde;
pub mod value;

pub use config::{GeneratorConfig, LabelRule, LabelScheme, MetadataKeys, NameMatch, SimulatorConfig};
pub use errors::{ErrorInfo, SwmbError};
pub use law::{LawTable, ResolvedLaw, RheologyLaw};
pub use serde::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
pub use value::{ParamEntry, ParamValue, ParameterSet};
