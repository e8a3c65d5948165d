//! Debug tooling
//!
//! The parameter panel exposes fields of shared materials, lights and fog to
//! an external tweaking UI.

pub mod panel;

pub use panel::{ParamInfo, ParamRange, ParamValue, ParameterPanel};

use thiserror::Error;

/// Parameter panel errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// No entry has this label
    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    /// The value does not fit the entry
    #[error("Invalid value {value} for parameter '{label}'")]
    InvalidValue {
        /// Entry label
        label: String,
        /// Rejected value
        value: ParamValue,
    },
}
