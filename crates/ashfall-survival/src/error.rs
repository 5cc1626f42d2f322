//! Error types for the ashfall-survival crate.
//!
//! Errors only arise while building the engine from configuration. Once an
//! engine exists, game logic communicates failure through `bool` and
//! `Option` returns.

use ashfall_types::Attribute;

use crate::range::RangeParseError;

/// Errors that can occur when constructing a [`DecayEngine`].
///
/// [`DecayEngine`]: crate::engine::DecayEngine
#[derive(Debug, thiserror::Error)]
pub enum SurvivalError {
    /// A range string in an effect table could not be parsed.
    #[error("invalid range {range:?} in {attribute} effect table (entry {id}): {source}")]
    InvalidRange {
        /// The attribute whose table holds the bad entry.
        attribute: Attribute,
        /// Identifier of the bad entry.
        id: u32,
        /// The range string as configured.
        range: String,
        /// What was wrong with it.
        source: RangeParseError,
    },

    /// A survival configuration value is out of its valid domain.
    #[error("invalid survival configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
