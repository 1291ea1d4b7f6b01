//! Unified error types for HVDC conversion
//!
//! This module provides a common error type [`HvdcError`] for every fatal
//! condition in the pipeline. Fatal errors are scoped to one candidate
//! configuration: the caller records them and continues with the next
//! configuration instead of aborting the whole batch.

use thiserror::Error;

/// Fatal conversion errors, each naming the offending equipment.
#[derive(Error, Debug)]
pub enum HvdcError {
    /// Converter/segment counts match none of the supported patterns
    #[error("unsupported HVDC configuration: {converters} converter pair(s), {segments} DC line segment(s)")]
    UnsupportedConfiguration { converters: usize, segments: usize },

    /// The two converters of one link decode to different HVDC types
    #[error("mismatched converter types for HVDC link: {converter1} vs {converter2}")]
    ConverterTypeMismatch {
        converter1: String,
        converter2: String,
    },

    /// A converter type tag is neither VsConverter nor CsConverter
    #[error("unexpected HVDC type '{tag}' on converter {converter}")]
    UnknownConverterType { converter: String, tag: String },

    /// Neither converter of a pair can be placed at a segment terminal node
    #[error("one of the converters {converter1}, {converter2} must be connected to DC node {node}")]
    ConverterNotAtNode {
        converter1: String,
        converter2: String,
        node: String,
    },

    /// Update pass referenced an HVDC line that is not in the network
    #[error("unknown HVDC line '{0}'")]
    UnknownHvdcLine(String),

    /// Update pass referenced a converter station that is not in the network
    #[error("unknown converter station '{0}'")]
    UnknownConverterStation(String),
}

/// Convenience type alias for Results using HvdcError.
pub type HvdcResult<T> = Result<T, HvdcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_counts() {
        let err = HvdcError::UnsupportedConfiguration {
            converters: 3,
            segments: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 converter pair(s)"));
        assert!(msg.contains("2 DC line segment(s)"));
    }

    #[test]
    fn test_error_display_names_equipment() {
        let err = HvdcError::ConverterTypeMismatch {
            converter1: "C1".into(),
            converter2: "C2".into(),
        };
        assert!(err.to_string().contains("C1"));
        assert!(err.to_string().contains("C2"));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> HvdcResult<()> {
            Err(HvdcError::UnknownHvdcLine("L1".into()))
        }

        fn outer() -> HvdcResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
