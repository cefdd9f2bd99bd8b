//! Errors raised while building diagrams and comparing them

use thiserror::Error;

/// Result type alias for bottleneck computations.
pub type Result<T> = std::result::Result<T, BottleneckError>;

/// Errors that can occur when constructing or comparing persistence diagrams.
#[derive(Error, Debug)]
pub enum BottleneckError {
    /// The augmented bipartite graph admits no perfect matching, even when every
    /// edge is allowed.
    ///
    /// The diagonal-to-diagonal edges guarantee a perfect matching at the largest
    /// candidate weight, so this signals a defect in graph construction or in the
    /// max-flow solver rather than a property of the input.
    #[error("no perfect matching exists at the maximum candidate weight {threshold}")]
    NoPerfectMatching {
        /// Largest candidate weight that was tried
        threshold: f64,
    },

    /// An interval whose endpoints do not describe a lifespan `[birth, death)`
    #[error("invalid interval [{birth}, {death}): birth must be finite and no greater than death")]
    InvalidInterval {
        /// Left endpoint
        birth: f64,
        /// Right endpoint
        death: f64,
    },

    /// A truncation window that is empty or not finite
    #[error("invalid truncation window [{lower}, {upper}]")]
    InvalidWindow {
        /// Lower bound of the window
        lower: f64,
        /// Upper bound of the window
        upper: f64,
    },

    /// Malformed JSON for a diagram or a set of options
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_interval() {
        let err = BottleneckError::InvalidInterval { birth: 2.0, death: 1.0 };
        assert!(err.to_string().contains("[2, 1)"));
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<Vec<f64>>("[1, 2").unwrap_err();
        let err: BottleneckError = parse.into();
        assert!(matches!(err, BottleneckError::Json(_)));
    }
}
