use thiserror::Error;

/// Everything that can go wrong while loading data, training or saving a model.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("data file not found: {path}")]
    MissingDataFile { path: String },

    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    #[error("label {label} at index {index} is outside [0, {n_classes})")]
    InvalidLabel { index: usize, label: u8, n_classes: usize },

    #[error("shape mismatch for {what}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("length mismatch for {what}: expected {expected} values, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = NetError::InvalidLabel { index: 3, label: 12, n_classes: 10 };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("index 3"));

        let err = NetError::MissingDataFile { path: "train.gz".into() };
        assert!(err.to_string().contains("train.gz"));

        let err = NetError::ShapeMismatch { what: "W1", expected: (784, 128), got: (784, 64) };
        assert!(err.to_string().contains("W1"));

        let err = NetError::LengthMismatch { what: "B2", expected: 10, got: 9 };
        assert_eq!(err.to_string(), "length mismatch for B2: expected 10 values, got 9");
    }
}
