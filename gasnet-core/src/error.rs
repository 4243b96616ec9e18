//! Erros de contrato do núcleo GasNet
//!
//! Todas as falhas aqui são violações de pré-condição: nenhuma é transitória
//! e nenhuma é recuperável com nova tentativa. O chamador decide se aborta o
//! tick ou a execução inteira.

use thiserror::Error;

pub type GasNetResult<T> = Result<T, GasNetError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GasNetError {
    #[error("Decay rate must be positive, got {0}")]
    NonPositiveDecayRate(f64),

    #[error("Gas radius must be positive, got {0}")]
    NonPositiveGasRadius(f64),

    #[error("Diffusion scale global_c must be positive, got {0}")]
    NonPositiveDiffusionScale(f64),

    #[error("Distance must be non-negative, got {0}")]
    NegativeDistance(f64),

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Node {node} out of range for network of {len} nodes")]
    NodeOutOfRange { node: usize, len: usize },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Transfer index {0} outside table range [1, 13]")]
    TransferIndexOutOfRange(usize),

    #[error("Malformed phenotype: {0}")]
    MalformedPhenotype(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid network snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GasNetError {
    /// Rejeita valores não finitos antes que contaminem a tabela
    pub(crate) fn ensure_finite(what: &'static str, value: f64) -> GasNetResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GasNetError::NonFinite { what, value })
        }
    }
}

impl From<serde_json::Error> for GasNetError {
    fn from(err: serde_json::Error) -> Self {
        GasNetError::InvalidSnapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GasNetError::NonPositiveDecayRate(0.0);
        assert_eq!(err.to_string(), "Decay rate must be positive, got 0");
    }

    #[test]
    fn test_non_finite_display() {
        let err = GasNetError::NonFinite {
            what: "distance",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "distance must be finite, got inf");
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(GasNetError::ensure_finite("x", 1.5), Ok(1.5));
        assert!(matches!(
            GasNetError::ensure_finite("x", f64::NAN),
            Err(GasNetError::NonFinite { what: "x", .. })
        ));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: GasNetError = json_err.into();
        assert!(matches!(err, GasNetError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_all_error_variants() {
        let errors = vec![
            GasNetError::NonPositiveDecayRate(-1.0),
            GasNetError::NonPositiveGasRadius(0.0),
            GasNetError::NonPositiveDiffusionScale(0.0),
            GasNetError::NegativeDistance(-2.0),
            GasNetError::NonFinite { what: "t", value: f64::NAN },
            GasNetError::NodeOutOfRange { node: 3, len: 2 },
            GasNetError::LengthMismatch { what: "emissions", expected: 3, found: 2 },
            GasNetError::TransferIndexOutOfRange(14),
            GasNetError::MalformedPhenotype("test".into()),
            GasNetError::InvalidConfig("test".into()),
            GasNetError::InvalidSnapshot("test".into()),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
