//! Constantes globais de uma execução e carga a partir de `.env`
//!
//! `global_c` (escala de difusão) e `global_k` (ganho de modulação) são
//! fixos durante uma execução. Podem vir do chamador ou do ambiente.

use std::env;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use crate::error::{GasNetError, GasNetResult};

// Automatically load .env when config module is accessed
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Lê uma variável numérica: ausente usa `default`, ilegível é erro
fn parse_var(name: &str, raw: Option<String>, default: f64) -> GasNetResult<f64> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            GasNetError::InvalidConfig(format!("{name}={value:?} is not a number"))
        }),
    }
}

fn env_f64(name: &str, default: f64) -> GasNetResult<f64> {
    ensure_loaded();
    parse_var(name, env::var(name).ok(), default)
}

/// Escala de difusão do ambiente
/// Default: 1.0
pub fn global_c() -> GasNetResult<f64> {
    env_f64("GASNET_GLOBAL_C", 1.0)
}

/// Ganho de modulação do ambiente
/// Default: 1.0
pub fn global_k() -> GasNetResult<f64> {
    env_f64("GASNET_GLOBAL_K", 1.0)
}

/// Constantes de uma execução
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasConstants {
    /// Escala de difusão (> 0)
    pub global_c: f64,
    /// Ganho de modulação
    pub global_k: f64,
}

impl GasConstants {
    pub fn new(global_c: f64, global_k: f64) -> GasNetResult<Self> {
        let constants = Self { global_c, global_k };
        constants.validate()?;
        Ok(constants)
    }

    /// Constrói a partir de `GASNET_GLOBAL_C` / `GASNET_GLOBAL_K`
    pub fn from_env() -> GasNetResult<Self> {
        Self::new(global_c()?, global_k()?).map_err(|e| {
            GasNetError::InvalidConfig(format!("environment constants rejected: {e}"))
        })
    }

    pub fn validate(&self) -> GasNetResult<()> {
        check_global_c(self.global_c)?;
        GasNetError::ensure_finite("global_k", self.global_k)?;
        Ok(())
    }
}

impl Default for GasConstants {
    fn default() -> Self {
        Self {
            global_c: 1.0,
            global_k: 1.0,
        }
    }
}

pub(crate) fn check_global_c(c: f64) -> GasNetResult<f64> {
    GasNetError::ensure_finite("global_c", c)?;
    if c <= 0.0 {
        return Err(GasNetError::NonPositiveDiffusionScale(c));
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_default() {
        let c = GasConstants::default();
        assert_eq!(c.global_c, 1.0);
        assert_eq!(c.global_k, 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_constants_reject_zero_c() {
        assert_eq!(
            GasConstants::new(0.0, 1.0),
            Err(GasNetError::NonPositiveDiffusionScale(0.0))
        );
    }

    #[test]
    fn test_constants_reject_non_finite_k() {
        assert!(matches!(
            GasConstants::new(1.0, f64::NAN),
            Err(GasNetError::NonFinite { what: "global_k", .. })
        ));
    }

    #[test]
    fn test_parse_var_unset_uses_default() {
        assert_eq!(parse_var("GASNET_GLOBAL_C", None, 1.0), Ok(1.0));
    }

    #[test]
    fn test_parse_var_valid() {
        assert_eq!(parse_var("GASNET_GLOBAL_C", Some("2.5".into()), 1.0), Ok(2.5));
        assert_eq!(parse_var("GASNET_GLOBAL_K", Some(" -0.5 ".into()), 1.0), Ok(-0.5));
    }

    #[test]
    fn test_parse_var_malformed_is_error() {
        let result = parse_var("GASNET_GLOBAL_C", Some("abc".into()), 1.0);
        match result {
            Err(GasNetError::InvalidConfig(msg)) => assert!(msg.contains("GASNET_GLOBAL_C")),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
        assert!(parse_var("GASNET_GLOBAL_K", Some(String::new()), 1.0).is_err());
    }

    #[test]
    fn test_unset_variable_reads_default() {
        assert_eq!(env_f64("GASNET_TEST_NEVER_SET_VARIABLE", 3.0), Ok(3.0));
    }

    #[test]
    fn test_constants_allow_negative_k() {
        assert!(GasConstants::new(2.0, -0.5).is_ok());
    }
}
