//! Difusão de gás a partir de um nó fonte (eq. 2-4)
//!
//! A concentração decai exponencialmente com a distância e é escalada por um
//! fator de acúmulo em [0, 1] que sobe enquanto o nó emite e desce depois que
//! ele para. Além do raio do gás a contribuição é exatamente zero.

use serde::{Deserialize, Serialize};
use crate::config::check_global_c;
use crate::error::{GasNetError, GasNetResult};
use crate::types::{check_decay_rate, check_gas_radius, EmissionRecord};

/// Eq. 4: `0` se `x <= 0`, `1` se `x > 1`, senão `x`
#[inline]
pub fn saturate(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// Fator de acúmulo do gás de um nó no tick `t`.
///
/// Emitindo: rampa linear desde o início, saturando após `s` ticks.
/// Parado: nível de pico do último episódio menos a rampa de decaimento desde
/// a parada, com piso em zero. Um nó que nunca emitiu contribui zero.
///
/// `decay_rate` já deve ter sido validado.
pub fn build_up(emission: &EmissionRecord, decay_rate: f64, t: u64) -> f64 {
    let ramp = |from: u64, to: u64| (to as f64 - from as f64) / decay_rate;

    if !emission.has_emitted() {
        return 0.0;
    }
    if emission.is_emitting {
        return saturate(ramp(emission.start, t));
    }

    let Some(stop) = emission.stop else {
        return 0.0;
    };
    saturate(saturate(ramp(emission.start, stop)) - saturate(ramp(stop, t)))
}

/// Argumentos de uma chamada de difusão
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusionInput {
    /// Estado de emissão do nó fonte
    pub emission: EmissionRecord,
    /// Taxa de decaimento `s` do nó fonte (> 0)
    pub decay_rate: f64,
    /// Tick atual
    pub t: u64,
    /// Escala de difusão (> 0)
    pub global_c: f64,
    /// Distância do nó fonte ao ponto observado (>= 0)
    pub distance: f64,
    /// Raio do gás do nó fonte (> 0)
    pub gas_radius: f64,
}

impl DiffusionInput {
    /// Valida todas as pré-condições
    pub fn validate(&self) -> GasNetResult<()> {
        self.check_reach()?;
        self.check_source()
    }

    /// Raio e distância: bastam para decidir o corte espacial
    fn check_reach(&self) -> GasNetResult<()> {
        check_gas_radius(self.gas_radius)?;
        GasNetError::ensure_finite("distance", self.distance)?;
        if self.distance < 0.0 {
            return Err(GasNetError::NegativeDistance(self.distance));
        }
        Ok(())
    }

    fn check_source(&self) -> GasNetResult<()> {
        check_decay_rate(self.decay_rate)?;
        check_global_c(self.global_c)?;
        Ok(())
    }
}

/// Concentração de gás contribuída por um nó fonte.
///
/// `global_c * exp(-2 * distance / gas_radius) * build_up`, ou `0` quando
/// `distance > gas_radius`. Fora do raio nada além do raio e da distância é
/// avaliado.
pub fn diffusion(input: &DiffusionInput) -> GasNetResult<f64> {
    let result = concentration(input);
    if let Err(e) = &result {
        tracing::warn!(error = %e, "diffusion contract violation");
    }
    result
}

fn concentration(input: &DiffusionInput) -> GasNetResult<f64> {
    input.check_reach()?;
    if input.distance > input.gas_radius {
        return Ok(0.0);
    }
    input.check_source()?;

    let falloff = (-2.0 * input.distance / input.gas_radius).exp();
    Ok(input.global_c * falloff * build_up(&input.emission, input.decay_rate, input.t))
}
