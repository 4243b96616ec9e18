//! Tipos do modelo GasNet: registro de emissão, fenótipo e tabela de transferência

use serde::{Deserialize, Serialize};
use crate::error::{GasNetError, GasNetResult};

/// Número de entradas da tabela de parâmetros de transferência
pub const TRANSFER_TABLE_SIZE: usize = 13;

/// Tabela fixa de parâmetros de transferência (índices 1-based no modelo)
pub const TRANSFER_TABLE: [f64; TRANSFER_TABLE_SIZE] = [
    -4.0, -2.0, -1.0, -0.5, -0.25, -0.125, 0.0, 0.125, 0.25, 0.5, 1.0, 2.0, 4.0,
];

/// Consulta a tabela com índice 1-based
pub fn transfer_param(index: usize) -> GasNetResult<f64> {
    if !(1..=TRANSFER_TABLE_SIZE).contains(&index) {
        return Err(GasNetError::TransferIndexOutOfRange(index));
    }
    Ok(TRANSFER_TABLE[index - 1])
}

// ═══════════════════════════════════════════════════════════════════════════════
// EMISSÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Última transição liga/desliga da emissão de um nó
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// Nó está emitindo neste tick
    pub is_emitting: bool,
    /// Tick em que a emissão mais recente começou
    pub start: u64,
    /// Tick em que a emissão mais recente parou (None = nunca parou)
    pub stop: Option<u64>,
}

impl EmissionRecord {
    /// Nó que nunca emitiu
    pub fn dormant() -> Self {
        Self::default()
    }

    pub fn emitting_since(start: u64) -> Self {
        Self {
            is_emitting: true,
            start,
            stop: None,
        }
    }

    pub fn stopped(start: u64, stop: u64) -> Self {
        Self {
            is_emitting: false,
            start,
            stop: Some(stop),
        }
    }

    /// Converte a tripla crua do simulador.
    ///
    /// `(false, 0, 0)` é a sentinela de "nunca emitiu". Com `is_emitting`
    /// verdadeiro um `stop` zero também significa que nenhum episódio
    /// anterior terminou.
    pub fn from_triple(is_emitting: bool, start: u64, stop: u64) -> Self {
        let stop = if start == 0 && stop == 0 { None } else { Some(stop) };
        Self {
            is_emitting,
            start,
            stop,
        }
    }

    /// Emitiu ao menos uma vez (ou está emitindo agora)
    pub fn has_emitted(&self) -> bool {
        self.is_emitting || self.stop.is_some()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FENÓTIPO
// ═══════════════════════════════════════════════════════════════════════════════

/// Canal de gás em que o nó emite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GasChannel {
    /// Tipo 0: acumula em gas1, puxa o índice para cima
    #[default]
    Primary,
    /// Tipo 1: acumula em gas2, puxa o índice para baixo
    Secondary,
}

impl GasChannel {
    /// Decodifica a flag binária do genoma
    pub fn from_flag(flag: f64) -> GasNetResult<Self> {
        if flag == 0.0 {
            Ok(GasChannel::Primary)
        } else if flag == 1.0 {
            Ok(GasChannel::Secondary)
        } else {
            Err(GasNetError::MalformedPhenotype(format!(
                "gas type flag must be 0 or 1, got {flag}"
            )))
        }
    }
}

/// Campos do fenótipo de um nó que o núcleo de gás consome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePhenotype {
    /// Nó tem capacidade de emitir gás
    pub emits_gas: bool,
    /// Canal em que emite
    pub gas_channel: GasChannel,
    /// Taxa de decaimento `s` (> 0)
    pub decay_rate: f64,
    /// Raio máximo de influência (> 0)
    pub gas_radius: f64,
    /// Índice atual na tabela de transferência, em [1, 13]
    pub transfer_index: usize,
}

/// Posições 1-based dos campos no vetor de genes do simulador
mod gene_layout {
    pub const EMITS_GAS: usize = 10;
    pub const GAS_TYPE: usize = 11;
    pub const DECAY_RATE: usize = 12;
    pub const GAS_RADIUS: usize = 13;
    pub const TRANSFER_INDEX: usize = 14;
}

impl NodePhenotype {
    /// Nó emissor no canal dado
    pub fn emitter(gas_channel: GasChannel, decay_rate: f64, gas_radius: f64, transfer_index: usize) -> Self {
        Self {
            emits_gas: true,
            gas_channel,
            decay_rate,
            gas_radius,
            transfer_index,
        }
    }

    /// Nó sem capacidade de emissão
    pub fn silent(transfer_index: usize) -> Self {
        Self {
            emits_gas: false,
            gas_channel: GasChannel::Primary,
            decay_rate: 1.0,
            gas_radius: 1.0,
            transfer_index,
        }
    }

    /// Decodifica a partir do vetor de genes plano do simulador
    pub fn from_genes(genes: &[f64]) -> GasNetResult<Self> {
        use gene_layout::*;

        if genes.len() < TRANSFER_INDEX {
            return Err(GasNetError::MalformedPhenotype(format!(
                "expected at least {} genes, got {}",
                TRANSFER_INDEX,
                genes.len()
            )));
        }
        let gene = |pos: usize| genes[pos - 1];

        let emits_gas = match gene(EMITS_GAS) {
            f if f == 0.0 => false,
            f if f == 1.0 => true,
            f => {
                return Err(GasNetError::MalformedPhenotype(format!(
                    "gas emission flag must be 0 or 1, got {f}"
                )));
            }
        };

        let raw_index = gene(TRANSFER_INDEX);
        if raw_index.fract() != 0.0 || raw_index < 1.0 || raw_index > TRANSFER_TABLE_SIZE as f64 {
            return Err(GasNetError::MalformedPhenotype(format!(
                "transfer index must be an integer in [1, {TRANSFER_TABLE_SIZE}], got {raw_index}"
            )));
        }

        Ok(Self {
            emits_gas,
            gas_channel: GasChannel::from_flag(gene(GAS_TYPE))?,
            decay_rate: gene(DECAY_RATE),
            gas_radius: gene(GAS_RADIUS),
            transfer_index: raw_index as usize,
        })
    }

    /// Verifica as pré-condições do fenótipo
    pub fn validate(&self) -> GasNetResult<()> {
        self.validate_transfer_index()?;
        check_decay_rate(self.decay_rate)?;
        check_gas_radius(self.gas_radius)?;
        Ok(())
    }

    pub(crate) fn validate_transfer_index(&self) -> GasNetResult<()> {
        if (1..=TRANSFER_TABLE_SIZE).contains(&self.transfer_index) {
            Ok(())
        } else {
            Err(GasNetError::TransferIndexOutOfRange(self.transfer_index))
        }
    }
}

pub(crate) fn check_decay_rate(s: f64) -> GasNetResult<f64> {
    GasNetError::ensure_finite("decay rate", s)?;
    if s <= 0.0 {
        return Err(GasNetError::NonPositiveDecayRate(s));
    }
    Ok(s)
}

pub(crate) fn check_gas_radius(radius: f64) -> GasNetResult<f64> {
    GasNetError::ensure_finite("gas radius", radius)?;
    if radius <= 0.0 {
        return Err(GasNetError::NonPositiveGasRadius(radius));
    }
    Ok(radius)
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESULTADO
// ═══════════════════════════════════════════════════════════════════════════════

/// Resultado da modulação de um nó receptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modulation {
    /// Parâmetro escolhido na tabela
    pub transfer_param: f64,
    /// Slot 1-based escolhido
    pub transfer_index: usize,
    /// Concentração total do canal primário
    pub gas1: f64,
    /// Concentração total do canal secundário
    pub gas2: f64,
}

impl Modulation {
    /// `(transfer_param, gas1, gas2)`
    pub fn as_triple(&self) -> (f64, f64, f64) {
        (self.transfer_param, self.gas1, self.gas2)
    }
}
