//! Modulação da função de transferência pelos gases (eq. 5-7)
//!
//! Soma as contribuições de difusão de todos os outros nós emissores em dois
//! canais e converte o sinal combinado em um slot discreto da tabela de
//! parâmetros de transferência.
//!
//! ## Fluxo
//!
//! ```text
//!  nós b != a, emissores ──► diffusion ──┬─► gas1 (canal primário)
//!                                        └─► gas2 (canal secundário)
//!
//!  raw = i + (gas1/c·k)·(13 - i) - (gas2/c·k)·i
//!  slot = f(raw, 13) ──► TRANSFER_TABLE[slot]
//! ```

use crate::config::GasConstants;
use crate::diffusion::{diffusion, DiffusionInput};
use crate::error::{GasNetError, GasNetResult};
use crate::types::{
    transfer_param, EmissionRecord, GasChannel, Modulation, NodePhenotype, TRANSFER_TABLE_SIZE,
};

/// Eq. 7 (alterada): `1` se `raw <= 0`, `n` se `raw >= n`, senão `ceil(raw)`.
///
/// Retorna um índice 1-based, sempre em `[1, max(n, 1)]`. `NaN` cai no
/// primeiro slot.
pub fn transfer_index(raw: f64, n: usize) -> usize {
    let n = n.max(1);
    if raw.is_nan() || raw <= 0.0 {
        1
    } else if raw >= n as f64 {
        n
    } else {
        raw.ceil() as usize
    }
}

/// Modulação do nó `node` usando a difusão padrão
pub fn modulate(
    node: usize,
    phenotypes: &[NodePhenotype],
    emissions: &[EmissionRecord],
    distances_from_node: &[f64],
    t: u64,
    constants: &GasConstants,
) -> GasNetResult<Modulation> {
    modulate_with(node, phenotypes, emissions, distances_from_node, t, constants, diffusion)
}

/// Modulação do nó `node` com uma função de difusão substituta.
///
/// `diffusion_fn` deve respeitar o mesmo contrato de [`diffusion`]. Qualquer
/// erro retornado por ela aborta a chamada inteira.
pub fn modulate_with<F>(
    node: usize,
    phenotypes: &[NodePhenotype],
    emissions: &[EmissionRecord],
    distances_from_node: &[f64],
    t: u64,
    constants: &GasConstants,
    diffusion_fn: F,
) -> GasNetResult<Modulation>
where
    F: Fn(&DiffusionInput) -> GasNetResult<f64>,
{
    if let Err(e) = check_inputs(node, phenotypes, emissions, distances_from_node, constants) {
        tracing::warn!(node, error = %e, "modulation contract violation");
        return Err(e);
    }

    let mut gas1 = 0.0;
    let mut gas2 = 0.0;

    let sources = phenotypes.iter().zip(emissions).zip(distances_from_node);
    for (b, ((phenotype, emission), &distance)) in sources.enumerate() {
        if !phenotype.emits_gas || b == node {
            continue;
        }

        let input = DiffusionInput {
            emission: *emission,
            decay_rate: phenotype.decay_rate,
            t,
            global_c: constants.global_c,
            distance,
            gas_radius: phenotype.gas_radius,
        };
        let concentration = GasNetError::ensure_finite("diffusion output", diffusion_fn(&input)?)?;
        tracing::trace!(node, source = b, concentration, channel = ?phenotype.gas_channel);

        match phenotype.gas_channel {
            GasChannel::Primary => gas1 += concentration,
            GasChannel::Secondary => gas2 += concentration,
        }
    }

    let current = phenotypes[node].transfer_index as f64;
    let size = TRANSFER_TABLE_SIZE as f64;
    let up = gas1 / constants.global_c * constants.global_k;
    let down = gas2 / constants.global_c * constants.global_k;
    let raw = GasNetError::ensure_finite("raw transfer update", current + up * (size - current) - down * current)?;

    let index = transfer_index(raw, TRANSFER_TABLE_SIZE);
    let modulation = Modulation {
        transfer_param: transfer_param(index)?,
        transfer_index: index,
        gas1,
        gas2,
    };

    tracing::debug!(node, t, gas1, gas2, raw, index, "modulation computed");
    Ok(modulation)
}

fn check_inputs(
    node: usize,
    phenotypes: &[NodePhenotype],
    emissions: &[EmissionRecord],
    distances_from_node: &[f64],
    constants: &GasConstants,
) -> GasNetResult<()> {
    constants.validate()?;

    let len = phenotypes.len();
    if node >= len {
        return Err(GasNetError::NodeOutOfRange { node, len });
    }
    if emissions.len() != len {
        return Err(GasNetError::LengthMismatch {
            what: "emission records",
            expected: len,
            found: emissions.len(),
        });
    }
    if distances_from_node.len() != len {
        return Err(GasNetError::LengthMismatch {
            what: "distances from node",
            expected: len,
            found: distances_from_node.len(),
        });
    }

    phenotypes[node].validate_transfer_index()
}
