//! Snapshot de rede para um tick
//!
//! Agrupa fenótipos, registros de emissão e a matriz de distâncias fornecida
//! pelo simulador. Nada aqui é mutado: o snapshot é só lido, então pode ser
//! compartilhado entre threads à vontade.

use serde::{Deserialize, Serialize};
use crate::config::GasConstants;
use crate::error::{GasNetError, GasNetResult};
use crate::modulation::modulate;
use crate::types::{EmissionRecord, Modulation, NodePhenotype};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GasNetwork {
    pub phenotypes: Vec<NodePhenotype>,
    pub emissions: Vec<EmissionRecord>,
    /// `distances[a][b]` = distância de `a` até `b`
    pub distances: Vec<Vec<f64>>,
}

impl GasNetwork {
    pub fn new(
        phenotypes: Vec<NodePhenotype>,
        emissions: Vec<EmissionRecord>,
        distances: Vec<Vec<f64>>,
    ) -> GasNetResult<Self> {
        let network = Self {
            phenotypes,
            emissions,
            distances,
        };
        network.validate()?;
        Ok(network)
    }

    pub fn len(&self) -> usize {
        self.phenotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phenotypes.is_empty()
    }

    /// Confere que os três vetores concordam no número de nós
    pub fn validate(&self) -> GasNetResult<()> {
        let n = self.len();
        if self.emissions.len() != n {
            return Err(GasNetError::InvalidSnapshot(format!(
                "{} phenotypes but {} emission records",
                n,
                self.emissions.len()
            )));
        }
        if self.distances.len() != n {
            return Err(GasNetError::InvalidSnapshot(format!(
                "{} phenotypes but {} distance rows",
                n,
                self.distances.len()
            )));
        }
        if let Some((row, cols)) = self
            .distances
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, cols)| cols != n)
        {
            return Err(GasNetError::InvalidSnapshot(format!(
                "distance row {row} has {cols} entries, expected {n}"
            )));
        }
        Ok(())
    }

    /// Modulação de um nó contra este snapshot
    pub fn modulate_node(&self, node: usize, t: u64, constants: &GasConstants) -> GasNetResult<Modulation> {
        let distances = self.distances.get(node).ok_or(GasNetError::NodeOutOfRange {
            node,
            len: self.len(),
        })?;
        modulate(node, &self.phenotypes, &self.emissions, distances, t, constants)
    }

    /// Modulação de todos os nós, na ordem dos índices
    pub fn modulate_all(&self, t: u64, constants: &GasConstants) -> GasNetResult<Vec<Modulation>> {
        self.validate()?;
        (0..self.len())
            .map(|node| self.modulate_node(node, t, constants))
            .collect()
    }

    pub fn from_json(json: &str) -> GasNetResult<Self> {
        let network: Self = serde_json::from_str(json)?;
        network.validate()?;
        Ok(network)
    }

    pub fn to_json(&self) -> GasNetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
