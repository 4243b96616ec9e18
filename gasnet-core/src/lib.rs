//! # 🧪 gasnet-core — Difusão e Modulação por Gás
//!
//! Núcleo matemático de uma GasNet: nós influenciam a função de transferência
//! dos vizinhos através de um gás virtual que se difunde, em vez de sinapses
//! com peso. Implementa as equações 2-7 de Husbands et al. (1998),
//! "Better Living Through Chemistry: Evolving GasNets for Robot Control".
//!
//! ## Arquitetura
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                      modulation                       │
//! │   Σ difusão por canal ──► raw ──► f(raw) ──► P[idx]   │
//! │              │                                        │
//! │              ▼                                        │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │ diffusion: c · e^(-2d/r) · build_up(t, s)       │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Tudo é puro: nenhuma chamada muta seus argumentos, e a tabela de
//! transferência é uma constante. Construção da rede, matriz de distâncias,
//! laço de tempo e busca evolutiva ficam com o simulador chamador.
//!
//! ## Exemplo
//!
//! ```rust
//! use gasnet_core::{modulate, EmissionRecord, GasChannel, GasConstants, NodePhenotype};
//!
//! # fn main() -> Result<(), gasnet_core::GasNetError> {
//! let phenotypes = vec![
//!     NodePhenotype::emitter(GasChannel::Primary, 2.0, 10.0, 7),
//!     NodePhenotype::silent(7),
//! ];
//! let emissions = vec![EmissionRecord::emitting_since(0), EmissionRecord::dormant()];
//! let distances_from_1 = [5.0, 0.0];
//!
//! let m = modulate(1, &phenotypes, &emissions, &distances_from_1, 4, &GasConstants::default())?;
//! assert_eq!(m.transfer_index, 10);
//! assert_eq!(m.transfer_param, 0.5);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diffusion;
pub mod error;
pub mod modulation;
pub mod network;
pub mod types;

pub use config::GasConstants;
pub use diffusion::{build_up, diffusion, saturate, DiffusionInput};
pub use error::{GasNetError, GasNetResult};
pub use modulation::{modulate, modulate_with, transfer_index};
pub use network::GasNetwork;
pub use types::{
    transfer_param, EmissionRecord, GasChannel, Modulation, NodePhenotype, TRANSFER_TABLE,
    TRANSFER_TABLE_SIZE,
};
