use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contribution of a single order to one excipient total.
///
/// Contribution lists preserve order-list position, so the drill-down table
/// reads in the same order the user assembled the orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContribuicaoOrdem {
    pub codigo: String,
    pub nome: String,
    /// Quantity this order requires, kilograms
    pub quantidade: f64,
}

/// Aggregate row for one excipient: consolidated total plus the per-order
/// breakdown behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExcipienteResumo {
    pub total: f64,
    pub ordens: Vec<ContribuicaoOrdem>,
}

/// Consolidated excipient consumption, keyed by excipient name.
///
/// BTreeMap keeps rendering deterministic; no ordering is semantically
/// required across excipients.
pub type ConsumoExcipientes = BTreeMap<String, ExcipienteResumo>;
