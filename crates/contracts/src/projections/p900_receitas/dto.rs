use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One register row: a single excipient required by a prescription.
///
/// The register holds one row per (prescription code, excipient) pair;
/// `ativo` repeats the prescription's display name on every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceitaLinha {
    pub codigo_receita: String,
    /// Active-ingredient display name of the prescription
    pub ativo: String,
    pub excipiente: String,
    /// Required quantity, kilograms
    pub qtd_materia_prima: f64,
}

/// Projection of a register row to the pair used by the aggregation queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcipienteQtd {
    pub excipiente: String,
    pub qtd_materia_prima: f64,
}

/// A selected order on the weighing dashboard.
///
/// Orders are transient client-side state: created when a prescription code
/// lookup succeeds, removed by index, never persisted. `excipientes` carries
/// the locally edited snapshot after a saved edit session; it is
/// informational and never feeds the consumption aggregate, which always
/// re-derives from the register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrdemDto {
    pub codigo: String,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excipientes: Option<BTreeMap<String, f64>>,
}

impl OrdemDto {
    pub fn new(codigo: impl Into<String>, nome: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            nome: nome.into(),
            excipientes: None,
        }
    }

    /// True once an edit session attached a local excipient snapshot.
    pub fn foi_editada(&self) -> bool {
        self.excipientes.is_some()
    }
}
