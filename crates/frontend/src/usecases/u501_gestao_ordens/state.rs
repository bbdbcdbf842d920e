//! Page state for order management.
//!
//! All order-list bookkeeping lives in one explicit state struct mutated
//! through these transition functions; components hold it in a single
//! `RwSignal` and dispatch instead of spreading ad-hoc signals around.
//! Every transition is synchronous and pure, so the whole page logic is
//! testable off-browser.

use contracts::dashboards::d400_consumo_excipientes::dto::ConsumoExcipientes;
use contracts::projections::p900_receitas::dto::OrdemDto;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestaoOrdensState {
    /// Selected orders, in insertion order. Duplicates allowed.
    pub ordens: Vec<OrdemDto>,
    /// Last committed consumption aggregate.
    pub consumo: ConsumoExcipientes,
    /// Drill-down toggle: at most one aggregate row expanded.
    pub expandido: Option<String>,
    /// Monotonic token of the latest recompute pass.
    seq: u64,
}

impl GestaoOrdensState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order after a successful code lookup. Same code twice
    /// yields two entries; its contributions count twice.
    pub fn adicionar_ordem(&mut self, ordem: OrdemDto) {
        self.ordens.push(ordem);
    }

    /// Remove the order at `index`. Out-of-bounds indexes are a no-op.
    pub fn remover_ordem(&mut self, index: usize) -> bool {
        if index >= self.ordens.len() {
            return false;
        }
        self.ordens.remove(index);
        true
    }

    /// Attach an edited excipient snapshot to the order at `index`.
    ///
    /// The snapshot is informational; the aggregate keeps re-deriving from
    /// the register until the register itself changes.
    pub fn salvar_edicao(&mut self, index: usize, excipientes: BTreeMap<String, f64>) -> bool {
        match self.ordens.get_mut(index) {
            Some(ordem) => {
                ordem.excipientes = Some(excipientes);
                true
            }
            None => false,
        }
    }

    /// Drill-down state machine: collapsed ⇄ expanded(nome), clicking
    /// another row moves the expansion there.
    pub fn alternar_expansao(&mut self, nome: &str) {
        if self.expandido.as_deref() == Some(nome) {
            self.expandido = None;
        } else {
            self.expandido = Some(nome.to_string());
        }
    }

    /// Start a recompute pass, returning its token.
    pub fn iniciar_recalculo(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Commit a finished pass. Returns false (and changes nothing) when a
    /// newer pass started meanwhile, so stale results are discarded.
    pub fn aplicar_recalculo(&mut self, token: u64, consumo: ConsumoExcipientes) -> bool {
        if token != self.seq {
            return false;
        }
        self.consumo = consumo;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_consumo_excipientes::dto::ExcipienteResumo;

    fn consumo_com(nome: &str, total: f64) -> ConsumoExcipientes {
        let mut consumo = ConsumoExcipientes::new();
        consumo.insert(
            nome.to_string(),
            ExcipienteResumo {
                total,
                ordens: Vec::new(),
            },
        );
        consumo
    }

    #[test]
    fn adicionar_permite_codigo_repetido() {
        let mut state = GestaoOrdensState::new();
        state.adicionar_ordem(OrdemDto::new("A1", "Dipirona 500mg"));
        state.adicionar_ordem(OrdemDto::new("A1", "Dipirona 500mg"));
        assert_eq!(state.ordens.len(), 2);
    }

    #[test]
    fn remover_respeita_limites() {
        let mut state = GestaoOrdensState::new();
        state.adicionar_ordem(OrdemDto::new("A1", "Dipirona 500mg"));
        state.adicionar_ordem(OrdemDto::new("B2", "Paracetamol 750mg"));

        assert!(!state.remover_ordem(5));
        assert_eq!(state.ordens.len(), 2);

        assert!(state.remover_ordem(0));
        assert_eq!(state.ordens.len(), 1);
        assert_eq!(state.ordens[0].codigo, "B2");
    }

    #[test]
    fn salvar_edicao_anexa_somente_na_ordem() {
        let mut state = GestaoOrdensState::new();
        state.adicionar_ordem(OrdemDto::new("A1", "Dipirona 500mg"));
        let consumo_antes = state.consumo.clone();

        let mut snapshot = BTreeMap::new();
        snapshot.insert("Lactose".to_string(), 15.0);
        assert!(state.salvar_edicao(0, snapshot.clone()));

        assert_eq!(state.ordens[0].excipientes, Some(snapshot));
        assert!(state.ordens[0].foi_editada());
        // the displayed aggregate is untouched by an edit
        assert_eq!(state.consumo, consumo_antes);

        assert!(!state.salvar_edicao(9, BTreeMap::new()));
    }

    #[test]
    fn expansao_segue_maquina_de_estados() {
        let mut state = GestaoOrdensState::new();
        assert_eq!(state.expandido, None);

        state.alternar_expansao("Lactose");
        assert_eq!(state.expandido.as_deref(), Some("Lactose"));

        // same row again collapses
        state.alternar_expansao("Lactose");
        assert_eq!(state.expandido, None);

        // expanded(m) -> expanded(n)
        state.alternar_expansao("Lactose");
        state.alternar_expansao("Talco");
        assert_eq!(state.expandido.as_deref(), Some("Talco"));
    }

    #[test]
    fn recalculo_obsoleto_e_descartado() {
        let mut state = GestaoOrdensState::new();

        let antigo = state.iniciar_recalculo();
        let novo = state.iniciar_recalculo();

        // the newer pass lands first
        assert!(state.aplicar_recalculo(novo, consumo_com("Lactose", 10.0)));
        assert_eq!(state.consumo["Lactose"].total, 10.0);

        // the stale pass must not overwrite it
        assert!(!state.aplicar_recalculo(antigo, consumo_com("Lactose", 99.0)));
        assert_eq!(state.consumo["Lactose"].total, 10.0);
    }

    #[test]
    fn recalculo_atual_e_aplicado() {
        let mut state = GestaoOrdensState::new();
        let token = state.iniciar_recalculo();
        assert!(state.aplicar_recalculo(token, consumo_com("Talco", 2.5)));
        assert_eq!(state.consumo.len(), 1);
    }
}
