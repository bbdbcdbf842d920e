use super::model;
use contracts::shared::quantidade::parse_quantidade;
use leptos::prelude::*;
use std::collections::BTreeMap;

/// ViewModel for the order edit dialog.
///
/// The scratch map is a Vec of (excipiente, quantity-as-text) pairs so the
/// inputs keep whatever the user typed; parsing happens once, on save.
/// Excipient names are unique within one prescription, so index-based
/// updates are safe.
#[derive(Clone)]
pub struct EdicaoOrdemViewModel {
    pub codigo: String,
    pub nome: String,
    pub itens: RwSignal<Vec<(String, String)>>,
    pub erro: RwSignal<Option<String>>,
    pub carregando: RwSignal<bool>,
}

impl EdicaoOrdemViewModel {
    pub fn new(codigo: String, nome: String) -> Self {
        Self {
            codigo,
            nome,
            itens: RwSignal::new(Vec::new()),
            erro: RwSignal::new(None),
            carregando: RwSignal::new(true),
        }
    }

    /// Load the order's register rows into the scratch map.
    pub fn carregar(&self) {
        let codigo = self.codigo.clone();
        let itens = self.itens;
        let erro = self.erro;
        let carregando = self.carregando;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_excipientes(&codigo).await {
                Ok(pares) => {
                    let linhas: Vec<(String, String)> = pares
                        .into_iter()
                        .map(|p| (p.excipiente, format!("{}", p.qtd_materia_prima)))
                        .collect();
                    itens.set(linhas);
                    erro.set(None);
                }
                Err(e) => erro.set(Some(format!("Falha ao carregar excipientes: {}", e))),
            }
            carregando.set(false);
        });
    }

    pub fn alterar_quantidade(&self, index: usize, texto: String) {
        self.itens.update(|linhas| {
            if let Some(linha) = linhas.get_mut(index) {
                linha.1 = texto;
            }
        });
    }

    pub fn remover_item(&self, index: usize) {
        self.itens.update(|linhas| {
            if index < linhas.len() {
                linhas.remove(index);
            }
        });
    }

    /// Validate every remaining quantity and hand the parsed snapshot to the
    /// caller. Invalid input keeps the dialog open with an error banner.
    pub fn salvar_command(&self, on_saved: Callback<BTreeMap<String, f64>>) {
        let linhas = self.itens.get();
        let mut snapshot = BTreeMap::new();

        for (excipiente, texto) in &linhas {
            match parse_quantidade(texto) {
                Ok(valor) => {
                    snapshot.insert(excipiente.clone(), valor);
                }
                Err(motivo) => {
                    self.erro.set(Some(format!("{}: {}", excipiente, motivo)));
                    return;
                }
            }
        }

        self.erro.set(None);
        on_saved.run(snapshot);
    }
}
