//! Pure consolidation of excipient consumption.
//!
//! The dashboard re-derives the aggregate from the register on every order
//! list change; this module is the fold that turns (order, fetched rows)
//! pairs into the consolidated map. Keeping it free of I/O lets the wasm
//! frontend and native tests share one implementation.

use super::dto::{ConsumoExcipientes, ContribuicaoOrdem, ExcipienteResumo};
use crate::projections::p900_receitas::dto::{ExcipienteQtd, OrdemDto};

/// Fold one order's register rows into the running aggregate.
pub fn acumular(consumo: &mut ConsumoExcipientes, ordem: &OrdemDto, linhas: &[ExcipienteQtd]) {
    for linha in linhas {
        let resumo = consumo
            .entry(linha.excipiente.clone())
            .or_insert_with(ExcipienteResumo::default);
        resumo.total += linha.qtd_materia_prima;
        resumo.ordens.push(ContribuicaoOrdem {
            codigo: ordem.codigo.clone(),
            nome: ordem.nome.clone(),
            quantidade: linha.qtd_materia_prima,
        });
    }
}

/// Consolidate a full order list in list order.
///
/// An empty list yields an empty map. Orders contribute independently, so
/// the same code appearing twice contributes twice (append semantics).
pub fn consolidar<'a, I>(por_ordem: I) -> ConsumoExcipientes
where
    I: IntoIterator<Item = (&'a OrdemDto, &'a [ExcipienteQtd])>,
{
    let mut consumo = ConsumoExcipientes::new();
    for (ordem, linhas) in por_ordem {
        acumular(&mut consumo, ordem, linhas);
    }
    consumo
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(excipiente: &str, qtd: f64) -> ExcipienteQtd {
        ExcipienteQtd {
            excipiente: excipiente.to_string(),
            qtd_materia_prima: qtd,
        }
    }

    #[test]
    fn lista_vazia_produz_mapa_vazio() {
        let consumo = consolidar(std::iter::empty());
        assert!(consumo.is_empty());
    }

    #[test]
    fn uma_ordem_soma_suas_linhas() {
        let ordem = OrdemDto::new("A1", "Dipirona 500mg");
        let linhas = vec![linha("Lactose", 10.0), linha("Talco", 2.5)];

        let consumo = consolidar([(&ordem, linhas.as_slice())]);

        assert_eq!(consumo.len(), 2);
        assert_eq!(consumo["Lactose"].total, 10.0);
        assert_eq!(consumo["Talco"].total, 2.5);
        assert_eq!(consumo["Lactose"].ordens.len(), 1);
        assert_eq!(consumo["Lactose"].ordens[0].codigo, "A1");
        assert_eq!(consumo["Lactose"].ordens[0].nome, "Dipirona 500mg");
        assert_eq!(consumo["Lactose"].ordens[0].quantidade, 10.0);
    }

    #[test]
    fn total_soma_sobre_todas_as_ordens() {
        let a1 = OrdemDto::new("A1", "Dipirona 500mg");
        let b2 = OrdemDto::new("B2", "Paracetamol 750mg");
        let linhas_a1 = vec![linha("Lactose", 10.0), linha("Talco", 2.5)];
        let linhas_b2 = vec![linha("Lactose", 4.0)];

        let consumo = consolidar([(&a1, linhas_a1.as_slice()), (&b2, linhas_b2.as_slice())]);

        assert_eq!(consumo["Lactose"].total, 14.0);
        assert_eq!(consumo["Talco"].total, 2.5);
        // contribution order follows list order
        let codigos: Vec<&str> = consumo["Lactose"]
            .ordens
            .iter()
            .map(|c| c.codigo.as_str())
            .collect();
        assert_eq!(codigos, ["A1", "B2"]);
    }

    #[test]
    fn mesma_ordem_duas_vezes_dobra_a_contribuicao() {
        let ordem = OrdemDto::new("A1", "Dipirona 500mg");
        let linhas = vec![linha("Lactose", 10.0)];

        let consumo = consolidar([(&ordem, linhas.as_slice()), (&ordem, linhas.as_slice())]);

        assert_eq!(consumo["Lactose"].total, 20.0);
        assert_eq!(consumo["Lactose"].ordens.len(), 2);
    }

    #[test]
    fn remover_equivale_a_nunca_ter_incluido() {
        let a1 = OrdemDto::new("A1", "Dipirona 500mg");
        let b2 = OrdemDto::new("B2", "Paracetamol 750mg");
        let c3 = OrdemDto::new("C3", "Omeprazol 20mg");
        let linhas_a1 = vec![linha("Lactose", 10.0)];
        let linhas_b2 = vec![linha("Lactose", 4.0), linha("Amido", 1.0)];
        let linhas_c3 = vec![linha("Talco", 0.5)];

        // aggregate of [a1, c3] directly...
        let sem_b2 = consolidar([(&a1, linhas_a1.as_slice()), (&c3, linhas_c3.as_slice())]);

        // ...equals re-aggregating after b2 was dropped from the middle
        let lista = [
            (&a1, linhas_a1.as_slice()),
            (&b2, linhas_b2.as_slice()),
            (&c3, linhas_c3.as_slice()),
        ];
        let apos_remocao = consolidar(
            lista
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != 1)
                .map(|(_, par)| *par),
        );

        assert_eq!(sem_b2, apos_remocao);
    }

    #[test]
    fn acumular_preserva_aggregado_anterior() {
        let a1 = OrdemDto::new("A1", "Dipirona 500mg");
        let mut consumo = ConsumoExcipientes::new();
        acumular(&mut consumo, &a1, &[linha("Lactose", 10.0)]);
        acumular(&mut consumo, &a1, &[linha("Lactose", 2.0), linha("Amido", 1.0)]);

        assert_eq!(consumo["Lactose"].total, 12.0);
        assert_eq!(consumo["Amido"].total, 1.0);
    }
}
