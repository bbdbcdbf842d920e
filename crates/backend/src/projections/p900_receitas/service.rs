use anyhow::Result;
use contracts::projections::p900_receitas::dto::{ExcipienteQtd, ReceitaLinha};

use super::repository;

/// Normalize a user-supplied prescription code before querying.
pub fn normalizar_codigo(codigo: &str) -> String {
    codigo.trim().to_string()
}

/// All register rows for one prescription code.
pub async fn buscar_por_codigo(codigo: &str) -> Result<Vec<ReceitaLinha>> {
    repository::find_by_codigo(codigo).await
}

/// Excipient/quantity pairs for one prescription code.
pub async fn excipientes_por_codigo(codigo: &str) -> Result<Vec<ExcipienteQtd>> {
    repository::excipientes_por_codigo(codigo).await
}

/// Total row count in the register.
pub async fn contar_linhas() -> Result<u64> {
    repository::count().await
}

fn linha(codigo: &str, ativo: &str, excipiente: &str, qtd: f64) -> ReceitaLinha {
    ReceitaLinha {
        codigo_receita: codigo.to_string(),
        ativo: ativo.to_string(),
        excipiente: excipiente.to_string(),
        qtd_materia_prima: qtd,
    }
}

/// Seed a small sample register for local development. Idempotent.
pub async fn insert_test_data() -> Result<()> {
    let data = vec![
        linha("REC-1001", "Dipirona 500mg", "Lactose", 10.0),
        linha("REC-1001", "Dipirona 500mg", "Talco", 2.5),
        linha("REC-1001", "Dipirona 500mg", "Estearato de Magnésio", 0.8),
        linha("REC-1002", "Paracetamol 750mg", "Lactose", 4.0),
        linha("REC-1002", "Paracetamol 750mg", "Amido de Milho", 6.2),
        linha("REC-1003", "Omeprazol 20mg", "Celulose Microcristalina", 12.0),
        linha("REC-1003", "Omeprazol 20mg", "Talco", 1.2),
        linha("REC-1003", "Omeprazol 20mg", "Dióxido de Silício", 0.4),
    ];

    repository::upsert_linhas(&data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;

    #[test]
    fn test_normalizar_codigo() {
        assert_eq!(normalizar_codigo("  REC-1001 "), "REC-1001");
        assert_eq!(normalizar_codigo("REC-1001"), "REC-1001");
        assert_eq!(normalizar_codigo("   "), "");
    }

    /// Single end-to-end register test: the global connection can only be
    /// initialized once per process, so seed and both query shapes are
    /// exercised together against an in-memory database.
    #[tokio::test]
    async fn test_register_round_trip_in_memory() {
        db::initialize_database(":memory:").await.unwrap();

        insert_test_data().await.unwrap();
        assert_eq!(contar_linhas().await.unwrap(), 8);

        // seeding again must not duplicate rows
        insert_test_data().await.unwrap();
        assert_eq!(contar_linhas().await.unwrap(), 8);

        // lookup query shape: all columns by code
        let linhas = buscar_por_codigo("REC-1001").await.unwrap();
        assert_eq!(linhas.len(), 3);
        assert!(linhas.iter().all(|l| l.ativo == "Dipirona 500mg"));

        // aggregation query shape: (excipiente, qtd) pairs by code
        let pares = excipientes_por_codigo("REC-1002").await.unwrap();
        assert_eq!(pares.len(), 2);
        let amido = pares
            .iter()
            .find(|p| p.excipiente == "Amido de Milho")
            .unwrap();
        assert_eq!(amido.qtd_materia_prima, 6.2);

        // unknown code yields no rows, not an error
        let vazio = buscar_por_codigo("X9").await.unwrap();
        assert!(vazio.is_empty());
    }
}
