use contracts::projections::p900_receitas::dto::ExcipienteQtd;

use crate::projections::p900_receitas::api;

/// Load the register rows that seed the edit scratch map.
pub async fn fetch_excipientes(codigo: &str) -> Result<Vec<ExcipienteQtd>, String> {
    api::excipientes_da_receita(codigo).await
}
