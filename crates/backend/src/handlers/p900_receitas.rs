use axum::{extract::Path, Json};
use contracts::projections::p900_receitas::dto::{ExcipienteQtd, ReceitaLinha};

use crate::projections::p900_receitas::service;
use crate::shared::error::ApiError;

/// GET /api/receitas/:codigo
///
/// Order lookup: every register row for the code, 404 when none exist.
pub async fn get_receita(Path(codigo): Path<String>) -> Result<Json<Vec<ReceitaLinha>>, ApiError> {
    let codigo = service::normalizar_codigo(&codigo);
    if codigo.is_empty() {
        return Err(ApiError::Validation("Código de receita vazio".to_string()));
    }

    let linhas = service::buscar_por_codigo(&codigo).await?;
    if linhas.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Receita {} não encontrada",
            codigo
        )));
    }
    Ok(Json(linhas))
}

/// GET /api/receitas/:codigo/excipientes
///
/// Aggregation rows: (excipiente, qtd) pairs. An unknown code is an empty
/// list here, not 404; absence only fails the order-lookup operation.
pub async fn get_excipientes(
    Path(codigo): Path<String>,
) -> Result<Json<Vec<ExcipienteQtd>>, ApiError> {
    let codigo = service::normalizar_codigo(&codigo);
    if codigo.is_empty() {
        return Err(ApiError::Validation("Código de receita vazio".to_string()));
    }

    let pares = service::excipientes_por_codigo(&codigo).await?;
    Ok(Json(pares))
}

/// POST /api/receitas/testdata
pub async fn insert_test_data() -> Result<axum::http::StatusCode, ApiError> {
    service::insert_test_data().await?;
    Ok(axum::http::StatusCode::OK)
}
