use contracts::projections::p900_receitas::dto::{ExcipienteQtd, ReceitaLinha};
use gloo_net::http::Request;

const API_BASE: &str = "/api/receitas";

/// Outcome of an order lookup by prescription code.
#[derive(Debug, Clone, PartialEq)]
pub enum BuscaReceita {
    Encontrada(Vec<ReceitaLinha>),
    NaoEncontrada,
}

/// Pull the backend's `{"erro": ...}` message out of a failed response body,
/// falling back to the HTTP status.
async fn mensagem_de_erro(response: gloo_net::http::Response) -> String {
    let status = response.status();
    if let Ok(body) = response.text().await {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("erro").and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    format!("HTTP error: {}", status)
}

/// Lookup all register rows for one prescription code.
pub async fn buscar_receita(codigo: &str) -> Result<BuscaReceita, String> {
    let url = format!("{}/{}", API_BASE, codigo);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Ok(BuscaReceita::NaoEncontrada);
    }
    if !response.ok() {
        return Err(mensagem_de_erro(response).await);
    }

    let linhas: Vec<ReceitaLinha> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(BuscaReceita::Encontrada(linhas))
}

/// Fetch the (excipiente, qtd) pairs of one prescription code.
pub async fn excipientes_da_receita(codigo: &str) -> Result<Vec<ExcipienteQtd>, String> {
    let url = format!("{}/{}/excipientes", API_BASE, codigo);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(mensagem_de_erro(response).await);
    }

    let pares: Vec<ExcipienteQtd> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(pares)
}
