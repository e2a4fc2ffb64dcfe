//! HTTP client helpers shared by every view.
//!
//! All requests carry `Authorization: Bearer` plus the `X-Table-Id`
//! header identifying the imported table the endpoint works on. Errors
//! map onto `contracts::error::ApiError`; the message preference is the
//! server's `detail`, then `message`, then a generic status line.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use contracts::error::ApiError;

/// API base URL from the current window location, port 8000.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000", protocol, hostname)
}

/// Fixed ids of the imported tables, sent as `X-Table-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableId {
    ListaTelefones = 1,
    VerificarPedidos = 2,
    ConsultarPedidos = 3,
    ResultadosConsulta = 4,
    Sla = 5,
}

impl TableId {
    pub fn header_value(self) -> String {
        (self as u8).to_string()
    }
}

fn with_headers(builder: RequestBuilder, token: &str, table_id: Option<TableId>) -> RequestBuilder {
    let builder = builder.header("Authorization", &format!("Bearer {}", token));
    match table_id {
        Some(id) => builder.header("X-Table-Id", &id.header_value()),
        None => builder,
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Server error payloads carry `detail` (FastAPI) or `message`; the
/// validation variant nests a list of `{msg}` objects.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message"] {
        match value.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Array(items)) => {
                if let Some(msg) = items
                    .first()
                    .and_then(|item| item.get("msg"))
                    .and_then(Value::as_str)
                {
                    return Some(msg.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !response.ok() {
        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let message = extract_detail(&body)
            .unwrap_or_else(|| format!("Erro do servidor ({})", status));
        return Err(ApiError::Api { status, message });
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Api {
        status,
        message: format!("Resposta inválida do servidor: {}", e),
    })
}

pub async fn get_json<T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: Option<TableId>,
) -> Result<T, ApiError> {
    let response = with_headers(Request::get(&format!("{}{}", api_base(), path)), token, table_id)
        .send()
        .await
        .map_err(network)?;
    parse_response(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: Option<TableId>,
    body: &B,
) -> Result<T, ApiError> {
    let response = with_headers(Request::post(&format!("{}{}", api_base(), path)), token, table_id)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    parse_response(response).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: Option<TableId>,
    body: &B,
) -> Result<T, ApiError> {
    let response = with_headers(Request::patch(&format!("{}{}", api_base(), path)), token, table_id)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    parse_response(response).await
}

pub async fn delete_json<T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: Option<TableId>,
) -> Result<T, ApiError> {
    let response = with_headers(
        Request::delete(&format!("{}{}", api_base(), path)),
        token,
        table_id,
    )
    .send()
    .await
    .map_err(network)?;
    parse_response(response).await
}

pub async fn delete_with_body<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: Option<TableId>,
    body: &B,
) -> Result<T, ApiError> {
    let response = with_headers(
        Request::delete(&format!("{}{}", api_base(), path)),
        token,
        table_id,
    )
    .json(body)
    .map_err(network)?
    .send()
    .await
    .map_err(network)?;
    parse_response(response).await
}

/// Uploads are gated by filename extension only; content sniffing is
/// the server's job.
pub fn validate_xlsx(file_name: &str) -> Result<(), ApiError> {
    if file_name.to_lowercase().ends_with(".xlsx") {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Arquivo inválido. Envie uma planilha .xlsx.".to_string(),
        ))
    }
}

pub async fn upload_xlsx<T: DeserializeOwned>(
    path: &str,
    token: &str,
    table_id: TableId,
    file: &web_sys::File,
) -> Result<T, ApiError> {
    validate_xlsx(&file.name())?;
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("FormData indisponível".to_string()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Network("Falha ao preparar o upload".to_string()))?;
    let response = with_headers(
        Request::post(&format!("{}{}", api_base(), path)),
        token,
        Some(table_id),
    )
    .body(form)
    .map_err(network)?
    .send()
    .await
    .map_err(network)?;
    parse_response(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_id_header_values() {
        assert_eq!(TableId::ListaTelefones.header_value(), "1");
        assert_eq!(TableId::ResultadosConsulta.header_value(), "4");
        assert_eq!(TableId::Sla.header_value(), "5");
    }

    #[test]
    fn test_validate_xlsx_by_extension_only() {
        assert!(validate_xlsx("tabela.xlsx").is_ok());
        assert!(validate_xlsx("TABELA.XLSX").is_ok());
        assert!(validate_xlsx("tabela.xls").is_err());
        assert!(validate_xlsx("tabela.csv").is_err());
        assert!(validate_xlsx("xlsx").is_err());
    }

    #[test]
    fn test_extract_detail_preference() {
        assert_eq!(
            extract_detail(r#"{"detail": "Planilha vazia"}"#).as_deref(),
            Some("Planilha vazia")
        );
        assert_eq!(
            extract_detail(r#"{"message": "Sem permissão"}"#).as_deref(),
            Some("Sem permissão")
        );
        assert_eq!(
            extract_detail(r#"{"detail": [{"msg": "campo obrigatório"}]}"#).as_deref(),
            Some("campo obrigatório")
        );
        assert_eq!(extract_detail("not json"), None);
        assert_eq!(extract_detail(r#"{"other": 1}"#), None);
    }
}
