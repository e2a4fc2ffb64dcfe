pub mod derive;
pub mod page;

pub use page::ResultadosPage;

use contracts::error::ApiError;
use contracts::tables::{OrderDoc, OrderDocPage};

use crate::shared::api::{self, TableId};

/// Page size used when draining the whole collection.
pub const PER_PAGE_FETCH: usize = 500;

/// Fetches every page of the motorista collection. Stops when the
/// accumulated rows reach the reported total or a short page arrives.
pub(crate) async fn fetch_all_motorista(
    token: &str,
    datas: &[String],
    incluir_nao_entregues: bool,
) -> Result<(Vec<OrderDoc>, u64), ApiError> {
    let mut all = Vec::new();
    let mut page = 1usize;
    let total = loop {
        let mut params = vec![
            format!("page={}", page),
            format!("per_page={}", PER_PAGE_FETCH),
        ];
        if !datas.is_empty() {
            params.push(format!("datas={}", urlencoding::encode(&datas.join(","))));
        }
        if incluir_nao_entregues {
            params.push("incluir_nao_entregues_outras_datas=true".to_string());
        }
        let path = format!(
            "/api/resultados-consulta/motorista?{}",
            params.join("&")
        );
        let response: OrderDocPage =
            api::get_json(&path, token, Some(TableId::ResultadosConsulta)).await?;
        let chunk_len = response.data.len();
        all.extend(response.data);
        if all.len() as u64 >= response.total || chunk_len < PER_PAGE_FETCH {
            break response.total;
        }
        page += 1;
    };
    Ok((all, total))
}
