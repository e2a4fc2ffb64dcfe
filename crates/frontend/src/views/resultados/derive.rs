//! Pure derivation for the consulta-results page.

use contracts::marks::{MARCA_KEY, NUMERO_JMS_KEY, RESULTADOS_MARKS};
use contracts::tables::OrderDoc;

use crate::pipeline::filter::{apply_column_filters, ColumnFilters};
use crate::pipeline::group::{agrupar_por_correio_base, EntregadorResumo};
use crate::pipeline::normalize::normalize_for_comparison;
use crate::pipeline::paginate::paginate;
use crate::pipeline::view::{resumo_to_table, TableView};

/// JMS numbers are copied to the clipboard in blocks this size; the
/// tracking site rejects longer pastes.
pub const CHUNK_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultadosDerived {
    pub grouped: Vec<EntregadorResumo>,
    pub filtered: Vec<EntregadorResumo>,
    pub table: TableView,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub start: usize,
}

pub fn derive(
    docs: &[OrderDoc],
    search: &str,
    filters: &ColumnFilters,
    page: usize,
    rows_per_page: u32,
) -> ResultadosDerived {
    let grouped = agrupar_por_correio_base(docs, &RESULTADOS_MARKS);

    let needle = normalize_for_comparison(search);
    let searched: Vec<EntregadorResumo> = if needle.is_empty() {
        grouped.clone()
    } else {
        grouped
            .iter()
            .filter(|g| normalize_for_comparison(&g.correio).contains(&needle))
            .cloned()
            .collect()
    };

    let filtered = apply_column_filters(&searched, filters);
    let slice = paginate(&filtered, page, rows_per_page as usize);
    let table = resumo_to_table(&slice.page_rows);

    ResultadosDerived {
        grouped,
        total_filtered: filtered.len(),
        filtered,
        table,
        total_pages: slice.total_pages,
        current_page: slice.current_page,
        start: slice.start,
    }
}

/// JMS numbers of every não-entregue order, blanks skipped.
pub fn numeros_nao_entregues(docs: &[OrderDoc]) -> Vec<String> {
    docs.iter()
        .filter(|doc| RESULTADOS_MARKS.is_nao_entregue(&doc.field(MARCA_KEY)))
        .map(|doc| doc.field(NUMERO_JMS_KEY).trim().to_string())
        .filter(|numero| !numero.is_empty())
        .collect()
}

pub fn chunk_numeros(numeros: &[String]) -> Vec<Vec<String>> {
    numeros
        .chunks(CHUNK_SIZE)
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::marks::{BASE_KEY, CORREIO_KEY};
    use serde_json::json;

    fn doc(correio: &str, base: &str, marca: &str, numero: &str) -> OrderDoc {
        serde_json::from_value(json!({
            CORREIO_KEY: correio,
            BASE_KEY: base,
            MARCA_KEY: marca,
            NUMERO_JMS_KEY: numero,
        }))
        .unwrap()
    }

    fn fixture() -> Vec<OrderDoc> {
        vec![
            doc("A", "X", "Recebimento com assinatura normal", "J1"),
            doc("A", "X", "Não entregue", "J2"),
            doc("A", "X", "Em rota", "J3"),
            doc("B", "Y", "Não entregue", "J4"),
            doc("B", "Y", "Não entregue", " "),
        ]
    }

    #[test]
    fn test_derive_groups_and_paginates() {
        let derived = derive(&fixture(), "", &ColumnFilters::new(), 1, 25);
        assert_eq!(derived.grouped.len(), 2);
        // "A,X" has three orders, "B,Y" two
        assert_eq!(derived.grouped[0].correio, "A");
        assert_eq!(derived.table.body_rows.len(), 2);
        assert_eq!(
            derived.table.body_rows[0].values[3],
            "1 entregues / 1 não entregues"
        );
    }

    #[test]
    fn test_search_narrows_by_correio() {
        let derived = derive(&fixture(), "  b ", &ColumnFilters::new(), 1, 25);
        assert_eq!(derived.total_filtered, 1);
        assert_eq!(derived.filtered[0].correio, "B");
    }

    #[test]
    fn test_column_filter_on_grouped_rows() {
        let mut filters = ColumnFilters::new();
        filters.toggle(2, "y");
        let derived = derive(&fixture(), "", &filters, 1, 25);
        assert_eq!(derived.total_filtered, 1);
        assert_eq!(derived.filtered[0].base, "Y");
    }

    #[test]
    fn test_numeros_skip_blank_and_delivered() {
        let numeros = numeros_nao_entregues(&fixture());
        assert_eq!(numeros, ["J2", "J4"]);
    }

    #[test]
    fn test_chunk_numeros() {
        let numeros: Vec<String> = (0..(CHUNK_SIZE + 2)).map(|n| n.to_string()).collect();
        let chunks = chunk_numeros(&numeros);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), CHUNK_SIZE);
        assert_eq!(chunks[1].len(), 2);
        assert!(chunk_numeros(&[]).is_empty());
    }
}
