//! Adapts aggregated rows into the neutral shape the tables render.

use contracts::marks::{BASE_KEY, CORREIO_KEY};
use contracts::sla::MotoristaIndicador;
use contracts::tables::TableRow;

use super::filter::FilterableRow;
use super::group::EntregadorResumo;

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub id: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub header_values: Vec<String>,
    pub body_rows: Vec<BodyRow>,
}

pub const SLA_HEADER: &[&str] = &[
    "Motorista",
    "Base de entrega",
    "Total entregues",
    "Não entregues",
    "Total",
    "% SLA",
    "Entrada do galpao",
];

/// `50%` for whole numbers, `98.3%` otherwise.
pub fn format_pct(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{:.0}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// One page of per-driver rows. `start` is the page offset, used both
/// for the synthetic row ids and the ordinals the table shows.
pub fn motoristas_to_table(rows: &[MotoristaIndicador], start: usize) -> TableView {
    TableView {
        header_values: SLA_HEADER.iter().map(|h| h.to_string()).collect(),
        body_rows: rows
            .iter()
            .enumerate()
            .map(|(i, m)| BodyRow {
                id: format!(
                    "sla-m-{}-{}-{}",
                    start + i,
                    m.nome,
                    m.base.as_deref().unwrap_or("")
                ),
                values: vec![
                    m.nome.clone(),
                    m.base_display().to_string(),
                    m.total_entregues.to_string(),
                    m.nao_entregues.to_string(),
                    m.total_value().to_string(),
                    format_pct(m.percentual_sla),
                    m.entradas_galpao.to_string(),
                ],
            })
            .collect(),
    }
}

/// One page of (correio, base) aggregates.
pub fn resumo_to_table(grouped: &[EntregadorResumo]) -> TableView {
    if grouped.is_empty() {
        return TableView::default();
    }
    TableView {
        header_values: vec![
            CORREIO_KEY.to_string(),
            BASE_KEY.to_string(),
            "Total".to_string(),
            "Evolução".to_string(),
        ],
        body_rows: grouped
            .iter()
            .enumerate()
            .map(|(i, g)| BodyRow {
                id: format!("row-{}", i),
                values: vec![
                    g.correio.clone(),
                    g.base.clone(),
                    g.pedidos().to_string(),
                    g.evolucao_display(),
                ],
            })
            .collect(),
    }
}

// Filterable cells mirror the rendered columns, so a value picked from
// the dropdown always matches what the user sees.

impl FilterableRow for MotoristaIndicador {
    fn filter_cell(&self, col: usize) -> String {
        match col {
            1 => self.nome.clone(),
            2 => self.base_display().to_string(),
            3 => self.total_entregues.to_string(),
            4 => self.nao_entregues.to_string(),
            5 => self.total_value().to_string(),
            6 => format_pct(self.percentual_sla),
            7 => self.entradas_galpao.to_string(),
            _ => String::new(),
        }
    }
}

impl FilterableRow for EntregadorResumo {
    fn filter_cell(&self, col: usize) -> String {
        match col {
            1 => self.correio.clone(),
            2 => self.base.clone(),
            3 => self.pedidos().to_string(),
            4 => self.evolucao_display(),
            _ => String::new(),
        }
    }
}

impl FilterableRow for TableRow {
    fn filter_cell(&self, col: usize) -> String {
        self.values.get(col - 1).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(50.0), "50%");
        assert_eq!(format_pct(98.3), "98.3%");
        assert_eq!(format_pct(0.0), "0%");
        assert_eq!(format_pct(100.0), "100%");
    }

    #[test]
    fn test_motorista_rows_and_ids() {
        let rows = vec![MotoristaIndicador {
            nome: "João".into(),
            base: Some("Norte".into()),
            total_entregues: 9,
            nao_entregues: 1,
            total: Some(10),
            percentual_sla: 90.0,
            entradas_galpao: 3,
            ..Default::default()
        }];
        let table = motoristas_to_table(&rows, 25);
        assert_eq!(table.header_values.len(), SLA_HEADER.len());
        let row = &table.body_rows[0];
        assert_eq!(row.id, "sla-m-25-João-Norte");
        assert_eq!(
            row.values,
            vec!["João", "Norte", "9", "1", "10", "90%", "3"]
        );
    }

    #[test]
    fn test_empty_resumo_renders_empty_view() {
        assert_eq!(resumo_to_table(&[]), TableView::default());
    }

    #[test]
    fn test_resumo_rows() {
        let grouped = vec![EntregadorResumo {
            correio: "A".into(),
            base: "X".into(),
            entregues: 1,
            nao_entregues: 1,
            outros: 1,
        }];
        let table = resumo_to_table(&grouped);
        assert_eq!(
            table.body_rows[0].values,
            vec!["A", "X", "3", "1 entregues / 1 não entregues"]
        );
    }
}
