//! Aggregates for the drill-down page of one driver or base.

use std::collections::HashMap;

use contracts::marks::{DeliveryStatus, BASE_KEY, CORREIO_KEY, MARCA_KEY, RESULTADOS_MARKS};
use contracts::tables::OrderDoc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolucaoStats {
    pub total: usize,
    pub entregues: usize,
    pub nao_entregues: usize,
    pub outros: usize,
    /// Whole percentages; together they may round to less than 100.
    pub pct_entregues: u32,
    pub pct_nao_entregues: u32,
}

pub fn stats(docs: &[OrderDoc]) -> EvolucaoStats {
    let total = docs.len();
    let mut entregues = 0usize;
    let mut nao_entregues = 0usize;
    for doc in docs {
        match RESULTADOS_MARKS.classify(&doc.field(MARCA_KEY)) {
            DeliveryStatus::Entregue => entregues += 1,
            DeliveryStatus::NaoEntregue => nao_entregues += 1,
            DeliveryStatus::Outro => {}
        }
    }
    let pct = |count: usize| {
        if total == 0 {
            0
        } else {
            ((count as f64 / total as f64) * 100.0).round() as u32
        }
    };
    EvolucaoStats {
        total,
        entregues,
        nao_entregues,
        outros: total - entregues - nao_entregues,
        pct_entregues: pct(entregues),
        pct_nao_entregues: pct(nao_entregues),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotoristaPerformance {
    pub motorista: String,
    pub entregues: usize,
    pub nao_entregues: usize,
    pub outros: usize,
}

impl MotoristaPerformance {
    pub fn total(&self) -> usize {
        self.entregues + self.nao_entregues + self.outros
    }
}

/// Per-driver breakdown of the filtered orders, busiest first. Rows
/// with a blank driver land under an em dash.
pub fn performance_por_motorista(docs: &[OrderDoc]) -> Vec<MotoristaPerformance> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, MotoristaPerformance> = HashMap::new();
    for doc in docs {
        let motorista = {
            let raw = doc.field(CORREIO_KEY);
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                "—".to_string()
            } else {
                trimmed.to_string()
            }
        };
        let entry = buckets
            .entry(motorista.clone())
            .or_insert_with(|| {
                order.push(motorista.clone());
                MotoristaPerformance {
                    motorista,
                    entregues: 0,
                    nao_entregues: 0,
                    outros: 0,
                }
            });
        match RESULTADOS_MARKS.classify(&doc.field(MARCA_KEY)) {
            DeliveryStatus::Entregue => entry.entregues += 1,
            DeliveryStatus::NaoEntregue => entry.nao_entregues += 1,
            DeliveryStatus::Outro => entry.outros += 1,
        }
    }
    let mut rows: Vec<MotoristaPerformance> =
        order.iter().map(|key| buckets[key].clone()).collect();
    rows.sort_by(|a, b| b.total().cmp(&a.total()));
    rows
}

/// Narrows the full collection to one driver/base pair, or to a whole
/// base when `view_base` is set.
pub fn filter_docs(docs: &[OrderDoc], correio: &str, base: &str, view_base: bool) -> Vec<OrderDoc> {
    docs.iter()
        .filter(|doc| {
            let doc_base = doc.field(BASE_KEY);
            if view_base {
                doc_base.trim() == base
            } else {
                doc.field(CORREIO_KEY).trim() == correio && doc_base.trim() == base
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(correio: &str, base: &str, marca: &str) -> OrderDoc {
        serde_json::from_value(json!({
            CORREIO_KEY: correio,
            BASE_KEY: base,
            MARCA_KEY: marca,
        }))
        .unwrap()
    }

    #[test]
    fn test_stats_counts_and_percentages() {
        let docs = vec![
            doc("A", "X", "Recebimento com assinatura normal"),
            doc("A", "X", "Recebimento com assinatura normal"),
            doc("A", "X", "Não entregue"),
            doc("A", "X", "Em rota"),
        ];
        let s = stats(&docs);
        assert_eq!(s.total, 4);
        assert_eq!(s.entregues, 2);
        assert_eq!(s.nao_entregues, 1);
        assert_eq!(s.outros, 1);
        assert_eq!(s.pct_entregues, 50);
        assert_eq!(s.pct_nao_entregues, 25);
    }

    #[test]
    fn test_stats_empty() {
        let s = stats(&[]);
        assert_eq!(s, EvolucaoStats::default());
    }

    #[test]
    fn test_performance_sorted_by_total() {
        let docs = vec![
            doc("A", "X", "Em rota"),
            doc("B", "X", "Não entregue"),
            doc("B", "X", "Recebimento com assinatura normal"),
            doc(" ", "X", "Em rota"),
        ];
        let rows = performance_por_motorista(&docs);
        assert_eq!(rows[0].motorista, "B");
        assert_eq!(rows[0].total(), 2);
        assert!(rows.iter().any(|r| r.motorista == "—"));
    }

    #[test]
    fn test_filter_docs_pair_vs_base() {
        let docs = vec![
            doc("A", "X", "Em rota"),
            doc("B", "X", "Em rota"),
            doc("A", "Y", "Em rota"),
        ];
        assert_eq!(filter_docs(&docs, "A", "X", false).len(), 1);
        assert_eq!(filter_docs(&docs, "", "X", true).len(), 2);
    }
}
