//! Grouping and aggregation over delivery rows.

use std::collections::HashMap;

use contracts::marks::{DeliveryMarks, DeliveryStatus, BASE_KEY, CORREIO_KEY, MARCA_KEY, SEM_BASE};
use contracts::sla::{BaseIndicador, MotoristaIndicador};
use contracts::tables::OrderDoc;

/// SLA percentage with one decimal place. Zero when no order reached an
/// outcome, never a division error.
pub fn percentual_sla(entregues: u64, nao_entregues: u64) -> f64 {
    let total = entregues + nao_entregues;
    if total == 0 {
        return 0.0;
    }
    (entregues as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Re-aggregates per-driver rows into one row per delivery base, in
/// first-seen base order. Runs on the filtered set, so the summary
/// always matches the table next to it.
pub fn agrupar_por_base(rows: &[MotoristaIndicador]) -> Vec<BaseIndicador> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, (u64, u64)> = HashMap::new();
    for m in rows {
        let base = m.base_display().to_string();
        let entry = buckets.entry(base.clone()).or_insert_with(|| {
            order.push(base);
            (0, 0)
        });
        entry.0 += m.total_entregues;
        entry.1 += m.nao_entregues;
    }
    order
        .into_iter()
        .map(|nome| {
            let (entregues, nao_entregues) = buckets[&nome];
            BaseIndicador {
                nome,
                total_entregues: entregues,
                nao_entregues,
                total: entregues + nao_entregues,
                percentual_sla: percentual_sla(entregues, nao_entregues),
            }
        })
        .collect()
}

/// Aggregate of one (driver, base) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EntregadorResumo {
    pub correio: String,
    pub base: String,
    pub entregues: u64,
    pub nao_entregues: u64,
    /// Orders in intermediate states, population only.
    pub outros: u64,
}

impl EntregadorResumo {
    /// Orders with an outcome.
    pub fn total(&self) -> u64 {
        self.entregues + self.nao_entregues
    }

    /// Every order of the pair, outcome or not.
    pub fn pedidos(&self) -> u64 {
        self.total() + self.outros
    }

    pub fn percentual(&self) -> f64 {
        percentual_sla(self.entregues, self.nao_entregues)
    }

    pub fn evolucao_display(&self) -> String {
        format!(
            "{} entregues / {} não entregues",
            self.entregues, self.nao_entregues
        )
    }
}

/// Groups motorista documents by (correio, base) in a single pass,
/// classifying each order's mark as it lands in its bucket. Result is
/// ordered by population descending; ties keep first-seen order.
pub fn agrupar_por_correio_base(docs: &[OrderDoc], marks: &DeliveryMarks) -> Vec<EntregadorResumo> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut buckets: HashMap<(String, String), EntregadorResumo> = HashMap::new();
    for doc in docs {
        let correio = doc.field(CORREIO_KEY).trim().to_string();
        let base = {
            let raw = doc.field(BASE_KEY);
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                SEM_BASE.to_string()
            } else {
                trimmed.to_string()
            }
        };
        let key = (correio.clone(), base.clone());
        let entry = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            EntregadorResumo {
                correio,
                base,
                entregues: 0,
                nao_entregues: 0,
                outros: 0,
            }
        });
        match marks.classify(&doc.field(MARCA_KEY)) {
            DeliveryStatus::Entregue => entry.entregues += 1,
            DeliveryStatus::NaoEntregue => entry.nao_entregues += 1,
            DeliveryStatus::Outro => entry.outros += 1,
        }
    }
    let mut grouped: Vec<EntregadorResumo> = order
        .iter()
        .map(|key| buckets[key].clone())
        .collect();
    grouped.sort_by(|a, b| b.pedidos().cmp(&a.pedidos()));
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::marks::{RESULTADOS_MARKS, SLA_MARKS};
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
    fn test_percentual_boundaries() {
        assert_eq!(percentual_sla(0, 0), 0.0);
        assert_eq!(percentual_sla(10, 0), 100.0);
        assert_eq!(percentual_sla(0, 10), 0.0);
        // 59/60 = 98.33..., one decimal after rounding
        assert_eq!(percentual_sla(59, 1), 98.3);
        assert_eq!(percentual_sla(1, 2), 33.3);
    }

    #[test]
    fn test_three_marks_one_pair() {
        let docs = vec![
            doc("A", "X", "Recebimento com assinatura normal"),
            doc("A", "X", "Não entregue"),
            doc("A", "X", "Em rota"),
        ];
        let grouped = agrupar_por_correio_base(&docs, &RESULTADOS_MARKS);
        assert_eq!(grouped.len(), 1);
        let g = &grouped[0];
        assert_eq!((g.entregues, g.nao_entregues, g.outros), (1, 1, 1));
        assert_eq!(g.total(), 2);
        assert_eq!(g.pedidos(), 3);
        assert_eq!(g.percentual(), 50.0);
    }

    #[test]
    fn test_grouping_conserves_outcomes() {
        let docs = vec![
            doc("A", "X", "Recebimento com assinatura normal"),
            doc("B", "X", "Não entregue"),
            doc("A", "Y", "Recebimento com assinatura normal"),
            doc("B", "X", "Recebimento com assinatura normal"),
            doc("C", "", "Em rota"),
        ];
        let grouped = agrupar_por_correio_base(&docs, &RESULTADOS_MARKS);
        let entregues: u64 = grouped.iter().map(|g| g.entregues).sum();
        let nao: u64 = grouped.iter().map(|g| g.nao_entregues).sum();
        let pedidos: u64 = grouped.iter().map(|g| g.pedidos()).sum();
        assert_eq!(entregues, 3);
        assert_eq!(nao, 1);
        assert_eq!(pedidos, docs.len() as u64);
    }

    #[test]
    fn test_blank_base_coalesces() {
        let docs = vec![doc("A", "  ", "Não entregue"), doc("A", "", "Em rota")];
        let grouped = agrupar_por_correio_base(&docs, &SLA_MARKS);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].base, SEM_BASE);
    }

    #[test]
    fn test_ordered_by_population_desc() {
        let docs = vec![
            doc("A", "X", "Em rota"),
            doc("B", "X", "Em rota"),
            doc("B", "X", "Em rota"),
        ];
        let grouped = agrupar_por_correio_base(&docs, &RESULTADOS_MARKS);
        assert_eq!(grouped[0].correio, "B");
        assert_eq!(grouped[1].correio, "A");
    }

    fn motorista(nome: &str, base: Option<&str>, e: u64, n: u64) -> MotoristaIndicador {
        MotoristaIndicador {
            nome: nome.into(),
            base: base.map(Into::into),
            total_entregues: e,
            nao_entregues: n,
            total: Some(e + n),
            percentual_sla: percentual_sla(e, n),
            ..Default::default()
        }
    }

    #[test]
    fn test_agrupar_por_base_sums_and_recomputes() {
        let rows = vec![
            motorista("a", Some("Norte"), 8, 2),
            motorista("b", Some("Norte"), 2, 0),
            motorista("c", None, 1, 1),
        ];
        let bases = agrupar_por_base(&rows);
        assert_eq!(bases.len(), 2);
        assert_eq!(bases[0].nome, "Norte");
        assert_eq!(bases[0].total, 12);
        assert_eq!(bases[0].percentual_sla, 83.3);
        assert_eq!(bases[1].nome, SEM_BASE);
        assert_eq!(bases[1].percentual_sla, 50.0);
    }
}
