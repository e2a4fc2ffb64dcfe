//! Delivery classification on the `Marca de assinatura` column.

use serde::{Deserialize, Serialize};

/// Column names of the motorista collection as imported from the sheets.
pub const CORREIO_KEY: &str = "Correio de coleta ou entrega";
pub const BASE_KEY: &str = "Base de entrega";
pub const MARCA_KEY: &str = "Marca de assinatura";
pub const NUMERO_JMS_KEY: &str = "Número de pedido JMS";

/// Bucket used when a row carries a blank delivery base.
pub const SEM_BASE: &str = "(sem base)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Entregue,
    NaoEntregue,
    /// Intermediate states (em rota, aguardando coleta, ...). They count
    /// toward a group's population but toward neither outcome.
    Outro,
}

/// Allow-lists deciding the outcome of one order. The delivered set is
/// compared case-insensitively; the not-delivered literal is an exact
/// match after trimming.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryMarks {
    pub delivered: &'static [&'static str],
    pub not_delivered: &'static str,
}

/// Marks counted as delivered by the SLA import (a signed devolution
/// still closes the order).
pub const SLA_MARKS: DeliveryMarks = DeliveryMarks {
    delivered: &[
        "Recebimento com assinatura normal",
        "Assinatura de devolução",
    ],
    not_delivered: "Não entregue",
};

/// Marks used by the consulta-results views, which only accept the
/// normal signature as delivered.
pub const RESULTADOS_MARKS: DeliveryMarks = DeliveryMarks {
    delivered: &["Recebimento com assinatura normal"],
    not_delivered: "Não entregue",
};

impl DeliveryMarks {
    pub fn classify(&self, marca: &str) -> DeliveryStatus {
        let trimmed = marca.trim();
        if trimmed == self.not_delivered {
            return DeliveryStatus::NaoEntregue;
        }
        let lowered = trimmed.to_lowercase();
        if self
            .delivered
            .iter()
            .any(|mark| mark.to_lowercase() == lowered)
        {
            return DeliveryStatus::Entregue;
        }
        DeliveryStatus::Outro
    }

    pub fn is_entregue(&self, marca: &str) -> bool {
        self.classify(marca) == DeliveryStatus::Entregue
    }

    pub fn is_nao_entregue(&self, marca: &str) -> bool {
        self.classify(marca) == DeliveryStatus::NaoEntregue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_delivered_case_insensitive() {
        assert!(SLA_MARKS.is_entregue("Recebimento com assinatura normal"));
        assert!(SLA_MARKS.is_entregue("  RECEBIMENTO COM ASSINATURA NORMAL  "));
        assert!(SLA_MARKS.is_entregue("assinatura de devolução"));
        assert!(!RESULTADOS_MARKS.is_entregue("Assinatura de devolução"));
    }

    #[test]
    fn test_classify_not_delivered_exact_after_trim() {
        assert!(SLA_MARKS.is_nao_entregue(" Não entregue "));
        assert!(!SLA_MARKS.is_nao_entregue("não entregue"));
        assert_eq!(
            SLA_MARKS.classify("não entregue"),
            DeliveryStatus::Outro
        );
    }

    #[test]
    fn test_classify_other_marks() {
        assert_eq!(SLA_MARKS.classify("Em rota"), DeliveryStatus::Outro);
        assert_eq!(SLA_MARKS.classify(""), DeliveryStatus::Outro);
    }
}
