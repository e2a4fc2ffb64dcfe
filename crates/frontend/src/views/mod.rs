pub mod evolucao;
pub mod login;
pub mod resultados;
pub mod sla;
pub mod telefones;
