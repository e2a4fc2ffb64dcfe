pub mod page;
pub mod stats;

pub use page::EvolucaoPage;
