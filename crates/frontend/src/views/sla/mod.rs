pub mod derive;
pub mod page;

pub use page::SlaPage;
