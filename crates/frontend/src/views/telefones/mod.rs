pub mod page;

pub use page::TelefonesPage;
