pub mod api;
pub mod auth;
pub mod clipboard;
pub mod components;
pub mod export;
pub mod notifications;
pub mod storage;
