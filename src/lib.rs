//! Chat with PDFs: upload documents to the hosted backend and ask questions about them.

pub mod api;
pub mod config;
pub mod session;
pub mod types;
pub mod ui;
pub mod views;
