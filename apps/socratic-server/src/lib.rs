//! SocraticStudy Server Library
//!
//! Backend for a PDF study companion: upload a PDF to get its page texts,
//! then summarize pages, listen to summaries, or ask questions grounded in
//! page context. The binary is in main.rs.
//!
//! # Modules
//!
//! - `cache`: Content-addressed summary cache
//! - `completion`: Chat-completion client (OpenRouter)
//! - `extract`: PDF text extraction (MuPDF)
//! - `speech`: Text-to-speech
//! - `storage`: Upload and media files on disk
//! - `routes`: HTTP endpoints

pub mod cache;
pub mod completion;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod speech;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
