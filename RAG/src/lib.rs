pub mod models;
pub mod document_processor;
pub mod embedding_service;
pub mod gemini_service;
pub mod qa_chain;

pub use models::*;
pub use document_processor::{ChunkingConfig, DocumentProcessor};
pub use embedding_service::EmbeddingService;
pub use gemini_service::{GeminiConfig, GeminiService};
pub use qa_chain::QaChain;
