pub mod assistant;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod view;

pub use assistant::{Assistant, NO_FILE_ALERT};
pub use client::AssistantClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use models::{AskResponse, HealthResponse, PdfFile, UploadResponse};
pub use view::{TerminalView, View};
