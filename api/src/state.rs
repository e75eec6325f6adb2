use pdf_qa::{DocumentProcessor, GeminiService, QaChain};
use std::sync::Arc;
use tokio::sync::RwLock;

// At most one QA chain, replaced on each upload.
#[derive(Clone)]
pub struct AppState {
    qa: Arc<RwLock<Option<Arc<QaChain>>>>,
    pub gemini: Arc<GeminiService>,
    pub processor: DocumentProcessor,
}

impl AppState {
    pub fn new(gemini: Arc<GeminiService>) -> Self {
        Self {
            qa: Arc::new(RwLock::new(None)),
            gemini,
            processor: DocumentProcessor::new(),
        }
    }

    pub async fn install(&self, chain: QaChain) {
        *self.qa.write().await = Some(Arc::new(chain));
    }

    pub async fn current_chain(&self) -> Option<Arc<QaChain>> {
        self.qa.read().await.clone()
    }
}
