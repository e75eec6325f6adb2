use crate::document_processor::DocumentProcessor;
use crate::embedding_service::EmbeddingService;
use crate::gemini_service::GeminiService;
use crate::models::*;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 4;

#[derive(Debug)]
pub struct QaChain {
    documents: Vec<Document>,
    embedding_service: EmbeddingService,
    gemini_service: Arc<GeminiService>,
    top_k: usize,
}

impl QaChain {
    pub fn build(document: Document, gemini_service: Arc<GeminiService>) -> Self {
        let mut documents = vec![document];
        let embedding_service = EmbeddingService::fit(&mut documents);

        Self {
            documents,
            embedding_service,
            gemini_service,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn from_pdf(
        processor: &DocumentProcessor,
        pdf_path: &Path,
        gemini_service: Arc<GeminiService>,
    ) -> Result<Self> {
        let document = processor.process_pdf(pdf_path)?;
        Ok(Self::build(document, gemini_service))
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn chunk_count(&self) -> usize {
        self.documents.iter().map(|d| d.chunks.len()).sum()
    }

    pub async fn invoke(&self, question: &str) -> Result<String> {
        let start_time = std::time::Instant::now();

        let relevant_chunks = self.retrieve(question);
        let context = format_chunks(&relevant_chunks);
        let prompt = build_prompt(question, &context);

        let answer = self.gemini_service.generate(&prompt).await?;

        log::info!(
            "Answered question using {} chunks in {} ms",
            relevant_chunks.len(),
            start_time.elapsed().as_millis()
        );
        Ok(answer)
    }

    // Equal scores keep document order.
    pub fn retrieve(&self, question: &str) -> Vec<ScoredChunk> {
        let query_embedding = self.embedding_service.embed_query(question);
        let mut chunk_scores: Vec<ScoredChunk> = Vec::new();

        for document in &self.documents {
            for chunk in &document.chunks {
                if let Some(chunk_embedding) = &chunk.embedding {
                    let score = self
                        .embedding_service
                        .calculate_similarity(&query_embedding, chunk_embedding);
                    chunk_scores.push(ScoredChunk {
                        chunk: chunk.clone(),
                        score,
                    });
                }
            }
        }

        chunk_scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        chunk_scores.truncate(self.top_k);

        log::debug!("Found {} relevant chunks", chunk_scores.len());
        chunk_scores
    }
}

fn format_chunks(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|scored| scored.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r#"Use the following pieces of context to answer the question at the end.
If you don't know the answer, just say that you don't know, don't try to make up an answer.

Context: {context}

Question: {question}

Answer: "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_places_context_before_question() {
        let prompt = build_prompt("What is it?", "It is a cat.");

        let context_at = prompt.find("Context: It is a cat.").unwrap();
        let question_at = prompt.find("Question: What is it?").unwrap();
        assert!(context_at < question_at);
        assert!(prompt.trim_end().ends_with("Answer:"));
    }

    #[test]
    fn chunks_are_joined_by_blank_lines() {
        let scored = |text: &str| ScoredChunk {
            chunk: DocumentChunk {
                id: text.to_string(),
                content: text.to_string(),
                start_position: 0,
                end_position: text.len(),
                embedding: None,
            },
            score: 1.0,
        };

        assert_eq!(format_chunks(&[scored("a"), scored("b")]), "a\n\nb");
    }
}
