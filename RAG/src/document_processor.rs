use crate::models::*;
use anyhow::{bail, Context, Result};
use pdf_extract::extract_text_from_mem;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

// Sizes are in characters.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
    config: ChunkingConfig,
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn process_pdf(&self, file_path: &Path) -> Result<Document> {
        let filename = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());

        let bytes = fs::read(file_path)
            .with_context(|| format!("failed to read {}", file_path.display()))?;

        self.process_pdf_bytes(&filename, &bytes)
    }

    pub fn process_pdf_bytes(&self, filename: &str, bytes: &[u8]) -> Result<Document> {
        log::info!("Processing PDF: {} ({} bytes)", filename, bytes.len());

        let content = extract_text_from_mem(bytes)
            .with_context(|| format!("failed to extract text from {filename}"))?;

        self.process_text(filename, &content)
    }

    pub fn process_text(&self, filename: &str, content: &str) -> Result<Document> {
        let chunks = self.create_chunks(content);
        if chunks.is_empty() {
            bail!("no extractable text in {filename}");
        }

        log::info!("Created {} chunks for {}", chunks.len(), filename);

        Ok(Document {
            id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            content: content.to_string(),
            chunks,
        })
    }

    fn create_chunks(&self, content: &str) -> Vec<DocumentChunk> {
        let chunk_size = self.config.chunk_size.max(1);
        let overlap = self.config.overlap;
        let mut chunks = Vec::new();

        let cleaned_content = clean_text(content);
        let pieces = split_into_sentences(&cleaned_content)
            .into_iter()
            .flat_map(|sentence| {
                if sentence.chars().count() > chunk_size {
                    hard_split(&sentence, chunk_size)
                } else {
                    vec![sentence]
                }
            });

        let mut current_chunk = String::new();
        let mut start_pos = 0;

        for piece in pieces {
            let current_len = current_chunk.chars().count();

            if current_len + piece.chars().count() > chunk_size && !current_chunk.is_empty() {
                chunks.push(new_chunk(&current_chunk, start_pos));

                // Carry the tail of the finished chunk into the next one.
                let overlap_text = if current_len > overlap {
                    current_chunk.chars().skip(current_len - overlap).collect::<String>()
                } else {
                    current_chunk.clone()
                };

                start_pos = start_pos + current_len - overlap_text.chars().count();
                current_chunk = overlap_text + " " + &piece;
            } else {
                if !current_chunk.is_empty() {
                    current_chunk.push(' ');
                }
                current_chunk.push_str(&piece);
            }
        }

        if !current_chunk.trim().is_empty() {
            chunks.push(new_chunk(&current_chunk, start_pos));
        }

        chunks
    }
}

fn new_chunk(text: &str, start_pos: usize) -> DocumentChunk {
    DocumentChunk {
        id: Uuid::new_v4().to_string(),
        content: text.trim().to_string(),
        start_position: start_pos,
        end_position: start_pos + text.chars().count(),
        embedding: None,
    }
}

fn clean_text(text: &str) -> String {
    static RE_SPECIAL: OnceLock<Regex> = OnceLock::new();
    static RE_WHITESPACE: OnceLock<Regex> = OnceLock::new();

    let re_special = RE_SPECIAL
        .get_or_init(|| Regex::new(r"[^\w\s.,!?;:()\-\[\]{}]").expect("valid regex"));
    let re_whitespace = RE_WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));

    let cleaned = re_special.replace_all(text, " ");
    let cleaned = re_whitespace.replace_all(&cleaned, " ");

    cleaned.trim().to_string()
}

fn split_into_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn hard_split(sentence: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    chars
        .chunks(size)
        .map(|window| window.iter().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
