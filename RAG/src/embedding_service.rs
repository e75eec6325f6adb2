use crate::models::*;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

const VOCABULARY_SIZE: usize = 1000;
const MIN_DIMENSIONS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct EmbeddingService {
    vocabulary: HashMap<String, usize>,
    idf_scores: HashMap<String, f32>,
}

impl EmbeddingService {
    pub fn fit(documents: &mut [Document]) -> Self {
        log::info!("Generating embeddings for all document chunks...");

        let mut word_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_frequencies: HashMap<String, usize> = HashMap::new();
        let total_chunks = documents.iter().map(|d| d.chunks.len()).sum::<usize>();

        for document in documents.iter() {
            for chunk in &document.chunks {
                let words = tokenize(&chunk.content);
                let unique_words: HashSet<&String> = words.iter().collect();

                for word in &words {
                    *word_counts.entry(word.clone()).or_insert(0) += 1;
                }

                for word in unique_words {
                    *doc_frequencies.entry(word.clone()).or_insert(0) += 1;
                }
            }
        }

        // Smoothed so a term present in every chunk still carries weight.
        let idf_scores: HashMap<String, f32> = doc_frequencies
            .iter()
            .map(|(word, df)| {
                let idf = ((1.0 + total_chunks as f32) / (1.0 + *df as f32)).ln() + 1.0;
                (word.clone(), idf)
            })
            .collect();

        let mut word_freq_pairs: Vec<_> = word_counts.iter().collect();
        word_freq_pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let vocabulary: HashMap<String, usize> = word_freq_pairs
            .into_iter()
            .take(VOCABULARY_SIZE)
            .enumerate()
            .map(|(idx, (word, _))| (word.clone(), idx))
            .collect();

        let service = Self {
            vocabulary,
            idf_scores,
        };

        for document in documents.iter_mut() {
            document.chunks.par_iter_mut().for_each(|chunk| {
                chunk.embedding = Some(service.create_tfidf_embedding(&chunk.content));
            });
            log::info!("Generated embeddings for document: {}", document.filename);
        }

        service
    }

    pub fn embed_query(&self, query: &str) -> Vec<f32> {
        self.create_tfidf_embedding(query)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn create_tfidf_embedding(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0; self.vocabulary.len().max(MIN_DIMENSIONS)];
        let words = tokenize(text);
        if words.is_empty() {
            return embedding;
        }

        let total_words = words.len() as f32;

        for (word, count) in count_words(&words) {
            if let Some(&idx) = self.vocabulary.get(&word) {
                let tf = count as f32 / total_words;
                let idf = self.idf_scores.get(&word).copied().unwrap_or(1.0);
                embedding[idx] = tf * idf;
            }
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in embedding.iter_mut() {
                *value /= norm;
            }
        }

        embedding
    }

    pub fn calculate_similarity(&self, embedding1: &[f32], embedding2: &[f32]) -> f32 {
        let min_len = embedding1.len().min(embedding2.len());

        let dot_product: f32 = embedding1[..min_len]
            .iter()
            .zip(embedding2[..min_len].iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm1: f32 = embedding1[..min_len].iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm2: f32 = embedding2[..min_len].iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm1 == 0.0 || norm2 == 0.0 {
            0.0
        } else {
            dot_product / (norm1 * norm2)
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| word.chars().count() > 2)
        .collect()
}

fn count_words(words: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> DocumentChunk {
        DocumentChunk {
            id: content.to_string(),
            content: content.to_string(),
            start_position: 0,
            end_position: content.len(),
            embedding: None,
        }
    }

    fn document(chunks: &[&str]) -> Document {
        Document {
            id: "doc".to_string(),
            filename: "doc.pdf".to_string(),
            content: chunks.join(" "),
            chunks: chunks.iter().map(|c| chunk(c)).collect(),
        }
    }

    #[test]
    fn tokenize_lowercases_and_drops_short_words() {
        assert_eq!(tokenize("The CAT, an ox!"), vec!["the", "cat"]);
    }

    #[test]
    fn fit_embeds_every_chunk() {
        let mut docs = vec![document(&["apples grow on trees", "rivers flow to the sea"])];
        let service = EmbeddingService::fit(&mut docs);

        assert!(service.vocabulary_len() > 0);
        assert!(docs[0].chunks.iter().all(|c| c.embedding.is_some()));
    }

    #[test]
    fn query_is_closest_to_matching_chunk() {
        let mut docs = vec![document(&[
            "apples grow on trees in the orchard",
            "rivers flow downhill into the sea",
        ])];
        let service = EmbeddingService::fit(&mut docs);

        let query = service.embed_query("where do apples grow");
        let scores: Vec<f32> = docs[0]
            .chunks
            .iter()
            .map(|c| service.calculate_similarity(&query, c.embedding.as_ref().unwrap()))
            .collect();

        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn single_chunk_still_has_nonzero_embedding() {
        let mut docs = vec![document(&["only one chunk here"])];
        EmbeddingService::fit(&mut docs);

        let embedding = docs[0].chunks[0].embedding.as_ref().unwrap();
        assert!(embedding.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn similarity_of_zero_vector_is_zero() {
        let service = EmbeddingService::default();
        assert_eq!(service.calculate_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
