//! Extractive summarization with TextRank over sentences
//!
//! Sentences are nodes of a weighted graph; the edge weight between two
//! sentences is their content word overlap normalised by
//! `ln|s1| + ln|s2|`. PageRank scores pick the top `floor(n * ratio)`
//! sentences, which are returned in document order, one per line.

use std::collections::HashSet;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordSet;
use super::Summarizer;
use crate::error::CapabilityError;

#[derive(Debug, Clone)]
pub struct TextRankSummarizer {
    stopwords: Arc<StopwordSet>,
    damping: f64,
    max_iterations: usize,
    threshold: f64,
}

impl TextRankSummarizer {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            stopwords,
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }

    fn content_words(&self, sentence: &str) -> HashSet<String> {
        sentence
            .unicode_words()
            .map(|w| w.to_lowercase())
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }

    /// Symmetric similarity matrix of the sentence graph
    fn similarity_matrix(&self, sentences: &[&str]) -> Vec<Vec<f64>> {
        let words: Vec<HashSet<String>> =
            sentences.iter().map(|s| self.content_words(s)).collect();
        let n = sentences.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let weight = similarity(&words[i], &words[j]);
                matrix[i][j] = weight;
                matrix[j][i] = weight;
            }
        }

        matrix
    }

    /// PageRank by power iteration; nodes without edges spread their mass evenly
    fn rank(&self, matrix: &[Vec<f64>]) -> Vec<f64> {
        let n = matrix.len();
        if n == 0 {
            return Vec::new();
        }

        let totals: Vec<f64> = matrix.iter().map(|row| row.iter().sum()).collect();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];

        for _ in 0..self.max_iterations {
            let dangling: f64 = (0..n).filter(|&i| totals[i] == 0.0).map(|i| scores[i]).sum();
            next.fill(teleport + self.damping * dangling / n as f64);

            for (node, &score) in scores.iter().enumerate() {
                if totals[node] > 0.0 {
                    for (neighbour, &weight) in matrix[node].iter().enumerate() {
                        if weight > 0.0 {
                            next[neighbour] += self.damping * score * weight / totals[node];
                        }
                    }
                }
            }

            let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut scores, &mut next);
            if delta <= self.threshold {
                break;
            }
        }

        scores
    }
}

fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let common = a.intersection(b).count();
    if common == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm <= 0.0 {
        return 0.0;
    }
    common as f64 / norm
}

pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl Summarizer for TextRankSummarizer {
    fn summarize(&self, text: &str, ratio: f64) -> Result<String, CapabilityError> {
        let sentences = split_sentences(text);
        if sentences.len() < 2 {
            return Err(CapabilityError::TooShort(format!(
                "summarization needs at least 2 sentences, got {}",
                sentences.len()
            )));
        }

        let count = (sentences.len() as f64 * ratio.clamp(0.0, 1.0)).floor() as usize;
        if count == 0 {
            return Ok(String::new());
        }

        let scores = self.rank(&self.similarity_matrix(&sentences));

        let mut order: Vec<usize> = (0..sentences.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

        let mut chosen: Vec<usize> = order.into_iter().take(count).collect();
        chosen.sort_unstable();

        Ok(chosen
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summarizer() -> TextRankSummarizer {
        TextRankSummarizer::new(Arc::new(StopwordSet::from_list(&[
            "the", "a", "is", "of", "and", "to", "in", "on", "it", "are",
        ])))
    }

    const ARTICLE: &str = "Rust is a systems programming language. \
        The Rust compiler checks memory safety at compile time. \
        Memory safety without garbage collection makes Rust programs fast. \
        Cats sleep most of the day. \
        Rust programs avoid data races through ownership and memory safety.";

    #[test]
    fn test_single_sentence_is_too_short() {
        let result = summarizer().summarize("Just one sentence here.", 0.4);
        assert!(matches!(result, Err(CapabilityError::TooShort(_))));
    }

    #[test]
    fn test_small_ratio_gives_empty_summary() {
        let summary = summarizer()
            .summarize("First sentence here. Second sentence there.", 0.4)
            .unwrap();
        assert_eq!(summary, "");
    }

    #[test]
    fn test_selects_central_sentences_in_order() {
        let summary = summarizer().summarize(ARTICLE, 0.4).unwrap();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(ARTICLE.contains(line));
        }
        assert!(!summary.contains("Cats"));

        let first = ARTICLE.find(lines[0]).unwrap();
        let second = ARTICLE.find(lines[1]).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_similarity() {
        let a: HashSet<String> = ["rust", "memory", "safety"].iter().map(|s| s.to_string()).collect();
        let b: HashSet<String> = ["memory", "safety", "fast"].iter().map(|s| s.to_string()).collect();
        let c: HashSet<String> = ["cats", "sleep"].iter().map(|s| s.to_string()).collect();

        let expected = 2.0 / (3f64.ln() + 3f64.ln());
        assert!((similarity(&a, &b) - expected).abs() < 1e-12);
        assert_eq!(similarity(&a, &c), 0.0);
    }

    #[test]
    fn test_rank_sums_to_one() {
        let s = summarizer();
        let sentences = split_sentences(ARTICLE);
        let scores = s.rank(&s.similarity_matrix(&sentences));
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);

        // the unconnected sentence ranks last
        let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(scores[3], min);
    }
}
