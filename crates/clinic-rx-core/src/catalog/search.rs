//! Catalog search.
//!
//! Substring matches on name or category come first, in catalog order. When
//! nothing matches literally, base names are scored with fuzzy similarity so
//! typos like "panadl" still find "Tab Panadol".

use strsim::{jaro_winkler, normalized_levenshtein};

use super::Catalog;
use crate::models::Medicine;

/// Maximum number of fuzzy suggestions returned.
const MAX_FUZZY_RESULTS: usize = 5;

/// A catalog entry with its match score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub medicine: &'a Medicine,
    /// 1.0 for literal matches, fuzzy similarity otherwise
    pub score: f64,
}

impl Catalog {
    /// Search by name or category.
    ///
    /// An empty term returns the whole catalog.
    pub fn search(&self, term: &str) -> Vec<SearchHit<'_>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self
                .medicines
                .iter()
                .map(|medicine| SearchHit {
                    medicine,
                    score: 1.0,
                })
                .collect();
        }

        let literal: Vec<SearchHit<'_>> = self
            .medicines
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.category.to_lowercase().contains(&needle)
            })
            .map(|medicine| SearchHit {
                medicine,
                score: 1.0,
            })
            .collect();

        if !literal.is_empty() {
            return literal;
        }

        let min_similarity = self.config.search_min_similarity;
        let mut fuzzy: Vec<SearchHit<'_>> = self
            .medicines
            .iter()
            .map(|medicine| SearchHit {
                medicine,
                score: score_name(medicine, &needle),
            })
            .filter(|hit| hit.score >= min_similarity)
            .collect();

        fuzzy.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fuzzy.truncate(MAX_FUZZY_RESULTS);

        tracing::debug!(term, hits = fuzzy.len(), "fuzzy catalog search");
        fuzzy
    }
}

/// Best similarity between the query and the base name or any of its words.
fn score_name(medicine: &Medicine, query: &str) -> f64 {
    let base = medicine.pack_info().base_name.to_lowercase();

    base.split_whitespace()
        .map(|word| fuzzy_match(query, word))
        .fold(fuzzy_match(query, &base), f64::max)
}

/// Compute fuzzy string similarity using combined metrics.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favors shared prefixes, Levenshtein overall edits
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}
