//! TF-IDF vectorizer for passive-skill text.
//!
//! * Tokens are lowercase runs of two or more word characters.
//! * The vocabulary keeps the `max_features` most frequent terms across the
//!   corpus (ties broken alphabetically), indexed in alphabetical order.
//! * IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`.
//! * Vectors are L2-normalised.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    max_features: usize,
    /// Vocabulary terms; position is the column index.
    terms: Vec<String>,
    term_to_idx: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            terms: Vec::new(),
            term_to_idx: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Learns the vocabulary and IDF weights from `corpus`.
    pub fn fit(&mut self, corpus: &[&str]) {
        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let tokens = tokenize(doc);
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for tok in unique {
                *doc_freq.entry(tok.to_string()).or_insert(0) += 1;
            }
            for tok in tokens {
                *term_counts.entry(tok).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // Alphabetical column order.
        let selected: BTreeMap<String, usize> = ranked
            .into_iter()
            .map(|(term, _)| {
                let df = doc_freq.get(&term).copied().unwrap_or(0);
                (term, df)
            })
            .collect();

        let n = corpus.len() as f64;
        self.terms = Vec::with_capacity(selected.len());
        self.idf = Vec::with_capacity(selected.len());
        self.term_to_idx = HashMap::with_capacity(selected.len());
        for (idx, (term, df)) in selected.into_iter().enumerate() {
            self.idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            self.term_to_idx.insert(term.clone(), idx);
            self.terms.push(term);
        }
    }

    /// Normalised TF-IDF vector for `text`. All zeros if no term is known.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut v = vec![0.0; self.dimension()];
        for tok in tokenize(text) {
            if let Some(&idx) = self.term_to_idx.get(&tok) {
                v[idx] += 1.0;
            }
        }
        for (value, idf) in v.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let mag = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if mag > 0.0 {
            for value in &mut v {
                *value /= mag;
            }
        }
        v
    }

    /// Terms with non-zero weight in `vector`, heaviest first.
    pub fn inverse_transform(&self, vector: &[f64], limit: usize) -> Vec<(String, f64)> {
        let mut weighted: Vec<(String, f64)> = self
            .terms
            .iter()
            .zip(vector)
            .filter(|(_, &w)| w > 0.0)
            .map(|(t, &w)| (t.clone(), w))
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        weighted.truncate(limit);
        weighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        assert_eq!(tokenize("ATK +50% a Ki"), vec!["atk", "50", "ki"]);
    }

    #[test]
    fn test_fit_caps_vocabulary() {
        let mut v = TfIdfVectorizer::new(2);
        v.fit(&["atk atk atk def def ki", "atk def ki ki"]);
        assert_eq!(v.dimension(), 2);
        // atk=4, def=3, ki=3 → atk plus the alphabetically first of the tie.
        assert_eq!(v.terms(), &["atk".to_string(), "def".to_string()]);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let mut v = TfIdfVectorizer::new(100);
        v.fit(&["ATK +50% when attacking", "DEF +30%", "Ki +2"]);
        let vec = v.transform("ATK +50% when attacking");
        let norm: f64 = vec.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_text_is_zero_vector() {
        let mut v = TfIdfVectorizer::new(100);
        v.fit(&["atk def"]);
        assert!(v.transform("zzz yyy").iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let mut v = TfIdfVectorizer::new(100);
        v.fit(&["atk boost", "atk guard", "atk rush"]);
        let vec = v.transform("atk boost");
        let terms = v.inverse_transform(&vec, 10);
        assert_eq!(terms[0].0, "boost");
        assert_eq!(terms[1].0, "atk");
    }

    #[test]
    fn test_inverse_transform_respects_limit() {
        let mut v = TfIdfVectorizer::new(100);
        v.fit(&["one two three four"]);
        let vec = v.transform("one two three four");
        assert_eq!(v.inverse_transform(&vec, 2).len(), 2);
    }

    #[test]
    fn test_unfitted_vectorizer_is_empty() {
        let v = TfIdfVectorizer::new(100);
        assert_eq!(v.dimension(), 0);
        assert!(v.transform("atk").is_empty());
    }
}
