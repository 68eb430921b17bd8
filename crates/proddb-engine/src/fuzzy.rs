//! Approximate string scoring.
//!
//! Distances live on a 0..=1 scale where 0.0 is an exact match; anything
//! above [`MatchOptions::threshold`] is not a candidate. Matching is
//! token-aware so multi-word queries can hit partial and reordered
//! substrings, not only exact containment.

use strsim::normalized_damerau_levenshtein;

/// Tuning knobs for the matcher.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Maximum acceptable distance. 0.3 keeps matches "up to ~30%
    /// dissimilar" on the normalized scale.
    pub threshold: f32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

/// Distance of a whole query against one text field.
///
/// Mean over query tokens of each token's best match among the field
/// tokens, so word order never matters and every query word must find some
/// plausible counterpart. 1.0 when either side has no tokens.
pub fn query_distance(query: &str, text: &str) -> f32 {
    let query_toks = tokenize(query);
    let field_toks = tokenize(text);
    if query_toks.is_empty() || field_toks.is_empty() {
        return 1.0;
    }
    let total: f32 = query_toks
        .iter()
        .map(|qt| {
            field_toks
                .iter()
                .map(|ft| token_distance(qt, ft))
                .fold(1.0_f32, f32::min)
        })
        .sum();
    total / query_toks.len() as f32
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distance between two lowercase tokens: 0.0 on equality, a
/// length-ratio-scaled penalty on substring containment (partial words),
/// otherwise the Damerau-Levenshtein complement (typos, transpositions).
fn token_distance(query_tok: &str, field_tok: &str) -> f32 {
    if query_tok == field_tok {
        return 0.0;
    }
    if field_tok.contains(query_tok) || query_tok.contains(field_tok) {
        let shorter = query_tok.chars().count().min(field_tok.chars().count()) as f32;
        let longer = query_tok.chars().count().max(field_tok.chars().count()) as f32;
        return 0.5 * (1.0 - shorter / longer);
    }
    1.0 - normalized_damerau_levenshtein(query_tok, field_tok) as f32
}
