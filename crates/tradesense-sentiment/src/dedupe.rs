//! Exact-match deduplication of headlines.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::types::Headline;

/// Identity key for a headline: SHA-256 over the length-prefixed title and link.
///
/// Exact and case-sensitive. Headlines differing only in punctuation or
/// whitespace get different keys.
pub(crate) fn identity_key(headline: &Headline) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((headline.title.len() as u64).to_le_bytes());
    hasher.update(headline.title.as_bytes());
    hasher.update(headline.link.as_bytes());
    hasher.finalize().into()
}

/// Drop headlines whose `(title, link)` pair was already seen.
///
/// The first occurrence wins and survivors keep their relative order.
#[must_use]
pub fn dedupe(headlines: Vec<Headline>) -> Vec<Headline> {
    let mut seen: HashSet<[u8; 32]> = HashSet::with_capacity(headlines.len());
    headlines
        .into_iter()
        .filter(|h| seen.insert(identity_key(h)))
        .collect()
}
