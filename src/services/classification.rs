//! Cost group suggestions from cost names
//!
//! Matches a cost name against keyword lists for production overhead and
//! operational spending. Keywords match whole words, and multi-word keywords
//! match as a phrase, so "fee" does not hit "Coffee Machine".

use serde::Serialize;
use std::fmt;

use crate::models::CostGroup;

/// Costs that belong in HPP (production overhead)
const COST_OF_GOODS_KEYWORDS: &[&str] = &[
    "oven",
    "kompor",
    "lpg",
    "bahan bakar",
    "sewa dapur",
    "listrik produksi",
    "air produksi",
    "produksi",
    "mesin",
    "coffee machine",
    "peralatan dapur",
    "koki",
    "baker",
    "barista",
    "packaging",
    "kemasan",
];

/// Costs of running the business, kept out of HPP
const OPERATIONAL_KEYWORDS: &[&str] = &[
    "marketing",
    "promo",
    "iklan",
    "admin",
    "kasir",
    "toko",
    "sewa tempat",
    "sewa toko",
    "internet",
    "telepon",
    "asuransi",
    "marketplace",
    "fee",
    "ongkir",
    "transport",
    "pajak",
    "akuntan",
    "kantor",
    "gaji karyawan",
];

/// How sure a suggestion is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Suggested group for a cost name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub suggested_group: Option<CostGroup>,
    pub confidence: Confidence,
    pub matched_keywords: Vec<String>,
}

/// Lowercase words separated by single spaces, padded for whole-word search
fn normalize(name: &str) -> String {
    let words: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}

fn matches<'k>(normalized: &str, keywords: &[&'k str]) -> Vec<&'k str> {
    keywords
        .iter()
        .copied()
        .filter(|kw| normalized.contains(&format!(" {} ", kw)))
        .collect()
}

/// Suggest a cost group from a cost name
///
/// One group matched: that group, medium confidence for a single keyword
/// and high for two or more. Both groups matched: low confidence, leaning to
/// the group with more matches (no suggestion on a tie). Nothing matched: no
/// suggestion.
pub fn classify(name: &str) -> Classification {
    let normalized = normalize(name);
    let cog = matches(&normalized, COST_OF_GOODS_KEYWORDS);
    let ops = matches(&normalized, OPERATIONAL_KEYWORDS);

    let (suggested_group, confidence) = match (cog.len(), ops.len()) {
        (0, 0) => (None, Confidence::Low),
        (n, 0) => (Some(CostGroup::CostOfGoods), confidence_for(n)),
        (0, n) => (Some(CostGroup::Operational), confidence_for(n)),
        (c, o) if c > o => (Some(CostGroup::CostOfGoods), Confidence::Low),
        (c, o) if o > c => (Some(CostGroup::Operational), Confidence::Low),
        _ => (None, Confidence::Low),
    };

    Classification {
        suggested_group,
        confidence,
        matched_keywords: cog.into_iter().chain(ops).map(String::from).collect(),
    }
}

fn confidence_for(matches: usize) -> Confidence {
    if matches >= 2 {
        Confidence::High
    } else {
        Confidence::Medium
    }
}
