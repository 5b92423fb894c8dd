//! Disaster-report tagging: which kinds of damage a post mentions, which
//! relief items it asks for, and the tokens worth counting for trends.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use text_normalize::{normalize, tokenize};

/// Ordered categories, each with the token sequences that signal it.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<(&'static str, Vec<Vec<String>>)>,
}

impl Taxonomy {
    /// Phrases may carry accents; they are folded the same way input text is.
    pub fn new(entries: &[(&'static str, &[&str])]) -> Self {
        let categories = entries
            .iter()
            .map(|(name, phrases)| {
                let phrases = phrases
                    .iter()
                    .map(|p| tokenize(&normalize(p)))
                    .filter(|toks| !toks.is_empty())
                    .collect();
                (*name, phrases)
            })
            .collect();
        Self { categories }
    }

    /// Categories with at least one phrase present as a contiguous token run,
    /// in taxonomy order.
    pub fn detect(&self, tokens: &[String]) -> Vec<&'static str> {
        self.categories
            .iter()
            .filter(|(_, phrases)| {
                phrases.iter().any(|p| tokens.windows(p.len()).any(|w| w == p.as_slice()))
            })
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|(name, _)| *name)
    }
}

const DAMAGE_PHRASES: &[(&str, &[&str])] = &[
    ("people_affected", &[
        "người chết", "tử vong", "mất tích", "bị thương", "nạn nhân", "thiệt mạng", "sơ tán",
    ]),
    ("economic_disruption", &["ngừng trệ", "gián đoạn", "nghỉ học", "cấm biển"]),
    ("housing_damage", &["nhà sập", "tốc mái", "ngập", "hư hỏng", "đổ nát", "vùi lấp"]),
    ("property_loss", &["tài sản", "xe máy", "ô tô", "gia súc", "mất trắng"]),
    ("infrastructure_damage", &["sập cầu", "sạt lở", "mất điện", "trường học", "bệnh viện", "đường"]),
];

const RELIEF_PHRASES: &[(&str, &[&str])] = &[
    ("shelter", &["chỗ ở", "lều", "tái định cư", "nhà tạm"]),
    ("transport", &["thuyền", "xuồng", "đi lại", "ùn tắc"]),
    ("food", &["gạo", "mì tôm", "lương thực", "nước uống", "thực phẩm"]),
    ("medical", &["thuốc", "bác sĩ", "cứu thương", "y tế"]),
    ("cash", &["tiền", "vốn", "vay", "ngân hàng"]),
];

pub static DAMAGE_TYPES: Lazy<Taxonomy> = Lazy::new(|| Taxonomy::new(DAMAGE_PHRASES));

pub static RELIEF_ITEMS: Lazy<Taxonomy> = Lazy::new(|| Taxonomy::new(RELIEF_PHRASES));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "va", "la", "cua", "co", "cho", "cac", "nhung", "mot", "da", "dang", "se", "thi", "ma",
        "nay", "do", "voi", "trong", "duoc", "de", "khi", "tai", "tu", "nhu", "ve", "bi", "o",
    ]
    .into_iter()
    .collect()
});

pub fn detect_damage_types(text: &str) -> Vec<&'static str> {
    DAMAGE_TYPES.detect(&tokenize(&normalize(text)))
}

pub fn detect_relief_items(text: &str) -> Vec<&'static str> {
    RELIEF_ITEMS.detect(&tokenize(&normalize(text)))
}

/// Lowercase `a-z0-9#` words longer than one character, stopwords removed.
pub fn trend_tokens(text: &str) -> Vec<String> {
    let cleaned: String = normalize(text)
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '#' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 1 && !STOPWORDS.contains(*w))
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopicReport {
    pub damage_types: Vec<&'static str>,
    pub relief_items: Vec<&'static str>,
    pub trends: Vec<String>,
}

pub fn topics(text: &str) -> TopicReport {
    let tokens = tokenize(&normalize(text));
    TopicReport {
        damage_types: DAMAGE_TYPES.detect(&tokens),
        relief_items: RELIEF_ITEMS.detect(&tokens),
        trends: trend_tokens(text),
    }
}
