//! Rule based polarity scoring for short informal Vietnamese text.
//!
//! One pass over the normalized tokens votes each lexicon hit into a positive
//! or negative bucket, then exclamation marks and emoji from the raw text
//! adjust the vote differential before it is squashed into `[-1, 1]`.

pub mod lexicon;
pub mod topics;

use serde::{Deserialize, Serialize};
use std::fmt;
use text_normalize::{normalize, tokenize};

use lexicon::{count_glyphs, is_booster, is_dampener, is_negator, NEGATIVE_EMOJI, POSITIVE_EMOJI};

pub const BOOSTER_WEIGHT: f64 = 1.25;
pub const DAMPENER_WEIGHT: f64 = 0.8;
/// How many tokens before a hit are searched for a negator.
pub const NEGATION_WINDOW: usize = 3;
pub const EXCLAMATION_STEP: f64 = 0.1;
pub const EXCLAMATION_CAP: f64 = 0.5;
pub const POSITIVE_EMOJI_STEP: f64 = 0.15;
pub const NEGATIVE_EMOJI_STEP: f64 = 0.2;
/// Divisor applied before clamping.
pub const SCORE_SCALE: f64 = 3.0;
pub const LABEL_THRESHOLD: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Pos,
    Neg,
    Neu,
}

impl Label {
    /// `pos` above the threshold, `neg` below its negation, `neu` otherwise.
    pub fn from_score(score: f64) -> Self {
        if score > LABEL_THRESHOLD {
            Label::Pos
        } else if score < -LABEL_THRESHOLD {
            Label::Neg
        } else {
            Label::Neu
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Pos => "pos",
            Label::Neg => "neg",
            Label::Neu => "neu",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub id: String,
    pub label: Label,
    pub score: f64,
}

/// A token that matched the polarity lexicon and how it was voted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenHit {
    pub index: usize,
    pub token: String,
    /// Lexicon polarity before context (`1` or `-1`).
    pub polarity: i8,
    pub weight: f64,
    pub negated: bool,
    /// Bucket the hit landed in (`1` or `-1`).
    pub vote: i8,
}

/// Every intermediate value of a scoring run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub normalized: String,
    pub tokens: Vec<String>,
    pub hits: Vec<TokenHit>,
    pub positive_votes: u32,
    pub negative_votes: u32,
    pub raw: f64,
    pub exclamations: usize,
    pub exclamation_multiplier: f64,
    pub emoji_delta: f64,
    pub score: f64,
    pub label: Label,
}

/// Score `text` and keep the whole trail.
pub fn explain(text: &str) -> ScoreBreakdown {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);

    let mut hits = Vec::new();
    let (mut p, mut n) = (0u32, 0u32);
    for (i, tok) in tokens.iter().enumerate() {
        let hit = lexicon::polarity(tok);
        if hit == 0 {
            continue;
        }

        let mut weight = 1.0;
        if i > 0 {
            let prev = tokens[i - 1].as_str();
            if is_booster(prev) {
                weight *= BOOSTER_WEIGHT;
            }
            if is_dampener(prev) {
                weight *= DAMPENER_WEIGHT;
            }
        }
        let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i].iter().any(|t| is_negator(t));

        // weight only ever decides the bucket, a vote always counts as one
        let signed = f64::from(hit) * weight * if negated { -1.0 } else { 1.0 };
        let vote = if signed > 0.0 {
            p += 1;
            1
        } else {
            n += 1;
            -1
        };
        hits.push(TokenHit { index: i, token: tok.clone(), polarity: hit, weight, negated, vote });
    }

    let raw = f64::from(p) - f64::from(n);
    let exclamations = text.matches('!').count();
    let exclamation_multiplier = exclamation_multiplier(exclamations);
    let emoji_delta = emoji_delta(text);
    let score = ((raw * exclamation_multiplier + emoji_delta) / SCORE_SCALE).clamp(-1.0, 1.0);

    ScoreBreakdown {
        normalized,
        tokens,
        hits,
        positive_votes: p,
        negative_votes: n,
        raw,
        exclamations,
        exclamation_multiplier,
        emoji_delta,
        score,
        label: Label::from_score(score),
    }
}

/// Score one item. `lang` is accepted for the wire contract only.
pub fn analyze_one(id: &str, text: &str, _lang: &str) -> SentimentResult {
    let b = explain(text);
    SentimentResult { id: id.to_string(), label: b.label, score: b.score }
}

/// `1 + min(0.5, 0.1 * count)`, or exactly `1` without any `!`.
pub fn exclamation_multiplier(count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    1.0 + EXCLAMATION_CAP.min(count as f64 * EXCLAMATION_STEP)
}

/// Additive emoji adjustment, each direction capped at 1.
pub fn emoji_delta(text: &str) -> f64 {
    let plus = count_glyphs(text, POSITIVE_EMOJI) as f64;
    let minus = count_glyphs(text, NEGATIVE_EMOJI) as f64;
    1.0f64.min(plus * POSITIVE_EMOJI_STEP) - 1.0f64.min(minus * NEGATIVE_EMOJI_STEP)
}
