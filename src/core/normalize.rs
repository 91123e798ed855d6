//! Organization name normalization
//!
//! Turns a free-text organization name into the [`CanonicalKey`] both sides
//! of the reconciliation are matched on. The steps run in a fixed order:
//!
//! 1. lower-case the whole string
//! 2. drop every character that is not a letter, digit or whitespace
//! 3. strip legal-suffix tokens ("Ltd", "GmbH", "S.r.l.", ...) from the end
//! 4. remove a trailing break-apart "s r l" / "s.à r.l." form
//! 5. remove all whitespace
//!
//! [`WhitespaceOrder::BeforeSuffix`] moves step 5 ahead of step 3. Suffixes
//! are then matched as string endings of the collapsed name, but only where
//! the ending starts at a former word break, so "S R L" strips like "SRL"
//! while "Thomas" keeps its "as".
//!
//! ```
//! use proprietor_recon::core::normalize::normalize;
//!
//! assert_eq!(normalize("Acme Ltd."), normalize("ACME LIMITED"));
//! assert_eq!(normalize("Ajax S.r.l.").as_str(), "ajax");
//! ```

use crate::domain::ids::{CanonicalKey, SourceId};
use crate::domain::records::NormalizedRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, OnceLock};

/// Legal-suffix vocabulary, written the way names look after steps 1 and 2
pub const LEGAL_SUFFIXES: &[&str] = &[
    // English-speaking jurisdictions
    "ltd",
    "limited",
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "llc",
    "llp",
    "lllp",
    "lp",
    "plc",
    "ulc",
    "pte",
    "pty",
    "pte ltd",
    "pty ltd",
    "limited liability company",
    "limited partnership",
    "public limited company",
    // Continental Europe
    "gmbh",
    "ag",
    "kg",
    "sa",
    "sas",
    "sarl",
    "srl",
    "spa",
    "sl",
    "bv",
    "nv",
    "se",
    "ab",
    "as",
    "asa",
    "aps",
    "oy",
    "oyj",
    "lda",
    "sro",
    "kft",
    "sp z oo",
    // Elsewhere
    "sal",
    "kk",
    "bhd",
    "sdn bhd",
    "sa de cv",
    "s de rl",
];

static RESIDUAL_SRL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+s(?:\s+\w?\s*|\w?\s+)r\s*l$").expect("residual suffix pattern is valid")
});

static DEFAULT_NORMALIZER: OnceLock<NameNormalizer> = OnceLock::new();

/// Where whitespace removal runs relative to suffix stripping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceOrder {
    /// Strip suffix tokens first, then collapse whitespace
    #[default]
    AfterSuffix,
    /// Collapse whitespace first, then strip suffixes as string endings
    BeforeSuffix,
}

impl fmt::Display for WhitespaceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhitespaceOrder::AfterSuffix => write!(f, "after_suffix"),
            WhitespaceOrder::BeforeSuffix => write!(f, "before_suffix"),
        }
    }
}

impl FromStr for WhitespaceOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "after_suffix" => Ok(WhitespaceOrder::AfterSuffix),
            "before_suffix" => Ok(WhitespaceOrder::BeforeSuffix),
            other => Err(format!(
                "Invalid whitespace order '{other}'. Must be one of: after_suffix, before_suffix"
            )),
        }
    }
}

/// Name normalizer with a compiled suffix vocabulary
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    order: WhitespaceOrder,
    /// Token sequences, longest first
    suffix_tokens: Vec<Vec<String>>,
    /// The same entries with whitespace removed, longest first
    suffix_strings: Vec<String>,
}

impl NameNormalizer {
    /// Build a normalizer from the built-in vocabulary plus `extra_suffixes`
    ///
    /// Extra entries go through lower-casing and punctuation removal, so
    /// `"S.p.A."` and `"spa"` are the same entry.
    pub fn new(order: WhitespaceOrder, extra_suffixes: &[String]) -> Self {
        let mut suffix_tokens: Vec<Vec<String>> = LEGAL_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .chain(extra_suffixes.iter().map(|s| strip_punctuation(&s.to_lowercase())))
            .map(|s| s.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|tokens| !tokens.is_empty())
            .collect();
        suffix_tokens.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| b.concat().len().cmp(&a.concat().len()))
                .then_with(|| a.cmp(b))
        });
        suffix_tokens.dedup();

        let mut suffix_strings: Vec<String> = suffix_tokens.iter().map(|t| t.concat()).collect();
        suffix_strings.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        suffix_strings.dedup();

        Self {
            order,
            suffix_tokens,
            suffix_strings,
        }
    }

    /// The configured whitespace order
    pub fn order(&self) -> WhitespaceOrder {
        self.order
    }

    /// Number of distinct vocabulary entries
    pub fn vocabulary_len(&self) -> usize {
        self.suffix_tokens.len()
    }

    /// Normalize a raw name into its canonical key
    pub fn normalize(&self, raw: impl AsRef<str>) -> CanonicalKey {
        let cleaned = strip_punctuation(&raw.as_ref().to_lowercase());

        let key = match self.order {
            WhitespaceOrder::AfterSuffix => {
                let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
                self.strip_suffix_tokens(&mut tokens);
                let joined = tokens.join(" ");
                let residual_removed = RESIDUAL_SRL.replace(&joined, "");
                remove_whitespace(&residual_removed)
            }
            WhitespaceOrder::BeforeSuffix => {
                let (mut collapsed, breaks) = collapse_with_breaks(&cleaned);
                self.strip_suffix_strings(&mut collapsed, &breaks);
                // No whitespace is left, so the residual pattern cannot match.
                RESIDUAL_SRL.replace(&collapsed, "").into_owned()
            }
        };

        CanonicalKey::from_normalized(key)
    }

    /// Normalize a possibly-null cell; `None` yields the empty key
    pub fn normalize_opt(&self, raw: Option<&str>) -> CanonicalKey {
        self.normalize(raw.unwrap_or_default())
    }

    /// Admit a record into the key space
    ///
    /// Returns `None` when the display name is blank after trimming or when
    /// nothing survives normalization (a name made only of punctuation), so
    /// an empty key can never match another empty key.
    pub fn record<A>(
        &self,
        source_id: SourceId,
        display_name: &str,
        attributes: A,
    ) -> Option<NormalizedRecord<A>> {
        if display_name.trim().is_empty() {
            return None;
        }

        let key = self.normalize(display_name);
        if key.is_empty() {
            tracing::debug!(
                source_id = %source_id,
                display_name = %display_name,
                "Name normalized to an empty key, dropping record"
            );
            return None;
        }

        Some(NormalizedRecord::from_parts(
            source_id,
            display_name.to_string(),
            key,
            attributes,
        ))
    }

    fn strip_suffix_tokens(&self, tokens: &mut Vec<&str>) {
        'strip: loop {
            for suffix in &self.suffix_tokens {
                // Never strip the whole name
                if tokens.len() <= suffix.len() {
                    continue;
                }
                let tail = &tokens[tokens.len() - suffix.len()..];
                if tail.iter().zip(suffix).all(|(token, entry)| *token == entry.as_str()) {
                    tokens.truncate(tokens.len() - suffix.len());
                    continue 'strip;
                }
            }
            break;
        }
    }

    /// `breaks` holds the byte offsets in `name` where a word used to start
    fn strip_suffix_strings(&self, name: &mut String, breaks: &[usize]) {
        'strip: loop {
            for suffix in &self.suffix_strings {
                if name.len() <= suffix.len() || !name.ends_with(suffix.as_str()) {
                    continue;
                }
                let cut = name.len() - suffix.len();
                if breaks.contains(&cut) {
                    name.truncate(cut);
                    continue 'strip;
                }
            }
            break;
        }
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(WhitespaceOrder::default(), &[])
    }
}

/// Normalize with the default vocabulary and whitespace order
pub fn normalize(raw: impl AsRef<str>) -> CanonicalKey {
    DEFAULT_NORMALIZER
        .get_or_init(NameNormalizer::default)
        .normalize(raw)
}

fn strip_punctuation(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

fn remove_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Remove whitespace, recording where each word after the first began
fn collapse_with_breaks(input: &str) -> (String, Vec<usize>) {
    let mut collapsed = String::with_capacity(input.len());
    let mut breaks = Vec::new();
    for (i, word) in input.split_whitespace().enumerate() {
        if i > 0 {
            breaks.push(collapsed.len());
        }
        collapsed.push_str(word);
    }
    (collapsed, breaks)
}
