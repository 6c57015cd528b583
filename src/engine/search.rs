//! Smart-search query parsing.
//!
//! A query is a whitespace-separated mix of `field:value` tokens and free
//! text, e.g. `stage:proposal country:chile acme`. Parsing is
//! position-independent: field tokens and free text may appear in any order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Field prefixes recognized by the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Country,
    Stage,
    Company,
    Owner,
    Tag,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Country,
        SearchField::Stage,
        SearchField::Company,
        SearchField::Owner,
        SearchField::Tag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Country => "country",
            SearchField::Stage => "stage",
            SearchField::Company => "company",
            SearchField::Owner => "owner",
            SearchField::Tag => "tag",
        }
    }
}

impl FromStr for SearchField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// Result of parsing a raw search string. All text is lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub fields: BTreeMap<SearchField, String>,
    pub free_text_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn field(&self, field: SearchField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Free-text terms joined into the single phrase used for matching.
    pub fn phrase(&self) -> Option<String> {
        if self.free_text_terms.is_empty() {
            None
        } else {
            Some(self.free_text_terms.join(" "))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.free_text_terms.is_empty()
    }
}

/// Parse a raw search string.
///
/// Any token containing a colon is withheld from the free text, even when
/// its field name is not recognized; such tokens are dropped entirely.
/// A recognized field with an empty value (`stage:`) applies no filter.
/// When a field repeats, the last occurrence wins.
pub fn parse(raw: &str) -> ParsedQuery {
    let lowered = raw.to_lowercase();
    let mut parsed = ParsedQuery::default();

    for token in lowered.split_whitespace() {
        match token.split_once(':') {
            Some((key, value)) => {
                let Ok(field) = key.parse::<SearchField>() else {
                    tracing::trace!(token, "dropping unrecognized field token");
                    continue;
                };
                if value.is_empty() {
                    parsed.fields.remove(&field);
                } else {
                    parsed.fields.insert(field, value.to_string());
                }
            }
            None => parsed.free_text_terms.push(token.to_string()),
        }
    }

    parsed
}
