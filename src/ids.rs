//! Namespacing of identifiers so records from all three backends share one id space.
//!
//! Every id leaving the aggregator looks like `<tag>-<native id>`. The hyphen can
//! also occur inside native ids (slugs); stripping only ever removes one literal
//! leading `"<tag>-"`, which is unambiguous because the tags are fixed constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SEPARATOR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    TruyenGG,
    MimiHentai,
    NHentai,
}

impl SourceTag {
    /// Fixed fan-out and concatenation order.
    pub const ALL: [SourceTag; 3] = [SourceTag::TruyenGG, SourceTag::MimiHentai, SourceTag::NHentai];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceTag::TruyenGG => "truyengg",
            SourceTag::MimiHentai => "mimihentai",
            SourceTag::NHentai => "nhentai",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SourceTag::TruyenGG => "TruyenGG",
            SourceTag::MimiHentai => "MimiHentai",
            SourceTag::NHentai => "NHentai",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceTag::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown source `{}` (expected truyengg, mimihentai, nhentai)", s))
    }
}

pub fn prefix(native_id: &str, tag: SourceTag) -> String {
    format!("{}{}{}", tag.as_str(), SEPARATOR, native_id)
}

/// Removes a leading `"<tag>-"`; ids without it are returned unchanged.
pub fn strip(id: &str, tag: SourceTag) -> &str {
    id.strip_prefix(tag.as_str())
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .unwrap_or(id)
}

pub fn detect_tag(id: &str) -> Option<SourceTag> {
    SourceTag::ALL.into_iter().find(|t| strip(id, *t).len() != id.len())
}
