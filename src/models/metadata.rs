use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a configuration entry came from.
///
/// Stored on the wire as a plain string. Every string starting with `Auto`
/// is an [`Source::Auto`] entry; the remainder of the string is kept as the
/// sub-kind so that e.g. `AutoRegion` round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Manual,
    Auto(String),
    Template,
    Invalid,
    /// Any other free-form value written by an older or newer dashboard.
    Other(String),
}

impl Source {
    /// Plain `Auto` without a sub-kind, used for region groups.
    pub fn auto() -> Self {
        Source::Auto(String::new())
    }

    /// System-generated entries carry the `Auto` prefix.
    pub fn is_system(&self) -> bool {
        matches!(self, Source::Auto(_))
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Source::Manual)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Source::Invalid)
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Source::Template)
    }

    pub fn is_region(&self) -> bool {
        matches!(self, Source::Auto(kind) if kind.is_empty())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Manual => write!(f, "Manual"),
            Source::Auto(kind) => write!(f, "Auto{kind}"),
            Source::Template => write!(f, "Template"),
            Source::Invalid => write!(f, "Invalid"),
            Source::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Manual" => Source::Manual,
            "Template" => Source::Template,
            "Invalid" => Source::Invalid,
            _ => match s.strip_prefix("Auto") {
                Some(kind) => Source::Auto(kind.to_string()),
                None => Source::Other(s.to_string()),
            },
        })
    }
}

impl Serialize for Source {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(source) = s.parse::<Source>();
        Ok(source)
    }
}

/// Provenance and lifecycle envelope shared by every configurable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub invisible_to: Vec<String>,
    #[serde(default)]
    pub remark: String,
    /// Unix seconds; `0` means never modified.
    #[serde(default)]
    pub time_modified: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patched: Option<bool>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            source: Source::Manual,
            disabled: false,
            invisible_to: Vec::new(),
            remark: String::new(),
            time_modified: 0,
            patched: Some(false),
        }
    }
}

impl Metadata {
    pub fn is_system(&self) -> bool {
        self.source.is_system()
    }

    pub fn is_visible_to(&self, context: &str) -> bool {
        !self.invisible_to.iter().any(|c| c == context)
    }

    /// Entries that take part in an export: enabled and not hidden from `viewer`.
    pub fn is_active_for(&self, viewer: Option<&str>) -> bool {
        !self.disabled && viewer.is_none_or(|v| self.is_visible_to(v))
    }
}
