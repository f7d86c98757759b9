use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Metadata, ValidationError, defaults::DEFAULT_RULE_PROVIDER_INTERVAL, is_valid_url};

/// A source of rules. The variant decides which location field is required:
/// `url` for `http`, `path` for `file` and `payload` for `inline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub enum RuleProvider {
    Http(HttpRuleProvider),
    File(FileRuleProvider),
    Inline(InlineRuleProvider),
}

impl Default for RuleProvider {
    fn default() -> Self {
        RuleProvider::Http(HttpRuleProvider::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderFormat {
    #[default]
    Yaml,
    Text,
    Mrs,
}

impl ProviderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFormat::Yaml => "yaml",
            ProviderFormat::Text => "text",
            ProviderFormat::Mrs => "mrs",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetBehavior {
    Domain,
    Ipcidr,
    #[default]
    Classical,
}

impl RuleSetBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSetBehavior::Domain => "domain",
            RuleSetBehavior::Ipcidr => "ipcidr",
            RuleSetBehavior::Classical => "classical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleProviderCommon {
    pub behavior: RuleSetBehavior,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ProviderFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<u64>,
}

impl Default for RuleProviderCommon {
    fn default() -> Self {
        Self {
            behavior: RuleSetBehavior::Classical,
            format: Some(ProviderFormat::Yaml),
            interval: Some(DEFAULT_RULE_PROVIDER_INTERVAL),
            size_limit: Some(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct HttpRuleProvider {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub common: RuleProviderCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileRuleProvider {
    pub path: String,
    #[serde(flatten)]
    pub common: RuleProviderCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InlineRuleProvider {
    pub payload: Vec<String>,
    #[serde(flatten)]
    pub common: RuleProviderCommon,
}

impl RuleProvider {
    pub fn common(&self) -> &RuleProviderCommon {
        match self {
            RuleProvider::Http(p) => &p.common,
            RuleProvider::File(p) => &p.common,
            RuleProvider::Inline(p) => &p.common,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            RuleProvider::Http(p) if !is_valid_url(&p.url) => Err(ValidationError::InvalidUrl {
                field: "url",
                value: p.url.clone(),
            }),
            RuleProvider::File(p) if p.path.trim().is_empty() => {
                Err(ValidationError::EmptyField { field: "path" })
            }
            RuleProvider::Inline(p) if p.payload.is_empty() => {
                Err(ValidationError::EmptyField { field: "payload" })
            }
            // mrs files only carry domain or ipcidr sets
            p if p.common().format == Some(ProviderFormat::Mrs)
                && p.common().behavior == RuleSetBehavior::Classical =>
            {
                Err(ValidationError::UnsupportedFormat {
                    format: ProviderFormat::Mrs.as_str(),
                    behavior: RuleSetBehavior::Classical.as_str(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RuleProviderData {
    pub name: String,
    pub rule_provider: RuleProvider,
    #[serde(default)]
    pub meta: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_per_type() {
        let yaml = "type: file\npath: ./rules/ads.yaml\nbehavior: domain\n";
        let provider: RuleProvider = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(&provider, RuleProvider::File(p) if p.path == "./rules/ads.yaml"));
        assert!(provider.validate().is_ok());

        let missing_path = "type: file\nbehavior: domain\n";
        assert!(serde_yaml::from_str::<RuleProvider>(missing_path).is_err());

        let missing_payload = "type: inline\nbehavior: classical\n";
        assert!(serde_yaml::from_str::<RuleProvider>(missing_payload).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            RuleProvider::default().validate(),
            Err(ValidationError::InvalidUrl { field: "url", .. })
        ));

        let inline = RuleProvider::Inline(InlineRuleProvider {
            payload: vec![],
            common: RuleProviderCommon::default(),
        });
        assert!(inline.validate().is_err());

        let mrs = RuleProvider::Http(HttpRuleProvider {
            url: "https://example.com/cn.mrs".to_string(),
            common: RuleProviderCommon {
                format: Some(ProviderFormat::Mrs),
                behavior: RuleSetBehavior::Classical,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(matches!(mrs.validate(), Err(ValidationError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_default_serialization() {
        let out = serde_yaml::to_string(&RuleProvider::default()).unwrap();
        assert!(out.starts_with("type: http\n"));
        assert!(out.contains("behavior: classical"));
        assert!(out.contains("format: yaml"));
        assert!(out.contains("interval: 600"));
        assert!(out.contains("size-limit: 0"));
    }
}
