use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::{
    IpVersion, Metadata, Proxy, ValidationError,
    defaults::{DEFAULT_HEALTH_CHECK_INTERVAL, DEFAULT_PROXY_PROVIDER_INTERVAL, DEFAULT_TEST_URL},
    is_valid_url,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub enum ProxyProvider {
    Http(HttpProxyProvider),
    File(FileProxyProvider),
    Inline(InlineProxyProvider),
}

impl Default for ProxyProvider {
    fn default() -> Self {
        ProxyProvider::Http(HttpProxyProvider::default())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct HealthCheck {
    pub enable: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<String>,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            enable: true,
            url: DEFAULT_TEST_URL.to_string(),
            interval: Some(DEFAULT_HEALTH_CHECK_INTERVAL),
            timeout: None,
            lazy: Some(true),
            expected_status: None,
        }
    }
}

/// Renames fetched proxies matching `pattern` (all of them when absent).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OverrideProxyName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub target: String,
}

/// Field overrides applied to every proxy a provider fetches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Override {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mptcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp_over_tcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialer_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_mark: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<IpVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_name: Option<Vec<OverrideProxyName>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyProviderCommon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#override: Option<Override>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialer_proxy: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct HttpProxyProvider {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub common: ProxyProviderCommon,
}

impl Default for HttpProxyProvider {
    fn default() -> Self {
        Self {
            url: String::new(),
            path: None,
            proxy: None,
            size_limit: Some(0),
            header: None,
            common: ProxyProviderCommon {
                interval: Some(DEFAULT_PROXY_PROVIDER_INTERVAL),
                health_check: Some(HealthCheck::default()),
                ..Default::default()
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InlineProxyProvider {
    pub payload: Vec<Proxy>,
    #[serde(flatten)]
    pub common: ProxyProviderCommon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct FileProxyProvider {
    pub path: String,
    #[serde(flatten)]
    pub common: ProxyProviderCommon,
}

impl ProxyProvider {
    pub fn common(&self) -> &ProxyProviderCommon {
        match self {
            ProxyProvider::Http(p) => &p.common,
            ProxyProvider::File(p) => &p.common,
            ProxyProvider::Inline(p) => &p.common,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ProxyProvider::Http(p) if !is_valid_url(&p.url) => {
                return Err(ValidationError::InvalidUrl {
                    field: "url",
                    value: p.url.clone(),
                });
            }
            ProxyProvider::File(p) if p.path.trim().is_empty() => {
                return Err(ValidationError::EmptyField { field: "path" });
            }
            ProxyProvider::Inline(p) if p.payload.is_empty() => {
                return Err(ValidationError::EmptyField { field: "payload" });
            }
            ProxyProvider::Inline(p) => p.payload.iter().try_for_each(Proxy::validate)?,
            _ => {}
        }
        match &self.common().health_check {
            Some(hc) if hc.enable && !is_valid_url(&hc.url) => Err(ValidationError::InvalidUrl {
                field: "health-check.url",
                value: hc.url.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProxyProviderData {
    pub name: String,
    pub proxy_provider: ProxyProvider,
    #[serde(default)]
    pub meta: Metadata,
}
