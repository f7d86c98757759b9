use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::*;

/// `hosts:` entries map a domain to one address or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostValue {
    One(String),
    Many(Vec<String>),
}

impl HostValue {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            HostValue::One(v) => vec![v],
            HostValue::Many(v) => v,
        }
    }
}

/// The sections of a Clash configuration file this crate manages.
///
/// Top-level keys it does not manage (ports, `dns`, `tun`, ...) are kept in
/// `rest` and written back untouched.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashConfig {
    /// Proxy settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<Proxy>>,
    /// Proxy provider settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_providers: Option<BTreeMap<String, ProxyProvider>>,
    /// Proxy group settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_groups: Option<Vec<ProxyGroup>>,
    /// Rule provider settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_providers: Option<BTreeMap<String, RuleProvider>>,
    /// Rule lines, e.g. `DOMAIN-SUFFIX,google.com,Proxies`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    /// Static DNS overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<BTreeMap<String, HostValue>>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl ClashConfig {
    pub fn from_yaml(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
