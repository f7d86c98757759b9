//! Canonical values for new entries.
//!
//! Every entity's `Default` impl is the "new entry" an editor starts from.
//! Each call builds a fresh value, nested structures included.

use crate::*;

/// Health check target used by groups and providers.
pub const DEFAULT_TEST_URL: &str = "https://www.gstatic.com/generate_204";

/// Seconds between rule provider refreshes.
pub const DEFAULT_RULE_PROVIDER_INTERVAL: u64 = 600;

/// Seconds between proxy provider refreshes.
pub const DEFAULT_PROXY_PROVIDER_INTERVAL: u64 = 3600;

/// Seconds between provider health checks.
pub const DEFAULT_HEALTH_CHECK_INTERVAL: u64 = 300;

/// Kinds of entries the dashboard can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityKind {
    Metadata,
    Rule,
    Proxy,
    ProxyGroup,
    Host,
    RuleProvider,
    ProxyProvider,
}

impl EntityKind {
    /// YAML of the default entry of this kind.
    pub fn default_yaml(self) -> Result<String, Error> {
        let yaml = match self {
            EntityKind::Metadata => serde_yaml::to_string(&Metadata::default())?,
            EntityKind::Rule => serde_yaml::to_string(&RuleData::default())?,
            EntityKind::Proxy => serde_yaml::to_string(&Proxy::default())?,
            EntityKind::ProxyGroup => serde_yaml::to_string(&ProxyGroup::default())?,
            EntityKind::Host => serde_yaml::to_string(&HostData::default())?,
            EntityKind::RuleProvider => serde_yaml::to_string(&RuleProvider::default())?,
            EntityKind::ProxyProvider => serde_yaml::to_string(&ProxyProvider::default())?,
        };
        Ok(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let proxy = Proxy::default();
        assert_eq!(proxy.proxy_type, ProxyType::Ss);
        assert_eq!(proxy.port, 443);
        assert_eq!(proxy.udp, Some(false));
        assert_eq!(proxy.skip_cert_verify, Some(false));
        assert_eq!(proxy.ws_opts.as_ref().map(|o| o.path.as_str()), Some("/"));
        assert_eq!(proxy.smux.as_ref().map(|s| s.protocol), Some(SmuxProtocol::H2mux));

        let rule = RuleData::default();
        assert_eq!(rule.rule_type, RuleType::DomainSuffix);
        assert_eq!(rule.action, "DIRECT");
        assert!(rule.meta.source.is_manual());

        let group = ProxyGroup::default();
        assert_eq!(group.kind(), ProxyGroupKind::Select);
        assert_eq!(group.common().url.as_deref(), Some(DEFAULT_TEST_URL));
        assert_eq!(group.common().max_failed_times, Some(5));

        match RuleProvider::default() {
            RuleProvider::Http(p) => {
                assert_eq!(p.common.interval, Some(600));
                assert_eq!(p.common.behavior, RuleSetBehavior::Classical);
            }
            _ => panic!("Expected http rule provider"),
        }
    }

    #[test]
    fn test_fresh_copies() {
        let mut a = Proxy::default();
        a.ws_opts.as_mut().unwrap().path = "/changed".to_string();
        a.alpn.as_mut().unwrap().push("h2".to_string());
        let b = Proxy::default();
        assert_eq!(b.ws_opts.unwrap().path, "/");
        assert!(b.alpn.unwrap().is_empty());

        let mut host = HostData::default();
        host.meta.invisible_to.push("x".to_string());
        assert!(HostData::default().meta.invisible_to.is_empty());
    }

    #[test]
    fn test_default_yaml() {
        let yaml = EntityKind::ProxyGroup.default_yaml().unwrap();
        assert!(yaml.contains("type: select"));
        let yaml = EntityKind::Metadata.default_yaml().unwrap();
        assert!(yaml.contains("source: Manual"));
    }
}
