use serde::{Deserialize, Serialize};

use crate::{Metadata, ValidationError, defaults::DEFAULT_TEST_URL};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub enum ProxyGroup {
    Select(SelectGroup),
    Relay(RelayGroup),
    Fallback(FallbackGroup),
    UrlTest(UrlTestGroup),
    LoadBalance(LoadBalanceGroup),
    Smart(SmartGroup),
}

impl Default for ProxyGroup {
    fn default() -> Self {
        ProxyGroup::Select(SelectGroup::default())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyGroupKind {
    Select,
    Relay,
    Fallback,
    UrlTest,
    LoadBalance,
    Smart,
}

impl ProxyGroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupKind::Select => "select",
            ProxyGroupKind::Relay => "relay",
            ProxyGroupKind::Fallback => "fallback",
            ProxyGroupKind::UrlTest => "url-test",
            ProxyGroupKind::LoadBalance => "load-balance",
            ProxyGroupKind::Smart => "smart",
        }
    }
}

impl ProxyGroup {
    pub fn kind(&self) -> ProxyGroupKind {
        match self {
            ProxyGroup::Select(_) => ProxyGroupKind::Select,
            ProxyGroup::Relay(_) => ProxyGroupKind::Relay,
            ProxyGroup::Fallback(_) => ProxyGroupKind::Fallback,
            ProxyGroup::UrlTest(_) => ProxyGroupKind::UrlTest,
            ProxyGroup::LoadBalance(_) => ProxyGroupKind::LoadBalance,
            ProxyGroup::Smart(_) => ProxyGroupKind::Smart,
        }
    }

    pub fn common(&self) -> &ProxyGroupCommon {
        match self {
            ProxyGroup::Select(g) => &g.common,
            ProxyGroup::Relay(g) => &g.common,
            ProxyGroup::Fallback(g) => &g.common,
            ProxyGroup::UrlTest(g) => &g.common,
            ProxyGroup::LoadBalance(g) => &g.common,
            ProxyGroup::Smart(g) => &g.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ProxyGroupCommon {
        match self {
            ProxyGroup::Select(g) => &mut g.common,
            ProxyGroup::Relay(g) => &mut g.common,
            ProxyGroup::Fallback(g) => &mut g.common,
            ProxyGroup::UrlTest(g) => &mut g.common,
            ProxyGroup::LoadBalance(g) => &mut g.common,
            ProxyGroup::Smart(g) => &mut g.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// Switches the group to another kind, keeping the shared fields.
    /// Kind-specific fields start from their defaults.
    pub fn with_kind(self, kind: ProxyGroupKind) -> ProxyGroup {
        let common = match self {
            ProxyGroup::Select(g) => g.common,
            ProxyGroup::Relay(g) => g.common,
            ProxyGroup::Fallback(g) => g.common,
            ProxyGroup::UrlTest(g) => g.common,
            ProxyGroup::LoadBalance(g) => g.common,
            ProxyGroup::Smart(g) => g.common,
        };
        match kind {
            ProxyGroupKind::Select => ProxyGroup::Select(SelectGroup { common }),
            ProxyGroupKind::Relay => ProxyGroup::Relay(RelayGroup { common }),
            ProxyGroupKind::Fallback => ProxyGroup::Fallback(FallbackGroup { common }),
            ProxyGroupKind::UrlTest => ProxyGroup::UrlTest(UrlTestGroup {
                common,
                tolerance: None,
            }),
            ProxyGroupKind::LoadBalance => ProxyGroup::LoadBalance(LoadBalanceGroup {
                common,
                strategy: None,
            }),
            ProxyGroupKind::Smart => ProxyGroup::Smart(SmartGroup {
                common,
                ..Default::default()
            }),
        }
    }

    /// A group draws its members either from explicit `proxies`/`use` lists
    /// or from the `include-all*` switches, never both and never neither.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let common = self.common();
        if common.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        let explicit = common.proxies.as_ref().is_some_and(|p| !p.is_empty())
            || common.use_provider.as_ref().is_some_and(|u| !u.is_empty());
        match (explicit, common.includes_all()) {
            (true, true) => Err(ValidationError::ConflictingMembers {
                group: common.name.clone(),
            }),
            (false, false) => Err(ValidationError::MissingMembers {
                group: common.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SelectGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RelayGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct FallbackGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UrlTestGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
    /// Switch tolerance in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoadBalanceStrategy {
    RoundRobin,
    ConsistentHashing,
    StickySessions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct LoadBalanceGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<LoadBalanceStrategy>,
}

/// Smart groups do not support consistent hashing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SmartStrategy {
    RoundRobin,
    StickySessions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SmartGroup {
    #[serde(flatten)]
    pub common: ProxyGroupCommon,
    /// Weight nodes with the LightGBM model.
    #[serde(default)]
    pub uselightgbm: bool,
    /// Collect samples for model training.
    #[serde(default)]
    pub collectdata: bool,
    /// `pattern:weight` pairs; weights below 1 lower the priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SmartStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyGroupCommon {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<String>>,
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_provider: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    /// Health check timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_failed_times: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_udp: Option<bool>,
    /// Deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    /// Deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_mark: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_providers: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_filter: Option<String>,
    /// Adapter types separated by `|`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Default for ProxyGroupCommon {
    fn default() -> Self {
        Self {
            name: String::new(),
            proxies: None,
            use_provider: None,
            url: Some(DEFAULT_TEST_URL.to_string()),
            interval: None,
            lazy: Some(true),
            timeout: None,
            max_failed_times: Some(5),
            expected_status: Some("*".to_string()),
            disable_udp: Some(false),
            interface_name: None,
            routing_mark: None,
            include_all: Some(false),
            include_all_proxies: Some(false),
            include_all_providers: Some(false),
            filter: None,
            exclude_filter: None,
            exclude_type: None,
            hidden: Some(false),
            icon: None,
        }
    }
}

impl ProxyGroupCommon {
    pub fn includes_all(&self) -> bool {
        [
            self.include_all,
            self.include_all_proxies,
            self.include_all_providers,
        ]
        .into_iter()
        .any(|f| f == Some(true))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProxyGroupData {
    pub proxy_group: ProxyGroup,
    #[serde(default)]
    pub meta: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(name: &str, proxies: &[&str]) -> ProxyGroup {
        ProxyGroup::Select(SelectGroup {
            common: ProxyGroupCommon {
                name: name.to_string(),
                proxies: Some(proxies.iter().map(|p| p.to_string()).collect()),
                ..Default::default()
            },
        })
    }

    #[test]
    fn test_tagged_by_type() {
        let yaml = r#"
name: Auto
type: url-test
use: [airport]
url: http://www.gstatic.com/generate_204
interval: 300
tolerance: 50
max-failed-times: 3
include-all-proxies: false
"#;
        let group: ProxyGroup = serde_yaml::from_str(yaml).unwrap();
        match &group {
            ProxyGroup::UrlTest(g) => {
                assert_eq!(g.tolerance, Some(50));
                assert_eq!(g.common.use_provider, Some(vec!["airport".to_string()]));
                assert_eq!(g.common.max_failed_times, Some(3));
            }
            _ => panic!("Expected UrlTest group"),
        }
        assert_eq!(group.kind(), ProxyGroupKind::UrlTest);
        assert!(group.validate().is_ok());
    }

    #[test]
    fn test_strategy_restricted_per_kind() {
        let lb = "name: LB\ntype: load-balance\ninclude-all: true\nstrategy: consistent-hashing\n";
        let group: ProxyGroup = serde_yaml::from_str(lb).unwrap();
        assert!(matches!(
            group,
            ProxyGroup::LoadBalance(LoadBalanceGroup {
                strategy: Some(LoadBalanceStrategy::ConsistentHashing),
                ..
            })
        ));

        let smart = "name: S\ntype: smart\ninclude-all: true\nstrategy: consistent-hashing\n";
        assert!(serde_yaml::from_str::<ProxyGroup>(smart).is_err());

        let smart = "name: S\ntype: smart\ninclude-all: true\nstrategy: sticky-sessions\nuselightgbm: true\nsample-rate: 0.5\n";
        let group: ProxyGroup = serde_yaml::from_str(smart).unwrap();
        match group {
            ProxyGroup::Smart(g) => {
                assert!(g.uselightgbm);
                assert!(!g.collectdata);
                assert_eq!(g.strategy, Some(SmartStrategy::StickySessions));
                assert_eq!(g.sample_rate, Some(0.5));
            }
            _ => panic!("Expected Smart group"),
        }
    }

    #[test]
    fn test_membership_modes() {
        assert!(select("Proxies", &["HK", "DIRECT"]).validate().is_ok());
        assert!(matches!(
            select("Empty", &[]).validate(),
            Err(ValidationError::MissingMembers { .. })
        ));

        let mut both = select("Both", &["HK"]);
        both.common_mut().include_all_proxies = Some(true);
        assert!(matches!(
            both.validate(),
            Err(ValidationError::ConflictingMembers { .. })
        ));

        let mut all = ProxyGroup::default();
        all.common_mut().name = "All".to_string();
        all.common_mut().include_all = Some(true);
        assert!(all.validate().is_ok());
    }

    #[test]
    fn test_with_kind_keeps_common() {
        let group = select("G", &["a"]).with_kind(ProxyGroupKind::Smart);
        assert_eq!(group.kind(), ProxyGroupKind::Smart);
        assert_eq!(group.name(), "G");
        assert_eq!(group.common().proxies, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_serialized_keys() {
        let out = serde_yaml::to_string(&ProxyGroup::default()).unwrap();
        assert!(out.starts_with("type: select\n"));
        assert!(out.contains("max-failed-times: 5"));
        assert!(out.contains("expected-status: '*'"));
        assert!(out.contains("include-all-providers: false"));
        assert!(out.contains("disable-udp: false"));
    }
}
