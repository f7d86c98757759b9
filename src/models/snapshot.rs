use serde::{Deserialize, Serialize};

use crate::*;

/// Every collection the dashboard edits, as exchanged with its backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Snapshot {
    pub rules: Vec<RuleData>,
    pub proxies: Vec<ProxyData>,
    pub proxy_groups: Vec<ProxyGroupData>,
    pub rule_providers: Vec<RuleProviderData>,
    pub proxy_providers: Vec<ProxyProviderData>,
    pub hosts: Vec<HostData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionInfo>,
}

/// Problem found in one entry of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub collection: &'static str,
    /// Name, domain or rule line of the offending entry.
    pub entry: String,
    pub error: ValidationError,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`: {}", self.collection, self.entry, self.error)
    }
}

impl Snapshot {
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let snapshot = if is_json {
            serde_json::from_str(&data)?
        } else {
            serde_yaml::from_str(&data)?
        };
        Ok(snapshot)
    }

    /// Validates every entry and checks name uniqueness per collection.
    /// Disabled entries are validated too.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut push = |collection, entry: &str, result: Result<(), ValidationError>| {
            if let Err(error) = result {
                issues.push(Issue {
                    collection,
                    entry: entry.to_string(),
                    error,
                });
            }
        };

        for rule in &self.rules {
            push("rules", &rule.to_line(), rule.validate());
        }
        for data in &self.proxies {
            push("proxies", &data.proxy.name, data.proxy.validate());
        }
        for data in &self.proxy_groups {
            push("proxy-groups", data.proxy_group.name(), data.proxy_group.validate());
        }
        for data in &self.rule_providers {
            push("rule-providers", &data.name, data.rule_provider.validate());
        }
        for data in &self.proxy_providers {
            push("proxy-providers", &data.name, data.proxy_provider.validate());
        }
        for host in &self.hosts {
            push("hosts", &host.domain, host.validate());
        }

        let dups = [
            ("proxies", find_duplicate(self.proxies.iter().map(|p| p.proxy.name.as_str()))),
            (
                "proxy-groups",
                find_duplicate(self.proxy_groups.iter().map(|g| g.proxy_group.name())),
            ),
            (
                "rule-providers",
                find_duplicate(self.rule_providers.iter().map(|p| p.name.as_str())),
            ),
            (
                "proxy-providers",
                find_duplicate(self.proxy_providers.iter().map(|p| p.name.as_str())),
            ),
            ("hosts", find_duplicate(self.hosts.iter().map(|h| h.domain.as_str()))),
        ];
        for (collection, dup) in dups {
            if let Some(name) = dup {
                push(
                    collection,
                    name,
                    Err(ValidationError::DuplicateName {
                        name: name.to_string(),
                    }),
                );
            }
        }
        issues
    }
}

/// First name that occurs more than once.
pub fn find_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}
