mod app_config;
pub mod defaults;
mod error;
pub mod format;
mod models;
pub mod palette;
mod validation;

use std::collections::BTreeMap;

pub use app_config::*;
pub use error::*;
pub use models::*;
pub use validation::*;

/// Builds the routing-engine configuration from the dashboard's collections.
///
/// Disabled entries, entries hidden from `cfg.viewer` and entries marked
/// `Invalid` are left out. Every remaining entry must validate and names must
/// be unique within each section.
pub fn generate_clash_config(snapshot: &Snapshot, cfg: &PanelConfig) -> Result<ClashConfig, Error> {
    let viewer = cfg.viewer.as_deref();
    let exported = |meta: &Metadata| {
        if meta.source.is_invalid() {
            return false;
        }
        if cfg.include_disabled {
            viewer.is_none_or(|v| meta.is_visible_to(v))
        } else {
            meta.is_active_for(viewer)
        }
    };

    let mut rules: Vec<RuleData> = snapshot
        .rules
        .iter()
        .filter(|r| exported(&r.meta))
        .cloned()
        .collect();
    for rule in &rules {
        rule.validate()?;
    }
    sort_rules(&mut rules);

    let mut proxies = Vec::new();
    for data in snapshot.proxies.iter().filter(|p| exported(&p.meta)) {
        data.proxy.validate()?;
        let mut proxy = data.proxy.clone();
        if cfg.strip_inactive_transports {
            let removed = proxy.strip_inactive_transports();
            if removed > 0 {
                tracing::debug!("{}: dropped {removed} inactive transport block(s)", proxy.name);
            }
        }
        proxies.push(proxy);
    }
    ensure_unique(proxies.iter().map(|p| p.name.as_str()))?;

    let mut proxy_groups = Vec::new();
    for data in snapshot.proxy_groups.iter().filter(|g| exported(&g.meta)) {
        data.proxy_group.validate()?;
        proxy_groups.push(data.proxy_group.clone());
    }
    ensure_unique(proxy_groups.iter().map(ProxyGroup::name))?;

    let mut rule_providers = BTreeMap::new();
    for data in snapshot.rule_providers.iter().filter(|p| exported(&p.meta)) {
        data.rule_provider.validate()?;
        if rule_providers
            .insert(data.name.clone(), data.rule_provider.clone())
            .is_some()
        {
            return Err(duplicate(&data.name));
        }
    }

    let mut proxy_providers = BTreeMap::new();
    for data in snapshot.proxy_providers.iter().filter(|p| exported(&p.meta)) {
        data.proxy_provider.validate()?;
        if proxy_providers
            .insert(data.name.clone(), data.proxy_provider.clone())
            .is_some()
        {
            return Err(duplicate(&data.name));
        }
    }

    let mut hosts = BTreeMap::new();
    for host in snapshot.hosts.iter().filter(|h| exported(&h.meta)) {
        host.validate()?;
        let value = match host.value.as_slice() {
            [single] => HostValue::One(single.clone()),
            values => HostValue::Many(values.to_vec()),
        };
        if hosts.insert(host.domain.clone(), value).is_some() {
            return Err(duplicate(&host.domain));
        }
    }

    let skipped = snapshot.rules.len() - rules.len();
    if skipped > 0 {
        tracing::info!("skipped {skipped} inactive rule(s)");
    }

    Ok(ClashConfig {
        proxies: non_empty(proxies),
        proxy_providers: (!proxy_providers.is_empty()).then_some(proxy_providers),
        proxy_groups: non_empty(proxy_groups),
        rule_providers: (!rule_providers.is_empty()).then_some(rule_providers),
        rules: non_empty(rules.iter().map(RuleData::to_line).collect()),
        hosts: (!hosts.is_empty()).then_some(hosts),
        ..Default::default()
    })
}

/// Turns a routing-engine configuration into dashboard collections. Every
/// entry gets manual metadata; rules keep their file order as priority.
pub fn import_clash_config(config: ClashConfig) -> Result<Snapshot, Error> {
    if !config.rest.is_empty() {
        tracing::debug!(
            "ignoring unmanaged keys: {}",
            config.rest.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    let rules = config
        .rules
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, line)| RuleData::from_line(line, i as i64))
        .collect::<Result<Vec<_>, _>>()?;

    let proxies = config
        .proxies
        .unwrap_or_default()
        .into_iter()
        .map(|proxy| ProxyData {
            proxy,
            ..Default::default()
        })
        .collect();

    let proxy_groups = config
        .proxy_groups
        .unwrap_or_default()
        .into_iter()
        .map(|proxy_group| ProxyGroupData {
            proxy_group,
            meta: Metadata::default(),
        })
        .collect();

    let rule_providers = config
        .rule_providers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, rule_provider)| RuleProviderData {
            name,
            rule_provider,
            meta: Metadata::default(),
        })
        .collect();

    let proxy_providers = config
        .proxy_providers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, proxy_provider)| ProxyProviderData {
            name,
            proxy_provider,
            meta: Metadata::default(),
        })
        .collect();

    let hosts = config
        .hosts
        .unwrap_or_default()
        .into_iter()
        .map(|(domain, value)| HostData {
            domain,
            value: value.into_vec(),
            ..Default::default()
        })
        .collect();

    Ok(Snapshot {
        rules,
        proxies,
        proxy_groups,
        rule_providers,
        proxy_providers,
        hosts,
        subscription: None,
    })
}

fn ensure_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), Error> {
    match find_duplicate(names) {
        Some(name) => Err(duplicate(name)),
        None => Ok(()),
    }
}

fn duplicate(name: &str) -> Error {
    tracing::warn!("duplicate name {name}");
    ValidationError::DuplicateName {
        name: name.to_string(),
    }
    .into()
}

fn non_empty<T>(v: Vec<T>) -> Option<Vec<T>> {
    (!v.is_empty()).then_some(v)
}
