use serde::{Deserialize, Serialize};

/// Available geoip / geosite categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GeoRules {
    pub geoip: Vec<String>,
    pub geosite: Vec<String>,
}

/// A Clash external controller the dashboard can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClashApi {
    pub url: String,
    pub secret: String,
}

/// Which sections of a remote subscription are merged into the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SubscriptionConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_providers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_groups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_providers: Option<bool>,
}

/// Settings of the backend that owns the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginConfig {
    pub enabled: bool,
    pub proxy: bool,
    pub notify: bool,
    pub subscriptions_config: Vec<SubscriptionConfig>,
    pub movie_pilot_url: String,
    pub cron_string: String,
    pub timeout: u64,
    pub retry_times: u32,
    pub filter_keywords: Vec<String>,
    pub auto_update_subscriptions: bool,
    pub ruleset_prefix: String,
    pub acl4ssr_prefix: String,
    pub group_by_region: bool,
    pub group_by_country: bool,
    pub refresh_delay: u64,
    pub enable_acl4ssr: bool,
    pub dashboard_components: Vec<String>,
    pub clash_template: String,
    pub hint_geo_dat: bool,
    pub best_cf_ip: Vec<String>,
    pub apikey: Option<String>,
    pub clash_dashboards: Vec<ClashApi>,
    pub active_dashboard: Option<usize>,
    pub roles: Vec<String>,
}

impl PluginConfig {
    pub fn active_dashboard(&self) -> Option<&ClashApi> {
        self.active_dashboard.and_then(|i| self.clash_dashboards.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_plugin_config() {
        let cfg: PluginConfig = serde_json::from_str(
            r#"{
                "enabled": true,
                "subscriptions_config": [{"url": "https://a.example/sub", "proxy-groups": false}],
                "clash_dashboards": [{"url": "http://127.0.0.1:9090", "secret": "s"}],
                "active_dashboard": 0,
                "apikey": null
            }"#,
        )
        .unwrap();
        assert!(cfg.enabled);
        assert_eq!(cfg.subscriptions_config[0].proxy_groups, Some(false));
        assert_eq!(cfg.subscriptions_config[0].rules, None);
        assert_eq!(cfg.active_dashboard().map(|d| d.secret.as_str()), Some("s"));
        assert!(cfg.best_cf_ip.is_empty());
    }
}
