use clash_panel::*;
use serde::{Serialize, de::DeserializeOwned};

fn yaml_round_trip<T>(value: &T) -> T
where
    T: Serialize + DeserializeOwned,
{
    let yaml = serde_yaml::to_string(value).unwrap();
    serde_yaml::from_str(&yaml).unwrap()
}

fn json_round_trip<T>(value: &T) -> T
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_string(value).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_defaults_survive_round_trip() {
    assert_eq!(yaml_round_trip(&Metadata::default()), Metadata::default());
    assert_eq!(yaml_round_trip(&RuleData::default()), RuleData::default());
    assert_eq!(yaml_round_trip(&Proxy::default()), Proxy::default());
    assert_eq!(yaml_round_trip(&ProxyGroup::default()), ProxyGroup::default());
    assert_eq!(yaml_round_trip(&HostData::default()), HostData::default());
    assert_eq!(yaml_round_trip(&RuleProvider::default()), RuleProvider::default());
    assert_eq!(yaml_round_trip(&ProxyProvider::default()), ProxyProvider::default());

    assert_eq!(json_round_trip(&Proxy::default()), Proxy::default());
    assert_eq!(json_round_trip(&ProxyGroupData::default()), ProxyGroupData::default());
    assert_eq!(json_round_trip(&RuleProviderData::default()), RuleProviderData::default());
    assert_eq!(json_round_trip(&ProxyProviderData::default()), ProxyProviderData::default());
    assert_eq!(json_round_trip(&SubscriptionInfo::default()), SubscriptionInfo::default());
}

#[test]
fn test_every_group_kind_round_trips() {
    for kind in [
        ProxyGroupKind::Select,
        ProxyGroupKind::Relay,
        ProxyGroupKind::Fallback,
        ProxyGroupKind::UrlTest,
        ProxyGroupKind::LoadBalance,
        ProxyGroupKind::Smart,
    ] {
        let group = ProxyGroup::default().with_kind(kind);
        let yaml = serde_yaml::to_string(&group).unwrap();
        assert!(yaml.starts_with(&format!("type: {}\n", kind.as_str())), "{yaml}");
        assert_eq!(yaml_round_trip(&group), group);
    }
}

#[test]
fn test_hyphenated_keys_preserved() {
    let yaml = serde_yaml::to_string(&Proxy::default()).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let map = value.as_mapping().unwrap();
    for key in ["skip-cert-verify", "ws-opts", "http-opts", "h2-opts", "grpc-opts", "smux"] {
        assert!(map.contains_key(key), "missing {key}");
    }
    assert!(!yaml.contains("skip_cert_verify"));
    assert!(!yaml.contains("proxy_type"));

    let smux = &map["smux"];
    assert_eq!(smux["protocol"], serde_yaml::Value::from("h2mux"));
    assert_eq!(smux["brutal-opts"]["enabled"], serde_yaml::Value::from(false));
}

#[test]
fn test_vendor_proxy_fields_survive() {
    let yaml = r#"
name: reality
type: vless
server: r.example.com
port: 443
uuid: 6b1c9c1e-0000-4000-8000-000000000000
network: tcp
tls: true
flow: xtls-rprx-vision
reality-opts:
  public-key: abc
  short-id: "01"
client-fingerprint: chrome
"#;
    let proxy: Proxy = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(proxy.proxy_type, ProxyType::Vless);
    assert_eq!(proxy.network, Some(Network::Tcp));
    assert_eq!(proxy.client_fingerprint.as_deref(), Some("chrome"));
    assert!(proxy.extra.contains_key("flow"));
    assert!(proxy.extra.contains_key("reality-opts"));
    assert!(!proxy.extra.contains_key("client-fingerprint"));

    let reparsed: serde_yaml::Value =
        serde_yaml::from_str(&serde_yaml::to_string(&proxy).unwrap()).unwrap();
    assert_eq!(reparsed["reality-opts"]["short-id"], serde_yaml::Value::from("01"));
    assert_eq!(reparsed["flow"], serde_yaml::Value::from("xtls-rprx-vision"));
}

#[test]
fn test_dashboard_envelope_keys() {
    let data = RuleProviderData {
        name: "ads".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["rule_provider"]["type"], "http");
    assert_eq!(json["rule_provider"]["size-limit"], 0);
    assert_eq!(json["meta"]["invisible_to"], serde_json::json!([]));
    assert_eq!(json["meta"]["time_modified"], 0);
}
