use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::{Metadata, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[default]
    Ss,
    Ssr,
    Vmess,
    Vless,
    Trojan,
    Http,
    Snell,
    Tuic,
    Hysteria,
    Hysteria2,
    Direct,
    Dns,
    Mieru,
    Anytls,
    Wireguard,
    Ssh,
    Socks5,
}

impl ProxyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyType::Ss => "ss",
            ProxyType::Ssr => "ssr",
            ProxyType::Vmess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Http => "http",
            ProxyType::Snell => "snell",
            ProxyType::Tuic => "tuic",
            ProxyType::Hysteria => "hysteria",
            ProxyType::Hysteria2 => "hysteria2",
            ProxyType::Direct => "direct",
            ProxyType::Dns => "dns",
            ProxyType::Mieru => "mieru",
            ProxyType::Anytls => "anytls",
            ProxyType::Wireguard => "wireguard",
            ProxyType::Ssh => "ssh",
            ProxyType::Socks5 => "socks5",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Tcp,
    Http,
    H2,
    Grpc,
    Ws,
    Kcp,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IpVersion {
    #[default]
    Dual,
    Ipv4,
    Ipv6,
    Ipv4Prefer,
    Ipv6Prefer,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct WsOpts {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_early_data: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_data_header_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2ray_http_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2ray_http_upgrade_fast_open: Option<bool>,
}

impl Default for WsOpts {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            headers: Some(HashMap::new()),
            max_early_data: None,
            early_data_header_name: None,
            v2ray_http_upgrade: Some(false),
            v2ray_http_upgrade_fast_open: Some(false),
        }
    }
}

/// A header value in `http-opts` may be a single string or a list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum HeaderValue {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct HttpOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, HeaderValue>>,
}

impl Default for HttpOpts {
    fn default() -> Self {
        Self {
            method: Some("GET".to_string()),
            path: vec!["/".to_string()],
            headers: Some(HashMap::new()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct H2Opts {
    pub host: Vec<String>,
    pub path: String,
}

impl Default for H2Opts {
    fn default() -> Self {
        Self {
            host: Vec::new(),
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOpts {
    pub grpc_service_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmuxProtocol {
    Smux,
    Yamux,
    #[default]
    H2mux,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BrutalOpts {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Smux {
    pub enabled: bool,
    pub protocol: SmuxProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_streams: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_streams: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_tcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brutal_opts: Option<BrutalOpts>,
}

impl Default for Smux {
    fn default() -> Self {
        Self {
            enabled: false,
            protocol: SmuxProtocol::H2mux,
            max_connections: None,
            min_streams: None,
            max_streams: None,
            statistic: Some(false),
            only_tcp: Some(false),
            padding: Some(false),
            brutal_opts: Some(BrutalOpts::default()),
        }
    }
}

/// An outbound node.
///
/// Keys this struct does not know about land in `extra` and are written back
/// unchanged, so protocol-specific options (`obfs`, `psk`, `reality-opts`,
/// ...) survive an edit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Proxy {
    pub name: String,
    #[serde(rename = "type")]
    pub proxy_type: ProxyType,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(rename = "alterId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alter_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mptcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_opts: Option<HttpOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2_opts: Option<H2Opts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<IpVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_mark: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialer_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smux: Option<Smux>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescind: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            name: String::new(),
            proxy_type: ProxyType::Ss,
            server: String::new(),
            port: 443,
            uuid: None,
            password: None,
            cipher: None,
            alter_id: None,
            udp: Some(false),
            tfo: Some(false),
            mptcp: Some(false),
            tls: Some(false),
            sni: None,
            servername: None,
            alpn: Some(Vec::new()),
            fingerprint: None,
            skip_cert_verify: Some(false),
            client_fingerprint: None,
            network: None,
            ws_opts: Some(WsOpts::default()),
            http_opts: Some(HttpOpts::default()),
            h2_opts: Some(H2Opts::default()),
            grpc_opts: Some(GrpcOpts::default()),
            ip_version: None,
            interface_name: None,
            routing_mark: None,
            dialer_proxy: None,
            smux: Some(Smux::default()),
            rescind: Some(false),
            extra: HashMap::new(),
        }
    }
}

/// The transport options block selected by a proxy's `network`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transport<'a> {
    /// Plain TCP, KCP or no `network` at all.
    Plain,
    Ws(Option<&'a WsOpts>),
    Http(Option<&'a HttpOpts>),
    H2(Option<&'a H2Opts>),
    Grpc(Option<&'a GrpcOpts>),
}

impl Proxy {
    pub fn transport(&self) -> Transport<'_> {
        match self.network {
            None | Some(Network::Tcp) | Some(Network::Kcp) => Transport::Plain,
            Some(Network::Ws) => Transport::Ws(self.ws_opts.as_ref()),
            Some(Network::Http) => Transport::Http(self.http_opts.as_ref()),
            Some(Network::H2) => Transport::H2(self.h2_opts.as_ref()),
            Some(Network::Grpc) => Transport::Grpc(self.grpc_opts.as_ref()),
        }
    }

    /// Drops the option blocks that do not belong to the selected `network`.
    /// Returns how many blocks were removed.
    pub fn strip_inactive_transports(&mut self) -> usize {
        let network = self.network;
        let mut removed = 0;
        let mut keep_if = |active: bool, present: bool| {
            if !active && present {
                removed += 1;
            }
            active
        };
        if !keep_if(network == Some(Network::Ws), self.ws_opts.is_some()) {
            self.ws_opts = None;
        }
        if !keep_if(network == Some(Network::Http), self.http_opts.is_some()) {
            self.http_opts = None;
        }
        if !keep_if(network == Some(Network::H2), self.h2_opts.is_some()) {
            self.h2_opts = None;
        }
        if !keep_if(network == Some(Network::Grpc), self.grpc_opts.is_some()) {
            self.grpc_opts = None;
        }
        removed
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        if self.server.trim().is_empty() && !matches!(self.proxy_type, ProxyType::Direct | ProxyType::Dns) {
            return Err(ValidationError::EmptyField { field: "server" });
        }
        if self.port == 0 && !matches!(self.proxy_type, ProxyType::Direct | ProxyType::Dns) {
            return Err(ValidationError::InvalidPort { port: self.port });
        }
        Ok(())
    }
}

/// Raw form a proxy was imported from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawProxy {
    Text(String),
    Map(HashMap<String, Value>),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProxyData {
    pub proxy: Proxy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawProxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v2ray_link: Option<String>,
    #[serde(default)]
    pub meta: Metadata,
}
