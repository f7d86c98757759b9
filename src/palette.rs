//! Display colors for categorical values.
//!
//! Each classification axis is one static [`Palette`]: a lookup table plus
//! the color used for keys outside its vocabulary. Lookups never fail.

use std::fmt;

use serde::Serialize;

use crate::{DataUsage, Metadata};

/// Theme color names understood by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Error,
    Grey,
    Teal,
    DeepPurple,
    DeepOrange,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Primary => "primary",
            Color::Secondary => "secondary",
            Color::Success => "success",
            Color::Info => "info",
            Color::Warning => "warning",
            Color::Error => "error",
            Color::Grey => "grey",
            Color::Teal => "teal",
            Color::DeepPurple => "deep-purple",
            Color::DeepOrange => "deep-orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Palette {
    pub axis: &'static str,
    /// Bumped whenever an entry or the fallback changes.
    pub version: u16,
    pub entries: &'static [(&'static str, Color)],
    pub fallback: Color,
}

impl Palette {
    pub fn color(&self, key: &str) -> Color {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(self.fallback, |(_, c)| *c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(k, _)| *k)
    }
}

pub static RULE_TYPE: Palette = Palette {
    axis: "rule-type",
    version: 1,
    entries: &[
        ("DOMAIN", Color::Primary),
        ("DOMAIN-SUFFIX", Color::Primary),
        ("DOMAIN-KEYWORD", Color::Primary),
        ("DOMAIN-REGEX", Color::Primary),
        ("DOMAIN-WILDCARD", Color::Primary),
        ("GEOSITE", Color::Info),
        ("GEOIP", Color::Info),
        ("IP-CIDR", Color::Warning),
        ("IP-CIDR6", Color::Warning),
        ("IP-SUFFIX", Color::Warning),
        ("IP-ASN", Color::Warning),
        ("SRC-GEOIP", Color::Info),
        ("SRC-IP-ASN", Color::Warning),
        ("SRC-IP-CIDR", Color::Warning),
        ("SRC-IP-SUFFIX", Color::Warning),
        ("DST-PORT", Color::Success),
        ("SRC-PORT", Color::Success),
        ("IN-PORT", Color::Success),
        ("IN-TYPE", Color::Success),
        ("IN-USER", Color::Success),
        ("IN-NAME", Color::Success),
        ("PROCESS-PATH", Color::Error),
        ("PROCESS-PATH-REGEX", Color::Error),
        ("PROCESS-NAME", Color::Error),
        ("PROCESS-NAME-REGEX", Color::Error),
        ("UID", Color::Secondary),
        ("NETWORK", Color::Secondary),
        ("DSCP", Color::Secondary),
        ("RULE-SET", Color::DeepPurple),
        ("AND", Color::DeepOrange),
        ("OR", Color::DeepOrange),
        ("NOT", Color::DeepOrange),
        ("SUB-RULE", Color::DeepOrange),
        ("MATCH", Color::Teal),
    ],
    fallback: Color::Grey,
};

pub static ACTION: Palette = Palette {
    axis: "action",
    version: 1,
    entries: &[
        ("DIRECT", Color::Success),
        ("REJECT", Color::Error),
        ("REJECT-DROP", Color::Error),
        ("PASS", Color::Warning),
        ("COMPATIBLE", Color::Info),
    ],
    fallback: Color::Primary,
};

pub static PROXY_TYPE: Palette = Palette {
    axis: "proxy-type",
    version: 1,
    entries: &[
        ("ss", Color::Success),
        ("ssr", Color::Success),
        ("trojan", Color::Error),
        ("vmess", Color::Primary),
        ("vless", Color::Primary),
        ("hysteria", Color::Info),
        ("hysteria2", Color::Info),
        ("anytls", Color::Warning),
    ],
    fallback: Color::Secondary,
};

pub static PROXY_GROUP_TYPE: Palette = Palette {
    axis: "proxy-group-type",
    version: 1,
    entries: &[
        ("url-test", Color::Success),
        ("fallback", Color::Error),
        ("load-balance", Color::Primary),
        ("select", Color::Info),
    ],
    fallback: Color::Warning,
};

pub static BEHAVIOR: Palette = Palette {
    axis: "rule-set-behavior",
    version: 1,
    entries: &[
        ("classical", Color::Success),
        ("domain", Color::Error),
        ("ipcidr", Color::Error),
    ],
    fallback: Color::Primary,
};

pub static FORMAT: Palette = Palette {
    axis: "provider-format",
    version: 1,
    entries: &[
        ("yaml", Color::Success),
        ("text", Color::Warning),
        ("mrs", Color::Info),
    ],
    fallback: Color::Secondary,
};

pub static SOURCE: Palette = Palette {
    axis: "source",
    version: 1,
    entries: &[("Auto", Color::Success), ("Manual", Color::Info)],
    fallback: Color::Primary,
};

/// Every palette, for audits and UI legends.
pub static ALL: &[&Palette] = &[
    &RULE_TYPE,
    &ACTION,
    &PROXY_TYPE,
    &PROXY_GROUP_TYPE,
    &BEHAVIOR,
    &FORMAT,
    &SOURCE,
];

pub fn rule_type_color(rule_type: &str) -> Color {
    RULE_TYPE.color(rule_type)
}

pub fn action_color(action: &str) -> Color {
    ACTION.color(action)
}

pub fn proxy_color(proxy_type: &str) -> Color {
    PROXY_TYPE.color(proxy_type)
}

pub fn proxy_group_type_color(kind: &str) -> Color {
    PROXY_GROUP_TYPE.color(kind)
}

pub fn behavior_color(behavior: &str) -> Color {
    BEHAVIOR.color(behavior)
}

pub fn format_color(format: &str) -> Color {
    FORMAT.color(format)
}

pub fn source_color(source: &str) -> Color {
    SOURCE.color(source)
}

pub fn metadata_source_color(meta: &Metadata) -> Color {
    source_color(&meta.source.to_string())
}

pub fn bool_color(value: bool) -> Color {
    if value { Color::Primary } else { Color::Success }
}

/// Traffic usage in percent: above 90 is critical, above 70 a warning.
pub fn usage_color(percentage: f64) -> Color {
    if percentage > 90.0 {
        Color::Error
    } else if percentage > 70.0 {
        Color::Warning
    } else {
        Color::Success
    }
}

pub fn data_usage_color(usage: &DataUsage) -> Color {
    usage_color(usage.used_percentage_floor() as f64)
}

const DAY: i64 = 86_400;

/// Remaining lifetime of a subscription relative to `now` (unix seconds).
/// Less than a week is critical, less than 30 days a warning. A missing or
/// zero timestamp is unknown and shown grey.
pub fn expire_color_at(expire: Option<i64>, now: i64) -> Color {
    let Some(expire) = expire.filter(|&t| t != 0) else {
        return Color::Grey;
    };
    let left = expire.saturating_sub(now);
    if left < 7 * DAY {
        Color::Error
    } else if left < 30 * DAY {
        Color::Warning
    } else {
        Color::Success
    }
}

pub fn expire_color(expire: Option<i64>) -> Color {
    expire_color_at(expire, chrono::Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProxyGroupKind, RuleType};

    #[test]
    fn test_known_keys() {
        assert_eq!(rule_type_color("DOMAIN-SUFFIX"), Color::Primary);
        assert_eq!(rule_type_color("RULE-SET"), Color::DeepPurple);
        assert_eq!(rule_type_color("MATCH"), Color::Teal);
        assert_eq!(action_color("REJECT-DROP"), Color::Error);
        assert_eq!(proxy_color("anytls"), Color::Warning);
        assert_eq!(proxy_group_type_color("url-test"), Color::Success);
        assert_eq!(behavior_color("ipcidr"), Color::Error);
        assert_eq!(format_color("mrs"), Color::Info);
        assert_eq!(source_color("Auto"), Color::Success);
        assert_eq!(Color::DeepOrange.to_string(), "deep-orange");
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        for palette in ALL {
            assert_eq!(palette.color(""), palette.fallback, "{}", palette.axis);
            assert_eq!(palette.color("no-such-key"), palette.fallback, "{}", palette.axis);
        }
        assert_eq!(rule_type_color("domain-suffix"), Color::Grey);
        assert_eq!(action_color("Proxies"), Color::Primary);
        assert_eq!(proxy_color("wireguard"), Color::Secondary);
        assert_eq!(proxy_group_type_color("smart"), Color::Warning);
        assert_eq!(source_color("AutoRegion"), Color::Primary);
    }

    #[test]
    fn test_deterministic() {
        for palette in ALL {
            for key in palette.keys() {
                assert_eq!(palette.color(key), palette.color(key));
            }
        }
    }

    #[test]
    fn test_vocabularies_cover_models() {
        for rule_type in RuleType::KNOWN {
            assert_ne!(rule_type_color(rule_type.as_str()), Color::Grey, "{rule_type}");
        }
        for kind in [
            ProxyGroupKind::Select,
            ProxyGroupKind::UrlTest,
            ProxyGroupKind::Fallback,
            ProxyGroupKind::LoadBalance,
        ] {
            assert!(PROXY_GROUP_TYPE.keys().any(|k| k == kind.as_str()));
        }
    }

    #[test]
    fn test_usage_color() {
        assert_eq!(usage_color(95.0), Color::Error);
        assert_eq!(usage_color(90.0), Color::Warning);
        assert_eq!(usage_color(71.0), Color::Warning);
        assert_eq!(usage_color(70.0), Color::Success);
        assert_eq!(bool_color(true), Color::Primary);
        assert_eq!(bool_color(false), Color::Success);
    }

    #[test]
    fn test_expire_color() {
        let now = 1_700_000_000;
        assert_eq!(expire_color_at(Some(now + 6 * DAY), now), Color::Error);
        assert_eq!(expire_color_at(Some(now + 20 * DAY), now), Color::Warning);
        assert_eq!(expire_color_at(Some(now + 60 * DAY), now), Color::Success);
        assert_eq!(expire_color_at(Some(now - DAY), now), Color::Error);
        assert_eq!(expire_color_at(None, now), Color::Grey);
        assert_eq!(expire_color_at(Some(0), now), Color::Grey);
        assert_eq!(expire_color_at(Some(i64::MIN), now), Color::Error);
        assert_eq!(expire_color_at(Some(i64::MAX), now), Color::Success);
        assert_eq!(expire_color_at(Some(i64::MAX), i64::MIN), Color::Success);

        let real_now = chrono::Utc::now().timestamp();
        assert_eq!(expire_color(Some(real_now + 60 * DAY)), Color::Success);
        assert_eq!(expire_color(None), Color::Grey);
        assert_eq!(expire_color(Some(i64::MIN)), Color::Error);
    }
}
