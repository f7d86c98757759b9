use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Metadata, ValidationError};

macro_rules! rule_types {
    ($($variant:ident => $name:literal,)+) => {
        /// Match type of a routing rule.
        ///
        /// Types outside the known vocabulary are kept as [`RuleType::Other`]
        /// so newer cores' rules survive a round-trip.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum RuleType {
            $($variant,)+
            Other(String),
        }

        impl RuleType {
            /// Every known rule type, in display order.
            pub const KNOWN: &'static [RuleType] = &[$(RuleType::$variant,)+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(RuleType::$variant => $name,)+
                    RuleType::Other(raw) => raw,
                }
            }
        }

        impl FromStr for RuleType {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($name => RuleType::$variant,)+
                    _ => RuleType::Other(s.to_string()),
                })
            }
        }
    };
}

rule_types! {
    Domain => "DOMAIN",
    DomainSuffix => "DOMAIN-SUFFIX",
    DomainKeyword => "DOMAIN-KEYWORD",
    DomainRegex => "DOMAIN-REGEX",
    DomainWildcard => "DOMAIN-WILDCARD",
    GeoSite => "GEOSITE",
    GeoIp => "GEOIP",
    IpCidr => "IP-CIDR",
    IpCidr6 => "IP-CIDR6",
    IpSuffix => "IP-SUFFIX",
    IpAsn => "IP-ASN",
    SrcGeoIp => "SRC-GEOIP",
    SrcIpAsn => "SRC-IP-ASN",
    SrcIpCidr => "SRC-IP-CIDR",
    SrcIpSuffix => "SRC-IP-SUFFIX",
    DstPort => "DST-PORT",
    SrcPort => "SRC-PORT",
    InPort => "IN-PORT",
    InType => "IN-TYPE",
    InUser => "IN-USER",
    InName => "IN-NAME",
    ProcessPath => "PROCESS-PATH",
    ProcessPathRegex => "PROCESS-PATH-REGEX",
    ProcessName => "PROCESS-NAME",
    ProcessNameRegex => "PROCESS-NAME-REGEX",
    Uid => "UID",
    Network => "NETWORK",
    Dscp => "DSCP",
    RuleSet => "RULE-SET",
    And => "AND",
    Or => "OR",
    Not => "NOT",
    SubRule => "SUB-RULE",
    Match => "MATCH",
}

impl RuleType {
    /// `AND`, `OR` and `NOT` combine nested conditions instead of a payload.
    pub fn is_logical(&self) -> bool {
        matches!(self, RuleType::And | RuleType::Or | RuleType::Not)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(rule_type) = s.parse::<RuleType>();
        Ok(rule_type)
    }
}

/// Trailing rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleParam {
    NoResolve,
    Src,
}

impl RuleParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleParam::NoResolve => "no-resolve",
            RuleParam::Src => "src",
        }
    }
}

/// A routing rule as edited in the dashboard.
///
/// Rules are evaluated by ascending `priority`; equal priorities keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleData {
    pub priority: i64,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_params: Option<RuleParam>,
    /// Nested conditions of `AND`/`OR`/`NOT`, e.g. `DOMAIN,example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    /// Single condition of a `SUB-RULE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub meta: Metadata,
}

impl Default for RuleData {
    fn default() -> Self {
        Self {
            priority: 0,
            rule_type: RuleType::DomainSuffix,
            payload: Some(String::new()),
            action: "DIRECT".to_string(),
            additional_params: None,
            conditions: None,
            condition: None,
            meta: Metadata::default(),
        }
    }
}

impl RuleData {
    pub fn is_system(&self) -> bool {
        self.meta.is_system()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.action.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "action" });
        }
        match &self.rule_type {
            RuleType::Match => Ok(()),
            t if t.is_logical() => match &self.conditions {
                Some(c) if !c.is_empty() && c.iter().all(|c| !c.trim().is_empty()) => Ok(()),
                _ => Err(ValidationError::MissingConditions {
                    rule_type: t.to_string(),
                }),
            },
            RuleType::SubRule => match self.condition.as_deref() {
                Some(c) if !c.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingConditions {
                    rule_type: self.rule_type.to_string(),
                }),
            },
            t => match self.payload.as_deref() {
                Some(p) if !p.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingPayload {
                    rule_type: t.to_string(),
                }),
            },
        }
    }

    /// Renders the rule in the comma-separated form of a `rules:` entry.
    pub fn to_line(&self) -> String {
        let mut line = match &self.rule_type {
            RuleType::Match => format!("MATCH,{}", self.action),
            t if t.is_logical() => {
                let inner = self
                    .conditions
                    .iter()
                    .flatten()
                    .map(|c| format!("({c})"))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{t},({inner}),{}", self.action)
            }
            RuleType::SubRule => format!(
                "SUB-RULE,({}),{}",
                self.condition.as_deref().unwrap_or_default(),
                self.action
            ),
            t => format!(
                "{t},{},{}",
                self.payload.as_deref().unwrap_or_default(),
                self.action
            ),
        };
        if let Some(param) = self.additional_params {
            line.push(',');
            line.push_str(param.as_str());
        }
        line
    }

    /// Parses a `rules:` entry. The rule gets the given priority and default
    /// metadata.
    pub fn from_line(line: &str, priority: i64) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedRuleLine {
            line: line.to_string(),
        };
        let (head, rest) = line.trim().split_once(',').ok_or_else(malformed)?;
        let Ok(rule_type) = head.trim().parse::<RuleType>();
        let mut rule = RuleData {
            priority,
            rule_type,
            payload: None,
            ..Default::default()
        };

        let tail = if rule.rule_type.is_logical() || rule.rule_type == RuleType::SubRule {
            let close = matching_paren(rest).ok_or_else(malformed)?;
            let inner = &rest[1..close];
            if rule.rule_type == RuleType::SubRule {
                rule.condition = Some(inner.to_string());
            } else {
                rule.conditions = Some(split_groups(inner).ok_or_else(malformed)?);
            }
            rest[close + 1..].strip_prefix(',').ok_or_else(malformed)?
        } else if rule.rule_type == RuleType::Match {
            rest
        } else {
            let (payload, tail) = rest.split_once(',').ok_or_else(malformed)?;
            rule.payload = Some(payload.trim().to_string());
            tail
        };

        let mut parts = tail.split(',').map(str::trim);
        rule.action = parts
            .next()
            .filter(|a| !a.is_empty())
            .ok_or_else(malformed)?
            .to_string();
        rule.additional_params = match parts.next() {
            None => None,
            Some("no-resolve") => Some(RuleParam::NoResolve),
            Some("src") => Some(RuleParam::Src),
            Some(_) => return Err(malformed()),
        };
        Ok(rule)
    }
}

/// Index of the parenthesis closing the one `s` starts with.
fn matching_paren(s: &str) -> Option<usize> {
    if !s.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `(a),(b,c),(d)` into `["a", "b,c", "d"]`.
fn split_groups(s: &str) -> Option<Vec<String>> {
    let mut groups = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let close = matching_paren(rest)?;
        groups.push(rest[1..close].to_string());
        rest = rest[close + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
        } else if !rest.is_empty() {
            return None;
        }
    }
    if groups.is_empty() { None } else { Some(groups) }
}

/// Stable sort by ascending priority.
pub fn sort_rules(rules: &mut [RuleData]) {
    rules.sort_by_key(|r| r.priority);
}
