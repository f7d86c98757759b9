use std::io;

use thiserror::Error;

/// Why an entry cannot be saved. The message is shown next to the form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid URL in {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error(transparent)]
    InvalidIp(#[from] IpValidationError),

    #[error("invalid port: {port}")]
    InvalidPort { port: u16 },

    #[error("{rule_type} rules need a payload")]
    MissingPayload { rule_type: String },

    #[error("{rule_type} rules need at least one condition")]
    MissingConditions { rule_type: String },

    #[error("group {group} has no members: set proxies, use or include-all")]
    MissingMembers { group: String },

    #[error("group {group} mixes explicit members with include-all")]
    ConflictingMembers { group: String },

    #[error("format {format} does not support behavior {behavior}")]
    UnsupportedFormat {
        format: &'static str,
        behavior: &'static str,
    },

    #[error("malformed rule: {line}")]
    MalformedRuleLine { line: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpValidationError {
    #[error("at least one IP address required")]
    Empty,
    #[error("invalid IP address: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid entry: {0}")]
    Invalid(#[from] ValidationError),
}
