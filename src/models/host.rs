use serde::{Deserialize, Serialize};

use crate::{Metadata, ValidationError, validate_ips};

/// Static DNS override: `domain` resolves to the addresses in `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HostData {
    pub domain: String,
    pub value: Vec<String>,
    /// Marks the domain as fronted by Cloudflare. `value` may then hold
    /// Cloudflare edge names instead of IP literals.
    #[serde(default)]
    pub using_cloudflare: bool,
    #[serde(default)]
    pub meta: Metadata,
}

impl HostData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.domain.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "domain" });
        }
        if self.using_cloudflare {
            if self.value.iter().all(|v| v.trim().is_empty()) {
                return Err(ValidationError::EmptyField { field: "value" });
            }
            return Ok(());
        }
        validate_ips(&self.value)?;
        Ok(())
    }
}
