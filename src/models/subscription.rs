use serde::{Deserialize, Serialize};

/// Traffic counters reported by a subscription, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DataUsage {
    #[serde(default)]
    pub upload: u64,
    #[serde(default)]
    pub download: u64,
    #[serde(default)]
    pub total: u64,
    /// Unix seconds; `0` means no expiry is known.
    #[serde(default)]
    pub expire: i64,
}

impl DataUsage {
    pub fn used(&self) -> u64 {
        self.upload.saturating_add(self.download)
    }

    /// Floored used share of `total` in percent, `0` when `total` is zero.
    pub fn used_percentage_floor(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        (u128::from(self.used()) * 100 / u128::from(self.total)) as u64
    }

    /// `None` when the subscription reports no expiry.
    pub fn expire_at(&self) -> Option<i64> {
        (self.expire != 0).then_some(self.expire)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubscriptionInfo {
    #[serde(flatten)]
    pub usage: DataUsage,
    #[serde(default)]
    pub last_update: i64,
    #[serde(default)]
    pub proxy_num: u32,
    #[serde(default)]
    pub enabled: bool,
}

impl SubscriptionInfo {
    pub fn used_percentage_floor(&self) -> u64 {
        self.usage.used_percentage_floor()
    }
}
