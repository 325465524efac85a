use crate::usage::{self, UsageTier};
use serde::{Deserialize, Serialize};

/// Point-in-time storage snapshot from the storage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub usage_percentage: f64,
    pub total_size_mb: f64,
    pub max_storage_mb: f64,
}

impl StorageUsage {
    pub fn tier(&self) -> UsageTier {
        usage::storage_tier(self.usage_percentage)
    }

    pub fn is_full(&self) -> bool {
        self.usage_percentage >= usage::FULL_PCT
    }

    pub fn warning(&self) -> Option<String> {
        usage::warning_message(self.tier()).map(|level| format!("Warning: Storage is {level}!"))
    }
}

/// Point-in-time daily bandwidth snapshot from the usage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthUsage {
    pub total_usage_mb: f64,
    pub daily_limit_mb: f64,
}

impl BandwidthUsage {
    pub fn percentage(&self) -> f64 {
        usage::bandwidth_percentage(self.total_usage_mb, self.daily_limit_mb)
    }

    pub fn tier(&self) -> UsageTier {
        usage::bandwidth_tier(self.total_usage_mb, self.daily_limit_mb)
    }

    pub fn limit_reached(&self) -> bool {
        self.total_usage_mb >= self.daily_limit_mb
    }

    pub fn warning(&self) -> Option<String> {
        usage::warning_message(self.tier())
            .map(|level| format!("Warning: Daily bandwidth usage is {level}!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_payloads() {
        let storage: StorageUsage = serde_json::from_str(
            r#"{"usagePercentage":81.5,"totalSizeMb":40.75,"maxStorageMb":50}"#,
        )
        .unwrap();
        assert_eq!(storage.tier(), UsageTier::Warning);
        assert_eq!(storage.warning().as_deref(), Some("Warning: Storage is highly utilized!"));

        let bandwidth: BandwidthUsage =
            serde_json::from_str(r#"{"totalUsageMb":100,"dailyLimitMb":100}"#).unwrap();
        assert!(bandwidth.limit_reached());
        assert_eq!(bandwidth.tier(), UsageTier::Critical);
    }
}
