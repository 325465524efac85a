//! Usage monitor: maps raw storage/bandwidth numbers onto UI state.
//!
//! All thresholds are inclusive on the upper tier: exactly 80% is a warning,
//! exactly 95% is critical, exactly 100% blocks uploads.

use crate::models::{BandwidthUsage, StorageUsage};
use serde::Serialize;

pub const WARNING_PCT: f64 = 80.0;
pub const CRITICAL_PCT: f64 = 95.0;
pub const FULL_PCT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageTier {
    Normal,
    Warning,
    Critical,
}

impl UsageTier {
    /// Meter color for the tier.
    pub fn css_class(self) -> &'static str {
        match self {
            UsageTier::Normal => "bg-blue-500",
            UsageTier::Warning => "bg-yellow-500",
            UsageTier::Critical => "bg-red-500",
        }
    }
}

/// NaN (e.g. a backend sending garbage) falls through to `Normal`.
pub fn storage_tier(pct: f64) -> UsageTier {
    if pct >= CRITICAL_PCT {
        UsageTier::Critical
    } else if pct >= WARNING_PCT {
        UsageTier::Warning
    } else {
        UsageTier::Normal
    }
}

/// `used / limit * 100`; a non-positive limit counts as fully used.
pub fn bandwidth_percentage(used_mb: f64, limit_mb: f64) -> f64 {
    if limit_mb <= 0.0 {
        return FULL_PCT;
    }
    used_mb / limit_mb * 100.0
}

pub fn bandwidth_tier(used_mb: f64, limit_mb: f64) -> UsageTier {
    storage_tier(bandwidth_percentage(used_mb, limit_mb))
}

/// Uploads are refused once storage is full or today's bandwidth is spent.
/// A snapshot that has not arrived yet never blocks.
pub fn is_upload_blocked(
    storage: Option<&StorageUsage>,
    bandwidth: Option<&BandwidthUsage>,
) -> bool {
    storage.is_some_and(StorageUsage::is_full) || bandwidth.is_some_and(BandwidthUsage::limit_reached)
}

pub fn warning_message(tier: UsageTier) -> Option<&'static str> {
    match tier {
        UsageTier::Normal => None,
        UsageTier::Warning => Some("highly utilized"),
        UsageTier::Critical => Some("critically utilized"),
    }
}

/// Width of a usage meter in percent, clamped to the bar.
pub fn bar_width(pct: f64) -> f64 {
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, FULL_PCT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(pct: f64) -> StorageUsage {
        StorageUsage {
            usage_percentage: pct,
            total_size_mb: pct / 2.0,
            max_storage_mb: 50.0,
        }
    }

    fn bandwidth(used: f64, limit: f64) -> BandwidthUsage {
        BandwidthUsage {
            total_usage_mb: used,
            daily_limit_mb: limit,
        }
    }

    #[test]
    fn storage_tier_boundaries() {
        for pct in [0.0, 10.0, 79.0, 79.999] {
            assert_eq!(storage_tier(pct), UsageTier::Normal, "{pct}");
        }
        for pct in [80.0, 80.5, 94.999] {
            assert_eq!(storage_tier(pct), UsageTier::Warning, "{pct}");
        }
        for pct in [95.0, 99.0, 100.0] {
            assert_eq!(storage_tier(pct), UsageTier::Critical, "{pct}");
        }
    }

    #[test]
    fn bandwidth_tier_uses_same_thresholds() {
        assert_eq!(bandwidth_tier(79.0, 100.0), UsageTier::Normal);
        assert_eq!(bandwidth_tier(400.0, 500.0), UsageTier::Warning);
        assert_eq!(bandwidth_tier(475.0, 500.0), UsageTier::Critical);
        assert_eq!(bandwidth_tier(0.0, 0.0), UsageTier::Critical);
    }

    #[test]
    fn upload_blocked_boundary_combinations() {
        let open_storage = storage(99.99);
        let full_storage = storage(100.0);
        let open_bandwidth = bandwidth(499.99, 500.0);
        let spent_bandwidth = bandwidth(500.0, 500.0);

        assert!(!is_upload_blocked(Some(&open_storage), Some(&open_bandwidth)));
        assert!(is_upload_blocked(Some(&full_storage), Some(&open_bandwidth)));
        assert!(is_upload_blocked(Some(&open_storage), Some(&spent_bandwidth)));
        assert!(is_upload_blocked(Some(&full_storage), Some(&spent_bandwidth)));
    }

    #[test]
    fn missing_snapshots_do_not_block() {
        assert!(!is_upload_blocked(None, None));
        assert!(is_upload_blocked(None, Some(&bandwidth(10.0, 10.0))));
    }

    #[test]
    fn warning_text_per_tier() {
        assert_eq!(warning_message(UsageTier::Normal), None);
        assert_eq!(warning_message(UsageTier::Warning), Some("highly utilized"));
        assert_eq!(warning_message(UsageTier::Critical), Some("critically utilized"));
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(bar_width(130.0), 100.0);
        assert_eq!(bar_width(-5.0), 0.0);
        assert_eq!(bar_width(f64::NAN), 0.0);
        assert_eq!(bar_width(42.5), 42.5);
    }
}
