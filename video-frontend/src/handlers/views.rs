//! Display-ready values shared by the page templates.

use crate::models::{BandwidthUsage, StorageUsage};
use crate::pages::{ErrorBanner, NavIdentity};
use crate::usage::{bar_width, UsageTier};

/// Navigation bar: who is signed in and which tab is active.
pub struct NavView {
    pub identity: Option<NavIdentity>,
    pub current_page: &'static str,
}

impl NavView {
    pub fn new(identity: Option<NavIdentity>, current_page: &'static str) -> Self {
        Self {
            identity,
            current_page,
        }
    }

    pub fn is_current(&self, page: &str) -> bool {
        self.current_page == page
    }

    pub fn display_name(&self) -> &str {
        self.identity
            .as_ref()
            .map(|identity| identity.display_name.as_str())
            .unwrap_or("User")
    }

    pub fn initials(&self) -> &str {
        self.identity
            .as_ref()
            .map(|identity| identity.initials.as_str())
            .unwrap_or("U")
    }
}

/// A usage bar with its headline figures.
pub struct UsageMeter {
    pub used_label: String,
    pub detail: String,
    pub width: f64,
    pub css_class: &'static str,
    pub warning: Option<String>,
    pub limit_reached: bool,
}

impl UsageMeter {
    pub fn storage(usage: &StorageUsage) -> Self {
        Self {
            used_label: format!("{}% used", usage.usage_percentage),
            detail: format!("{:.2} MB / {} MB", usage.total_size_mb, usage.max_storage_mb),
            width: bar_width(usage.usage_percentage),
            css_class: usage.tier().css_class(),
            warning: usage.warning(),
            limit_reached: usage.is_full(),
        }
    }

    pub fn bandwidth(usage: &BandwidthUsage) -> Self {
        let pct = usage.percentage();
        Self {
            used_label: format!("{:.2}% used", pct),
            detail: format!("{:.2} MB / {} MB", usage.total_usage_mb, usage.daily_limit_mb),
            width: bar_width(pct),
            css_class: usage.tier().css_class(),
            warning: usage.warning(),
            limit_reached: usage.limit_reached(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.css_class == UsageTier::Critical.css_class()
    }
}

/// Banner markup hides itself via a CSS animation after the display time.
pub struct BannerView {
    pub message: String,
    pub hide_after_ms: u128,
}

impl From<ErrorBanner> for BannerView {
    fn from(banner: ErrorBanner) -> Self {
        Self {
            hide_after_ms: banner.display_millis(),
            message: banner.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_meter_clamps_and_warns() {
        let meter = UsageMeter::storage(&StorageUsage {
            usage_percentage: 112.0,
            total_size_mb: 560.0,
            max_storage_mb: 500.0,
        });
        assert_eq!(meter.width, 100.0);
        assert!(meter.is_critical());
        assert!(meter.limit_reached);
        assert_eq!(meter.warning.as_deref(), Some("Warning: Storage is critically utilized!"));
        assert_eq!(meter.detail, "560.00 MB / 500 MB");
    }

    #[test]
    fn bandwidth_meter_reports_percentage() {
        let meter = UsageMeter::bandwidth(&BandwidthUsage {
            total_usage_mb: 40.0,
            daily_limit_mb: 50.0,
        });
        assert_eq!(meter.used_label, "80.00% used");
        assert_eq!(meter.width, 80.0);
        assert!(!meter.limit_reached);
        assert_eq!(
            meter.warning.as_deref(),
            Some("Warning: Daily bandwidth usage is highly utilized!")
        );
    }
}
