//! User-Agent classification.
//!
//! Matching is a case-insensitive substring search, so it is cheap and
//! deliberately loose: `pad` alone is enough to count as mobile.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

static MOBILE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        "phone|pad|pod|iPhone|iPod|ios|iPad|Android|Mobile|BlackBerry|IEMobile|MQQBrowser|JUC|Fennec|wOSBrowser|BrowserNG|WebOS|Symbian|Windows Phone",
    )
    .case_insensitive(true)
    .build()
    .expect("static mobile pattern")
});

static TABLET: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new("ipad|tablet|playbook|silk|kindle")
        .case_insensitive(true)
        .build()
        .expect("static tablet pattern")
});

/// Coarse device class derived from a User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceKind {
    /// iPad, Android without `Mobile`, Kindle and similar.
    Tablet,
    /// Phones and other handhelds.
    Mobile,
    /// Everything else.
    Desktop,
}

/// True when the User-Agent looks like a phone or tablet.
///
/// ```
/// use jmni_until::user_agent::is_mobile;
///
/// assert!(is_mobile("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"));
/// assert!(!is_mobile("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));
/// ```
pub fn is_mobile(user_agent: &str) -> bool {
    MOBILE.is_match(user_agent)
}

/// Classifies a User-Agent as tablet, mobile or desktop.
///
/// Android devices that do not advertise `Mobile` are tablets.
pub fn device_kind(user_agent: &str) -> DeviceKind {
    let lower = user_agent.to_lowercase();
    let android_tablet = lower.contains("android") && !lower.contains("mobile");

    if TABLET.is_match(user_agent) || android_tablet {
        DeviceKind::Tablet
    } else if is_mobile(user_agent) {
        DeviceKind::Mobile
    } else {
        DeviceKind::Desktop
    }
}
