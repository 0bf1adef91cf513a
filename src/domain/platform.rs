//! Platform-dependent behavior of the native text control.
//!
//! The traits are a pure function of the platform family and OS version and
//! are resolved once per process, never per keystroke.

use super::models::ContentHint;
use super::services::major_version;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// First OS major version that offers one-time-code autofill.
pub const ONE_TIME_CODE_MIN_MAJOR: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    Ios,
    Android,
    Desktop,
}

/// Platform family plus the OS version string as the OS reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: OsFamily,
    #[serde(default)]
    pub version: String,
}

impl Platform {
    pub fn new(os: OsFamily, version: impl Into<String>) -> Self {
        Self {
            os,
            version: version.into(),
        }
    }

    /// Platform of the running binary. The version is unknown at this level
    /// and left empty; use a config override to supply one.
    pub fn detect() -> Self {
        let os = if cfg!(target_os = "ios") {
            OsFamily::Ios
        } else if cfg!(target_os = "android") {
            OsFamily::Android
        } else {
            OsFamily::Desktop
        };
        Self::new(os, "")
    }
}

/// Native control behavior derived from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTraits {
    pub content_hint: ContentHint,
    /// Android mis-renders the selection unless select-on-focus is enabled.
    pub force_select_on_focus: bool,
}

impl PlatformTraits {
    pub fn resolve(platform: &Platform) -> Self {
        let otp_supported = platform.os == OsFamily::Ios
            && major_version(&platform.version).is_some_and(|major| major >= ONE_TIME_CODE_MIN_MAJOR);

        Self {
            content_hint: if otp_supported {
                ContentHint::OneTimeCode
            } else {
                ContentHint::None
            },
            force_select_on_focus: platform.os == OsFamily::Android,
        }
    }

    /// Effective select-on-focus for a caller request.
    pub fn select_text_on_focus(&self, requested: bool) -> bool {
        self.force_select_on_focus || requested
    }
}

static TRAITS: OnceLock<PlatformTraits> = OnceLock::new();

/// Resolves and stores the traits for `platform`. The first call wins; later
/// calls return the traits already installed.
pub fn install(platform: &Platform) -> &'static PlatformTraits {
    let mut installed = false;
    let traits = TRAITS.get_or_init(|| {
        installed = true;
        PlatformTraits::resolve(platform)
    });
    if installed {
        tracing::debug!(?platform, ?traits, "platform traits installed");
    } else {
        tracing::debug!(?platform, ?traits, "platform traits already installed, keeping them");
    }
    traits
}

/// Traits for this process, detecting the platform if none were installed.
pub fn current() -> &'static PlatformTraits {
    TRAITS.get_or_init(|| PlatformTraits::resolve(&Platform::detect()))
}
