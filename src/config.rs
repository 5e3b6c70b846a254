use serde::Deserialize;
use thiserror::Error;

use crate::log::LogLevel;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

const DEFAULT_HEADER_OFFSET_PX: f64 = 150.0;
const DEFAULT_NAV_SCROLL_OFFSET_PX: f64 = 100.0;
const DEFAULT_ELEVATE_THRESHOLD_PX: f64 = 50.0;
const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
const DEFAULT_THROTTLE_MS: u32 = 100;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_SKILL_THRESHOLD: f64 = 0.3;
const DEFAULT_STAGGER_MS: u32 = 100;
const DEFAULT_SKILL_STAGGER_MS: u32 = 150;
const DEFAULT_TOAST_DURATION_MS: u32 = 6_000;
const DEFAULT_SIMULATED_DELAY_MS: u32 = 2_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const ELEVATE_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const BACK_TO_TOP_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 100_000.0);
const THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);
const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const TOAST_DURATION_MS_BOUNDS: (u32, u32) = (1_000, 60_000);
const SIMULATED_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid interaction config: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThresholds {
    pub elevate: f64,
    pub back_to_top: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBatching {
    Interval { ms: u32 },
    AnimationFrame,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactMode {
    Simulated { delay_ms: u32 },
    Mailto { recipient: String },
    Endpoint { url: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactConfig {
    pub mode: ContactMode,
    pub fallback_address: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            mode: ContactMode::Simulated {
                delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            },
            fallback_address: None,
        }
    }
}

impl ContactConfig {
    pub fn fallback_address(&self) -> Option<&str> {
        match (&self.mode, self.fallback_address.as_deref()) {
            (_, Some(address)) => Some(address),
            (ContactMode::Mailto { recipient }, None) => Some(recipient.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub header_offset_px: f64,
    pub nav_scroll_offset_px: f64,
    pub scroll_thresholds: ScrollThresholds,
    pub batching: ScrollBatching,
    pub reveal_threshold: f64,
    pub skill_threshold: f64,
    pub stagger_ms: u32,
    pub skill_stagger_ms: u32,
    pub toast_duration_ms: u32,
    pub contact: ContactConfig,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            nav_scroll_offset_px: DEFAULT_NAV_SCROLL_OFFSET_PX,
            scroll_thresholds: ScrollThresholds {
                elevate: DEFAULT_ELEVATE_THRESHOLD_PX,
                back_to_top: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            },
            batching: ScrollBatching::Interval {
                ms: DEFAULT_THROTTLE_MS,
            },
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            skill_threshold: DEFAULT_SKILL_THRESHOLD,
            stagger_ms: DEFAULT_STAGGER_MS,
            skill_stagger_ms: DEFAULT_SKILL_STAGGER_MS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            contact: ContactConfig::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    header_offset_px: Option<f64>,
    nav_scroll_offset_px: Option<f64>,
    scroll_thresholds: Option<RawScrollThresholds>,
    scroll_batching: Option<String>,
    throttle_ms: Option<u32>,
    reveal_threshold: Option<f64>,
    skill_threshold: Option<f64>,
    stagger_ms: Option<u32>,
    skill_stagger_ms: Option<u32>,
    toast_duration_ms: Option<u32>,
    contact: Option<RawContactConfig>,
    log_level: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScrollThresholds {
    elevate: Option<f64>,
    back_to_top: Option<f64>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContactConfig {
    mode: Option<String>,
    delay_ms: Option<u32>,
    recipient: Option<String>,
    url: Option<String>,
    fallback_address: Option<String>,
}

impl InteractionConfig {
    /// Parses the JSON config block. Missing or out-of-range fields keep
    /// their defaults; only malformed JSON is an error.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(source)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_json_or_default(source: Option<&str>) -> (Self, Option<ConfigError>) {
        let Some(source) = source.map(str::trim).filter(|value| !value.is_empty()) else {
            return (Self::default(), None);
        };

        match Self::from_json(source) {
            Ok(config) => (config, None),
            Err(error) => (Self::default(), Some(error)),
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let thresholds = raw.scroll_thresholds.unwrap_or_default();
        let throttle_ms = with_bounds(raw.throttle_ms, DEFAULT_THROTTLE_MS, THROTTLE_MS_BOUNDS);
        let batching = match raw
            .scroll_batching
            .as_deref()
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("frame") | Some("animation-frame") => ScrollBatching::AnimationFrame,
            _ => ScrollBatching::Interval { ms: throttle_ms },
        };

        Self {
            header_offset_px: with_bounds(raw.header_offset_px, DEFAULT_HEADER_OFFSET_PX, OFFSET_PX_BOUNDS),
            nav_scroll_offset_px: with_bounds(
                raw.nav_scroll_offset_px,
                DEFAULT_NAV_SCROLL_OFFSET_PX,
                OFFSET_PX_BOUNDS,
            ),
            scroll_thresholds: ScrollThresholds {
                elevate: with_bounds(
                    thresholds.elevate,
                    DEFAULT_ELEVATE_THRESHOLD_PX,
                    ELEVATE_THRESHOLD_BOUNDS,
                ),
                back_to_top: with_bounds(
                    thresholds.back_to_top,
                    DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
                    BACK_TO_TOP_THRESHOLD_BOUNDS,
                ),
            },
            batching,
            reveal_threshold: with_bounds(
                raw.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                VISIBILITY_THRESHOLD_BOUNDS,
            ),
            skill_threshold: with_bounds(
                raw.skill_threshold,
                DEFAULT_SKILL_THRESHOLD,
                VISIBILITY_THRESHOLD_BOUNDS,
            ),
            stagger_ms: with_bounds(raw.stagger_ms, DEFAULT_STAGGER_MS, STAGGER_MS_BOUNDS),
            skill_stagger_ms: with_bounds(raw.skill_stagger_ms, DEFAULT_SKILL_STAGGER_MS, STAGGER_MS_BOUNDS),
            toast_duration_ms: with_bounds(
                raw.toast_duration_ms,
                DEFAULT_TOAST_DURATION_MS,
                TOAST_DURATION_MS_BOUNDS,
            ),
            contact: raw.contact.map(contact_from_raw).unwrap_or_default(),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

fn contact_from_raw(raw: RawContactConfig) -> ContactConfig {
    let recipient = non_empty(raw.recipient);
    let url = non_empty(raw.url);
    let simulated = ContactMode::Simulated {
        delay_ms: with_bounds(raw.delay_ms, DEFAULT_SIMULATED_DELAY_MS, SIMULATED_DELAY_MS_BOUNDS),
    };

    let mode = match raw.mode.as_deref().map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("mailto") => recipient.map(|recipient| ContactMode::Mailto { recipient }),
        Some("endpoint") => url.map(|url| ContactMode::Endpoint { url }),
        _ => None,
    }
    .unwrap_or(simulated);

    ContactConfig {
        mode,
        fallback_address: non_empty(raw.fallback_address),
    }
}

fn with_bounds<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T)) -> T {
    value
        .filter(|value| bounds.0 <= *value && *value <= bounds.1)
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
