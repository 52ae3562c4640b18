use std::fmt;

use serde::Deserialize;

use crate::easing::Easing;
use crate::layout::{LayoutSpec, LayoutUnits};

pub const DEFAULT_SCROLL_COOLDOWN_MS: f64 = 1400.0;
pub const DEFAULT_SCROLL_DELTA_THRESHOLD: f64 = 50.0;
pub const DEFAULT_TOUCH_DELTA_THRESHOLD: f64 = 50.0;
pub const DEFAULT_TRANSITION_SECS: f64 = 1.2;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct KeyBindings {
    pub next: Vec<String>,
    pub previous: Vec<String>,
}

impl KeyBindings {
    pub fn vertical_arrows() -> Self {
        Self::from_keys(&["ArrowDown"], &["ArrowUp"])
    }

    pub fn horizontal_arrows() -> Self {
        Self::from_keys(&["ArrowRight"], &["ArrowLeft"])
    }

    pub fn arrows_and_space() -> Self {
        Self::from_keys(&["ArrowDown", "ArrowRight", " "], &["ArrowUp", "ArrowLeft"])
    }

    fn from_keys(next: &[&str], previous: &[&str]) -> Self {
        Self {
            next: next.iter().map(|key| key.to_string()).collect(),
            previous: previous.iter().map(|key| key.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty() && self.previous.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::vertical_arrows()
    }
}

/// Contiguous run of sections that horizontal wheel input steps through
/// without leaving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct GalleryRange {
    pub first: usize,
    pub last: usize,
}

impl GalleryRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub scroll_cooldown_ms: f64,
    pub scroll_delta_threshold: f64,
    pub touch_delta_threshold: f64,
    pub transition_duration_secs: f64,
    pub easing: Easing,
    /// Wheel down steps to the lower index.
    pub invert_wheel: bool,
    pub keys: KeyBindings,
    pub layout: LayoutSpec,
    pub units: LayoutUnits,
    pub gallery: Option<GalleryRange>,
    pub resize_debounce_ms: u32,
    pub trace_input: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            scroll_cooldown_ms: DEFAULT_SCROLL_COOLDOWN_MS,
            scroll_delta_threshold: DEFAULT_SCROLL_DELTA_THRESHOLD,
            touch_delta_threshold: DEFAULT_TOUCH_DELTA_THRESHOLD,
            transition_duration_secs: DEFAULT_TRANSITION_SECS,
            easing: Easing::default(),
            invert_wheel: true,
            keys: KeyBindings::default(),
            layout: LayoutSpec::default(),
            units: LayoutUnits::default(),
            gallery: Some(GalleryRange { first: 2, last: 4 }),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            trace_input: false,
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("scroll_cooldown_ms", self.scroll_cooldown_ms)?;
        non_negative("scroll_delta_threshold", self.scroll_delta_threshold)?;
        non_negative("touch_delta_threshold", self.touch_delta_threshold)?;
        non_negative("transition_duration_secs", self.transition_duration_secs)?;
        if self.keys.is_empty() {
            return Err(ConfigError::NoKeyBindings);
        }
        if let Some(range) = self.gallery {
            if range.first > range.last {
                return Err(ConfigError::InvertedGallery {
                    first: range.first,
                    last: range.last,
                });
            }
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber { field, value })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidNumber { field: &'static str, value: f64 },
    NoKeyBindings,
    InvertedGallery { first: usize, last: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { field, value } => {
                write!(f, "{field} must be a finite non-negative number, got {value}")
            }
            ConfigError::NoKeyBindings => write!(f, "no keys bound to either direction"),
            ConfigError::InvertedGallery { first, last } => {
                write!(f, "gallery range starts at {first} after it ends at {last}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EaseMode;

    #[test]
    fn defaults_validate() {
        assert_eq!(NavigatorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: NavigatorConfig = serde_json::from_str(
            r#"{
                "scroll_cooldown_ms": 200,
                "easing": "power3.out",
                "units": "pixels",
                "keys": { "next": ["ArrowRight"], "previous": ["ArrowLeft"] },
                "layout": { "kind": "row" },
                "gallery": null
            }"#,
        )
        .unwrap();
        assert_eq!(config.scroll_cooldown_ms, 200.0);
        assert_eq!(
            config.easing,
            Easing::Power {
                power: 3,
                mode: EaseMode::Out
            }
        );
        assert_eq!(config.units, LayoutUnits::Pixels);
        assert_eq!(config.keys, KeyBindings::horizontal_arrows());
        assert_eq!(config.layout, LayoutSpec::Row);
        assert_eq!(config.gallery, None);
        assert_eq!(config.touch_delta_threshold, DEFAULT_TOUCH_DELTA_THRESHOLD);
        assert!(config.invert_wheel);
    }

    #[test]
    fn unknown_easing_is_a_parse_error() {
        let parsed = serde_json::from_str::<NavigatorConfig>(r#"{ "easing": "wobble" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_bad_numbers_and_ranges() {
        let mut config = NavigatorConfig::default();
        config.transition_duration_secs = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNumber {
                field: "transition_duration_secs",
                ..
            })
        ));

        let mut config = NavigatorConfig::default();
        config.scroll_cooldown_ms = -1.0;
        assert!(config.validate().is_err());

        let mut config = NavigatorConfig::default();
        config.gallery = Some(GalleryRange { first: 4, last: 2 });
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedGallery { first: 4, last: 2 })
        );

        let mut config = NavigatorConfig::default();
        config.keys = KeyBindings {
            next: Vec::new(),
            previous: Vec::new(),
        };
        assert_eq!(config.validate(), Err(ConfigError::NoKeyBindings));
    }
}
