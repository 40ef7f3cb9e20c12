//! Carousel configuration, validation and environment overrides.
//!
//! Supported environment variables:
//! - `SLIDEKIT_ANIMATION`: `spring` | `tween`
//! - `SLIDEKIT_DRAG`: `on` | `off`
//! - `SLIDEKIT_AUTOPLAY_MS`: interval in milliseconds, or `off`

use slidekit_animation::{AnimationSpec, SpringSpec, TweenSpec};
use slidekit_foundation::GestureConfig;
use std::fmt;

use crate::viewport::DEFAULT_GRID_BREAKPOINT;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Wrap next/previous around the ends.
    pub circular: bool,
    /// Auto-advance period; `None` disables autoplay.
    pub auto_play_interval_ms: Option<u64>,
    /// Swipe tuning, including whether dragging is enabled at all.
    pub gesture: GestureConfig,
    /// Transition used whenever the offset moves to a page.
    pub animation: AnimationSpec,
    /// Viewport width at or above which pages are laid out as a grid.
    pub grid_breakpoint: Option<f32>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            circular: false,
            auto_play_interval_ms: None,
            gesture: GestureConfig::default(),
            animation: AnimationSpec::default(),
            grid_breakpoint: Some(DEFAULT_GRID_BREAKPOINT),
        }
    }
}

impl CarouselConfig {
    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    pub fn auto_play(mut self, interval_ms: Option<u64>) -> Self {
        self.auto_play_interval_ms = interval_ms;
        self
    }

    pub fn drag_enabled(mut self, enabled: bool) -> Self {
        self.gesture.enabled = enabled;
        self
    }

    pub fn resistance_factor(mut self, factor: f32) -> Self {
        self.gesture.resistance_factor = factor;
        self
    }

    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    pub fn grid_breakpoint(mut self, breakpoint: Option<f32>) -> Self {
        self.grid_breakpoint = breakpoint;
        self
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.gesture.enabled
    }

    /// Checks every tunable for a usable value.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        positive("gesture.slow_threshold", g.slow_threshold)?;
        positive("gesture.fast_threshold", g.fast_threshold)?;
        non_negative("gesture.velocity_cutoff", g.velocity_cutoff)?;
        non_negative("gesture.resistance_cap", g.resistance_cap)?;
        non_negative("gesture.max_release_velocity", g.max_release_velocity)?;
        finite("gesture.resistance_factor", g.resistance_factor)?;
        if !(0.0..=1.0).contains(&g.resistance_factor) {
            return Err(ConfigError::OutOfRange {
                field: "gesture.resistance_factor",
                value: g.resistance_factor,
                expected: "0.0..=1.0",
            });
        }
        if g.fast_threshold > g.slow_threshold {
            return Err(ConfigError::InvertedThresholds {
                slow: g.slow_threshold,
                fast: g.fast_threshold,
            });
        }
        if self.auto_play_interval_ms == Some(0) {
            return Err(ConfigError::ZeroAutoPlayInterval);
        }
        if let Some(breakpoint) = self.grid_breakpoint {
            positive("grid_breakpoint", breakpoint)?;
        }
        match self.animation {
            AnimationSpec::Spring(spring) => {
                positive("animation.stiffness", spring.stiffness)?;
                non_negative("animation.damping_ratio", spring.damping_ratio)?;
            }
            AnimationSpec::Tween(tween) if tween.duration_ms == 0 => {
                return Err(ConfigError::OutOfRange {
                    field: "animation.duration_ms",
                    value: 0.0,
                    expected: "> 0",
                });
            }
            AnimationSpec::Tween(_) => {}
        }
        Ok(())
    }

    /// Applies `SLIDEKIT_*` environment variables on top of `self`.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with a
    /// custom variable lookup. Unparseable values are logged and ignored.
    pub fn apply_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("SLIDEKIT_ANIMATION") {
            match parse_animation(&raw) {
                Some(animation) => self.animation = animation,
                None => log::warn!(
                    "SLIDEKIT_ANIMATION={raw:?} is not one of spring/tween; keeping {:?}",
                    self.animation
                ),
            }
        }
        if let Some(raw) = lookup("SLIDEKIT_DRAG") {
            match parse_switch(&raw) {
                Some(enabled) => self.gesture.enabled = enabled,
                None => log::warn!("SLIDEKIT_DRAG={raw:?} is not on/off; ignoring"),
            }
        }
        if let Some(raw) = lookup("SLIDEKIT_AUTOPLAY_MS") {
            match parse_interval(&raw) {
                Some(interval) => self.auto_play_interval_ms = interval,
                None => log::warn!("SLIDEKIT_AUTOPLAY_MS={raw:?} is not a positive integer or off; ignoring"),
            }
        }
        self
    }
}

fn parse_animation(value: &str) -> Option<AnimationSpec> {
    match value.trim().to_ascii_lowercase().as_str() {
        "spring" => Some(AnimationSpec::Spring(SpringSpec::default())),
        "bouncy" => Some(AnimationSpec::Spring(SpringSpec::new(
            SpringSpec::DAMPING_RATIO_LOW_BOUNCY,
            SpringSpec::STIFFNESS_MEDIUM_LOW,
        ))),
        "tween" | "ease" => Some(AnimationSpec::Tween(TweenSpec::default())),
        _ => None,
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_interval(value: &str) -> Option<Option<u64>> {
    let value = value.trim().to_ascii_lowercase();
    if value == "off" || value == "none" {
        return Some(None);
    }
    match value.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Some(ms)),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "> 0",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: ">= 0",
        })
    }
}

/// Rejected carousel configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonFinite {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    InvertedThresholds {
        slow: f32,
        fast: f32,
    },
    ZeroAutoPlayInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} = {value} is out of range (expected {expected})"),
            ConfigError::InvertedThresholds { slow, fast } => write!(
                f,
                "fast swipe threshold {fast} exceeds slow swipe threshold {slow}"
            ),
            ConfigError::ZeroAutoPlayInterval => {
                write!(f, "autoplay interval must be positive; use None to disable")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CarouselConfig::default().validate(), Ok(()));
    }

    #[test]
    fn resistance_factor_must_be_a_fraction() {
        let err = CarouselConfig::default()
            .resistance_factor(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "gesture.resistance_factor",
                ..
            }
        ));
        assert!(err.to_string().contains("resistance_factor"));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config =
            CarouselConfig::default().gesture(GestureConfig::default().thresholds(20.0, 40.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedThresholds { .. })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let config = CarouselConfig::default().grid_breakpoint(Some(f32::NAN));
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "grid_breakpoint"
            })
        );
    }

    #[test]
    fn zero_autoplay_is_rejected() {
        assert_eq!(
            CarouselConfig::default().auto_play(Some(0)).validate(),
            Err(ConfigError::ZeroAutoPlayInterval)
        );
    }

    #[test]
    fn env_overrides_apply() {
        let config = CarouselConfig::default().apply_overrides_from(lookup(&[
            ("SLIDEKIT_ANIMATION", " Tween "),
            ("SLIDEKIT_DRAG", "off"),
            ("SLIDEKIT_AUTOPLAY_MS", "4000"),
        ]));
        assert!(matches!(config.animation, AnimationSpec::Tween(_)));
        assert!(!config.is_drag_enabled());
        assert_eq!(config.auto_play_interval_ms, Some(4000));
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let base = CarouselConfig::default().auto_play(Some(3000));
        let config = base.apply_overrides_from(lookup(&[
            ("SLIDEKIT_ANIMATION", "wobble"),
            ("SLIDEKIT_DRAG", "maybe"),
            ("SLIDEKIT_AUTOPLAY_MS", "-5"),
        ]));
        assert_eq!(config, base);
    }

    #[test]
    fn autoplay_can_be_switched_off() {
        let config = CarouselConfig::default()
            .auto_play(Some(3000))
            .apply_overrides_from(lookup(&[("SLIDEKIT_AUTOPLAY_MS", "off")]));
        assert_eq!(config.auto_play_interval_ms, None);
    }
}
