use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::layout::Translation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

/// Named easing curves, spelled the way tween libraries spell them
/// (`"power2.inOut"`, `"linear"`). A bare `"powerN"` eases out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Easing {
    Linear,
    Power { power: u8, mode: EaseMode },
}

pub const POWER_MIN: u8 = 1;
pub const POWER_MAX: u8 = 4;

impl Default for Easing {
    fn default() -> Self {
        Easing::Power {
            power: 2,
            mode: EaseMode::InOut,
        }
    }
}

impl Easing {
    /// Maps linear progress to eased progress. Input is clamped to `[0, 1]`
    /// and both endpoints are exact.
    pub fn sample(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::Power { power, mode } => {
                let exp = i32::from(power) + 1;
                match mode {
                    EaseMode::In => t.powi(exp),
                    EaseMode::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseMode::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                        }
                    }
                }
            }
        }
    }
}

pub fn lerp_translation(from: Translation, to: Translation, eased: f64) -> Translation {
    Translation {
        x: from.x + (to.x - from.x) * eased,
        y: from.y + (to.y - from.y) * eased,
        units: to.units,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasingParseError(String);

impl fmt::Display for EasingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing '{}'", self.0)
    }
}

impl std::error::Error for EasingParseError {}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("linear") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Easing::Linear);
        }
        let err = || EasingParseError(value.to_string());
        let (curve, mode) = match trimmed.split_once('.') {
            Some((curve, mode)) => (curve, Some(mode)),
            None => (trimmed, None),
        };
        let power = curve
            .strip_prefix("power")
            .and_then(|digits| digits.parse::<u8>().ok())
            .filter(|power| (POWER_MIN..=POWER_MAX).contains(power))
            .ok_or_else(err)?;
        let mode = match mode {
            None | Some("out") => EaseMode::Out,
            Some("in") => EaseMode::In,
            Some("inOut") => EaseMode::InOut,
            Some(_) => return Err(err()),
        };
        Ok(Easing::Power { power, mode })
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Power { power, mode } => {
                let mode = match mode {
                    EaseMode::In => "in",
                    EaseMode::Out => "out",
                    EaseMode::InOut => "inOut",
                };
                write!(f, "power{power}.{mode}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.9} got {:.9} (delta {:.9})",
            expected,
            actual,
            delta
        );
    }

    #[test]
    fn parses_tween_names() {
        assert_eq!(
            "power2.inOut".parse::<Easing>(),
            Ok(Easing::Power {
                power: 2,
                mode: EaseMode::InOut
            })
        );
        assert_eq!(
            "power3".parse::<Easing>(),
            Ok(Easing::Power {
                power: 3,
                mode: EaseMode::Out
            })
        );
        assert_eq!("linear".parse::<Easing>(), Ok(Easing::Linear));
        assert!("power9.in".parse::<Easing>().is_err());
        assert!("power2.sideways".parse::<Easing>().is_err());
        assert!("bounce".parse::<Easing>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        let easing = Easing::Power {
            power: 4,
            mode: EaseMode::In,
        };
        assert_eq!(easing.to_string(), "power4.in");
        assert_eq!(easing.to_string().parse::<Easing>(), Ok(easing));
    }

    #[test]
    fn endpoints_are_exact_and_clamped() {
        let easing = Easing::default();
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
        assert_eq!(easing.sample(-3.0), 0.0);
        assert_eq!(easing.sample(7.0), 1.0);
        assert_eq!(easing.sample(f64::NAN), 0.0);
    }

    #[test]
    fn in_out_is_symmetric_around_midpoint() {
        let easing = Easing::default();
        assert_close(easing.sample(0.5), 0.5);
        assert_close(easing.sample(0.25) + easing.sample(0.75), 1.0);
        // power2 is cubic: 4 * t^3 on the first half.
        assert_close(easing.sample(0.25), 4.0 * 0.25f64.powi(3));
    }
}
