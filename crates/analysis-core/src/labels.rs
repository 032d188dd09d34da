//! Categorical labels attached to a price series.
//!
//! Every label renders to the exact string the interpreter prompt expects, so
//! `as_str` and the serde names must stay in lockstep.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label text shared by every indeterminate signal
pub const UNKNOWN: &str = "Unknown";

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum! {
    /// SMA50 vs SMA200 relationship on the latest bar
    pub enum Trend {
        Upward => "Upward",
        Downward => "Downward",
        Unknown => "Unknown",
    }
}

label_enum! {
    /// Age bucket of the current trend
    pub enum TrendDuration {
        Early => "Early (< 2 weeks)",
        Developing => "Developing (2-4 weeks)",
        Established => "Established (1-2 months)",
        Mature => "Mature (2-4 months)",
        Extended => "Extended (4+ months)",
    }
}

label_enum! {
    pub enum Momentum {
        Overbought => "Overbought",
        Positive => "Positive",
        Slowing => "Slowing",
        Negative => "Negative",
        Oversold => "Oversold",
    }
}

label_enum! {
    pub enum Volatility {
        Increasing => "Increasing",
        Decreasing => "Decreasing",
        Elevated => "Elevated",
        Stable => "Stable",
        Unknown => "Unknown",
    }
}

label_enum! {
    /// Up-day vs down-day volume comparison
    pub enum VolumeBehavior {
        Confirming => "Confirming",
        Distribution => "Distribution",
        Neutral => "Neutral",
        Unknown => "Unknown",
    }
}

label_enum! {
    /// Stacking of price against the 20/50/200 moving averages
    pub enum TrendStrength {
        Strong => "Strong",
        StrongBearish => "Strong (bearish)",
        Moderate => "Moderate",
        ModerateBearish => "Moderate (bearish)",
        Weak => "Weak",
        Unknown => "Unknown",
    }
}

label_enum! {
    /// Position of the latest close in its trailing 20-bar range
    pub enum SupportResistance {
        NearResistance => "Near resistance",
        NearSupport => "Near support",
        UpperRange => "Upper range",
        LowerRange => "Lower range",
        MidRange => "Mid range",
        Unknown => "Unknown",
    }
}

label_enum! {
    pub enum RiskMode {
        RiskOn => "Risk-On",
        RiskOff => "Risk-Off",
        Neutral => "Neutral",
    }
}

label_enum! {
    pub enum DirectionalBias {
        Bullish => "Bullish",
        Bearish => "Bearish",
        Neutral => "Neutral",
    }
}

label_enum! {
    /// Timeframe confidence, driven only by trend maturity
    pub enum Confidence {
        Low => "Low",
        Medium => "Medium",
        MediumHigh => "Medium-High",
    }
}
