//! Player survival attributes and the terminal death reasons they lead to.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A player attribute tracked by the attribute repository.
///
/// Every attribute has a paired maximum. The declaration order is the
/// order in which multi-attribute effects are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Attribute {
    /// Health points. Death at 0.
    Hp,
    /// Mood.
    Spirit,
    /// Satiety. Low values mean starving.
    Starve,
    /// Energy, restored by sleep.
    Vigour,
    /// Wound severity.
    Injury,
    /// Infection level.
    Infect,
    /// Hydration.
    Water,
    /// Virus load. Death at its maximum.
    Virus,
    /// Body temperature. The only attribute allowed below zero.
    Temperature,
}

impl Attribute {
    /// All attributes in application order.
    pub const ALL: [Self; 9] = [
        Self::Hp,
        Self::Spirit,
        Self::Starve,
        Self::Vigour,
        Self::Injury,
        Self::Infect,
        Self::Water,
        Self::Virus,
        Self::Temperature,
    ];

    /// The attribute's key as used in data files and the UI store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Spirit => "spirit",
            Self::Starve => "starve",
            Self::Vigour => "vigour",
            Self::Injury => "injury",
            Self::Infect => "infect",
            Self::Water => "water",
            Self::Virus => "virus",
            Self::Temperature => "temperature",
        }
    }
}

impl core::fmt::Display for Attribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DeathReason {
    /// Health reached zero from any cause other than infection.
    HpZero,
    /// Virus load reached its maximum.
    VirusOverload,
    /// Health reached zero in the same tick infection dealt damage.
    Infection,
}

impl core::fmt::Display for DeathReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::HpZero => write!(f, "hp_zero"),
            Self::VirusOverload => write!(f, "virus_overload"),
            Self::Infection => write!(f, "infection"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_keys_match_serde_names() {
        for attr in Attribute::ALL {
            let json = serde_json::to_string(&attr).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", attr.as_str()));
        }
    }

    #[test]
    fn death_reason_display() {
        assert_eq!(DeathReason::HpZero.to_string(), "hp_zero");
        assert_eq!(DeathReason::VirusOverload.to_string(), "virus_overload");
        assert_eq!(DeathReason::Infection.to_string(), "infection");
    }
}
