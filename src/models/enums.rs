use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the wire form.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ClientError::ResponseParsing(format!(
                        "invalid {} value: {}",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }
    };
}

str_enum!(StockType {
    Serialized => "Serialized",
    NonSerialized => "Non-Serialized",
});

str_enum!(ServiceType {
    Audiology => "Audiology",
    Speech => "Speech",
    Tga => "TGA",
});

str_enum!(PaymentMode {
    Cash => "Cash",
    Card => "Card",
    Upi => "UPI",
    BankTransfer => "Bank Transfer",
});

str_enum!(ReferralType {
    SelfReferral => "self",
    Doctor => "doctor",
    Camp => "camp",
    Other => "other",
});

/// Trial status as reported by the backend.
///
/// Statuses this client does not know are kept verbatim so new backend
/// states never break list decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrialDecision {
    TrialActive,
    FollowUp,
    DeviceBooked,
    NotBooked,
    Other(String),
}

impl TrialDecision {
    pub fn as_str(&self) -> &str {
        match self {
            Self::TrialActive => "Trial Active",
            Self::FollowUp => "Follow-up",
            Self::DeviceBooked => "Device Booked",
            Self::NotBooked => "not-booked",
            Self::Other(s) => s,
        }
    }

    /// Whether the trial still awaits a disposition.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::TrialActive | Self::FollowUp)
    }
}

impl From<&str> for TrialDecision {
    fn from(s: &str) -> Self {
        match s {
            "Trial Active" => Self::TrialActive,
            "Follow-up" => Self::FollowUp,
            "Device Booked" => Self::DeviceBooked,
            "not-booked" => Self::NotBooked,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TrialDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TrialDecision {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TrialDecision {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_type_round_trip() {
        let parsed: StockType = "Non-Serialized".parse().unwrap();
        assert_eq!(parsed, StockType::NonSerialized);
        assert_eq!(
            serde_json::to_string(&StockType::NonSerialized).unwrap(),
            "\"Non-Serialized\""
        );
    }

    #[test]
    fn unknown_enum_value_rejected() {
        assert!("Gold".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn trial_decision_known_values() {
        let decision: TrialDecision = serde_json::from_str("\"Follow-up\"").unwrap();
        assert_eq!(decision, TrialDecision::FollowUp);
        assert!(decision.is_open());
        assert!(!TrialDecision::DeviceBooked.is_open());
    }

    #[test]
    fn trial_decision_unknown_value_preserved() {
        let decision: TrialDecision = serde_json::from_str("\"BOOK - Awaiting Stock\"").unwrap();
        assert_eq!(decision, TrialDecision::Other("BOOK - Awaiting Stock".into()));
        assert_eq!(
            serde_json::to_string(&decision).unwrap(),
            "\"BOOK - Awaiting Stock\""
        );
    }
}
