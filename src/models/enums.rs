use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored string does not map to a known enum variant.
/// This is the boundary rejection for out-of-enumeration input: engine APIs
/// take the closed enums, so an invalid type string never reaches a rule table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(AlertCategory {
    Abnormal => "abnormal",
    Trend => "trend",
    Reminder => "reminder",
    FollowUp => "follow_up",
});

str_enum!(AlertStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Dismissed => "dismissed",
    Converted => "converted",
});

impl AlertStatus {
    /// Terminal statuses admit no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AlertStatus::Pending)
    }
}

/// Alert priority. The derived `Ord` ranks by severity: `Low < Medium <
/// High < Critical`. Display ordering (most severe first) uses `rank()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Sort rank: 0 is the most severe. Used wherever alert lists are
    /// presented critical-first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl std::str::FromStr for AlertPriority {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(InvalidEnum {
                field: "AlertPriority".into(),
                value: s.into(),
            }),
        }
    }
}
