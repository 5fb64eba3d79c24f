//! DONKI notification records and the static type-code lookup used to
//! describe them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type filter sent upstream when the caller doesn't pick one.
pub const DEFAULT_NOTIFICATION_TYPE: &str = "all";

pub const UNKNOWN_FULL_NAME: &str = "Unknown Type";
pub const UNKNOWN_DESCRIPTION: &str = "No description available.";

const MESSAGE_TYPE_FIELD: &str = "messageType";

/// Human-readable name and description for a notification type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDetail {
    pub full_name: &'static str,
    pub description: &'static str,
}

/// Notification type codes DONKI publishes, plus its `report` and `all`
/// pseudo-types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    SolarFlare,
    SolarEnergeticParticle,
    CoronalMassEjection,
    InterplanetaryShock,
    MagnetopauseCrossing,
    GeomagneticStorm,
    RadiationBeltEnhancement,
    HighSpeedStream,
    Report,
    All,
}

impl NotificationType {
    pub const ALL: [NotificationType; 10] = [
        NotificationType::SolarFlare,
        NotificationType::SolarEnergeticParticle,
        NotificationType::CoronalMassEjection,
        NotificationType::InterplanetaryShock,
        NotificationType::MagnetopauseCrossing,
        NotificationType::GeomagneticStorm,
        NotificationType::RadiationBeltEnhancement,
        NotificationType::HighSpeedStream,
        NotificationType::Report,
        NotificationType::All,
    ];

    /// Code as it appears in DONKI's `messageType`. Case-sensitive.
    pub fn code(self) -> &'static str {
        match self {
            NotificationType::SolarFlare => "FLR",
            NotificationType::SolarEnergeticParticle => "SEP",
            NotificationType::CoronalMassEjection => "CME",
            NotificationType::InterplanetaryShock => "IPS",
            NotificationType::MagnetopauseCrossing => "MPC",
            NotificationType::GeomagneticStorm => "GST",
            NotificationType::RadiationBeltEnhancement => "RBE",
            NotificationType::HighSpeedStream => "HSS",
            NotificationType::Report => "report",
            NotificationType::All => "all",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn detail(self) -> &'static TypeDetail {
        match self {
            NotificationType::SolarFlare => &TypeDetail {
                full_name: "Solar Flare",
                description: "An intense burst of radiation from the sun.",
            },
            NotificationType::SolarEnergeticParticle => &TypeDetail {
                full_name: "Solar Energetic Particle",
                description: "High-energy particles emitted by the sun during solar events.",
            },
            NotificationType::CoronalMassEjection => &TypeDetail {
                full_name: "Coronal Mass Ejection",
                description: "A large expulsion of plasma and magnetic field from the sun's corona.",
            },
            NotificationType::InterplanetaryShock => &TypeDetail {
                full_name: "Interplanetary Shock",
                description: "A shock wave caused by solar wind or coronal mass ejections.",
            },
            NotificationType::MagnetopauseCrossing => &TypeDetail {
                full_name: "Magnetopause Crossing",
                description: "A crossing of the Earth's magnetopause boundary.",
            },
            NotificationType::GeomagneticStorm => &TypeDetail {
                full_name: "Geomagnetic Storm",
                description: "A disturbance in Earth's magnetosphere caused by solar wind.",
            },
            NotificationType::RadiationBeltEnhancement => &TypeDetail {
                full_name: "Radiation Belt Enhancement",
                description: "Increased particle density in Earth's radiation belts.",
            },
            NotificationType::HighSpeedStream => &TypeDetail {
                full_name: "High-Speed Stream",
                description: "A fast stream of solar wind originating from coronal holes.",
            },
            NotificationType::Report => &TypeDetail {
                full_name: "Report",
                description: "General space weather report or analysis.",
            },
            NotificationType::All => &TypeDetail {
                full_name: "All Types",
                description: "Includes all types of space weather notifications.",
            },
        }
    }
}

/// Look up the detail for a type code. `None` for anything outside the table.
pub fn type_detail(code: &str) -> Option<&'static TypeDetail> {
    NotificationType::from_code(code).map(NotificationType::detail)
}

/// One element of DONKI's notifications array, kept as an open JSON object
/// so fields we don't know about pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawNotification(Map<String, Value>);

impl RawNotification {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The `messageType` code, when present and a string.
    pub fn message_type(&self) -> Option<&str> {
        self.0.get(MESSAGE_TYPE_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A raw notification plus `fullName` and `description`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedNotification {
    #[serde(flatten)]
    raw: RawNotification,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub description: String,
}

impl EnrichedNotification {
    pub fn raw(&self) -> &RawNotification {
        &self.raw
    }
}

impl From<RawNotification> for EnrichedNotification {
    fn from(raw: RawNotification) -> Self {
        enrich(raw)
    }
}

/// Attach the type detail for `raw.messageType`, falling back to the
/// unknown-type defaults.
///
/// Incoming `fullName`/`description` fields are replaced by the looked-up
/// values; every other field is carried over as-is.
pub fn enrich(raw: RawNotification) -> EnrichedNotification {
    let detail = raw.message_type().and_then(type_detail);
    let full_name = detail.map_or(UNKNOWN_FULL_NAME, |d| d.full_name);
    let description = detail.map_or(UNKNOWN_DESCRIPTION, |d| d.description);

    let RawNotification(mut fields) = raw;
    // Serialized alongside the flattened map; a leftover key would be emitted twice.
    fields.remove("fullName");
    fields.remove("description");

    EnrichedNotification {
        raw: RawNotification(fields),
        full_name: full_name.to_string(),
        description: description.to_string(),
    }
}
