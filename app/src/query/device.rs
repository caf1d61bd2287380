use std::{collections::HashMap, fmt::Display, str::FromStr};

pub const ALL_DEVICES_ID: &str = "all";
pub const ALL_DEVICES_LABEL: &str = "Alle Pressen";

/// Device filter shared by all report pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceSelection {
    #[default]
    All,
    Device(String),
}

impl DeviceSelection {
    pub fn device(id: impl Into<String>) -> Self {
        Self::from(id.into())
    }

    pub fn as_param(&self) -> &str {
        match self {
            DeviceSelection::All => ALL_DEVICES_ID,
            DeviceSelection::Device(id) => id,
        }
    }

    /// Display name from the device list, falling back to the raw id.
    pub fn display_name<'a>(&'a self, names: &'a HashMap<String, String>) -> &'a str {
        match self {
            DeviceSelection::All => ALL_DEVICES_LABEL,
            DeviceSelection::Device(id) => names.get(id).map(String::as_str).unwrap_or(id.as_str()),
        }
    }
}

impl From<String> for DeviceSelection {
    fn from(value: String) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_DEVICES_ID {
            DeviceSelection::All
        } else {
            DeviceSelection::Device(value.to_owned())
        }
    }
}

impl From<DeviceSelection> for String {
    fn from(value: DeviceSelection) -> Self {
        value.as_param().to_owned()
    }
}

impl FromStr for DeviceSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl Display for DeviceSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}
