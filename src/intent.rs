use std::str::FromStr;
use tug_heading::{tug_event_parameter, TugDirection};
use crate::error::UnknownIntent;
use crate::protocol::{self, ClientEvent};

/// A ground service action requested from the panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    ToggleJetway,
    SetPushback,
    SteerTug(TugDirection),
    RequestFuel,
    ToggleDoor,
}

impl Intent {
    pub fn client_event(&self) -> ClientEvent {
        match self {
            Intent::ToggleJetway => protocol::TOGGLE_JETWAY,
            Intent::SetPushback => protocol::TOGGLE_PUSHBACK,
            Intent::SteerTug(_) => protocol::TUG_HEADING,
            Intent::RequestFuel => protocol::REQUEST_FUEL,
            Intent::ToggleDoor => protocol::TOGGLE_AIRCRAFT_EXIT,
        }
    }

    /// The data sent along with the event, given the last known heading.
    pub fn parameter(&self, heading: i32) -> u32 {
        // negative headings reinterpret like the sim's DWORD cast
        let heading = heading as u32;
        match self {
            Intent::ToggleJetway | Intent::SetPushback | Intent::ToggleDoor => 1,
            Intent::SteerTug(direction) => tug_event_parameter(*direction, heading),
            // the panel has always sent the straight tug heading with the
            // fuel request, the sim's use of it is unknown so keep it as is
            Intent::RequestFuel => tug_event_parameter(TugDirection::Straight, heading),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::ToggleJetway => write!(f, "jetway"),
            Intent::SetPushback => write!(f, "pushback"),
            Intent::SteerTug(direction) => write!(f, "{}", direction),
            Intent::RequestFuel => write!(f, "fuel"),
            Intent::ToggleDoor => write!(f, "door"),
        }
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let intent = match s.trim().to_ascii_lowercase().as_str() {
            "jetway" => Intent::ToggleJetway,
            "pushback" | "push" => Intent::SetPushback,
            "left" => Intent::SteerTug(TugDirection::Left),
            "right" => Intent::SteerTug(TugDirection::Right),
            "straight" => Intent::SteerTug(TugDirection::Straight),
            "fuel" => Intent::RequestFuel,
            "door" | "exit" => Intent::ToggleDoor,
            other => return Err(UnknownIntent(other.to_owned())),
        };
        Ok(intent)
    }
}
