//! Wire level identifiers shared with the sim.
//!
//! SimConnect only sees plain integers, so every local id is pinned here
//! rather than derived from an enum's discriminant.
//!
//! | id                        | value | sim event              |
//! |---------------------------|-------|------------------------|
//! | `KEY_PUSHBACK_SET`        | 0     | `TOGGLE_PUSHBACK`      |
//! | `KEY_TUG_HEADING`         | 1     | `KEY_TUG_HEADING`      |
//! | `KEY_TOGGLE_JETWAY`       | 2     | `TOGGLE_JETWAY`        |
//! | `KEY_REQUEST_FUEL`        | 3     | `REQUEST_FUEL_KEY`     |
//! | `KEY_TOGGLE_AIRCRAFT_EXIT`| 4     | `TOGGLE_AIRCRAFT_EXIT` |

pub const APP_NAME: &str = "Pushback Helper";

/// Window message the sim posts when data is waiting (WM_USER + 2).
pub const USER_MESSAGE: u32 = 0x402;

pub const HEADING_DEFINITION: u32 = 0;
pub const HEADING_REQUEST: u32 = 0;

// https://docs.flightsimulator.com/html/Programming_Tools/SimVars/Aircraft_SimVars/Aircraft_Misc_Variables.htm
pub const HEADING_DATUM: &str = "Plane Heading Degrees True";
pub const HEADING_UNITS: &str = "degrees";

/// Marks a datum whose id we never read back.
pub const UNUSED: u32 = u32::MAX;

pub const KEY_PUSHBACK_SET: u32 = 0;
pub const KEY_TUG_HEADING: u32 = 1;
pub const KEY_TOGGLE_JETWAY: u32 = 2;
pub const KEY_REQUEST_FUEL: u32 = 3;
pub const KEY_TOGGLE_AIRCRAFT_EXIT: u32 = 4;

pub const GROUP0: u32 = 0;

/// `SIMCONNECT_EVENT_FLAG_GROUPID_IS_PRIORITY`
pub const GROUPID_IS_PRIORITY: u32 = 0x0000_0010;

/// Object id of the user aircraft when transmitting events.
pub const USER_OBJECT: u32 = 0;

/// A local client event id and the sim event it is mapped onto.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClientEvent {
    pub id: u32,
    pub sim_name: &'static str,
}

pub const TOGGLE_PUSHBACK: ClientEvent = ClientEvent { id: KEY_PUSHBACK_SET, sim_name: "TOGGLE_PUSHBACK" };
pub const TUG_HEADING: ClientEvent = ClientEvent { id: KEY_TUG_HEADING, sim_name: "KEY_TUG_HEADING" };
pub const TOGGLE_JETWAY: ClientEvent = ClientEvent { id: KEY_TOGGLE_JETWAY, sim_name: "TOGGLE_JETWAY" };
pub const REQUEST_FUEL: ClientEvent = ClientEvent { id: KEY_REQUEST_FUEL, sim_name: "REQUEST_FUEL_KEY" };
pub const TOGGLE_AIRCRAFT_EXIT: ClientEvent =
    ClientEvent { id: KEY_TOGGLE_AIRCRAFT_EXIT, sim_name: "TOGGLE_AIRCRAFT_EXIT" };
