use crate::error::ChannelError;

/// A message received from the sim, already detached from the sim's buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum SimMessage {
    /// Nothing is waiting.
    Null,
    Open,
    Quit,
    Exception { exception: u32, send_id: u32 },
    SimObjectDataByType { request_id: u32, define_id: u32, data: Vec<u8> },
    /// Anything we don't subscribe to, kept for logging.
    Unknown(String),
}

/// An open session with the sim.
///
/// Dropping the connection releases the session.
pub trait SimConnection {
    fn add_data_definition(
        &mut self,
        define_id: u32,
        datum_name: &str,
        units_name: &str,
    ) -> Result<(), ChannelError>;

    /// Ask for one reply carrying `define_id` for the user aircraft.
    fn request_data_on_sim_object_type(
        &mut self,
        request_id: u32,
        define_id: u32,
    ) -> Result<(), ChannelError>;

    fn map_client_event_to_sim_event(
        &mut self,
        event_id: u32,
        event_name: &str,
    ) -> Result<(), ChannelError>;

    fn transmit_client_event(
        &mut self,
        object_id: u32,
        event_id: u32,
        data: u32,
        group_id: u32,
        flags: u32,
    ) -> Result<(), ChannelError>;

    fn next_message(&mut self) -> Result<SimMessage, ChannelError>;
}

/// Opens sessions with the sim, one per reconnect attempt.
pub trait SimConnector {
    type Connection: SimConnection;

    fn open(&mut self, app_name: &str, user_message: u32) -> Result<Self::Connection, ChannelError>;
}
