use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use log::{debug, info, warn};
use crate::dispatcher::EventDispatcher;
use crate::error::ChannelError;
use crate::intent::Intent;
use crate::protocol::{
    HEADING_DATUM, HEADING_DEFINITION, HEADING_REQUEST, HEADING_UNITS, USER_MESSAGE,
};
use crate::sim_connection::{SimConnection, SimConnector, SimMessage};
use crate::telemetry::{decode_heading, HeadingStore};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn date_to_string(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Error,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::Connected => "CONNECTED",
            ConnectionState::Error => "ERROR!",
        };
        write!(f, "{}", s)
    }
}

/// Notifications for whoever displays the bridge.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeEvent {
    StateChanged(ConnectionState),
    Heading(i32),
}

/// Everything the panel knows about the sim: the session, its state and the
/// last heading received.
///
/// All methods are meant to be called from a single thread. None of them
/// return errors: sim failures are logged and turn into
/// [`ConnectionState::Error`], the next [`Bridge::try_connect`] recovers.
pub struct Bridge<C: SimConnector> {
    connector: C,
    app_name: String,
    conn: Option<C::Connection>,
    state: ConnectionState,
    connected_at: Option<DateTime<Utc>>,
    heading: HeadingStore,
    dispatcher: EventDispatcher,
    listener: Option<Sender<BridgeEvent>>,
}

impl<C: SimConnector> Bridge<C> {
    pub fn new(connector: C, app_name: &str) -> Self {
        Self {
            connector,
            app_name: app_name.to_owned(),
            conn: None,
            state: ConnectionState::Disconnected,
            connected_at: None,
            heading: HeadingStore::default(),
            dispatcher: EventDispatcher::default(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Sender<BridgeEvent>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Last true heading in whole degrees, 0 until the sim has replied once.
    pub fn last_heading(&self) -> i32 {
        self.heading.degrees()
    }

    pub fn status_line(&self) -> String {
        let mut line = self.state.to_string();
        if let Some(since) = self.connected_at {
            line.push_str(&format!(" since {}", date_to_string(&since)));
        }
        match self.heading.updated() {
            Some(at) => line.push_str(&format!(
                ", heading {}° at {}",
                self.heading.degrees(),
                date_to_string(&at)
            )),
            None => line.push_str(", no heading yet"),
        }
        line
    }

    /// Open a session with the sim unless one is already up.
    pub fn try_connect(&mut self) {
        if self.is_connected() {
            return;
        }
        // only one session may exist, drop whatever is left of the last one
        self.release();

        match self.open() {
            Ok(conn) => {
                self.conn = Some(conn);
                self.connected_at = Some(Utc::now());
                info!("Simulator connection established.");
                self.set_state(ConnectionState::Connected);
            }
            Err(e) => {
                warn!("Unable to connect to the simulator: {e}");
                self.set_state(ConnectionState::Error);
            }
        }
    }

    fn open(&mut self) -> Result<C::Connection, ChannelError> {
        let mut conn = self.connector.open(&self.app_name, USER_MESSAGE)?;
        conn.add_data_definition(HEADING_DEFINITION, HEADING_DATUM, HEADING_UNITS)?;
        Ok(conn)
    }

    /// Ask the sim for one heading reply, it arrives later through the pump.
    pub fn poll(&mut self) {
        if !self.is_connected() {
            return;
        }
        let Some(conn) = self.conn.as_mut() else {
            return;
        };
        if let Err(e) = conn.request_data_on_sim_object_type(HEADING_REQUEST, HEADING_DEFINITION) {
            self.fail(e);
        }
    }

    /// Send an intent to the sim, silently dropped while not connected.
    pub fn dispatch(&mut self, intent: Intent) {
        if !self.is_connected() {
            debug!("Not connected, ignoring {intent}");
            return;
        }
        let Some(conn) = self.conn.as_mut() else {
            return;
        };
        if let Err(e) = self.dispatcher.dispatch(conn, intent, self.heading.degrees()) {
            self.fail(e);
        }
    }

    pub fn disconnect(&mut self) {
        if self.conn.is_some() {
            info!("Closing simulator connection.");
        }
        self.release();
        self.set_state(ConnectionState::Disconnected);
    }

    /// Close the session and stop notifying the listener.
    pub fn shutdown(&mut self) {
        self.disconnect();
        self.listener = None;
    }

    pub fn on_host_opened(&mut self) {
        // an acknowledgement without a session would block every reconnect
        if self.conn.is_none() {
            debug!("Ignoring open acknowledgement without a session.");
            return;
        }
        debug!("Simulator acknowledged the session.");
        self.set_state(ConnectionState::Connected);
    }

    pub fn on_host_quit(&mut self) {
        info!("Simulator connection closed.");
        self.release();
        self.set_state(ConnectionState::Disconnected);
    }

    /// The sim rejected an earlier call. The session stays open.
    pub fn on_host_exception(&mut self, exception: u32, send_id: u32) {
        warn!("Simulator exception {exception} for packet {send_id}");
    }

    pub fn on_typed_data(&mut self, request_id: u32, payload: &[u8]) {
        if request_id != HEADING_REQUEST {
            debug!("Ignoring reply to unknown request {request_id}");
            return;
        }
        match decode_heading(payload) {
            Ok(degrees) => {
                self.heading.set(degrees);
                self.notify(BridgeEvent::Heading(degrees));
            }
            Err(e) => warn!("Discarding heading reply: {e}"),
        }
    }

    /// Route one message from the sim to its handler.
    pub fn handle_message(&mut self, msg: SimMessage) {
        match msg {
            SimMessage::Null => {}
            SimMessage::Open => self.on_host_opened(),
            SimMessage::Quit => self.on_host_quit(),
            SimMessage::Exception { exception, send_id } => {
                self.on_host_exception(exception, send_id)
            }
            SimMessage::SimObjectDataByType { request_id, data, .. } => {
                self.on_typed_data(request_id, &data)
            }
            SimMessage::Unknown(msg) => debug!("Unhandled message received: {msg}"),
        }
    }

    /// Take the next waiting message, `None` when there is no session.
    pub(crate) fn next_message(&mut self) -> Option<Result<SimMessage, ChannelError>> {
        self.conn.as_mut().map(|conn| conn.next_message())
    }

    pub(crate) fn fail(&mut self, e: ChannelError) {
        warn!("Simulator connection failed: {e}");
        self.release();
        self.set_state(ConnectionState::Error);
    }

    fn release(&mut self) {
        if self.conn.take().is_some() {
            debug!("Released simulator session.");
        }
        self.dispatcher.reset();
        self.connected_at = None;
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state == state {
            return;
        }
        info!("Simulator {} -> {}", self.state, state);
        self.state = state;
        self.notify(BridgeEvent::StateChanged(state));
    }

    fn notify(&mut self, event: BridgeEvent) {
        let Some(listener) = &self.listener else {
            return;
        };
        if listener.send(event).is_err() {
            debug!("Status listener is gone, no longer notifying.");
            self.listener = None;
        }
    }
}

impl<C: SimConnector> Drop for Bridge<C> {
    fn drop(&mut self) {
        self.release();
    }
}
