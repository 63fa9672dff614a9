use std::collections::HashSet;
use log::{debug, info};
use crate::error::ChannelError;
use crate::intent::Intent;
use crate::protocol::{GROUP0, GROUPID_IS_PRIORITY, USER_OBJECT};
use crate::sim_connection::SimConnection;

/// Sends intents to the sim as client events.
///
/// A client event has to be mapped onto its sim event once per session
/// before it can be transmitted. Mappings belong to the session they were
/// made on, so [`EventDispatcher::reset`] must be called whenever it ends.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    mapped: HashSet<u32>,
}

impl EventDispatcher {
    pub fn reset(&mut self) {
        self.mapped.clear();
    }

    pub fn dispatch<S: SimConnection>(
        &mut self,
        conn: &mut S,
        intent: Intent,
        heading: i32,
    ) -> Result<(), ChannelError> {
        let event = intent.client_event();
        if !self.mapped.contains(&event.id) {
            conn.map_client_event_to_sim_event(event.id, event.sim_name)?;
            debug!("Mapped client event {} to {}", event.id, event.sim_name);
            self.mapped.insert(event.id);
        }

        let data = intent.parameter(heading);
        conn.transmit_client_event(USER_OBJECT, event.id, data, GROUP0, GROUPID_IS_PRIORITY)?;
        info!("Sent {} ({}) with data {}", intent, event.sim_name, data);
        Ok(())
    }
}
