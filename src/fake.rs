//! In-memory sim used by the tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use crate::error::ChannelError;
use crate::sim_connection::{SimConnection, SimConnector, SimMessage};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Open(String, u32),
    AddDefinition(u32, String, String),
    Request(u32, u32),
    MapEvent(u32, String),
    Transmit { object_id: u32, event_id: u32, data: u32, group_id: u32, flags: u32 },
    Close,
}

#[derive(Debug, Default)]
struct Sim {
    calls: Vec<Call>,
    inbox: VecDeque<SimMessage>,
    fail_calls: bool,
    live: usize,
    max_live: usize,
}

/// A session with the fake sim. Clones share the same sim, only the one
/// handed out by [`FakeConnector`] owns the session.
#[derive(Clone, Debug, Default)]
pub struct FakeConnection {
    sim: Rc<RefCell<Sim>>,
    owned: bool,
}

impl FakeConnection {
    pub fn calls(&self) -> Vec<Call> {
        self.sim.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.sim.borrow_mut().calls.clear();
    }

    /// Data of every transmission of `event_id`, in order.
    pub fn transmitted(&self, event_id: u32) -> Vec<u32> {
        self.sim
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Transmit { event_id: id, data, .. } if *id == event_id => Some(*data),
                _ => None,
            })
            .collect()
    }

    pub fn fail_calls(&self, fail: bool) {
        self.sim.borrow_mut().fail_calls = fail;
    }

    /// Queue a message for the next drain.
    pub fn push(&self, msg: SimMessage) {
        self.sim.borrow_mut().inbox.push_back(msg);
    }

    pub fn pending(&self) -> usize {
        self.sim.borrow().inbox.len()
    }

    pub fn live_sessions(&self) -> usize {
        self.sim.borrow().live
    }

    pub fn max_live_sessions(&self) -> usize {
        self.sim.borrow().max_live
    }

    fn record(&mut self, call: Call) -> Result<(), ChannelError> {
        let mut sim = self.sim.borrow_mut();
        if sim.fail_calls {
            return Err(ChannelError::call("fake", format!("{call:?}")));
        }
        sim.calls.push(call);
        Ok(())
    }
}

impl SimConnection for FakeConnection {
    fn add_data_definition(
        &mut self,
        define_id: u32,
        datum_name: &str,
        units_name: &str,
    ) -> Result<(), ChannelError> {
        self.record(Call::AddDefinition(define_id, datum_name.to_owned(), units_name.to_owned()))
    }

    fn request_data_on_sim_object_type(
        &mut self,
        request_id: u32,
        define_id: u32,
    ) -> Result<(), ChannelError> {
        self.record(Call::Request(request_id, define_id))
    }

    fn map_client_event_to_sim_event(
        &mut self,
        event_id: u32,
        event_name: &str,
    ) -> Result<(), ChannelError> {
        self.record(Call::MapEvent(event_id, event_name.to_owned()))
    }

    fn transmit_client_event(
        &mut self,
        object_id: u32,
        event_id: u32,
        data: u32,
        group_id: u32,
        flags: u32,
    ) -> Result<(), ChannelError> {
        self.record(Call::Transmit { object_id, event_id, data, group_id, flags })
    }

    fn next_message(&mut self) -> Result<SimMessage, ChannelError> {
        let mut sim = self.sim.borrow_mut();
        if sim.fail_calls {
            return Err(ChannelError::call("fake", "next_message"));
        }
        Ok(sim.inbox.pop_front().unwrap_or(SimMessage::Null))
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        if self.owned {
            let mut sim = self.sim.borrow_mut();
            sim.live -= 1;
            sim.calls.push(Call::Close);
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeConnector {
    sim: Rc<RefCell<Sim>>,
    failures_left: usize,
}

impl FakeConnector {
    /// A sim that refuses the first `failures` connection attempts.
    pub fn failing(failures: usize) -> Self {
        Self { failures_left: failures, ..Default::default() }
    }

    /// An inspection handle onto the sim, not a session.
    pub fn sim(&self) -> FakeConnection {
        FakeConnection { sim: self.sim.clone(), owned: false }
    }
}

impl SimConnector for FakeConnector {
    type Connection = FakeConnection;

    fn open(&mut self, app_name: &str, user_message: u32) -> Result<FakeConnection, ChannelError> {
        let mut sim = self.sim.borrow_mut();
        sim.calls.push(Call::Open(app_name.to_owned(), user_message));
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(ChannelError::Open("sim not running".to_string()));
        }
        sim.live += 1;
        sim.max_live = sim.max_live.max(sim.live);
        Ok(FakeConnection { sim: self.sim.clone(), owned: true })
    }
}
