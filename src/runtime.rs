use std::time::{Duration, Instant};
use crossbeam_channel::{bounded, select, tick, unbounded, Receiver, Sender};
use log::{debug, info};
use crate::bridge::Bridge;
use crate::config::Config;
use crate::intent::Intent;
use crate::pump;
use crate::sim_connection::SimConnector;

/// Requests from the panel to the bridge.
#[derive(Debug)]
pub enum Command {
    Connect,
    Disconnect,
    Dispatch(Intent),
    Status(Sender<String>),
    Shutdown,
}

/// The panel's side of the runtime. Cheap to clone, every method returns
/// `false` once the runtime has stopped.
#[derive(Clone, Debug)]
pub struct RuntimeHandle(Sender<Command>);

impl RuntimeHandle {
    pub fn connect(&self) -> bool {
        self.0.send(Command::Connect).is_ok()
    }

    pub fn disconnect(&self) -> bool {
        self.0.send(Command::Disconnect).is_ok()
    }

    pub fn dispatch(&self, intent: Intent) -> bool {
        self.0.send(Command::Dispatch(intent)).is_ok()
    }

    pub fn shutdown(&self) -> bool {
        self.0.send(Command::Shutdown).is_ok()
    }

    /// Ask for the status line, blocking until the runtime answers.
    pub fn status(&self) -> Option<String> {
        let (tx, rx) = bounded(1);
        self.0.send(Command::Status(tx)).ok()?;
        rx.recv().ok()
    }
}

pub fn channel() -> (RuntimeHandle, Receiver<Command>) {
    let (tx, rx) = unbounded();
    (RuntimeHandle(tx), rx)
}

/// Drives a [`Bridge`] from three timers and the panel's commands, all on the
/// calling thread.
pub struct Runtime<C: SimConnector> {
    bridge: Bridge<C>,
    commands: Receiver<Command>,
    reconnect: Duration,
    poll: Duration,
    pump: Duration,
    auto_connect: bool,
}

impl<C: SimConnector> Runtime<C> {
    pub fn new(bridge: Bridge<C>, commands: Receiver<Command>, config: &Config) -> Self {
        Self {
            bridge,
            commands,
            reconnect: config.reconnect_interval(),
            poll: config.poll_interval(),
            pump: config.pump_interval(),
            auto_connect: true,
        }
    }

    /// Run until [`Command::Shutdown`] arrives or every handle is dropped.
    ///
    /// The timers live on this stack frame, returning stops them. The session
    /// is closed before returning.
    pub fn run(self) {
        let reconnect = tick(self.reconnect);
        let poll = tick(self.poll);
        let pump = tick(self.pump);
        info!("Connecting to the simulator every {:?}", self.reconnect);
        self.run_with(reconnect, poll, pump);
    }

    /// Same as [`Runtime::run`], driven by the given timer channels.
    fn run_with(mut self, reconnect: Receiver<Instant>, poll: Receiver<Instant>, pump: Receiver<Instant>) {
        let commands = self.commands.clone();
        self.bridge.try_connect();

        loop {
            select! {
                recv(reconnect) -> _ => {
                    if self.auto_connect {
                        self.bridge.try_connect();
                    }
                }
                recv(poll) -> _ => self.bridge.poll(),
                recv(pump) -> _ => {
                    pump::drain(&mut self.bridge);
                }
                recv(commands) -> cmd => match cmd {
                    Ok(Command::Shutdown) | Err(_) => break,
                    Ok(cmd) => self.handle(cmd),
                },
            }
        }

        info!("Shutting down.");
        self.bridge.shutdown();
    }

    fn handle(&mut self, cmd: Command) {
        debug!("Command {cmd:?}");
        match cmd {
            Command::Connect => {
                self.auto_connect = true;
                self.bridge.try_connect();
            }
            Command::Disconnect => {
                // stays down until asked to connect again
                self.auto_connect = false;
                self.bridge.disconnect();
            }
            Command::Dispatch(intent) => self.bridge.dispatch(intent),
            Command::Status(reply) => {
                let _ = reply.send(self.bridge.status_line());
            }
            Command::Shutdown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use crate::bridge::{BridgeEvent, ConnectionState};
    use crate::fake::{Call, FakeConnector};
    use crate::protocol::{APP_NAME, KEY_TOGGLE_JETWAY};

    // long enough that no timer fires during a test
    fn quiet_config() -> Config {
        Config { reconnect_secs: 3600, poll_secs: 3600, pump_millis: 3_600_000, ..Default::default() }
    }

    #[test]
    fn test_connects_on_start_and_closes_on_shutdown() {
        let connector = FakeConnector::default();
        let sim = connector.sim();
        let (handle, commands) = channel();
        let runtime = Runtime::new(Bridge::new(connector, APP_NAME), commands, &quiet_config());

        handle.dispatch(Intent::ToggleJetway);
        handle.shutdown();
        runtime.run();

        let calls = sim.calls();
        assert!(matches!(calls.first(), Some(Call::Open(..))));
        assert_eq!(vec![1], sim.transmitted(KEY_TOGGLE_JETWAY));
        assert_eq!(Some(&Call::Close), calls.last());
        assert_eq!(0, sim.live_sessions());
        assert!(!handle.connect());
    }

    #[test]
    fn test_stops_when_handles_dropped() {
        let connector = FakeConnector::default();
        let sim = connector.sim();
        let (handle, commands) = channel();
        let runtime = Runtime::new(Bridge::new(connector, APP_NAME), commands, &quiet_config());

        drop(handle);
        runtime.run();

        assert_eq!(0, sim.live_sessions());
    }

    #[test]
    fn test_disconnect_then_dispatch_is_dropped() {
        let connector = FakeConnector::default();
        let sim = connector.sim();
        let (events_tx, events) = unbounded();
        let bridge = Bridge::new(connector, APP_NAME).with_listener(events_tx);
        let (handle, commands) = channel();
        let runtime = Runtime::new(bridge, commands, &quiet_config());

        handle.disconnect();
        handle.dispatch(Intent::ToggleJetway);
        handle.shutdown();
        runtime.run();

        assert!(sim.transmitted(KEY_TOGGLE_JETWAY).is_empty());
        assert_eq!(
            vec![
                BridgeEvent::StateChanged(ConnectionState::Connected),
                BridgeEvent::StateChanged(ConnectionState::Disconnected),
            ],
            events.try_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_reconnect_timer_retries() {
        let connector = FakeConnector::failing(2);
        let sim = connector.sim();
        let (handle, commands) = channel();
        let runtime = Runtime::new(Bridge::new(connector, APP_NAME), commands, &quiet_config());

        let (reconnect_tx, reconnect) = unbounded();
        // keeps the tick channel open after the ticker thread is done
        let _reconnect_tx = reconnect_tx.clone();
        let (_poll_tx, poll) = unbounded();
        let (_pump_tx, pump) = unbounded();

        // the start attempt fails, then three ticks: fail, connect, no-op
        let ticker = thread::spawn(move || {
            for _ in 0..3 {
                reconnect_tx.send(Instant::now()).unwrap();
                while !reconnect_tx.is_empty() {
                    thread::yield_now();
                }
            }
            // the last tick may still be in flight, a status round trip
            // can only be answered once it has been handled
            handle.status();
            handle.shutdown();
        });
        runtime.run_with(reconnect, poll, pump);
        ticker.join().unwrap();

        let opens = sim.calls().iter().filter(|c| matches!(c, Call::Open(..))).count();
        assert_eq!(3, opens);
        assert_eq!(1, sim.max_live_sessions());
    }

    #[test]
    fn test_status_reply() {
        let (handle, commands) = channel();
        let runtime = Runtime::new(
            Bridge::new(FakeConnector::failing(1), APP_NAME),
            commands,
            &quiet_config(),
        );

        let (reply_tx, reply_rx) = bounded(1);
        handle.0.send(Command::Status(reply_tx)).unwrap();
        handle.shutdown();
        runtime.run();

        assert_eq!(Ok("ERROR!, no heading yet".to_string()), reply_rx.recv());
    }
}
