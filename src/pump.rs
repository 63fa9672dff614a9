use log::trace;
use crate::bridge::Bridge;
use crate::sim_connection::{SimConnector, SimMessage};

/// Upper bound of messages handled per drain, so a busy sim can't starve the
/// timers sharing the loop.
pub const MAX_MESSAGES_PER_DRAIN: usize = 64;

/// Hand every message the sim has queued to the bridge.
///
/// Returns `false` when there is no session to read from, `true` otherwise.
pub fn drain<C: SimConnector>(bridge: &mut Bridge<C>) -> bool {
    let mut handled = 0;
    while handled < MAX_MESSAGES_PER_DRAIN {
        let msg = match bridge.next_message() {
            None => return handled > 0,
            Some(Ok(SimMessage::Null)) => break,
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                bridge.fail(e);
                return true;
            }
        };
        trace!("Received {msg:?}");
        bridge.handle_message(msg);
        handled += 1;
    }
    true
}
