//! SimConnect backed connection to MSFS.

#[cfg(windows)]
pub use windows::{Msfs, MsfsConnector};

#[cfg(not(windows))]
pub use unsupported::MsfsConnector;

#[cfg(windows)]
mod windows {
    use std::{mem, ptr, slice};
    use simconnect::{
        DispatchResult, SIMCONNECT_RECV_SIMOBJECT_DATA, SimConnector as RawConnector,
    };
    use crate::error::ChannelError;
    use crate::protocol::UNUSED;
    use crate::sim_connection::{SimConnection, SimConnector, SimMessage};

    /// Copy the payload of a data reply out of the sim's receive buffer.
    ///
    /// The buffer is only valid until the next dispatch, so nothing borrowed
    /// from it may escape.
    unsafe fn payload(data: &SIMCONNECT_RECV_SIMOBJECT_DATA) -> Vec<u8> {
        let offset = mem::offset_of!(SIMCONNECT_RECV_SIMOBJECT_DATA, dwData);
        let len = (data._base.dwSize as usize).saturating_sub(offset);
        let start = ptr::addr_of!(data.dwData) as *const u8;
        slice::from_raw_parts(start, len).to_vec()
    }

    /// Dropping the inner connector closes the session.
    pub struct Msfs(RawConnector);

    impl SimConnection for Msfs {
        fn add_data_definition(
            &mut self,
            define_id: u32,
            datum_name: &str,
            units_name: &str,
        ) -> Result<(), ChannelError> {
            let ok = self.0.add_data_definition(
                define_id,
                datum_name,
                units_name,
                simconnect::SIMCONNECT_DATATYPE_SIMCONNECT_DATATYPE_FLOAT64,
                UNUSED,
                0.0,
            );
            ok.then_some(())
                .ok_or_else(|| ChannelError::call("AddToDataDefinition", datum_name))
        }

        fn request_data_on_sim_object_type(
            &mut self,
            request_id: u32,
            define_id: u32,
        ) -> Result<(), ChannelError> {
            let ok = self.0.request_data_on_sim_object_type(
                request_id,
                define_id,
                0, // radius, 0 only returns the user aircraft
                simconnect::SIMCONNECT_SIMOBJECT_TYPE_SIMCONNECT_SIMOBJECT_TYPE_USER,
            );
            ok.then_some(()).ok_or_else(|| {
                ChannelError::call("RequestDataOnSimObjectType", format!("request {request_id}"))
            })
        }

        fn map_client_event_to_sim_event(
            &mut self,
            event_id: u32,
            event_name: &str,
        ) -> Result<(), ChannelError> {
            self.0
                .map_client_event_to_sim_event(event_id, event_name)
                .then_some(())
                .ok_or_else(|| ChannelError::call("MapClientEventToSimEvent", event_name))
        }

        fn transmit_client_event(
            &mut self,
            object_id: u32,
            event_id: u32,
            data: u32,
            group_id: u32,
            flags: u32,
        ) -> Result<(), ChannelError> {
            self.0
                .transmit_client_event(object_id, event_id, data, group_id, flags)
                .then_some(())
                .ok_or_else(|| {
                    ChannelError::call("TransmitClientEvent", format!("event {event_id}"))
                })
        }

        fn next_message(&mut self) -> Result<SimMessage, ChannelError> {
            // GetNextDispatch reports an empty queue as a failure
            let msg = match self.0.get_next_message() {
                Ok(msg) => msg,
                Err(_) => return Ok(SimMessage::Null),
            };
            let msg = match msg {
                DispatchResult::Null => SimMessage::Null,
                DispatchResult::Open(_) => SimMessage::Open,
                DispatchResult::Quit(_) => SimMessage::Quit,
                DispatchResult::Exception(ex) => SimMessage::Exception {
                    exception: ex.dwException,
                    send_id: ex.dwSendID,
                },
                DispatchResult::SimObjectDataByType(data) => unsafe {
                    SimMessage::SimObjectDataByType {
                        request_id: data._base.dwRequestID,
                        define_id: data._base.dwDefineID,
                        data: payload(&data._base),
                    }
                },
                msg => SimMessage::Unknown(format!("{msg:?}")),
            };
            Ok(msg)
        }
    }

    #[derive(Default)]
    pub struct MsfsConnector;

    impl SimConnector for MsfsConnector {
        type Connection = Msfs;

        fn open(&mut self, app_name: &str, _user_message: u32) -> Result<Msfs, ChannelError> {
            // simconnect-rs polls GetNextDispatch instead of posting window
            // messages, so the user message is only meaningful to a windowed host
            let mut conn = RawConnector::new();
            if conn.connect(app_name) {
                Ok(Msfs(conn))
            } else {
                Err(ChannelError::Open(String::from("SimConnect_Open failed, is MSFS running?")))
            }
        }
    }
}

#[cfg(not(windows))]
mod unsupported {
    use crate::error::ChannelError;
    use crate::sim_connection::{SimConnection, SimConnector, SimMessage};

    /// Stand in for platforms without SimConnect, every attempt fails.
    #[derive(Default)]
    pub struct MsfsConnector;

    pub enum Never {}

    impl SimConnection for Never {
        fn add_data_definition(&mut self, _: u32, _: &str, _: &str) -> Result<(), ChannelError> {
            match *self {}
        }

        fn request_data_on_sim_object_type(&mut self, _: u32, _: u32) -> Result<(), ChannelError> {
            match *self {}
        }

        fn map_client_event_to_sim_event(&mut self, _: u32, _: &str) -> Result<(), ChannelError> {
            match *self {}
        }

        fn transmit_client_event(
            &mut self,
            _: u32,
            _: u32,
            _: u32,
            _: u32,
            _: u32,
        ) -> Result<(), ChannelError> {
            match *self {}
        }

        fn next_message(&mut self) -> Result<SimMessage, ChannelError> {
            match *self {}
        }
    }

    impl SimConnector for MsfsConnector {
        type Connection = Never;

        fn open(&mut self, _app_name: &str, _user_message: u32) -> Result<Never, ChannelError> {
            Err(ChannelError::Open(String::from("SimConnect is only available on Windows")))
        }
    }
}
