use std::time::Duration;
use clap::Parser;
use crate::error::ConfigError;
use crate::protocol::APP_NAME;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pushback-helper")]
#[command(about = "Pushback, tug and ground service controls for MSFS", long_about = None)]
pub struct Config {
    /// Client name announced to the simulator
    #[arg(long, default_value = APP_NAME)]
    pub app_name: String,

    /// Seconds between connection attempts while disconnected
    #[arg(long, default_value = "10")]
    pub reconnect_secs: u64,

    /// Seconds between heading requests
    #[arg(long, default_value = "1")]
    pub poll_secs: u64,

    /// Milliseconds between reads of the simulator's message queue
    #[arg(long, default_value = "50")]
    pub pump_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            reconnect_secs: 10,
            poll_secs: 1,
            pump_millis: 50,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        if self.reconnect_secs == 0 {
            return Err(ConfigError::ZeroInterval("reconnect-secs"));
        }
        if self.poll_secs == 0 {
            return Err(ConfigError::ZeroInterval("poll-secs"));
        }
        if self.pump_millis == 0 {
            return Err(ConfigError::ZeroInterval("pump-millis"));
        }
        Ok(())
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs)
    }

    pub fn pump_interval(&self) -> Duration {
        Duration::from_millis(self.pump_millis)
    }
}
