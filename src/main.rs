use std::{error::Error, io::{self, BufRead}, thread};
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver};
use log::{error, info};
use crate::bridge::{Bridge, BridgeEvent};
use crate::config::Config;
use crate::intent::Intent;
use crate::msfs::MsfsConnector;
use crate::runtime::{Runtime, RuntimeHandle};

mod bridge;
mod config;
mod dispatcher;
mod error;
mod intent;
mod msfs;
mod protocol;
mod pump;
mod runtime;
mod sim_connection;
mod telemetry;
#[cfg(test)]
mod fake;

const HELP: &str = "\
commands:
  pushback          toggle the pushback tug
  left | right      steer the tug 90° left or right of the current heading
  straight          steer the tug along the current heading
  jetway            toggle the jetway
  fuel              request the fuel truck
  door              toggle the main exit
  connect           reconnect and resume automatic reconnection
  disconnect        close the connection until `connect`
  status            show the connection and last heading
  quit";

/// Print what the panel's status label would show.
fn print_events(events: Receiver<BridgeEvent>) {
    for event in events {
        match event {
            BridgeEvent::StateChanged(state) => println!("[{state}]"),
            BridgeEvent::Heading(degrees) => log::debug!("Heading {degrees}°"),
        }
    }
}

/// Read commands from stdin until EOF or `quit`.
fn read_commands(handle: RuntimeHandle) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Unable to read stdin: {e}");
                break;
            }
        };
        let alive = match line.trim() {
            "" => true,
            "help" | "?" => {
                println!("{HELP}");
                true
            }
            "quit" | "exit" => break,
            "connect" => handle.connect(),
            "disconnect" => handle.disconnect(),
            "status" => match handle.status() {
                Some(status) => {
                    println!("{status}");
                    true
                }
                None => false,
            },
            cmd => match cmd.parse::<Intent>() {
                Ok(intent) => handle.dispatch(intent),
                Err(e) => {
                    println!("{e}, try `help`");
                    true
                }
            },
        };
        if !alive {
            return;
        }
    }
    handle.shutdown();
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;
    info!("{} starting, type `help` for commands", config.app_name);

    let (events_tx, events_rx) = unbounded();
    let bridge = Bridge::new(MsfsConnector::default(), &config.app_name).with_listener(events_tx);
    let (handle, commands) = runtime::channel();

    thread::spawn(move || print_events(events_rx));
    thread::spawn(move || read_commands(handle));

    Runtime::new(bridge, commands, &config).run();
    Ok(())
}
