//! hidemu - USB HID device emulation CLI
//!
//! Types text, taps keys, moves the mouse and sends media keys through a
//! Linux USB gadget, or prints the reports it would send.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod backend;
mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hidemu_devices::DeviceConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::{Backend, GadgetNodes};
use crate::commands::{MouseCommands, Session};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "hidemu")]
#[command(about = "USB HID device emulation - type text, tap keys, move the mouse")]
#[command(version)]
#[command(long_about = "
hidemu drives emulated USB HID devices: a boot keyboard, a relative mouse and
a consumer-control (media key) device.

Reports are written to the HID gadget nodes the kernel creates for a
configured USB gadget (/dev/hidg0, /dev/hidg1, ...). Use --dry-run to print
each report as hex instead.
")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON device configuration file
    #[arg(long, global = true, env = "HIDEMU_CONFIG")]
    config: Option<PathBuf>,

    /// Print reports as hex instead of writing to the gadget
    #[arg(long, global = true)]
    dry_run: bool,

    /// Directory holding the gadget device nodes
    #[arg(long, global = true, env = "HIDEMU_GADGET_DIR", default_value = "/dev")]
    gadget_dir: PathBuf,

    /// Keyboard node name
    #[arg(long, global = true, default_value = "hidg0")]
    keyboard_node: String,

    /// Mouse node name
    #[arg(long, global = true, default_value = "hidg1")]
    mouse_node: String,

    /// Consumer control node name
    #[arg(long, global = true, default_value = "hidg2")]
    consumer_node: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Type text on the keyboard
    Type {
        /// Text to type
        text: String,
        /// Keyboard layout (us, us-dvorak, fr)
        #[arg(short, long)]
        layout: Option<String>,
        /// Pause after each character, in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Press Enter after the text
        #[arg(short, long)]
        newline: bool,
    },

    /// Show the keys that type a character
    Keycodes {
        /// A single character
        character: String,
        /// Keyboard layout (us, us-dvorak, fr)
        #[arg(short, long)]
        layout: Option<String>,
        /// Output in JSON format for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Press keys together and release them (e.g. `key left-control c`)
    Key {
        /// Key names or 0xNN codes
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Mouse commands
    #[command(subcommand)]
    Mouse(MouseCommands),

    /// Tap a media key (e.g. `consumer play-pause`, `consumer 0x00e2`)
    Consumer {
        /// Consumer control name or 0xNNNN code
        code: String,
    },
}

impl Cli {
    fn backend(&self) -> Backend {
        if self.dry_run {
            Backend::DryRun
        } else {
            Backend::Gadget {
                dir: self.gadget_dir.clone(),
                nodes: GadgetNodes {
                    keyboard: self.keyboard_node.clone(),
                    mouse: self.mouse_node.clone(),
                    consumer: self.consumer_node.clone(),
                },
            }
        }
    }

    /// Config file (or defaults) overlaid with `HIDEMU_*` environment variables.
    fn device_config(&self) -> Result<DeviceConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => DeviceConfig::load(path)?,
            None => DeviceConfig::default(),
        };
        config.apply_lookup(|key| std::env::var(key).ok());
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter = ["hidemu", "hidemu_transport", "hidemu_devices", "hidemu_layouts"]
        .map(|target| format!("{target}={log_level}"))
        .join(",");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            output::print_error_human(&e);
            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let session = Session {
        config: cli.device_config()?,
        backend: cli.backend(),
    };

    match &cli.command {
        Commands::Type {
            text,
            layout,
            delay_ms,
            newline,
        } => commands::keyboard::type_text(
            &session,
            text,
            layout.as_deref(),
            Duration::from_millis(*delay_ms),
            *newline,
        )?,
        Commands::Keycodes {
            character,
            layout,
            json,
        } => commands::keyboard::keycodes(&session, character, layout.as_deref(), *json)?,
        Commands::Key { names } => commands::keyboard::key(&session, names)?,
        Commands::Mouse(cmd) => commands::mouse::execute(&session, cmd)?,
        Commands::Consumer { code } => commands::consumer::execute(&session, code)?,
    }
    Ok(())
}
