//! Transports the CLI can drive: Linux USB gadget nodes or a dry-run printer.
//!
//! A configured HID function shows up as a character device (`/dev/hidg0`,
//! ...). Nodes are opened non-blocking so a host that stops reading cannot
//! hang the CLI. Writes fail with ESHUTDOWN until the host has enumerated the
//! gadget and with EAGAIN while the endpoint is busy; both are reported as
//! [`HidError::NotReady`].

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
#[cfg(target_os = "linux")]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use hidemu_transport::{HidError, HidResult, HidTransport, Usage};
use tracing::{debug, trace};

use crate::output;

const EAGAIN: i32 = 11;
const ESHUTDOWN: i32 = 108;

/// One `/dev/hidgN` node.
#[derive(Debug)]
pub struct GadgetTransport {
    path: PathBuf,
    file: File,
    usage: Usage,
}

impl GadgetTransport {
    pub fn open(path: &Path, usage: Usage) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        #[cfg(target_os = "linux")]
        options.custom_flags(libc::O_NONBLOCK);
        let file = options.open(path)?;
        debug!("Opened {} as {}", path.display(), usage.display_name());
        Ok(Self {
            path: path.to_path_buf(),
            file,
            usage,
        })
    }
}

fn gadget_error(error: io::Error) -> HidError {
    match error.raw_os_error() {
        Some(EAGAIN | ESHUTDOWN) => HidError::NotReady,
        _ => HidError::from(error),
    }
}

impl HidTransport for GadgetTransport {
    fn usage_page(&self) -> u16 {
        self.usage.page
    }

    fn usage(&self) -> u16 {
        self.usage.id
    }

    fn send_report(&mut self, report: &[u8]) -> HidResult<()> {
        trace!("{}: {:02x?}", self.path.display(), report);
        self.file.write_all(report).map_err(gadget_error)?;
        self.file.flush().map_err(gadget_error)
    }
}

/// Prints every report as a hex line on stdout instead of sending it.
#[derive(Debug, Clone)]
pub struct DryRunTransport {
    label: &'static str,
    usage: Usage,
}

impl DryRunTransport {
    pub fn new(label: &'static str, usage: Usage) -> Self {
        Self { label, usage }
    }
}

impl HidTransport for DryRunTransport {
    fn usage_page(&self) -> u16 {
        self.usage.page
    }

    fn usage(&self) -> u16 {
        self.usage.id
    }

    fn send_report(&mut self, report: &[u8]) -> HidResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}: {}", self.label, output::hex(report))?;
        Ok(())
    }
}

const DEVICES: [(&str, Usage); 3] = [
    ("keyboard", Usage::KEYBOARD),
    ("mouse", Usage::MOUSE),
    ("consumer", Usage::CONSUMER_CONTROL),
];

/// Gadget node file names, relative to the gadget directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetNodes {
    pub keyboard: String,
    pub mouse: String,
    pub consumer: String,
}

impl GadgetNodes {
    fn node(&self, usage: Usage) -> Option<&str> {
        match usage {
            Usage::KEYBOARD => Some(&self.keyboard),
            Usage::MOUSE => Some(&self.mouse),
            Usage::CONSUMER_CONTROL => Some(&self.consumer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    DryRun,
    Gadget { dir: PathBuf, nodes: GadgetNodes },
}

impl Backend {
    /// Every transport this backend can offer, for the device locator to pick from.
    ///
    /// Gadget nodes that cannot be opened are skipped; the locator then
    /// reports the missing device.
    pub fn candidates(&self) -> Vec<Box<dyn HidTransport>> {
        match self {
            Backend::DryRun => DEVICES
                .iter()
                .map(|&(label, usage)| {
                    Box::new(DryRunTransport::new(label, usage)) as Box<dyn HidTransport>
                })
                .collect(),
            Backend::Gadget { dir, nodes } => DEVICES
                .iter()
                .filter_map(|&(_, usage)| {
                    let path = dir.join(nodes.node(usage)?);
                    match GadgetTransport::open(&path, usage) {
                        Ok(transport) => Some(Box::new(transport) as Box<dyn HidTransport>),
                        Err(e) => {
                            debug!("Skipping {}: {e}", path.display());
                            None
                        }
                    }
                })
                .collect(),
        }
    }
}
