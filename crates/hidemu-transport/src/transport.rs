//! HID transport trait

use crate::{HidResult, Usage};
use serde::{Deserialize, Serialize};

/// How a transport becomes usable after start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Usable as soon as it exists (BLE, loopback). The locator does not wait.
    #[default]
    Immediate,
    /// Must finish host enumeration first (wired USB).
    Negotiated,
}

/// The capability a device class needs from the underlying HID endpoint.
///
/// The transport is owned by the application; device classes either borrow it
/// through the `&mut T` impl or take ownership through `Box<T>`.
pub trait HidTransport {
    fn usage_page(&self) -> u16;

    fn usage(&self) -> u16;

    /// Transmit one complete report. Fails with [`crate::HidError::NotReady`]
    /// while the host has not configured the device.
    fn send_report(&mut self, report: &[u8]) -> HidResult<()>;

    /// Most recent OUT report from the host, if the transport supports them.
    fn last_received_report(&mut self) -> Option<Vec<u8>> {
        None
    }

    fn readiness(&self) -> Readiness {
        Readiness::Immediate
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn hid_usage(&self) -> Usage {
        Usage::new(self.usage_page(), self.usage())
    }
}

impl<T: HidTransport + ?Sized> HidTransport for &mut T {
    fn usage_page(&self) -> u16 {
        (**self).usage_page()
    }

    fn usage(&self) -> u16 {
        (**self).usage()
    }

    fn send_report(&mut self, report: &[u8]) -> HidResult<()> {
        (**self).send_report(report)
    }

    fn last_received_report(&mut self) -> Option<Vec<u8>> {
        (**self).last_received_report()
    }

    fn readiness(&self) -> Readiness {
        (**self).readiness()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

impl<T: HidTransport + ?Sized> HidTransport for Box<T> {
    fn usage_page(&self) -> u16 {
        (**self).usage_page()
    }

    fn usage(&self) -> u16 {
        (**self).usage()
    }

    fn send_report(&mut self, report: &[u8]) -> HidResult<()> {
        (**self).send_report(report)
    }

    fn last_received_report(&mut self) -> Option<Vec<u8>> {
        (**self).last_received_report()
    }

    fn readiness(&self) -> Readiness {
        (**self).readiness()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
