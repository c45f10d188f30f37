//! Consumer control (media keys): one 16-bit usage code per report.

use hidemu_transport::{HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage, find_device};
use tracing::{debug, trace};

use crate::config::DeviceConfig;
use crate::consumer_control_code::ConsumerControlCode;

pub const CONSUMER_REPORT_LEN: usize = 2;

pub type ConsumerReport = ReportBuffer<CONSUMER_REPORT_LEN>;

/// Only one code can be active at a time.
#[derive(Debug)]
pub struct ConsumerControl<T> {
    transport: T,
    active: ConsumerControlCode,
}

impl<T: HidTransport> ConsumerControl<T> {
    pub fn find<I>(candidates: I, config: &DeviceConfig) -> HidResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let transport = find_device(candidates, Usage::CONSUMER_CONTROL, &config.readiness)?;
        Self::new(transport, &config.readiness)
    }

    pub fn new(mut transport: T, readiness: &ReadinessPolicy) -> HidResult<Self> {
        readiness.probe(&mut transport, ConsumerReport::new().as_bytes())?;
        debug!("Consumer control ready");
        Ok(Self {
            transport,
            active: ConsumerControlCode::NONE,
        })
    }

    /// Start `code`. It stays active until [`ConsumerControl::release`].
    pub fn press(&mut self, code: ConsumerControlCode) -> HidResult<()> {
        self.transmit(code)
    }

    pub fn release(&mut self) -> HidResult<()> {
        self.transmit(ConsumerControlCode::NONE)
    }

    /// Press and release `code` so the action fires once without repeating.
    pub fn send(&mut self, code: ConsumerControlCode) -> HidResult<()> {
        self.press(code)?;
        self.release()
    }

    pub fn active(&self) -> ConsumerControlCode {
        self.active
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn transmit(&mut self, code: ConsumerControlCode) -> HidResult<()> {
        let mut report = ConsumerReport::new();
        report.set_u16_le(0, code.code());
        trace!("Consumer report {:02x?} ({})", report.as_bytes(), code);
        self.transport.send_report(report.as_bytes())?;
        self.active = code;
        Ok(())
    }
}
