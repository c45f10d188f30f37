//! Boot-protocol keyboard: one modifier byte, one reserved byte, six key slots.
//!
//! The six slots behave as an ordered set. Pressed keys fill the first empty
//! slot, released keys are removed and the remaining keys are shifted down so
//! held keys always occupy a contiguous prefix in arrival order.
//!
//! Every call builds a candidate report and only commits it once the
//! transport accepted it, so a failed send leaves the held-key state exactly
//! as it was before the call.

use bitflags::bitflags;
use hidemu_transport::{
    Field, HidError, HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage, find_device,
};
use tracing::{debug, trace};

use crate::config::{DeviceConfig, KeyboardConfig, OverflowPolicy};
use crate::keycode::Keycode;

pub const KEYBOARD_REPORT_LEN: usize = 8;
pub const MAX_PRESSED_KEYS: usize = 6;

const MODIFIER_OFFSET: usize = 0;
const KEYS: Field = Field::new(2, MAX_PRESSED_KEYS);

bitflags! {
    /// Modifier byte of the keyboard report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const LEFT_CONTROL  = 0b0000_0001;
        const LEFT_SHIFT    = 0b0000_0010;
        const LEFT_ALT      = 0b0000_0100;
        const LEFT_GUI      = 0b0000_1000;
        const RIGHT_CONTROL = 0b0001_0000;
        const RIGHT_SHIFT   = 0b0010_0000;
        const RIGHT_ALT     = 0b0100_0000;
        const RIGHT_GUI     = 0b1000_0000;
    }
}

bitflags! {
    /// Keyboard LED output report bits sent by the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LedStatus: u8 {
        const NUM_LOCK    = 0x01;
        const CAPS_LOCK   = 0x02;
        const SCROLL_LOCK = 0x04;
        const COMPOSE     = 0x08;
        const KANA        = 0x10;
    }
}

pub type KeyboardReport = ReportBuffer<KEYBOARD_REPORT_LEN>;

#[derive(Debug)]
pub struct Keyboard<T> {
    transport: T,
    report: KeyboardReport,
    config: KeyboardConfig,
    led_status: LedStatus,
}

impl<T: HidTransport> Keyboard<T> {
    /// Locate the keyboard among `candidates` and bind to it.
    pub fn find<I>(candidates: I, config: &DeviceConfig) -> HidResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let transport = find_device(candidates, Usage::KEYBOARD, &config.readiness)?;
        Self::new(transport, &config.readiness, config.keyboard)
    }

    /// Bind to `transport` and send an all-keys-up report to probe it.
    pub fn new(
        mut transport: T,
        readiness: &ReadinessPolicy,
        config: KeyboardConfig,
    ) -> HidResult<Self> {
        let report = KeyboardReport::new();
        readiness.probe(&mut transport, report.as_bytes())?;
        debug!("Keyboard ready (overflow policy {:?})", config.overflow);
        Ok(Self {
            transport,
            report,
            config,
            led_status: LedStatus::empty(),
        })
    }

    /// Press `keycodes` and send one report.
    ///
    /// Modifiers set their bit; regular keys take the next free slot. Keys
    /// already held and [`Keycode::NONE`] are ignored.
    ///
    /// # Errors
    ///
    /// [`HidError::Capacity`] when a seventh regular key is pressed under
    /// [`OverflowPolicy::Reject`]; transport errors from the send.
    pub fn press(&mut self, keycodes: &[Keycode]) -> HidResult<()> {
        let mut candidate = self.report;
        for &keycode in keycodes {
            self.add_keycode(&mut candidate, keycode)?;
        }
        self.transmit(candidate)
    }

    /// Release `keycodes` and send one report. Keys that are not held are ignored.
    pub fn release(&mut self, keycodes: &[Keycode]) -> HidResult<()> {
        let mut candidate = self.report;
        for &keycode in keycodes {
            remove_keycode(&mut candidate, keycode);
        }
        self.transmit(candidate)
    }

    pub fn release_all(&mut self) -> HidResult<()> {
        self.transmit(KeyboardReport::new())
    }

    /// Press `keycodes` together, then release everything.
    pub fn send(&mut self, keycodes: &[Keycode]) -> HidResult<()> {
        self.press(keycodes)?;
        self.release_all()
    }

    /// Held regular keys in the order they were pressed.
    pub fn pressed_keys(&self) -> Vec<Keycode> {
        self.report
            .field(KEYS)
            .iter()
            .take_while(|code| **code != 0)
            .map(|code| Keycode(*code))
            .collect()
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_bits_retain(self.report.u8_at(MODIFIER_OFFSET))
    }

    pub fn report(&self) -> [u8; KEYBOARD_REPORT_LEN] {
        self.report.to_array()
    }

    /// Last LED state reported by the host.
    ///
    /// Refreshed from the transport's inbound report when one is available;
    /// otherwise the previously observed state is kept.
    pub fn led_status(&mut self) -> LedStatus {
        let inbound = self.transport.last_received_report();
        if let Some(&bits) = inbound.as_deref().and_then(<[u8]>::first) {
            self.led_status = LedStatus::from_bits_retain(bits);
            trace!("LED status now {:?}", self.led_status);
        }
        self.led_status
    }

    /// Whether every LED in `led` is lit.
    pub fn led_on(&mut self, led: LedStatus) -> bool {
        self.led_status().contains(led)
    }

    pub fn config(&self) -> KeyboardConfig {
        self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn add_keycode(&self, candidate: &mut KeyboardReport, keycode: Keycode) -> HidResult<()> {
        if keycode.is_none() {
            return Ok(());
        }

        if let Some(bit) = keycode.modifier_bit() {
            let modifiers = candidate.u8_at(MODIFIER_OFFSET) | bit.bits();
            candidate.set_u8(MODIFIER_OFFSET, modifiers);
            return Ok(());
        }

        let keys = candidate.field_mut(KEYS);
        if keys.contains(&keycode.code()) {
            return Ok(());
        }

        if let Some(slot) = keys.iter_mut().find(|slot| **slot == 0) {
            *slot = keycode.code();
            return Ok(());
        }

        match self.config.overflow {
            OverflowPolicy::RollOver => {
                debug!(
                    "Key slots full, dropping {} to make room for {keycode}",
                    Keycode(keys.first().copied().unwrap_or_default())
                );
                keys.rotate_left(1);
                if let Some(last) = keys.last_mut() {
                    *last = keycode.code();
                }
                Ok(())
            }
            OverflowPolicy::Reject => Err(HidError::Capacity {
                max: MAX_PRESSED_KEYS,
            }),
        }
    }

    fn transmit(&mut self, candidate: KeyboardReport) -> HidResult<()> {
        trace!("Keyboard report {:02x?}", candidate.as_bytes());
        self.transport.send_report(candidate.as_bytes())?;
        self.report = candidate;
        Ok(())
    }
}

fn remove_keycode(candidate: &mut KeyboardReport, keycode: Keycode) {
    if keycode.is_none() {
        return;
    }

    if let Some(bit) = keycode.modifier_bit() {
        let modifiers = candidate.u8_at(MODIFIER_OFFSET) & !bit.bits();
        candidate.set_u8(MODIFIER_OFFSET, modifiers);
        return;
    }

    let keys = candidate.field_mut(KEYS);
    let mut compacted = [0u8; MAX_PRESSED_KEYS];
    let held = keys.iter().filter(|code| **code != 0 && **code != keycode.code());
    for (slot, code) in compacted.iter_mut().zip(held) {
        *slot = *code;
    }
    keys.copy_from_slice(&compacted);
}
