//! Absolute-position stylus digitizer.

use bitflags::bitflags;
use hidemu_transport::{
    HidError, HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage, find_device,
};
use tracing::{debug, trace};

use crate::config::DeviceConfig;

pub const DIGITIZER_REPORT_LEN: usize = 5;
pub const MAX_POSITION: u16 = 32767;
pub const CENTER: u16 = 16384;

const STATE_OFFSET: usize = 0;
const X_OFFSET: usize = 1;
const Y_OFFSET: usize = 3;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StylusState: u8 {
        const IN_RANGE      = 0x01;
        const TIP_SWITCH    = 0x02;
        const BARREL_SWITCH = 0x04;
        const ERASER_SWITCH = 0x08;
    }
}

pub type DigitizerReport = ReportBuffer<DIGITIZER_REPORT_LEN>;

/// Every mutation is sent immediately; there is no duplicate suppression.
#[derive(Debug)]
pub struct Digitizer<T> {
    transport: T,
    state: StylusState,
    x: u16,
    y: u16,
}

fn encode(state: StylusState, x: u16, y: u16) -> DigitizerReport {
    let mut report = DigitizerReport::new();
    report
        .set_u8(STATE_OFFSET, state.bits())
        .set_u16_le(X_OFFSET, x)
        .set_u16_le(Y_OFFSET, y);
    report
}

fn position(field: &'static str, value: i32) -> HidResult<u16> {
    HidError::check_range(field, i64::from(value), 0, i64::from(MAX_POSITION))?;
    Ok(u16::try_from(value).unwrap_or_default())
}

impl<T: HidTransport> Digitizer<T> {
    pub fn find<I>(candidates: I, config: &DeviceConfig) -> HidResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let transport = find_device(candidates, Usage::DIGITIZER, &config.readiness)?;
        Self::new(transport, &config.readiness)
    }

    /// Bind to `transport` with the stylus out of range at the centre.
    pub fn new(mut transport: T, readiness: &ReadinessPolicy) -> HidResult<Self> {
        let state = StylusState::empty();
        readiness.probe(&mut transport, encode(state, CENTER, CENTER).as_bytes())?;
        debug!("Digitizer ready");
        Ok(Self {
            transport,
            state,
            x: CENTER,
            y: CENTER,
        })
    }

    pub fn stylus_set(&mut self, bits: StylusState) -> HidResult<()> {
        self.transmit(self.state | bits, self.x, self.y)
    }

    pub fn stylus_clear(&mut self, bits: StylusState) -> HidResult<()> {
        self.transmit(self.state - bits, self.x, self.y)
    }

    pub fn stylus_clear_all(&mut self) -> HidResult<()> {
        self.transmit(StylusState::empty(), self.x, self.y)
    }

    /// Set then clear `bits`: one press-release pulse.
    pub fn click(&mut self, bits: StylusState) -> HidResult<()> {
        self.stylus_set(bits)?;
        self.stylus_clear(bits)
    }

    /// Reposition the stylus. Both coordinates must be in `0..=32767`.
    ///
    /// # Errors
    ///
    /// [`HidError::OutOfRange`] for the first invalid coordinate; the
    /// position is left unchanged and nothing is sent.
    pub fn move_to(&mut self, x: i32, y: i32) -> HidResult<()> {
        let x = position("x", x)?;
        let y = position("y", y)?;
        self.transmit(self.state, x, y)
    }

    pub fn stylus_state(&self) -> StylusState {
        self.state
    }

    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn transmit(&mut self, state: StylusState, x: u16, y: u16) -> HidResult<()> {
        let report = encode(state, x, y);
        trace!("Digitizer report {:02x?}", report.as_bytes());
        self.transport.send_report(report.as_bytes())?;
        self.state = state;
        self.x = x;
        self.y = y;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidemu_transport::mock::MockTransport;

    fn digitizer() -> HidResult<(Digitizer<MockTransport>, MockTransport)> {
        let mock = MockTransport::new(Usage::DIGITIZER);
        let digitizer = Digitizer::new(mock.clone(), &ReadinessPolicy::immediate())?;
        Ok((digitizer, mock))
    }

    #[test]
    fn test_initial_report_is_centered() -> HidResult<()> {
        let (digitizer, mock) = digitizer()?;
        assert_eq!(mock.sent_reports(), vec![vec![0x00, 0x00, 0x40, 0x00, 0x40]]);
        assert_eq!(digitizer.position(), (16384, 16384));
        Ok(())
    }

    #[test]
    fn test_stylus_bits() -> HidResult<()> {
        let (mut digitizer, mock) = digitizer()?;
        mock.clear();
        digitizer.stylus_set(StylusState::IN_RANGE | StylusState::TIP_SWITCH)?;
        digitizer.stylus_clear(StylusState::TIP_SWITCH)?;
        digitizer.stylus_clear_all()?;

        let states: Vec<u8> = mock.sent_reports().iter().map(|r| r[0]).collect();
        assert_eq!(states, vec![0x03, 0x01, 0x00]);
        Ok(())
    }

    #[test]
    fn test_click_sends_pulse_even_when_unchanged() -> HidResult<()> {
        let (mut digitizer, mock) = digitizer()?;
        mock.clear();
        digitizer.click(StylusState::BARREL_SWITCH)?;
        digitizer.stylus_clear_all()?;
        assert_eq!(mock.send_count(), 3);
        Ok(())
    }

    #[test]
    fn test_move_to_bounds() -> HidResult<()> {
        let (mut digitizer, mock) = digitizer()?;
        digitizer.move_to(0, 32767)?;
        assert_eq!(mock.last_report(), Some(vec![0x00, 0x00, 0x00, 0xFF, 0x7F]));

        assert!(digitizer.move_to(-1, 0).is_err());
        assert!(digitizer.move_to(10, 40000).is_err());
        assert_eq!(digitizer.position(), (0, 32767));
        Ok(())
    }
}
