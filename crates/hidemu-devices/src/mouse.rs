//! Relative mouse: button byte plus signed x, y and wheel deltas.

use std::thread;
use std::time::Duration;

use bitflags::bitflags;
use hidemu_easing::{Clock, Easing, Progress};
use hidemu_transport::{HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage, find_device};
use tracing::{debug, trace};

use crate::config::{DeviceConfig, MouseConfig};

pub const MOUSE_REPORT_LEN: usize = 4;

/// Largest delta a single report can carry.
pub const MAX_DELTA: i32 = 127;

const BUTTONS_OFFSET: usize = 0;
const X_OFFSET: usize = 1;
const Y_OFFSET: usize = 2;
const WHEEL_OFFSET: usize = 3;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT    = 0x01;
        const RIGHT   = 0x02;
        const MIDDLE  = 0x04;
        const BACK    = 0x08;
        const FORWARD = 0x10;
    }
}

pub type MouseReport = ReportBuffer<MOUSE_REPORT_LEN>;

#[derive(Debug)]
pub struct Mouse<T> {
    transport: T,
    buttons: MouseButtons,
    config: MouseConfig,
}

fn limit(delta: i32) -> i8 {
    i8::try_from(delta.clamp(-MAX_DELTA, MAX_DELTA)).unwrap_or_default()
}

/// `trunc(total * progress)`, the cumulative displacement at `progress`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "progress is in [0,1] so the product stays within i32"
)]
fn scaled(total: i32, progress: f32) -> i32 {
    (f64::from(total) * f64::from(progress)).trunc() as i32
}

impl<T: HidTransport> Mouse<T> {
    pub fn find<I>(candidates: I, config: &DeviceConfig) -> HidResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let transport = find_device(candidates, Usage::MOUSE, &config.readiness)?;
        Self::new(transport, &config.readiness, config.mouse)
    }

    pub fn new(mut transport: T, readiness: &ReadinessPolicy, config: MouseConfig) -> HidResult<Self> {
        readiness.probe(&mut transport, MouseReport::new().as_bytes())?;
        debug!("Mouse ready");
        Ok(Self {
            transport,
            buttons: MouseButtons::empty(),
            config,
        })
    }

    pub fn press(&mut self, buttons: MouseButtons) -> HidResult<()> {
        self.send_buttons(self.buttons | buttons)
    }

    pub fn release(&mut self, buttons: MouseButtons) -> HidResult<()> {
        self.send_buttons(self.buttons - buttons)
    }

    pub fn release_all(&mut self) -> HidResult<()> {
        self.send_buttons(MouseButtons::empty())
    }

    pub fn click(&mut self, buttons: MouseButtons) -> HidResult<()> {
        self.press(buttons)?;
        self.release(buttons)
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Move and scroll immediately, splitting the deltas into as many
    /// reports as needed to stay within ±127 per report.
    ///
    /// Held buttons are repeated in every report.
    pub fn move_by(&mut self, x: i32, y: i32, wheel: i32) -> HidResult<()> {
        let (mut x, mut y, mut wheel) = (x, y, wheel);
        while x != 0 || y != 0 || wheel != 0 {
            let (step_x, step_y, step_wheel) = (limit(x), limit(y), limit(wheel));
            let mut report = self.button_report(self.buttons);
            report
                .set_i8(X_OFFSET, step_x)
                .set_i8(Y_OFFSET, step_y)
                .set_i8(WHEEL_OFFSET, step_wheel);
            trace!("Mouse report {:02x?}", report.as_bytes());
            self.transport.send_report(report.as_bytes())?;

            x -= i32::from(step_x);
            y -= i32::from(step_y);
            wheel -= i32::from(step_wheel);
        }
        Ok(())
    }

    /// Spread a move over `duration`, shaping the speed with `easing`.
    ///
    /// A zero duration behaves like [`Mouse::move_by`].
    pub fn move_eased(
        &mut self,
        x: i32,
        y: i32,
        wheel: i32,
        duration: Duration,
        easing: Easing,
    ) -> HidResult<()> {
        if duration.is_zero() {
            return self.move_by(x, y, wheel);
        }
        self.move_with_progress(x, y, wheel, Progress::new(duration, easing))
    }

    /// Drive a move from an explicit progress sampler.
    ///
    /// At each sample the cumulative target is `trunc(total * progress)` per
    /// axis and only the difference from the previous sample is sent. The
    /// sampler's final `1.0` lands the move on the exact total.
    pub fn move_with_progress<C: Clock>(
        &mut self,
        x: i32,
        y: i32,
        wheel: i32,
        progress: Progress<C>,
    ) -> HidResult<()> {
        let duration = progress.duration();
        debug!("Eased move ({x}, {y}, wheel {wheel}) over {duration:?}");
        let (mut last_x, mut last_y, mut last_wheel) = (0, 0, 0);
        for fraction in progress {
            let (current_x, current_y, current_wheel) =
                (scaled(x, fraction), scaled(y, fraction), scaled(wheel, fraction));
            self.move_by(
                current_x - last_x,
                current_y - last_y,
                current_wheel - last_wheel,
            )?;
            (last_x, last_y, last_wheel) = (current_x, current_y, current_wheel);

            if !self.config.step_interval.is_zero() {
                thread::sleep(self.config.step_interval);
            }
        }
        Ok(())
    }

    fn button_report(&self, buttons: MouseButtons) -> MouseReport {
        let mut report = MouseReport::new();
        report.set_u8(BUTTONS_OFFSET, buttons.bits());
        report
    }

    /// Button-only report; motion fields are always zero.
    fn send_buttons(&mut self, buttons: MouseButtons) -> HidResult<()> {
        let report = self.button_report(buttons);
        self.transport.send_report(report.as_bytes())?;
        self.buttons = buttons;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidemu_transport::HidError;
    use hidemu_transport::mock::MockTransport;

    fn mouse() -> HidResult<(Mouse<MockTransport>, MockTransport)> {
        let mock = MockTransport::new(Usage::MOUSE);
        let mouse = Mouse::new(mock.clone(), &ReadinessPolicy::immediate(), MouseConfig::default())?;
        mock.clear();
        Ok((mouse, mock))
    }

    #[test]
    fn test_limit() {
        assert_eq!(limit(300), 127);
        assert_eq!(limit(-300), -127);
        assert_eq!(limit(-128), -127);
        assert_eq!(limit(5), 5);
    }

    #[test]
    fn test_scaled_truncates_toward_zero() {
        assert_eq!(scaled(100, 0.333), 33);
        assert_eq!(scaled(-100, 0.333), -33);
        assert_eq!(scaled(-7, 1.0), -7);
    }

    #[test]
    fn test_button_reports_carry_no_motion() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        mouse.press(MouseButtons::LEFT | MouseButtons::RIGHT)?;
        mouse.release(MouseButtons::LEFT)?;
        mouse.release_all()?;

        assert_eq!(
            mock.sent_reports(),
            vec![vec![0x03, 0, 0, 0], vec![0x02, 0, 0, 0], vec![0, 0, 0, 0]]
        );
        Ok(())
    }

    #[test]
    fn test_click() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        mouse.click(MouseButtons::MIDDLE)?;
        assert_eq!(mock.sent_reports(), vec![vec![0x04, 0, 0, 0], vec![0, 0, 0, 0]]);
        assert_eq!(mouse.buttons(), MouseButtons::empty());
        Ok(())
    }

    #[test]
    fn test_move_keeps_held_buttons() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        mouse.press(MouseButtons::LEFT)?;
        mouse.move_by(-1, 2, 0)?;
        assert_eq!(mock.last_report(), Some(vec![0x01, 0xFF, 0x02, 0x00]));
        Ok(())
    }

    #[test]
    fn test_zero_move_sends_nothing() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        mouse.move_by(0, 0, 0)?;
        assert_eq!(mock.send_count(), 0);
        Ok(())
    }

    #[test]
    fn test_failed_press_keeps_buttons() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        mock.fail_next_send(HidError::NotReady);
        assert!(mouse.press(MouseButtons::LEFT).is_err());
        assert_eq!(mouse.buttons(), MouseButtons::empty());
        Ok(())
    }

    #[test]
    fn test_eased_move_lands_on_target() -> HidResult<()> {
        let (mut mouse, mock) = mouse()?;
        let mut ticks = [0u64, 0, 250, 500, 750, 1000].into_iter();
        let clock = move || Duration::from_millis(ticks.next().unwrap_or(1000));
        let progress = Progress::with_clock(Duration::from_secs(1), Easing::Linear, clock);

        mouse.move_with_progress(200, -10, 0, progress)?;

        let reports = mock.sent_reports();
        let total_x: i32 = reports.iter().map(|r| i32::from(r[1] as i8)).sum();
        let total_y: i32 = reports.iter().map(|r| i32::from(r[2] as i8)).sum();
        assert_eq!((total_x, total_y), (200, -10));
        Ok(())
    }
}
