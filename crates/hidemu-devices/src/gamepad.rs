//! Gamepad with 16 buttons and two joysticks (x/y and z/rz).
//!
//! Unlike the other device classes the gamepad batches changes: the `set_*`
//! calls only touch local state and [`Gamepad::send`] transmits, skipping the
//! report when it matches the last one sent.

use hidemu_transport::{
    ChangeTracker, HidError, HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage,
    find_device,
};
use tracing::{debug, trace};

use crate::config::DeviceConfig;

pub const GAMEPAD_REPORT_LEN: usize = 6;
pub const BUTTON_COUNT: u8 = 16;
pub const JOYSTICK_RANGE: std::ops::RangeInclusive<i32> = -127..=127;

const BUTTONS_OFFSET: usize = 0;
const JOYSTICK_OFFSET: usize = 2;

pub type GamepadReport = ReportBuffer<GAMEPAD_REPORT_LEN>;

/// Joystick axes in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Joysticks {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub r_z: i8,
}

#[derive(Debug)]
pub struct Gamepad<T> {
    transport: T,
    buttons: u16,
    joysticks: Joysticks,
    tracker: ChangeTracker<GAMEPAD_REPORT_LEN>,
}

fn button_mask(buttons: &[u8]) -> HidResult<u16> {
    buttons.iter().try_fold(0u16, |mask, &button| {
        HidError::check_range("button", i64::from(button), 1, i64::from(BUTTON_COUNT))?;
        Ok(mask | (1 << (button - 1)))
    })
}

fn joystick_value(field: &'static str, value: Option<i32>) -> HidResult<Option<i8>> {
    value
        .map(|v| {
            HidError::check_range(
                field,
                i64::from(v),
                i64::from(*JOYSTICK_RANGE.start()),
                i64::from(*JOYSTICK_RANGE.end()),
            )?;
            Ok(i8::try_from(v).unwrap_or_default())
        })
        .transpose()
}

impl<T: HidTransport> Gamepad<T> {
    pub fn find<I>(candidates: I, config: &DeviceConfig) -> HidResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let transport = find_device(candidates, Usage::GAMEPAD, &config.readiness)?;
        Self::new(transport, &config.readiness)
    }

    /// Bind to `transport` and send a centred, all-released report.
    pub fn new(mut transport: T, readiness: &ReadinessPolicy) -> HidResult<Self> {
        let report = GamepadReport::new();
        readiness.probe(&mut transport, report.as_bytes())?;
        let mut tracker = ChangeTracker::new();
        tracker.commit(&report);
        debug!("Gamepad ready");
        Ok(Self {
            transport,
            buttons: 0,
            joysticks: Joysticks::default(),
            tracker,
        })
    }

    /// Mark buttons (numbered 1 to 16) as pressed without sending.
    ///
    /// # Errors
    ///
    /// [`HidError::OutOfRange`] if any button number is outside 1..=16. No
    /// button is changed in that case.
    pub fn set_pressed_buttons(&mut self, buttons: &[u8]) -> HidResult<()> {
        self.buttons |= button_mask(buttons)?;
        Ok(())
    }

    /// Mark buttons as released without sending.
    pub fn set_released_buttons(&mut self, buttons: &[u8]) -> HidResult<()> {
        self.buttons &= !button_mask(buttons)?;
        Ok(())
    }

    pub fn press_buttons(&mut self, buttons: &[u8]) -> HidResult<()> {
        let mask = button_mask(buttons)?;
        self.apply(self.buttons | mask, self.joysticks, false)
    }

    pub fn release_buttons(&mut self, buttons: &[u8]) -> HidResult<()> {
        let mask = button_mask(buttons)?;
        self.apply(self.buttons & !mask, self.joysticks, false)
    }

    pub fn release_all_buttons(&mut self) -> HidResult<()> {
        self.apply(0, self.joysticks, false)
    }

    pub fn click_buttons(&mut self, buttons: &[u8]) -> HidResult<()> {
        self.press_buttons(buttons)?;
        self.release_buttons(buttons)
    }

    /// Update the given axes without sending. `None` leaves an axis as is.
    ///
    /// # Errors
    ///
    /// [`HidError::OutOfRange`] if any value is outside -127..=127. No axis
    /// is changed in that case.
    pub fn set_joysticks(
        &mut self,
        x: Option<i32>,
        y: Option<i32>,
        z: Option<i32>,
        r_z: Option<i32>,
    ) -> HidResult<()> {
        self.joysticks = self.joysticks_with(x, y, z, r_z)?;
        Ok(())
    }

    pub fn move_joysticks(
        &mut self,
        x: Option<i32>,
        y: Option<i32>,
        z: Option<i32>,
        r_z: Option<i32>,
    ) -> HidResult<()> {
        let joysticks = self.joysticks_with(x, y, z, r_z)?;
        self.apply(self.buttons, joysticks, false)
    }

    /// Release every button, centre both joysticks and always send.
    pub fn reset_all(&mut self) -> HidResult<()> {
        self.apply(0, Joysticks::default(), true)
    }

    /// Send the current state if it differs from the last report sent, or
    /// unconditionally when `always` is set.
    pub fn send(&mut self, always: bool) -> HidResult<()> {
        self.apply(self.buttons, self.joysticks, always)
    }

    /// Bitmask of pressed buttons, button 1 in bit 0.
    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    pub fn is_pressed(&self, button: u8) -> bool {
        (1..=BUTTON_COUNT).contains(&button) && self.buttons & (1 << (button - 1)) != 0
    }

    pub fn joysticks(&self) -> Joysticks {
        self.joysticks
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn joysticks_with(
        &self,
        x: Option<i32>,
        y: Option<i32>,
        z: Option<i32>,
        r_z: Option<i32>,
    ) -> HidResult<Joysticks> {
        let (x, y, z, r_z) = (
            joystick_value("x", x)?,
            joystick_value("y", y)?,
            joystick_value("z", z)?,
            joystick_value("r_z", r_z)?,
        );
        Ok(Joysticks {
            x: x.unwrap_or(self.joysticks.x),
            y: y.unwrap_or(self.joysticks.y),
            z: z.unwrap_or(self.joysticks.z),
            r_z: r_z.unwrap_or(self.joysticks.r_z),
        })
    }

    fn apply(&mut self, buttons: u16, joysticks: Joysticks, always: bool) -> HidResult<()> {
        let mut report = GamepadReport::new();
        report
            .set_u16_le(BUTTONS_OFFSET, buttons)
            .set_i8(JOYSTICK_OFFSET, joysticks.x)
            .set_i8(JOYSTICK_OFFSET + 1, joysticks.y)
            .set_i8(JOYSTICK_OFFSET + 2, joysticks.z)
            .set_i8(JOYSTICK_OFFSET + 3, joysticks.r_z);

        if self.tracker.needs_send(&report, always) {
            trace!("Gamepad report {:02x?}", report.as_bytes());
            self.transport.send_report(report.as_bytes())?;
            self.tracker.commit(&report);
        }

        self.buttons = buttons;
        self.joysticks = joysticks;
        Ok(())
    }
}
