//! Integration tests for the hidemu-transport crate.
//!
//! Covers the report buffer model, duplicate suppression, the device locator
//! against the recording mock, and the error message contract.

use std::time::Duration;

use hidemu_transport::mock::MockTransport;
use hidemu_transport::{
    ChangeTracker, Field, HidError, HidResult, HidTransport, ReadinessPolicy, ReportBuffer, Usage,
    find_device,
};
use insta::assert_snapshot;
use proptest::prelude::*;

fn no_wait() -> ReadinessPolicy {
    ReadinessPolicy {
        timeout: Some(Duration::from_millis(3)),
        poll_interval: Duration::from_millis(1),
        probe_backoff: Duration::ZERO,
    }
}

// ---------------------------------------------------------------------------
// ReportBuffer
// ---------------------------------------------------------------------------

#[test]
fn buffer_starts_zeroed() {
    let report = ReportBuffer::<8>::default();
    assert!(report.is_zeroed());
    assert_eq!(report.as_bytes().len(), 8);
    assert_eq!(ReportBuffer::<5>::LEN, 5);
}

#[test]
fn buffer_field_outside_report_is_empty() {
    let report = ReportBuffer::<4>::new();
    assert!(report.field(Field::new(3, 4)).is_empty());
}

#[test]
fn buffer_digitizer_style_layout() {
    let mut report = ReportBuffer::<5>::new();
    report
        .set_u8(0, 0x03)
        .set_u16_le(1, 16384)
        .set_u16_le(3, 16384);
    assert_snapshot!(format!("{:02x?}", report.as_bytes()), @"[03, 00, 40, 00, 40]");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Signed stores read back unchanged and never touch neighbouring bytes.
    #[test]
    fn prop_i8_store_is_local(offset in 0usize..4, value in i8::MIN..=i8::MAX) {
        let mut report = ReportBuffer::<4>::new();
        report.set_i8(offset, value);
        prop_assert_eq!(report.i8_at(offset), value);
        for (i, byte) in report.as_bytes().iter().enumerate() {
            if i != offset {
                prop_assert_eq!(*byte, 0);
            }
        }
    }

    /// Little-endian u16 stores match `to_le_bytes`.
    #[test]
    fn prop_u16_store_is_little_endian(value in 0u16..=u16::MAX) {
        let mut report = ReportBuffer::<3>::new();
        report.set_u16_le(1, value);
        let expected = value.to_le_bytes();
        prop_assert_eq!(report.as_bytes(), &[0, expected[0], expected[1]][..]);
        prop_assert_eq!(report.u16_le_at(1), value);
    }

    /// The tracker asks for a send exactly when the candidate differs from
    /// what was last committed.
    #[test]
    fn prop_tracker_suppresses_duplicates(a in any::<[u8; 6]>(), b in any::<[u8; 6]>()) {
        let mut first = ReportBuffer::<6>::new();
        first.field_mut(Field::new(0, 6)).copy_from_slice(&a);
        let mut second = ReportBuffer::<6>::new();
        second.field_mut(Field::new(0, 6)).copy_from_slice(&b);

        let mut tracker = ChangeTracker::<6>::new();
        tracker.commit(&first);
        prop_assert_eq!(tracker.needs_send(&second, false), a != b);
        prop_assert!(tracker.needs_send(&second, true));
    }
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

#[test]
fn locator_skips_non_matching_candidates() -> HidResult<()> {
    let candidates = vec![
        MockTransport::new(Usage::KEYBOARD),
        MockTransport::new(Usage::MOUSE),
        MockTransport::new(Usage::CONSUMER_CONTROL),
    ];
    let found = find_device(candidates, Usage::CONSUMER_CONTROL, &no_wait())?;
    assert_eq!(found.hid_usage(), Usage::CONSUMER_CONTROL);
    Ok(())
}

#[test]
fn locator_accepts_single_handle() -> HidResult<()> {
    let found = find_device(
        Some(MockTransport::new(Usage::DIGITIZER)),
        Usage::DIGITIZER,
        &no_wait(),
    )?;
    assert_eq!(found.usage_page(), 0x0D);
    Ok(())
}

#[test]
fn locator_accepts_borrowed_handles() -> HidResult<()> {
    let mut keyboard = MockTransport::new(Usage::KEYBOARD);
    let mut mouse = MockTransport::new(Usage::MOUSE);

    let mut found = find_device([&mut keyboard, &mut mouse], Usage::MOUSE, &no_wait())?;
    found.send_report(&[0x01, 0x00, 0x00, 0x00])?;

    assert_eq!(mouse.send_count(), 1);
    assert_eq!(keyboard.send_count(), 0);
    Ok(())
}

#[test]
fn locator_empty_candidates_not_found() {
    let result = find_device(Vec::<MockTransport>::new(), Usage::KEYBOARD, &no_wait());
    assert!(matches!(result, Err(HidError::DeviceNotFound { .. })));
}

#[test]
fn locator_waits_for_negotiation() -> HidResult<()> {
    let device = MockTransport::negotiated(Usage::GAMEPAD);
    device.ready_after(1);

    find_device([device.clone()], Usage::GAMEPAD, &no_wait())?;
    assert_eq!(device.readiness_checks(), 2);
    Ok(())
}

#[test]
fn locator_does_not_rescan_after_timeout() {
    let stuck = MockTransport::negotiated(Usage::KEYBOARD);
    let ready = MockTransport::new(Usage::KEYBOARD);

    let result = find_device([stuck, ready.clone()], Usage::KEYBOARD, &no_wait());
    assert!(matches!(result, Err(HidError::Timeout { .. })));
    assert_eq!(ready.readiness_checks(), 0);
}

// ---------------------------------------------------------------------------
// Error messages
// ---------------------------------------------------------------------------

#[test]
fn error_messages() {
    assert_snapshot!(
        HidError::DeviceNotFound { usage_page: 0x0C, usage: 0x01 }.to_string(),
        @"Could not find matching HID device (usage page 0x0c, usage 0x01)"
    );
    assert_snapshot!(
        HidError::Timeout { waited: Duration::from_secs(3) }.to_string(),
        @"HID device not ready after 3000ms. Is USB connected?"
    );
    assert_snapshot!(
        HidError::OutOfRange { field: "x", value: 40000, min: 0, max: 32767 }.to_string(),
        @"x value 40000 is out of range [0, 32767]"
    );
    assert_snapshot!(
        HidError::Capacity { max: 6 }.to_string(),
        @"Trying to press more than 6 keys at once"
    );
    assert_snapshot!(
        HidError::UnsupportedCharacter { character: '\u{2603}' }.to_string(),
        @"No keycode available for character '☃' (9731/0x2603)"
    );
    assert_snapshot!(
        HidError::Transport("Broken pipe".to_string()).to_string(),
        @"Failed to send report: Broken pipe"
    );
}
