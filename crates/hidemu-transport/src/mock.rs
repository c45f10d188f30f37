//! Recording transport for tests.
//!
//! Clones share their state, so a test can hand one clone to a device class
//! and keep another to inspect what was sent.

use crate::{HidError, HidResult, HidTransport, Readiness, Usage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
    failures: VecDeque<HidError>,
    ready: bool,
    ready_after_checks: Option<usize>,
    readiness_checks: usize,
}

#[derive(Debug, Clone)]
pub struct MockTransport {
    usage: Usage,
    readiness: Readiness,
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new(usage: Usage) -> Self {
        Self {
            usage,
            readiness: Readiness::Immediate,
            state: Arc::new(Mutex::new(MockState {
                ready: true,
                ..MockState::default()
            })),
        }
    }

    /// A wired-USB-like transport that is not ready until told otherwise.
    pub fn negotiated(usage: Usage) -> Self {
        let mock = Self {
            readiness: Readiness::Negotiated,
            ..Self::new(usage)
        };
        mock.set_ready(false);
        mock
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_ready(&self, ready: bool) {
        let mut state = self.lock();
        state.ready = ready;
        state.ready_after_checks = None;
    }

    /// Report not-ready for the next `checks` readiness polls, then ready.
    pub fn ready_after(&self, checks: usize) {
        let mut state = self.lock();
        state.ready = false;
        state.ready_after_checks = Some(checks);
    }

    pub fn readiness_checks(&self) -> usize {
        self.lock().readiness_checks
    }

    /// Make the next `send_report` fail with `error`. Failures queue up.
    pub fn fail_next_send(&self, error: HidError) {
        self.lock().failures.push_back(error);
    }

    pub fn queue_inbound(&self, report: Vec<u8>) {
        self.lock().inbound.push_back(report);
    }

    pub fn sent_reports(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    pub fn last_report(&self) -> Option<Vec<u8>> {
        self.lock().sent.last().cloned()
    }

    pub fn send_count(&self) -> usize {
        self.lock().sent.len()
    }

    pub fn clear(&self) {
        self.lock().sent.clear();
    }
}

impl HidTransport for MockTransport {
    fn usage_page(&self) -> u16 {
        self.usage.page
    }

    fn usage(&self) -> u16 {
        self.usage.id
    }

    fn send_report(&mut self, report: &[u8]) -> HidResult<()> {
        let mut state = self.lock();
        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }
        state.sent.push(report.to_vec());
        Ok(())
    }

    fn last_received_report(&mut self) -> Option<Vec<u8>> {
        self.lock().inbound.pop_front()
    }

    fn readiness(&self) -> Readiness {
        self.readiness
    }

    fn is_ready(&self) -> bool {
        let mut state = self.lock();
        state.readiness_checks += 1;
        if let Some(remaining) = state.ready_after_checks {
            if remaining == 0 {
                state.ready = true;
                state.ready_after_checks = None;
            } else {
                state.ready_after_checks = Some(remaining - 1);
            }
        }
        state.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_reports() -> HidResult<()> {
        let mut device = MockTransport::new(Usage::KEYBOARD);
        let observer = device.clone();

        device.send_report(&[0x01, 0x02, 0x03])?;
        device.send_report(&[0x04])?;

        assert_eq!(observer.send_count(), 2);
        assert_eq!(observer.last_report(), Some(vec![0x04]));
        observer.clear();
        assert!(device.sent_reports().is_empty());
        Ok(())
    }

    #[test]
    fn test_mock_failure_injection() {
        let mut device = MockTransport::new(Usage::MOUSE);
        device.fail_next_send(HidError::NotReady);

        assert_eq!(device.send_report(&[0x00]), Err(HidError::NotReady));
        assert_eq!(device.send_report(&[0x00]), Ok(()));
        assert_eq!(device.send_count(), 1);
    }

    #[test]
    fn test_mock_ready_after_checks() {
        let device = MockTransport::negotiated(Usage::KEYBOARD);
        device.ready_after(2);

        assert!(!device.is_ready());
        assert!(!device.is_ready());
        assert!(device.is_ready());
        assert_eq!(device.readiness_checks(), 3);
    }

    #[test]
    fn test_mock_inbound_queue() {
        let mut device = MockTransport::new(Usage::KEYBOARD);
        assert!(device.last_received_report().is_none());

        device.queue_inbound(vec![0x02]);
        assert_eq!(device.last_received_report(), Some(vec![0x02]));
        assert!(device.last_received_report().is_none());
    }
}
