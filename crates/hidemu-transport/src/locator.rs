//! Device locator and readiness policy

use crate::{HidError, HidResult, HidTransport, Readiness, Usage};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long and how often to wait for a transport to become usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
    /// `None` waits forever.
    #[serde(with = "crate::serde_millis::option_duration", rename = "timeout_ms")]
    pub timeout: Option<Duration>,

    #[serde(with = "crate::serde_millis::duration", rename = "poll_interval_ms")]
    pub poll_interval: Duration,

    /// Pause before the single retry of a failed initial report.
    #[serde(with = "crate::serde_millis::duration", rename = "probe_backoff_ms")]
    pub probe_backoff: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: Duration::from_secs(1),
            probe_backoff: Duration::from_secs(1),
        }
    }
}

impl ReadinessPolicy {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }

    /// Policy that never sleeps. Useful for transports known to be up.
    pub fn immediate() -> Self {
        Self {
            timeout: Some(Duration::ZERO),
            poll_interval: Duration::ZERO,
            probe_backoff: Duration::ZERO,
        }
    }

    /// Number of readiness checks a bounded wait performs.
    pub fn max_polls(&self) -> Option<u64> {
        let timeout = self.timeout?;
        let poll = self.poll_interval.as_nanos().max(1);
        let polls = timeout.as_nanos().div_ceil(poll);
        Some(u64::try_from(polls).unwrap_or(u64::MAX).max(1))
    }

    /// Block until `transport` reports ready, or fail with [`HidError::Timeout`].
    ///
    /// Transports with [`Readiness::Immediate`] return at once.
    pub fn wait_ready<T: HidTransport + ?Sized>(&self, transport: &T) -> HidResult<()> {
        if transport.readiness() == Readiness::Immediate {
            return Ok(());
        }

        match self.timeout {
            None => {
                let mut polls: u64 = 0;
                while !transport.is_ready() {
                    polls += 1;
                    if polls == 1 {
                        info!(
                            "Waiting for {} to be configured by the host",
                            transport.hid_usage().display_name()
                        );
                    }
                    thread::sleep(self.poll_interval);
                }
                debug!("Transport ready after {polls} polls");
                Ok(())
            }
            Some(timeout) => {
                let max_polls = self.max_polls().unwrap_or(1);
                let mut waited = Duration::ZERO;
                for poll in 0..max_polls {
                    if transport.is_ready() {
                        debug!("Transport ready after {poll} polls");
                        return Ok(());
                    }
                    // The last pause is shortened so the total is exactly `timeout`.
                    let remaining = timeout.saturating_sub(waited);
                    let pause = if self.poll_interval.is_zero() {
                        remaining
                    } else {
                        self.poll_interval.min(remaining)
                    };
                    thread::sleep(pause);
                    waited += pause;
                    if waited >= timeout {
                        break;
                    }
                }
                warn!(
                    "{} not ready after {}ms",
                    transport.hid_usage().display_name(),
                    waited.as_millis()
                );
                Err(HidError::Timeout { waited })
            }
        }
    }

    /// Send the initial report, retrying once after `probe_backoff` if the
    /// transport was not ready yet.
    pub fn probe<T: HidTransport + ?Sized>(&self, transport: &mut T, report: &[u8]) -> HidResult<()> {
        match transport.send_report(report) {
            Err(e) if e.is_retryable() => {
                warn!(
                    "Initial report failed ({e}), retrying in {}ms",
                    self.probe_backoff.as_millis()
                );
                thread::sleep(self.probe_backoff);
                transport.send_report(report)
            }
            result => result,
        }
    }
}

/// Return the first candidate whose usage matches, after waiting for it to be
/// ready according to `policy`.
///
/// A single handle is passed as a one-element iterator (`[handle]`). The scan
/// itself is never repeated.
pub fn find_device<I, T>(candidates: I, usage: Usage, policy: &ReadinessPolicy) -> HidResult<T>
where
    I: IntoIterator<Item = T>,
    T: HidTransport,
{
    let device = candidates
        .into_iter()
        .find(|candidate| candidate.hid_usage() == usage)
        .ok_or(HidError::DeviceNotFound {
            usage_page: usage.page,
            usage: usage.id,
        })?;

    debug!("Found {} device", usage.display_name());
    policy.wait_ready(&device)?;
    Ok(device)
}
