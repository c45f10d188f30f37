//! Fixed-width report buffers.
//!
//! Every device class owns one flat `[u8; N]` whose layout is fixed by its
//! report descriptor. Fields are addressed through [`Field`] constants and
//! written with indexed stores; there are no aliased sub-views.

use tracing::trace;

/// Location of one field inside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
}

impl Field {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> ReportBuffer<N> {
    pub const LEN: usize = N;

    pub const fn new() -> Self {
        Self { bytes: [0u8; N] }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_array(&self) -> [u8; N] {
        self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes = [0u8; N];
    }

    pub fn is_zeroed(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    pub fn field(&self, field: Field) -> &[u8] {
        self.bytes.get(field.offset..field.end()).unwrap_or(&[])
    }

    pub fn field_mut(&mut self, field: Field) -> &mut [u8] {
        self.bytes.get_mut(field.offset..field.end()).unwrap_or(&mut [])
    }

    pub fn u8_at(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    pub fn set_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        if let Some(slot) = self.bytes.get_mut(offset) {
            *slot = value;
        }
        self
    }

    pub fn i8_at(&self, offset: usize) -> i8 {
        i8::from_le_bytes([self.u8_at(offset)])
    }

    pub fn set_i8(&mut self, offset: usize, value: i8) -> &mut Self {
        self.set_u8(offset, value.to_le_bytes()[0])
    }

    pub fn u16_le_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.u8_at(offset), self.u8_at(offset + 1)])
    }

    pub fn set_u16_le(&mut self, offset: usize, value: u16) -> &mut Self {
        let [lo, hi] = value.to_le_bytes();
        self.set_u8(offset, lo).set_u8(offset + 1, hi)
    }
}

impl<const N: usize> Default for ReportBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> AsRef<[u8]> for ReportBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Shadow copy of the last transmitted report, used to suppress duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeTracker<const N: usize> {
    last_sent: Option<ReportBuffer<N>>,
}

impl<const N: usize> ChangeTracker<N> {
    pub const fn new() -> Self {
        Self { last_sent: None }
    }

    /// Whether `candidate` has to go out on the wire.
    pub fn needs_send(&self, candidate: &ReportBuffer<N>, always: bool) -> bool {
        if always {
            return true;
        }
        let changed = self.last_sent.as_ref() != Some(candidate);
        if !changed {
            trace!("Suppressing unchanged {}-byte report", N);
        }
        changed
    }

    pub fn commit(&mut self, sent: &ReportBuffer<N>) {
        self.last_sent = Some(*sent);
    }

    pub fn last_sent(&self) -> Option<&ReportBuffer<N>> {
        self.last_sent.as_ref()
    }
}
