//! Resumable pre-allocation of the next tripled dense buffer.

use crate::error::GridError;
use formica_core::ColorId;

/// An in-progress allocation of the next tripled dense buffer.
///
/// The job owns a partially built row-major buffer pre-filled with the
/// background color. [`advance`](Self::advance) appends a bounded number
/// of rows per call; when the boundary expansion finally arrives,
/// [`finish`](Self::finish) completes the remainder and hands the buffer
/// over, so most of the stall has already been paid across the preceding
/// steps. Purely a latency smoother — dropping a job at any point is
/// always safe.
#[derive(Clone, Debug)]
pub struct ExpansionJob {
    target_size: u32,
    rows_filled: u32,
    buf: Vec<u8>,
}

impl ExpansionJob {
    /// Start a job for a `target_size × target_size` buffer.
    pub(crate) fn new(target_size: u32) -> Self {
        Self {
            target_size,
            rows_filled: 0,
            buf: Vec::new(),
        }
    }

    /// Side length of the buffer under construction.
    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    /// Rows already allocated and background-filled.
    pub fn rows_filled(&self) -> u32 {
        self.rows_filled
    }

    /// Whether every row has been allocated.
    pub fn is_complete(&self) -> bool {
        self.rows_filled == self.target_size
    }

    /// Append up to `max_rows` background-filled rows.
    ///
    /// Returns the number of rows actually appended. A failed reservation
    /// appends nothing and leaves the job intact for a later retry.
    pub(crate) fn advance(&mut self, def: ColorId, max_rows: u32) -> u32 {
        let remaining = self.target_size - self.rows_filled;
        let rows = remaining.min(max_rows);
        if rows == 0 {
            return 0;
        }
        let bytes = rows as usize * self.target_size as usize;
        if self.buf.try_reserve(bytes).is_err() {
            return 0;
        }
        self.buf.resize(self.buf.len() + bytes, def.get());
        self.rows_filled += rows;
        rows
    }

    /// Complete the remaining rows and take the buffer.
    pub(crate) fn finish(mut self, def: ColorId) -> Result<Vec<u8>, GridError> {
        let remaining = (self.target_size - self.rows_filled) as usize;
        let bytes = remaining * self.target_size as usize;
        self.buf
            .try_reserve_exact(bytes)
            .map_err(|_| GridError::AllocationFailed { bytes })?;
        let total = self.target_size as usize * self.target_size as usize;
        self.buf.resize(total, def.get());
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(raw: u8) -> ColorId {
        ColorId::new(raw).expect("test color in range")
    }

    #[test]
    fn advance_is_bounded_and_cumulative() {
        let mut job = ExpansionJob::new(12);
        assert_eq!(job.advance(color(3), 5), 5);
        assert_eq!(job.rows_filled(), 5);
        assert_eq!(job.advance(color(3), 5), 5);
        assert_eq!(job.advance(color(3), 5), 2);
        assert!(job.is_complete());
        assert_eq!(job.advance(color(3), 5), 0);
    }

    #[test]
    fn finish_fills_the_remainder() {
        let mut job = ExpansionJob::new(6);
        job.advance(color(2), 4);
        let buf = job.finish(color(2)).unwrap();
        assert_eq!(buf.len(), 36);
        assert!(buf.iter().all(|&b| b == 2));
    }

    #[test]
    fn finish_without_advance_builds_everything() {
        let buf = ExpansionJob::new(9).finish(color(0)).unwrap();
        assert_eq!(buf.len(), 81);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
