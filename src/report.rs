//! Sinks for the step records of a run.
//!
//! The observable result of a run is the ordered sequence of [`StepRecord`].
//! [`Reporter`] lets the engine stream it, either into memory or as text lines.

use std::io::{self, Write};

use crate::error::Never;
use crate::percolation::StepRecord;

/// Receives the records of a run, in step order.
pub trait Reporter {
    /// Error returned when a record cannot be stored.
    type Error;

    /// Store the record of one step.
    /// # Errors
    /// Depends on the implementation, the run stops at the first error.
    fn record(&mut self, record: StepRecord) -> Result<(), Self::Error>;
}

impl Reporter for Vec<StepRecord> {
    type Error = Never;

    #[inline]
    fn record(&mut self, record: StepRecord) -> Result<(), Self::Error> {
        self.push(record);
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    type Error = R::Error;

    #[inline]
    fn record(&mut self, record: StepRecord) -> Result<(), Self::Error> {
        (**self).record(record)
    }
}

/// Writes one `"<step> <largest>"` line per record.
///
/// The writer is not buffered, wrap it in a [`std::io::BufWriter`] for large runs.
///
/// # Example
/// ```
/// # use newman_ziff::{percolation::StepRecord, report::{LineReporter, Reporter}};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reporter = LineReporter::new(Vec::new());
/// reporter.record(StepRecord::new(1, 1))?;
/// reporter.record(StepRecord::new(2, 2))?;
/// assert_eq!(reporter.into_inner(), b"1 1\n2 2\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LineReporter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> LineReporter<W> {
    /// Report into `writer`.
    #[must_use]
    #[inline]
    pub const fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    getter_copy!(
        const,
        /// Number of lines written so far.
        lines,
        usize
    );

    /// Flush the underlying writer.
    /// # Errors
    /// Returns the error of [`Write::flush`].
    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get back the writer, without flushing it.
    #[allow(clippy::missing_const_for_fn)] // false positive
    #[must_use]
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    type Error = io::Error;

    #[inline]
    fn record(&mut self, record: StepRecord) -> Result<(), Self::Error> {
        writeln!(self.writer, "{}", record)?;
        self.lines += 1;
        Ok(())
    }
}
