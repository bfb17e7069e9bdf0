//! Buffered member copy shared by creation, extraction and replacement.
//!
//! One `CopyBuffer` is allocated per store operation and reused for every
//! member it streams, instead of letting `std::io::copy` allocate per call.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ProgressCallback;
use crate::StoreError;

/// Buffer size for member I/O (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for member copies.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies data from reader to writer using the provided buffer, reporting
/// every written chunk to `progress`.
///
/// Interrupted reads are retried. Returns the total number of bytes copied.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use zipedit_core::NoopProgress;
/// use zipedit_core::copy::{CopyBuffer, copy_with_buffer};
///
/// let mut buffer = CopyBuffer::new();
/// let mut input = Cursor::new(b"hello".to_vec());
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer, &mut NoopProgress)?;
/// assert_eq!(copied, 5);
/// assert_eq!(output, b"hello");
/// # Ok::<(), zipedit_core::StoreError>(())
/// ```
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64, StoreError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StoreError::Io(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(StoreError::Io)?;

        total = total.saturating_add(bytes_read as u64);
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(total)
}
