//! Length-prefixed record files.
//!
//! A framed file is a flat run of `[u32 little-endian length][payload]`
//! pairs with no file header, separator, or trailer.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use imuframe_common::error::{ImuframeError, ImuframeResult};

/// Size of the length prefix in bytes.
pub const PREFIX_LEN: usize = 4;

/// Write one `(length, payload)` pair.
pub fn write_framed<W: Write>(writer: &mut W, payload: &[u8]) -> std::io::Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("payload of {} bytes exceeds u32 length prefix", payload.len()),
        )
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)
}

/// Writes framed records to a file, truncating whatever was there.
pub struct FramedWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
    bytes_written: u64,
}

impl FramedWriter {
    /// Create (or truncate) the output file.
    pub fn create(path: impl Into<PathBuf>) -> ImuframeResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ImuframeError::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| ImuframeError::io(&path, e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            records_written: 0,
            bytes_written: 0,
        })
    }

    /// Append one record.
    pub fn write_block(&mut self, payload: &[u8]) -> ImuframeResult<()> {
        write_framed(&mut self.writer, payload).map_err(|e| ImuframeError::io(&self.path, e))?;
        self.records_written += 1;
        self.bytes_written += (PREFIX_LEN + payload.len()) as u64;
        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> ImuframeResult<()> {
        self.writer
            .flush()
            .map_err(|e| ImuframeError::io(&self.path, e))
    }

    /// Flush and close, returning `(records, bytes)` written.
    pub fn finish(mut self) -> ImuframeResult<(u64, u64)> {
        self.flush()?;
        Ok((self.records_written, self.bytes_written))
    }
}

impl Drop for FramedWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Iterates the payloads of a framed stream.
///
/// A stream that ends inside a prefix or payload yields one error and then
/// stops.
pub struct FramedReader<R> {
    reader: R,
    done: bool,
}

impl FramedReader<BufReader<File>> {
    pub fn open(path: &Path) -> ImuframeResult<Self> {
        let file = File::open(path).map_err(|e| ImuframeError::io(path, e))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> FramedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    fn next_payload(&mut self) -> ImuframeResult<Option<Vec<u8>>> {
        let mut prefix = [0u8; PREFIX_LEN];
        let got = read_up_to(&mut self.reader, &mut prefix)?;
        if got == 0 {
            return Ok(None);
        }
        if got < PREFIX_LEN {
            return Err(ImuframeError::framing(format!(
                "truncated length prefix: {got} of {PREFIX_LEN} bytes"
            )));
        }

        // Grow with the bytes actually present, not the claimed length.
        let len = u32::from_le_bytes(prefix) as usize;
        let mut payload = Vec::new();
        let got = (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut payload)
            .map_err(|e| anyhow::Error::new(e).context("reading framed stream"))?;
        if got < len {
            return Err(ImuframeError::framing(format!(
                "truncated payload: {got} of {len} bytes"
            )));
        }
        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for FramedReader<R> {
    type Item = ImuframeResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_payload().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

/// Fill as much of `buf` as the stream allows; short only at end of stream.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> ImuframeResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(anyhow::Error::new(e).context("reading framed stream").into()),
        }
    }
    Ok(filled)
}
