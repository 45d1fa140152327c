//! Line Source
//!
//! Lazy, forward-only reading of logical lines from a file or any buffered
//! async reader. `\n`, `\r\n` and a lone `\r` each end one line. Bytes that
//! are not valid UTF-8 are replaced with U+FFFD.

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads logical lines, stripped of their terminators
///
/// The underlying reader (and its file handle) is owned by the source and
/// released when the source is dropped.
#[derive(Debug)]
pub struct LineSource<R = BufReader<File>> {
    reader: R,
    /// Previous line ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
    lines_read: usize,
}

impl LineSource<BufReader<File>> {
    /// Open a file for line-by-line reading
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_lf: false,
            lines_read: 0,
        }
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next logical line
    ///
    /// Returns `Ok(None)` once the input is exhausted. A terminator at the very
    /// end of the input does not produce a trailing empty line.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();

        loop {
            let available = self.reader.fill_buf().await?;

            if available.is_empty() {
                if line.is_empty() {
                    return Ok(None);
                }
                break;
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(idx) => {
                    line.extend_from_slice(&available[..idx]);
                    let ended_in_cr = available[idx] == b'\r';
                    self.skip_lf = ended_in_cr;
                    self.reader.consume(idx + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        self.lines_read += 1;
        let line = String::from_utf8(line)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        Ok(Some(line))
    }
}
