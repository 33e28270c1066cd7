//! Streaming gzip decompression of Contents files.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::iter::FusedIterator;
use thiserror::Error;

use crate::ContentsFile;

/// Errors that can occur while decompressing a Contents file.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// The downloaded file is empty.
    #[error("Empty input data")]
    EmptyInput,

    /// The downloaded file could not be opened.
    #[error("Failed to open Contents file: {0}")]
    Open(#[source] std::io::Error),

    /// The gzip stream is invalid or truncated.
    #[error("Corrupt gzip stream after {line} lines: {source}")]
    Corrupt {
        /// Number of lines successfully decoded before the failure.
        line: u64,
        /// Underlying decoder error.
        #[source]
        source: std::io::Error,
    },
}

/// Opens the lines of a downloaded Contents file.
///
/// # Errors
///
/// Returns an error if the file is empty or cannot be opened.
pub fn open_lines(file: &ContentsFile) -> Result<ContentLines<File>, DecompressError> {
    if file.size() == 0 {
        return Err(DecompressError::EmptyInput);
    }
    let handle = file.open().map_err(DecompressError::Open)?;
    Ok(ContentLines::new(handle))
}

/// Lazy, single-pass iterator over the lines of a gzip-compressed stream.
///
/// Only one line is held in memory at a time. Line terminators (`\n` and a
/// preceding `\r`) are stripped; invalid UTF-8 is replaced rather than
/// rejected. After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct ContentLines<R: Read> {
    reader: BufReader<MultiGzDecoder<R>>,
    buf: Vec<u8>,
    lines_read: u64,
    done: bool,
}

impl<R: Read> ContentLines<R> {
    /// Wraps a reader producing gzip-compressed bytes.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(MultiGzDecoder::new(reader)),
            buf: Vec::new(),
            lines_read: 0,
            done: false,
        }
    }

    /// Returns the number of lines yielded so far.
    #[must_use]
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: Read> Iterator for ContentLines<R> {
    type Item = Result<String, DecompressError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                self.lines_read += 1;
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(source) => {
                self.done = true;
                Some(Err(DecompressError::Corrupt {
                    line: self.lines_read,
                    source,
                }))
            }
        }
    }
}

impl<R: Read> FusedIterator for ContentLines<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn collect(data: Vec<u8>) -> Vec<String> {
        ContentLines::new(data.as_slice())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_lines_are_stripped() {
        let lines = collect(gzip(b"usr/bin/foo admin/foo\nusr/bin/bar admin/bar\r\n"));
        assert_eq!(lines, vec!["usr/bin/foo admin/foo", "usr/bin/bar admin/bar"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines = collect(gzip(b"a x/a\nb x/b"));
        assert_eq!(lines, vec!["a x/a", "b x/b"]);
    }

    #[test]
    fn test_empty_lines_preserved() {
        let lines = collect(gzip(b"\n\na x/a\n"));
        assert_eq!(lines, vec!["", "", "a x/a"]);
    }

    #[test]
    fn test_concatenated_members() {
        let mut data = gzip(b"a x/a\n");
        data.extend(gzip(b"b x/b\n"));
        assert_eq!(collect(data), vec!["a x/a", "b x/b"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(gzip(b"caf\xe9 x/a\n"));
        assert_eq!(lines, vec!["caf\u{fffd} x/a"]);
    }

    #[test]
    fn test_lines_read_counter() {
        let data = gzip(b"1\n2\n3\n");
        let mut lines = ContentLines::new(data.as_slice());
        assert_eq!(lines.lines_read(), 0);
        lines.next();
        lines.next();
        assert_eq!(lines.lines_read(), 2);
        assert_eq!(lines.by_ref().count(), 1);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_not_gzip_is_corrupt() {
        let mut lines = ContentLines::new(&b"plain text, not gzip\n"[..]);
        let first = lines.next().unwrap();
        assert!(matches!(first, Err(DecompressError::Corrupt { line: 0, .. })));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let body: String = (0..2000).map(|i| format!("usr/share/doc/file{i} doc/pkg{i}\n")).collect();
        let mut data = gzip(body.as_bytes());
        data.truncate(data.len() / 2);

        let results: Vec<_> = ContentLines::new(data.as_slice()).collect();
        let last = results.last().unwrap();
        assert!(matches!(last, Err(DecompressError::Corrupt { .. })));
        assert!(results[..results.len() - 1].iter().all(Result::is_ok));
    }

    #[test]
    fn test_open_lines_rejects_empty_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let file = ContentsFile::from_temp_file(temp, "http://m/Contents-amd64.gz").unwrap();
        assert!(matches!(open_lines(&file), Err(DecompressError::EmptyInput)));
    }

    #[test]
    fn test_open_lines_reads_file() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(&gzip(b"bin/ls utils/coreutils\n")).unwrap();
        let file = ContentsFile::from_temp_file(temp, "http://m/Contents-amd64.gz").unwrap();

        let lines: Vec<_> = open_lines(&file).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(lines, vec!["bin/ls utils/coreutils"]);
    }
}
