use std::io::{BufRead, BufReader, ErrorKind, Read};

use radarplot_decode::{decode_line, Record};
use serialport::{ClearBuffer, SerialPort};

use crate::config::RadarConfig;
use crate::error::{RadarError, Result};

/// Longest line kept before it is cut off and reported as malformed.
pub const MAX_LINE_LEN: usize = 1024;

/// Something the render loop can pull records from.
pub trait RecordSource {
    /// `Ok(None)` means the read timed out without a complete line.
    fn read_record(&mut self) -> Result<Option<Record>>;
}

/// Newline-delimited record reader over any byte stream.
///
/// Bytes of a line cut short by a timeout are kept and completed on the next
/// call. Dropping the reader closes the underlying stream.
pub struct LineReader<R: Read> {
    name: String,
    inner: BufReader<R>,
    pending: Vec<u8>,
}

pub type SerialConnection = LineReader<Box<dyn SerialPort>>;

impl SerialConnection {
    /// Open `port` at the configured baud rate and discard stale input.
    pub fn open(port: &str, cfg: &RadarConfig) -> Result<Self> {
        let open_err = |source| RadarError::Open {
            port: port.to_string(),
            source,
        };
        let serial = serialport::new(port, cfg.baud_rate)
            .timeout(cfg.read_timeout())
            .open()
            .map_err(open_err)?;
        serial.clear(ClearBuffer::Input).map_err(open_err)?;
        log::info!("opened {port} at {} baud", cfg.baud_rate);
        Ok(LineReader::new(port, serial))
    }
}

impl<R: Read> LineReader<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        Self {
            name: name.into(),
            inner: BufReader::new(inner),
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lost(&self, source: std::io::Error) -> RadarError {
        RadarError::ConnectionLost {
            port: self.name.clone(),
            source,
        }
    }
}

impl<R: Read> RecordSource for LineReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            let chunk = match self.inner.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    log::trace!("read timeout on {}", self.name);
                    return Ok(None);
                }
                Err(e) => return Err(self.lost(e)),
            };
            // Also covers a stream that ends mid-line.
            if chunk.is_empty() {
                return Err(self.lost(ErrorKind::UnexpectedEof.into()));
            }

            let newline = chunk.iter().position(|&b| b == b'\n');
            let used = newline.map_or(chunk.len(), |i| i + 1);
            self.pending.extend_from_slice(&chunk[..used]);
            self.inner.consume(used);

            if newline.is_some() {
                let line = std::mem::take(&mut self.pending);
                return Ok(Some(decode_line(&line)));
            }
            if self.pending.len() > MAX_LINE_LEN {
                let line = std::mem::take(&mut self.pending);
                log::warn!(
                    "{} bytes without a newline on {}, discarding",
                    line.len(),
                    self.name
                );
                return Ok(Some(Record::Malformed(
                    String::from_utf8_lossy(&line).into_owned(),
                )));
            }
        }
    }
}

impl<R: Read> Drop for LineReader<R> {
    fn drop(&mut self) {
        log::debug!("closing {}", self.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radarplot_decode::Sample;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Hands out scripted chunks; `None` is a timeout.
    struct Chunks(VecDeque<Option<&'static [u8]>>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(Some(chunk)) => {
                    buf[..chunk.len()].copy_from_slice(chunk);
                    Ok(chunk.len())
                }
                Some(None) => Err(ErrorKind::TimedOut.into()),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn reads_lines_in_order() {
        let mut reader = LineReader::new("test", Cursor::new(b"Radar Start\r\n1,2\n".to_vec()));
        assert_eq!(reader.read_record().unwrap(), Some(Record::StartMarker));
        assert_eq!(
            reader.read_record().unwrap(),
            Some(Record::Sample(Sample { angle: 1.0, distance: 2.0 }))
        );
    }

    #[test]
    fn partial_line_survives_timeout() {
        let chunks = Chunks(VecDeque::from([Some(&b"12,3"[..]), None, Some(&b"4.5\n"[..])]));
        let mut reader = LineReader::new("test", chunks);
        assert_eq!(reader.read_record().unwrap(), None);
        assert_eq!(
            reader.read_record().unwrap(),
            Some(Record::Sample(Sample { angle: 12.0, distance: 34.5 }))
        );
    }

    /// Endless bytes with no newline, counting reads.
    struct Flood {
        reads: usize,
    }

    impl Read for Flood {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            let n = buf.len().min(4096);
            buf[..n].fill(b'x');
            Ok(n)
        }
    }

    #[test]
    fn line_without_newline_is_cut_off() {
        let mut reader = LineReader::new("test", Flood { reads: 0 });
        let record = reader.read_record().unwrap();
        assert!(matches!(record, Some(Record::Malformed(ref line)) if line.len() > MAX_LINE_LEN));
        assert!(reader.pending.is_empty());
        assert!(reader.inner.get_ref().reads <= 2);

        // Each further call also returns instead of buffering forever.
        assert!(matches!(reader.read_record().unwrap(), Some(Record::Malformed(_))));
        assert!(reader.inner.get_ref().reads <= 4);
    }

    #[test]
    fn line_after_garbage_still_decodes() {
        let stream = Flood { reads: 0 }.take(3000).chain(&b"\n7,8\n"[..]);
        let mut reader = LineReader::new("test", stream);
        let record = loop {
            match reader.read_record().unwrap() {
                Some(Record::Malformed(_)) => continue,
                other => break other,
            }
        };
        assert_eq!(record, Some(Record::Sample(Sample { angle: 7.0, distance: 8.0 })));
    }

    #[test]
    fn eof_is_connection_lost() {
        let mut reader = LineReader::new("ttyTEST", Cursor::new(Vec::new()));
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, RadarError::ConnectionLost { ref port, .. } if port == "ttyTEST"));
    }

    #[test]
    fn eof_mid_line_is_connection_lost() {
        let mut reader = LineReader::new("test", Cursor::new(b"5,1".to_vec()));
        assert!(reader.read_record().is_err());
    }
}
