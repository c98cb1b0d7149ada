//! Line input from stdin, readable with a deadline.
//!
//! A plain thread reads stdin and forwards lines over a channel, so a timed
//! out read never leaves a blocked task behind in the runtime.

use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

/// What came back from a timed read.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    TimedOut,
    Closed,
}

pub struct LineReader {
    rx: mpsc::UnboundedReceiver<String>,
    closed: bool,
}

impl LineReader {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || forward_lines(std::io::stdin().lock(), tx));
        Self { rx, closed: false }
    }

    #[cfg(test)]
    fn from_channel(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self { rx, closed: false }
    }

    /// `true` once stdin has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Wait for a line until `deadline`.
    pub async fn read_until(&mut self, deadline: Instant) -> Reply {
        if self.closed {
            return Reply::Closed;
        }
        match timeout_at(deadline, self.rx.recv()).await {
            Ok(Some(line)) => Reply::Line(line),
            Ok(None) => {
                self.closed = true;
                Reply::Closed
            }
            Err(_) => Reply::TimedOut,
        }
    }

    /// Wait for a line with no deadline. `None` once stdin is closed.
    pub async fn read_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let line = self.rx.recv().await;
        if line.is_none() {
            self.closed = true;
        }
        line
    }
}

/// Send each line of `reader` down `tx` until the reader is exhausted.
/// Invalid UTF-8 is replaced rather than ending input.
fn forward_lines(mut reader: impl BufRead, tx: mpsc::UnboundedSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        if tx.send(line).is_err() {
            break;
        }
    }
}

/// Deadline `secs` from now.
pub fn deadline_in(secs: f64) -> Instant {
    Instant::now() + Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn times_out_without_input() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut reader = LineReader::from_channel(rx);
        assert_eq!(reader.read_until(deadline_in(15.0)).await, Reply::TimedOut);
        assert!(!reader.is_closed());
    }

    #[tokio::test]
    async fn returns_buffered_line_then_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut reader = LineReader::from_channel(rx);
        tx.send("Brazil".to_string()).unwrap();
        drop(tx);

        assert_eq!(
            reader.read_until(deadline_in(15.0)).await,
            Reply::Line("Brazil".into())
        );
        assert_eq!(reader.read_until(deadline_in(15.0)).await, Reply::Closed);
        assert!(reader.is_closed());
        assert_eq!(reader.read_line().await, None);
    }

    #[tokio::test]
    async fn invalid_utf8_line_keeps_reading() {
        let (tx, rx) = mpsc::unbounded_channel();
        forward_lines(std::io::Cursor::new(b"\xffbad\nbrazil\r\nlast".to_vec()), tx);
        let mut reader = LineReader::from_channel(rx);

        assert_eq!(reader.read_line().await, Some("\u{FFFD}bad".into()));
        assert_eq!(reader.read_line().await, Some("brazil".into()));
        assert_eq!(reader.read_line().await, Some("last".into()));
        assert_eq!(reader.read_line().await, None);
    }
}
