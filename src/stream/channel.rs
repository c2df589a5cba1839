use std::io::{self, BufRead, Read, Write};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

/// Default channel capacity in bytes.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

const CHUNK_BYTES: usize = 512;

/// Create a bounded, blocking byte channel holding roughly `capacity` bytes in flight.
///
/// Bytes travel in chunks of up to 512 bytes over a `sync_channel`. The writer blocks while the
/// channel is full and the reader blocks while it is empty. Dropping the reader makes further
/// writes fail with [`io::ErrorKind::BrokenPipe`]; dropping the writer (after its pending bytes are
/// flushed) is end of input for the reader.
pub fn byte_channel(capacity: usize) -> (ChannelWriter, ChannelReader) {
    let chunk = CHUNK_BYTES.min(capacity.max(1));
    let slots = (capacity / chunk).max(1);
    let (tx, rx) = sync_channel(slots);
    (
        ChannelWriter {
            tx,
            pending: Vec::with_capacity(chunk),
            chunk,
        },
        ChannelReader {
            rx,
            buf: Vec::new(),
            pos: 0,
        },
    )
}

/// Producer half of [`byte_channel`].
#[derive(Debug)]
pub struct ChannelWriter {
    tx: SyncSender<Vec<u8>>,
    pending: Vec<u8>,
    chunk: usize,
}

impl ChannelWriter {
    fn send_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::replace(&mut self.pending, Vec::with_capacity(self.chunk));
        self.tx
            .send(chunk)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "byte channel reader closed"))
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let room = self.chunk - self.pending.len();
        let n = room.min(buf.len());
        self.pending.extend_from_slice(&buf[..n]);
        if self.pending.len() == self.chunk {
            self.send_pending()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_pending()
    }
}

impl Drop for ChannelWriter {
    fn drop(&mut self) {
        // The reader may already be gone; nothing left to report to.
        let _ = self.send_pending();
    }
}

/// Consumer half of [`byte_channel`].
#[derive(Debug)]
pub struct ChannelReader {
    rx: Receiver<Vec<u8>>,
    buf: Vec<u8>,
    pos: usize,
}

impl Read for ChannelReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let avail = self.fill_buf()?;
        let n = avail.len().min(out.len());
        out[..n].copy_from_slice(&avail[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ChannelReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.pos >= self.buf.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.buf = chunk;
                    self.pos = 0;
                }
                // Writer dropped: end of input.
                Err(_) => return Ok(&[]),
            }
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/channel.rs"]
mod tests;
