//! Non-blocking log queue.
//!
//! Producers enqueue timestamped lines into an unbounded channel and never
//! wait on the output device; one background thread drains the channel and
//! prints lines in enqueue order. The queue is scoped to a single run:
//! created at run start, flushed and joined at run end.

use std::thread::{self, JoinHandle};

use chrono::Utc;
use crossbeam_channel::{unbounded, Sender};

pub struct LogQueue {
    tx: Option<Sender<String>>,
    drain: Option<JoinHandle<()>>,
}

impl LogQueue {
    /// Spawn the background drain thread and return the queue handle.
    pub fn start() -> Self {
        let (tx, rx) = unbounded::<String>();
        let drain = thread::spawn(move || {
            // Ends when every sender is gone and the channel is empty.
            for line in rx {
                println!("{line}");
            }
        });
        LogQueue {
            tx: Some(tx),
            drain: Some(drain),
        }
    }

    /// Enqueue one message, prefixed with a UTC timestamp. Never blocks and
    /// never fails; a message sent after shutdown began is dropped.
    pub fn enqueue(&self, msg: impl AsRef<str>) {
        if let Some(tx) = &self.tx {
            let line = format!(
                "{} - [DEBUG] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                msg.as_ref()
            );
            let _ = tx.send(line);
        }
    }

    /// Instantaneous emptiness of the mailbox. Not a durable "all printed"
    /// guarantee; use [`LogQueue::shutdown`] for that.
    pub fn is_drained(&self) -> bool {
        self.tx.as_ref().map(|tx| tx.is_empty()).unwrap_or(true)
    }

    /// Close the channel and wait for the drain thread to print every
    /// remaining message.
    pub fn shutdown(mut self) {
        self.flush_and_join();
    }

    fn flush_and_join(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.drain.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LogQueue {
    fn drop(&mut self) {
        self.flush_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn drains_enqueued_messages() {
        let log = LogQueue::start();
        for i in 0..100 {
            log.enqueue(format!("message {i}"));
        }
        let deadline = Instant::now() + Duration::from_secs(5);
        while !log.is_drained() {
            assert!(Instant::now() < deadline, "drain thread never caught up");
            thread::yield_now();
        }
        log.shutdown();
    }

    #[test]
    fn shutdown_with_pending_messages_does_not_hang() {
        let log = LogQueue::start();
        log.enqueue("last words");
        log.shutdown();
    }

    #[test]
    fn fresh_queue_is_drained() {
        let log = LogQueue::start();
        assert!(log.is_drained());
    }
}
