use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Byte counters for an in-flight upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProgress {
    pub loaded: u64,
    pub total: u64,
}

impl TransferProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        Self { loaded, total }
    }

    /// Whole percentage sent, or `None` when the total is unknown.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let ratio = self.loaded.min(self.total) as f64 / self.total as f64;
        Some((ratio * 100.0).round() as u8)
    }
}

/// Sending half of the progress channel. Reports are dropped once the receiver is gone.
#[derive(Clone, Debug, Default)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<TransferProgress>>,
}

impl ProgressSink {
    pub fn channel() -> (Self, UnboundedReceiver<TransferProgress>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn discard() -> Self {
        Self { tx: None }
    }

    pub fn report(&self, progress: TransferProgress) {
        if let Some(tx) = &self.tx {
            let _ = tx.unbounded_send(progress);
        }
    }
}

/// Running byte count across every part of one request.
#[derive(Clone, Debug)]
pub(crate) struct ByteCounter {
    loaded: Arc<AtomicU64>,
    total: u64,
    sink: ProgressSink,
}

impl ByteCounter {
    pub(crate) fn new(total: u64, sink: ProgressSink) -> Self {
        Self {
            loaded: Arc::new(AtomicU64::new(0)),
            total,
            sink,
        }
    }

    pub(crate) fn advance(&self, bytes: usize) {
        let bytes = bytes as u64;
        let loaded = self.loaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.sink.report(TransferProgress::new(loaded, self.total));
    }

    // fetch has no upload progress hook, so wasm reports a single event once the body is sent
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn complete(&self) {
        self.loaded.store(self.total, Ordering::Relaxed);
        self.sink.report(TransferProgress::new(self.total, self.total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(TransferProgress::new(50, 200).percent(), Some(25));
        assert_eq!(TransferProgress::new(1, 3).percent(), Some(33));
        assert_eq!(TransferProgress::new(2, 3).percent(), Some(67));
        assert_eq!(TransferProgress::new(200, 200).percent(), Some(100));
    }

    #[test]
    fn percent_needs_a_known_total() {
        assert_eq!(TransferProgress::new(10, 0).percent(), None);
    }

    #[test]
    fn percent_is_capped() {
        assert_eq!(TransferProgress::new(300, 200).percent(), Some(100));
    }

    #[test]
    fn counter_accumulates_across_parts() {
        let (sink, mut rx) = ProgressSink::channel();
        let counter = ByteCounter::new(10, sink);
        counter.advance(4);
        counter.clone().advance(6);

        assert_eq!(rx.try_next().unwrap(), Some(TransferProgress::new(4, 10)));
        assert_eq!(rx.try_next().unwrap(), Some(TransferProgress::new(10, 10)));
    }

    #[test]
    fn discarded_sink_ignores_reports() {
        let sink = ProgressSink::discard();
        sink.report(TransferProgress::new(1, 1));
    }
}
