use crate::error::Result;

/// Inbound half of a byte consumer registration.
///
/// Every byte the [`ByteSource`](crate::ByteSource) receives is offered to
/// each registered sink with a bounded wait.
pub type ByteSink = crossbeam_channel::Sender<u8>;

/// Outbound byte-sequence transmitter.
///
/// Implemented for plain closures so tests and embedders can capture or
/// loop back traffic without a real port.
pub trait Transmit: Send + Sync {
    /// Push one complete byte sequence onto the wire.
    fn transmit(&self, bytes: &[u8]) -> Result<()>;
}

impl<F> Transmit for F
where
    F: Fn(&[u8]) -> Result<()> + Send + Sync,
{
    fn transmit(&self, bytes: &[u8]) -> Result<()> {
        self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn closure_transmitter_sees_bytes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let tx = move |bytes: &[u8]| -> Result<()> {
            sink.lock().extend_from_slice(bytes);
            Ok(())
        };

        tx.transmit(&[0xF0, 0xF7]).unwrap();
        assert_eq!(seen.lock().as_slice(), &[0xF0, 0xF7]);
    }

    #[test]
    fn arc_dyn_transmitter_forwards() {
        let seen = Arc::new(Mutex::new(0usize));
        let count = Arc::clone(&seen);
        let tx: Arc<dyn Transmit> = Arc::new(move |bytes: &[u8]| -> Result<()> {
            *count.lock() += bytes.len();
            Ok(())
        });

        tx.transmit(&[1, 2, 3]).unwrap();
        let shared = Arc::clone(&tx);
        shared.transmit(&[4]).unwrap();
        assert_eq!(*seen.lock(), 4);
    }
}
