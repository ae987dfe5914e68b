//! Event adapters: the two front-ends that sit between an upstream
//! reader/writer and a [`HashDriver`], translating its event stream into
//! driver calls while passing events through unchanged.
//!
//! Grounded on `hash_reader`/`hash_writer`/`_hasher` in
//! `ionhash/hasher.py` for the basic forwarding shape, and on
//! `amazon/ionhash/hash_reader.py`'s newer `HashEvent` enum for the
//! `DISABLE_HASHING`/`ENABLE_HASHING` gating commands that file adds.

use crate::driver::HashDriver;
use crate::error::IonHashResult;
use crate::model::{Event, EventKind};
use crate::provider::HashFunctionProvider;

/// Feeds one event to the driver according to spec §4.6: container-start
/// maps to `step_in`, container-end to `step_out`, anything else other
/// than stream-end is a `scalar`.
fn hash_event<P: HashFunctionProvider>(
    driver: &mut HashDriver<P>,
    event: &Event,
) -> IonHashResult<()> {
    match event.kind {
        EventKind::ContainerStart => driver.step_in(event),
        EventKind::ContainerEnd => driver.step_out(),
        EventKind::StreamEnd => Ok(()),
        EventKind::Scalar => driver.scalar(event),
    }
}

/// Wraps an upstream event source, feeding every event it produces to a
/// [`HashDriver`] while returning the same events to the caller unchanged.
///
/// The read side additionally must translate a caller's decision to "skip"
/// a value or subtree into however many forward events are needed to keep
/// the hash correct -- see [`HashReaderAdapter::skip_container`] and
/// [`HashReaderAdapter::skip_sibling`].
pub struct HashReaderAdapter<P: HashFunctionProvider> {
    driver: HashDriver<P>,
    hashing_enabled: bool,
    digest_taken: bool,
}

impl<P: HashFunctionProvider> HashReaderAdapter<P> {
    pub fn new(provider: P) -> Self {
        HashReaderAdapter {
            driver: HashDriver::new(provider),
            hashing_enabled: true,
            digest_taken: false,
        }
    }

    /// Equivalent to `amazon/ionhash/hash_reader.py`'s `HashEvent.DISABLE_HASHING`:
    /// subsequent events are forwarded to the caller but not fed to the
    /// driver, until [`Self::enable_hashing`] is called.
    pub fn disable_hashing(&mut self) {
        self.hashing_enabled = false;
    }

    pub fn enable_hashing(&mut self) {
        self.hashing_enabled = true;
    }

    /// Observes one upstream event. Returns it unchanged, after (if
    /// hashing is enabled) feeding it to the driver.
    pub fn observe(&mut self, event: Event) -> IonHashResult<Event> {
        if self.hashing_enabled {
            hash_event(&mut self.driver, &event)?;
        }
        Ok(event)
    }

    /// Translates a skip of an entire container (the upstream declined to
    /// descend into a just-opened container) into the forward events
    /// needed to keep the hash correct: every event inside the container,
    /// down to (but not including) its matching container-end, must still
    /// be hashed.
    ///
    /// `remaining_events` yields the events the upstream reader would have
    /// produced had the caller not skipped; the adapter consumes from it
    /// until depth returns to `opening_depth` (the container-start's own
    /// depth).
    pub fn skip_container<I>(&mut self, opening_depth: usize, remaining_events: I) -> IonHashResult<()>
    where
        I: IntoIterator<Item = Event>,
    {
        if !self.hashing_enabled {
            return Ok(());
        }
        for event in remaining_events {
            if event.kind == EventKind::StreamEnd || event.depth <= opening_depth {
                break;
            }
            hash_event(&mut self.driver, &event)?;
        }
        Ok(())
    }

    /// Translates a skip of a sibling value (the upstream declined to read
    /// the value it's currently parked on) into the forward events needed
    /// to keep the hash correct: every event until depth decreases by one
    /// below `current_depth` must still be hashed.
    pub fn skip_sibling<I>(&mut self, current_depth: usize, remaining_events: I) -> IonHashResult<()>
    where
        I: IntoIterator<Item = Event>,
    {
        if !self.hashing_enabled {
            return Ok(());
        }
        let target_depth = current_depth.saturating_sub(1);
        for event in remaining_events {
            if event.kind == EventKind::StreamEnd || event.depth <= target_depth {
                break;
            }
            hash_event(&mut self.driver, &event)?;
        }
        Ok(())
    }

    /// Returns the driver's current digest. Legal only at depth 0 (spec
    /// §4.5); resets the underlying accumulator as a side effect.
    ///
    /// Per `IonHasher.digest()` in `ionhash/hasher.py`, calling this a
    /// second time without intervening events is not an error -- it just
    /// returns whatever the (now-reset) accumulator produces for an empty
    /// input. [`Self::digest_already_taken`] lets a caller that wants to
    /// enforce single-use digest semantics check for that case itself.
    pub fn digest(&mut self) -> IonHashResult<Vec<u8>> {
        let digest = self.driver.digest()?;
        self.digest_taken = true;
        Ok(digest)
    }

    /// `true` once [`Self::digest`] has been called at least once.
    pub fn digest_already_taken(&self) -> bool {
        self.digest_taken
    }
}

/// Wraps a downstream writer, feeding every event passed to it to a
/// [`HashDriver`] in addition to forwarding it to the writer.
pub struct HashWriterAdapter<P: HashFunctionProvider> {
    driver: HashDriver<P>,
    hashing_enabled: bool,
    digest_taken: bool,
}

impl<P: HashFunctionProvider> HashWriterAdapter<P> {
    pub fn new(provider: P) -> Self {
        HashWriterAdapter {
            driver: HashDriver::new(provider),
            hashing_enabled: true,
            digest_taken: false,
        }
    }

    pub fn disable_hashing(&mut self) {
        self.hashing_enabled = false;
    }

    pub fn enable_hashing(&mut self) {
        self.hashing_enabled = true;
    }

    /// Called with each event en route to the writer. The caller is
    /// responsible for actually forwarding `event` to the writer; this
    /// method only updates the hash.
    pub fn observe(&mut self, event: &Event) -> IonHashResult<()> {
        if self.hashing_enabled {
            hash_event(&mut self.driver, event)?;
        }
        Ok(())
    }

    /// Returns the driver's current digest; see
    /// [`HashReaderAdapter::digest`] for the repeated-call contract.
    pub fn digest(&mut self) -> IonHashResult<Vec<u8>> {
        let digest = self.driver.digest()?;
        self.digest_taken = true;
        Ok(digest)
    }

    /// `true` once [`Self::digest`] has been called at least once.
    pub fn digest_already_taken(&self) -> bool {
        self.digest_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IonType;
    use crate::provider::DigestHashFunctionProvider;
    use sha2::Sha256;

    #[test]
    fn reader_adapter_forwards_events_unchanged() {
        let mut adapter = HashReaderAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        let event = Event::scalar(IonType::Bool, Some(vec![0x11]), 0);
        let returned = adapter.observe(event.clone()).unwrap();
        assert_eq!(returned.kind, event.kind);
        assert_eq!(returned.ion_type, event.ion_type);
    }

    #[test]
    fn disabled_hashing_does_not_change_digest() {
        let mut a = HashReaderAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        let empty_digest = a.digest().unwrap();

        let mut b = HashReaderAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        b.disable_hashing();
        b.observe(Event::scalar(IonType::Bool, Some(vec![0x11]), 0))
            .unwrap();
        let digest_after_skip = b.digest().unwrap();

        assert_eq!(empty_digest, digest_after_skip);
    }

    #[test]
    fn skip_container_hashes_nested_events_up_to_matching_end() {
        let mut a = HashReaderAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        a.observe(Event::container_start(IonType::List, 0)).unwrap();

        let remaining = vec![
            Event::scalar(IonType::Int, Some(vec![0x21, 1]), 1),
            Event::container_end(0),
        ];
        a.skip_container(0, remaining).unwrap();
        a.observe(Event::container_end(0)).unwrap();
        assert!(a.digest().is_ok());
    }

    #[test]
    fn reader_adapter_tracks_whether_digest_was_taken() {
        let mut a = HashReaderAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        assert!(!a.digest_already_taken());
        a.digest().unwrap();
        assert!(a.digest_already_taken());
    }

    #[test]
    fn writer_adapter_tracks_whether_digest_was_taken() {
        let mut w = HashWriterAdapter::new(DigestHashFunctionProvider::<Sha256>::new());
        assert!(!w.digest_already_taken());
        w.observe(&Event::scalar(IonType::Bool, Some(vec![0x11]), 0))
            .unwrap();
        w.digest().unwrap();
        assert!(w.digest_already_taken());
    }
}
