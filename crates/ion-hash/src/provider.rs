//! The hash function provider contract: a factory for fresh, independent
//! accumulators. The core is agnostic to the underlying cryptographic
//! primitive (spec §1, §6) -- it only requires `update`/`digest`.
//!
//! Grounded on `IonHasher`/`_HashlibHash`/`hashlib_hash_function_provider`
//! in `ionhash/hasher.py`, generalized to the `digest` crate's `Digest`
//! trait the way the real `amazon-ion/ion-hash` crate does (see
//! `other_examples/02fdaed6_..._ion_hash_tests.rs.rs`, which drives an
//! `IonHasher` over an arbitrary `Digest` implementation).

use digest::Digest;
use std::marker::PhantomData;

/// A resettable hash accumulator. `digest()` must reset the accumulator to
/// its initial state so it can be reused (spec §6).
pub trait HashAccumulator {
    fn update(&mut self, bytes: &[u8]);
    fn digest(&mut self) -> Vec<u8>;
}

/// A factory producing fresh, independent [`HashAccumulator`]s. Must be
/// callable any number of times; accumulators it returns must not share
/// mutable state (spec §5, "Provider violation").
pub trait HashFunctionProvider {
    type Accumulator: HashAccumulator;

    fn new_accumulator(&self) -> Self::Accumulator;
}

/// A [`HashAccumulator`] backed by any `digest::Digest` implementation
/// (e.g. `sha2::Sha256`, `sha3::Sha3_256`, `md5::Md5`).
pub struct DigestHashAccumulator<D: Digest> {
    hasher: D,
}

impl<D: Digest> HashAccumulator for DigestHashAccumulator<D> {
    fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn digest(&mut self) -> Vec<u8> {
        // `Digest::finalize_reset` resets the accumulator to its initial
        // state and returns the output for the bytes seen so far, matching
        // `_HashlibHash.digest()`'s re-creation of its `hashlib` object.
        self.hasher.finalize_reset().to_vec()
    }
}

/// A [`HashFunctionProvider`] that hands out fresh [`DigestHashAccumulator`]s
/// for a given `digest::Digest` type `D`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DigestHashFunctionProvider<D> {
    _algorithm: PhantomData<D>,
}

impl<D> DigestHashFunctionProvider<D> {
    pub fn new() -> Self {
        DigestHashFunctionProvider {
            _algorithm: PhantomData,
        }
    }
}

impl<D: Digest> HashFunctionProvider for DigestHashFunctionProvider<D> {
    type Accumulator = DigestHashAccumulator<D>;

    fn new_accumulator(&self) -> Self::Accumulator {
        DigestHashAccumulator { hasher: D::new() }
    }
}

/// A [`HashFunctionProvider`] whose accumulators simply concatenate every
/// `update()` call and return the accumulated bytes verbatim from
/// `digest()`. Used by tests that assert on the exact byte sequence the
/// engine feeds to the hash function, rather than on a real digest of it.
///
/// Grounded on the real `ion-hash` crate's test suite, which defines an
/// analogous `TestDigest` (see
/// `other_examples/02fdaed6_..._ion_hash_tests.rs.rs`) for exactly this
/// purpose: the Ion Hash spec's "identity hash" test vectors describe the
/// literal concatenation of all `update` bytes, not a real digest of them.
#[derive(Debug, Default, Clone)]
pub struct IdentityAccumulator {
    buffer: Vec<u8>,
}

impl HashAccumulator for IdentityAccumulator {
    fn update(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn digest(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHashFunctionProvider;

impl HashFunctionProvider for IdentityHashFunctionProvider {
    type Accumulator = IdentityAccumulator;

    fn new_accumulator(&self) -> Self::Accumulator {
        IdentityAccumulator::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5::Md5;
    use sha2::Sha256;
    use sha3::Sha3_256;

    #[test]
    fn provider_is_generic_over_any_digest_implementation() {
        // The provider boundary is deliberately algorithm-agnostic (spec
        // §6); exercise it against a couple of algorithms besides SHA-256
        // to confirm nothing here secretly assumes a particular output
        // length or block size.
        for provider_digest in [
            DigestHashFunctionProvider::<Sha3_256>::new().new_accumulator().digest().len(),
            DigestHashFunctionProvider::<Md5>::new().new_accumulator().digest().len(),
        ] {
            assert!(provider_digest > 0);
        }
    }

    #[test]
    fn provider_returns_independent_accumulators() {
        let provider = DigestHashFunctionProvider::<Sha256>::new();
        let mut a = provider.new_accumulator();
        let mut b = provider.new_accumulator();
        a.update(b"hello");
        // b must be unaffected by a's updates.
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn digest_resets_accumulator() {
        let provider = DigestHashFunctionProvider::<Sha256>::new();
        let mut acc = provider.new_accumulator();
        acc.update(b"hello");
        let first = acc.digest();
        // After digest(), the accumulator should behave as freshly created.
        let second = acc.digest();
        let mut fresh = provider.new_accumulator();
        assert_eq!(second, fresh.digest());
        assert_ne!(first, second);
    }
}
