//! Content hashing.
//!
//! - [`compute`]: fast FxHash used for change detection (config reload)
//! - [`fingerprint`]: short blake3 digest used in cache-busting filenames

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Short hex fingerprint (first 8 bytes of blake3) for asset filenames.
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let digest = blake3::hash(data.as_ref());
    hex::encode(&digest.as_bytes()[..8])
}
