//! Hash primitives shared by both engines.
//!
//! Two very different digests live here:
//!
//! - `generate_hash`: a 32-bit base-31 rolling checksum over UTF-16 code
//!   units.  It is **not** cryptographic: collisions are trivial to
//!   construct.  It is kept bit-for-bit compatible so existing event chains
//!   still verify.  Deployments that need real tamper-evidence should chain
//!   with `Sha256Hasher` instead.
//! - `sha256_hex`: a genuine SHA-256 digest used for claim audit hashes.

use sha2::{Digest, Sha256};

use crate::traits::ChainHasher;

/// Run the base-31 polynomial over the UTF-16 code units of `data`, with
/// explicit 32-bit wraparound (`h = h * 31 + c`).
pub fn rolling_checksum(data: &str) -> i32 {
    data.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// The chain checksum rendered as lowercase hex, left-padded to 8 digits.
///
/// `abs` is taken in 64 bits, so `i32::MIN` renders as `80000000`.
pub fn generate_hash(data: &str) -> String {
    generate_hash_padded(data, 8)
}

/// Same checksum as `generate_hash`, padded to `width` hex digits.
pub fn generate_hash_padded(data: &str, width: usize) -> String {
    let magnitude = i64::from(rolling_checksum(data)).abs();
    format!("{magnitude:0width$x}")
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `data`.
pub fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// The default chain hasher: the compatible 8-digit rolling checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingChecksum;

impl ChainHasher for RollingChecksum {
    fn digest(&self, data: &str) -> String {
        generate_hash(data)
    }

    fn name(&self) -> &'static str {
        "rolling-checksum"
    }
}

/// A cryptographic drop-in for `RollingChecksum`.
///
/// Chains built with this hasher only verify with this hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ChainHasher for Sha256Hasher {
    fn digest(&self, data: &str) -> String {
        sha256_hex(data)
    }

    fn name(&self) -> &'static str {
        "sha256"
    }
}
