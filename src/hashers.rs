use std::io::Read;

use md5::Context;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::file_ops::ChunkReader;
use crate::models::{Algorithm, ChecksumError};

/// Incremental state of one hash computation. `update` must receive bytes in
/// file order; finalization consumes the accumulator, so updating after
/// finalize cannot be expressed.
pub enum DigestAccumulator {
    Md5(Context),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl DigestAccumulator {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => DigestAccumulator::Md5(Context::new()),
            Algorithm::Sha1 => DigestAccumulator::Sha1(Sha1::new()),
            Algorithm::Sha256 => DigestAccumulator::Sha256(Sha256::new()),
            Algorithm::Sha512 => DigestAccumulator::Sha512(Sha512::new()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            DigestAccumulator::Md5(_) => Algorithm::Md5,
            DigestAccumulator::Sha1(_) => Algorithm::Sha1,
            DigestAccumulator::Sha256(_) => Algorithm::Sha256,
            DigestAccumulator::Sha512(_) => Algorithm::Sha512,
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        match self {
            DigestAccumulator::Md5(ctx) => ctx.consume(bytes),
            DigestAccumulator::Sha1(hasher) => hasher.update(bytes),
            DigestAccumulator::Sha256(hasher) => hasher.update(bytes),
            DigestAccumulator::Sha512(hasher) => hasher.update(bytes),
        }
    }

    /// Apply the algorithm's padding rule and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        match self {
            DigestAccumulator::Md5(ctx) => format!("{:x}", ctx.finalize()),
            DigestAccumulator::Sha1(hasher) => hex::encode(hasher.finalize()),
            DigestAccumulator::Sha256(hasher) => hex::encode(hasher.finalize()),
            DigestAccumulator::Sha512(hasher) => hex::encode(hasher.finalize()),
        }
    }
}

/// Sequential single-algorithm pass over a reader. The concurrent engine is
/// the production path; this is the reference the fan-out is checked against.
pub fn digest_reader<R: Read>(reader: R, algorithm: Algorithm) -> Result<String, ChecksumError> {
    let mut chunks = ChunkReader::new(reader);
    let mut accumulator = DigestAccumulator::new(algorithm);
    while let Some(chunk) = chunks.next_chunk()? {
        accumulator.update(&chunk);
    }
    Ok(accumulator.finalize_hex())
}
