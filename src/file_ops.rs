use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::models::ChecksumError;

/// Chunk size used for whole-file reads. Kept constant for the duration of a
/// read; digests do not depend on it (see the chunk-size invariance tests).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Sequential, bounded-memory access to a byte source. Yields owned chunks of
/// at most `chunk_size` bytes until end-of-file.
pub struct ChunkReader<R> {
    inner: R,
    chunk_size: usize,
}

impl ChunkReader<File> {
    /// Open `path` for reading, mapping open failures to the error taxonomy.
    pub fn open(path: &Path) -> Result<Self, ChecksumError> {
        match File::open(path) {
            Ok(file) => Ok(ChunkReader::new(file)),
            Err(err) => Err(open_error(path, err)),
        }
    }
}

impl<R: Read> ChunkReader<R> {
    pub fn new(inner: R) -> Self {
        ChunkReader::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Chunk size is injectable so tests can prove digests are independent of it.
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        ChunkReader { inner, chunk_size }
    }

    /// Read the next chunk, `None` at end-of-file. A failure here covers the
    /// file being deleted or truncated mid-read as well as plain I/O errors.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ChecksumError> {
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    buf.truncate(n);
                    return Ok(Some(buf));
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ChecksumError::Read(err)),
            }
        }
    }
}

fn open_error(path: &Path, err: std::io::Error) -> ChecksumError {
    match err.kind() {
        ErrorKind::NotFound => ChecksumError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => ChecksumError::PermissionDenied(path.to_path_buf()),
        _ => ChecksumError::Read(err),
    }
}
