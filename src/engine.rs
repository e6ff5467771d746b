//! Concurrent multi-digest engine: one read pass over the file, every chunk
//! fanned out to four hash workers, joined into a single atomic outcome.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::{mpsc, Arc};
use std::thread;

use tokio::task;
use tracing::{debug, info, warn};

use crate::file_ops::ChunkReader;
use crate::hashers::DigestAccumulator;
use crate::models::{Algorithm, ChecksumError, ChecksumSet};

/// Chunks buffered per worker channel before the reader blocks. Bounds memory
/// while letting slow algorithms lag the reader a little.
const CHUNK_QUEUE_DEPTH: usize = 8;

/// Shared cancellation flag for one checksum run. Cloning hands out another
/// handle to the same flag; cancelling is sticky.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

enum ChunkMsg {
    Chunk(Arc<[u8]>),
    /// Sent only on clean end-of-file; a worker that never sees it must not
    /// finalize.
    Finish,
}

/// Compute all four checksums of `path`. Non-blocking for the caller; the file
/// is read exactly once on a blocking worker thread.
pub async fn compute_checksums(path: PathBuf) -> Result<ChecksumSet, ChecksumError> {
    compute_checksums_with_cancel(path, CancelToken::new()).await
}

/// As [`compute_checksums`], but abortable through `cancel`. Cancellation
/// abandons the read, drops all accumulator state unfinalized and closes the
/// file handle; the run reports [`ChecksumError::Cancelled`].
pub async fn compute_checksums_with_cancel(
    path: PathBuf,
    cancel: CancelToken,
) -> Result<ChecksumSet, ChecksumError> {
    match task::spawn_blocking(move || compute_checksums_blocking(&path, &cancel)).await {
        Ok(result) => result,
        // Only reachable if the blocking task panicked.
        Err(join_err) => Err(ChecksumError::Read(std::io::Error::other(join_err))),
    }
}

fn compute_checksums_blocking(
    path: &Path,
    cancel: &CancelToken,
) -> Result<ChecksumSet, ChecksumError> {
    debug!(path = %path.display(), "opening file for checksumming");
    let source = ChunkReader::open(path)?;
    let result = fan_out(source, cancel);
    match &result {
        Ok(_) => info!(path = %path.display(), "checksums computed"),
        Err(ChecksumError::Cancelled) => info!(path = %path.display(), "checksum run cancelled"),
        Err(err) => warn!(path = %path.display(), error = %err, "checksum run failed"),
    }
    result
}

/// Drive one chunk source to completion against all four accumulators.
///
/// Each worker owns its accumulator and the receiving end of a bounded
/// single-producer channel, so per-accumulator chunk order is the channel's
/// FIFO order while the four algorithms run concurrently. On a read failure or
/// cancellation the senders are dropped without `Finish`, the workers exit
/// without finalizing, and only the failure is returned.
fn fan_out<R: Read>(
    mut source: ChunkReader<R>,
    cancel: &CancelToken,
) -> Result<ChecksumSet, ChecksumError> {
    let mut senders: Vec<SyncSender<ChunkMsg>> = Vec::with_capacity(4);
    let mut workers = Vec::with_capacity(4);
    for algorithm in Algorithm::all() {
        let (tx, rx) = mpsc::sync_channel(CHUNK_QUEUE_DEPTH);
        let accumulator = DigestAccumulator::new(algorithm);
        senders.push(tx);
        workers.push(thread::spawn(move || hash_worker(rx, accumulator)));
    }

    let read_result = broadcast_chunks(&mut source, &senders, cancel);
    // Dropping the senders unblocks any worker still waiting on its channel.
    drop(senders);

    let mut digests: Vec<Option<String>> = Vec::with_capacity(4);
    for worker in workers {
        digests.push(worker.join().unwrap_or(None));
    }

    read_result?;

    let mut digests = digests.into_iter();
    let mut next_digest = || digests.next().flatten().ok_or_else(worker_lost);
    Ok(ChecksumSet {
        md5: next_digest()?,
        sha1: next_digest()?,
        sha256: next_digest()?,
        sha512: next_digest()?,
    })
}

fn broadcast_chunks<R: Read>(
    source: &mut ChunkReader<R>,
    senders: &[SyncSender<ChunkMsg>],
    cancel: &CancelToken,
) -> Result<(), ChecksumError> {
    let mut total_bytes: u64 = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(ChecksumError::Cancelled);
        }
        match source.next_chunk()? {
            Some(chunk) => {
                total_bytes += chunk.len() as u64;
                let shared: Arc<[u8]> = Arc::from(chunk);
                for tx in senders {
                    if tx.send(ChunkMsg::Chunk(Arc::clone(&shared))).is_err() {
                        return Err(worker_lost());
                    }
                }
            }
            None => {
                for tx in senders {
                    let _ = tx.send(ChunkMsg::Finish);
                }
                debug!(total_bytes, "reached end of file");
                return Ok(());
            }
        }
    }
}

/// Consume chunks in arrival order; finalize only on the explicit end-of-file
/// marker. Returns `None` when the producer went away without one.
fn hash_worker(rx: Receiver<ChunkMsg>, mut accumulator: DigestAccumulator) -> Option<String> {
    while let Ok(msg) = rx.recv() {
        match msg {
            ChunkMsg::Chunk(bytes) => accumulator.update(&bytes),
            ChunkMsg::Finish => {
                let algorithm = accumulator.algorithm();
                let hex = accumulator.finalize_hex();
                debug!(%algorithm, "digest finalized");
                return Some(hex);
            }
        }
    }
    None
}

fn worker_lost() -> ChecksumError {
    ChecksumError::Read(std::io::Error::other("hash worker exited before finalizing"))
}
