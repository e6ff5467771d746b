//! End-to-end tests for the checksum engine through its public API: real
//! files on disk, published test vectors and independently computed digests
//! as the oracle.

use std::fs;
use std::path::PathBuf;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use quadsum::engine::{compute_checksums, compute_checksums_with_cancel, CancelToken};
use quadsum::models::{Algorithm, ChecksumError};

fn write_temp_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn empty_file_produces_published_empty_digests() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_file(&dir, "empty.bin", b"");

    let set = compute_checksums(path).await.unwrap();
    assert_eq!(set.md5, "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(set.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert_eq!(
        set.sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        set.sha512,
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    );
}

#[tokio::test]
async fn abc_file_produces_published_digests() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_file(&dir, "abc.txt", b"abc");

    let set = compute_checksums(path).await.unwrap();
    assert_eq!(set.md5, "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(set.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
    assert_eq!(
        set.sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        set.sha512,
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[tokio::test]
async fn ten_mebibyte_zero_file_is_reproducible_and_matches_oneshot_digests() {
    let dir = tempfile::tempdir().unwrap();
    let data = vec![0u8; 10 * 1024 * 1024];
    let path = write_temp_file(&dir, "zeros.bin", &data);

    let first = compute_checksums(path.clone()).await.unwrap();
    let second = compute_checksums(path).await.unwrap();
    assert_eq!(first, second, "repeated runs must agree");

    assert_eq!(first.md5, format!("{:x}", md5::compute(&data)));
    assert_eq!(first.sha1, hex::encode(Sha1::digest(&data)));
    assert_eq!(first.sha256, hex::encode(Sha256::digest(&data)));
    assert_eq!(first.sha512, hex::encode(Sha512::digest(&data)));
}

#[tokio::test]
async fn digest_lengths_match_the_algorithms() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_file(&dir, "some.bin", b"quadsum");

    let set = compute_checksums(path).await.unwrap();
    for algorithm in Algorithm::all() {
        let digest = set.digest(algorithm);
        assert_eq!(digest.len(), algorithm.hex_len(), "{algorithm}");
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[tokio::test]
async fn missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-created.bin");

    let result = compute_checksums(path.clone()).await;
    match result {
        Err(ChecksumError::NotFound(reported)) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_never_reaches_the_success_path() {
    let dir = tempfile::tempdir().unwrap();
    let data = vec![0xabu8; 4 * 1024 * 1024];
    let path = write_temp_file(&dir, "cancelme.bin", &data);

    let token = CancelToken::new();
    token.cancel();
    let result = compute_checksums_with_cancel(path.clone(), token).await;
    assert!(matches!(result, Err(ChecksumError::Cancelled)));

    // The file handle was released: a fresh run over the same file succeeds
    // and the temp dir can be torn down cleanly afterwards.
    let set = compute_checksums(path).await.unwrap();
    assert_eq!(set.md5, format!("{:x}", md5::compute(&data)));
}

#[tokio::test]
async fn concurrent_invocations_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_temp_file(&dir, "a.bin", &vec![0x11u8; 512 * 1024]);
    let b = write_temp_file(&dir, "b.bin", &vec![0x22u8; 512 * 1024]);

    let (res_a, res_b) = tokio::join!(compute_checksums(a), compute_checksums(b));
    let (set_a, set_b) = (res_a.unwrap(), res_b.unwrap());
    assert_ne!(set_a, set_b);
    assert_eq!(set_a.sha256, hex::encode(Sha256::digest(&vec![0x11u8; 512 * 1024])));
    assert_eq!(set_b.sha256, hex::encode(Sha256::digest(&vec![0x22u8; 512 * 1024])));
}
