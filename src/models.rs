use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The fixed set of digests computed for every file. Not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// All algorithms in display order (also the order digests are assembled in).
    pub fn all() -> [Algorithm; 4] {
        [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha512 => "SHA-512",
        }
    }

    /// Length of the hex-encoded digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha256 => 64,
            Algorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All four hex digests of one file. Only produced when every accumulator
/// finalized; a failed run yields a `ChecksumError` instead, never a partially
/// filled set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumSet {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
    pub sha512: String,
}

impl ChecksumSet {
    pub fn digest(&self, algorithm: Algorithm) -> &str {
        match algorithm {
            Algorithm::Md5 => &self.md5,
            Algorithm::Sha1 => &self.sha1,
            Algorithm::Sha256 => &self.sha256,
            Algorithm::Sha512 => &self.sha512,
        }
    }
}

/// Terminal failure of one checksum run. The UI collapses everything except
/// `Cancelled` into one generic message; the variant is kept for logging.
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("checksum calculation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        let names: Vec<&str> = Algorithm::all().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["MD5", "SHA-1", "SHA-256", "SHA-512"]);
    }

    #[test]
    fn digest_accessor_matches_fields() {
        let set = ChecksumSet {
            md5: "a".into(),
            sha1: "b".into(),
            sha256: "c".into(),
            sha512: "d".into(),
        };
        assert_eq!(set.digest(Algorithm::Md5), "a");
        assert_eq!(set.digest(Algorithm::Sha1), "b");
        assert_eq!(set.digest(Algorithm::Sha256), "c");
        assert_eq!(set.digest(Algorithm::Sha512), "d");
    }
}
