//! Per-file SHA-256 hashing and combination into a pool's aggregate digest
use crate::errors::PoolError;
use log::debug;
use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

pub(crate) fn sha256_string(s: &str) -> String {
    hex::encode_upper(Sha256::digest(s))
}

pub(crate) fn sha256_file<P: AsRef<Path>>(path: P) -> Result<String, PoolError> {
    let mut file = fs_err::File::open(path.as_ref())
        .map_err(|e| PoolError::digest_file_error(&path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| PoolError::digest_file_error(&path, e))?;
    Ok(hex::encode_upper(hasher.finalize()))
}

/// A SHA-256 checksum computed for a single pool file
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FileChecksum {
    pub(crate) name: String,
    pub(crate) checksum: String,
}

impl FileChecksum {
    pub(crate) fn new(name: String, checksum: String) -> Self {
        FileChecksum { name, checksum }
    }

    /// Return the filename the checksum was computed for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the checksum as uppercase hexadecimal
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}

/// Struct for computing the aggregate digest of a pool directory.  After
/// creation, [`push()`][PoolSummer::push] the checksum for each pool file and
/// then call [`digest()`][PoolSummer::digest] to fetch the combined value.
///
/// It is the caller's responsibility to push the checksums in ascending
/// filename order; the combined digest depends on the order of insertion.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PoolSummer {
    combined: String,
    file_count: u64,
}

impl PoolSummer {
    pub fn new() -> PoolSummer {
        PoolSummer {
            combined: String::new(),
            file_count: 0,
        }
    }

    /// Add the checksum for one pool file
    pub fn push(&mut self, chksum: &FileChecksum) {
        self.combined.push_str(chksum.checksum());
        self.file_count += 1;
    }

    /// Compute the aggregate digest from the checksums added so far: the
    /// SHA-256 hash of the concatenated per-file hex strings, as uppercase
    /// hexadecimal
    pub fn digest(&self) -> String {
        let digest = sha256_string(&self.combined);
        debug!(
            "Combined {} file checksum(s) into digest {digest}",
            self.file_count
        );
        digest
    }
}

/// Compute the aggregate digest for a pool whose files have the checksums
/// supplied in `iter`, in ascending filename order.
pub fn aggregate_digest<I>(iter: I) -> String
where
    I: IntoIterator<Item = FileChecksum>,
{
    let mut summer = PoolSummer::new();
    for chksum in iter {
        summer.push(&chksum);
    }
    summer.digest()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::iter::empty;

    // SHA256("x") and SHA256("y")
    const X_CHECKSUM: &str = "2D711642B726B04401627CA9FBAC32F5C8530FB1903CC4DB02258717921A4881";
    const Y_CHECKSUM: &str = "A1FCE4363854FF888CFF4B8E7875D600C2682390412A8CF79B37D0B11148B0FA";

    fn chksum(name: &str, checksum: &str) -> FileChecksum {
        FileChecksum::new(name.into(), checksum.into())
    }

    #[test]
    fn test_sha256_string() {
        assert_eq!(sha256_string("x"), X_CHECKSUM);
        assert_eq!(sha256_string("y"), Y_CHECKSUM);
    }

    #[test]
    fn test_sha256_string_empty() {
        assert_eq!(
            sha256_string(""),
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
    }

    #[test]
    fn test_aggregate_digest_nothing() {
        // Hash of the empty concatenation, i.e. SHA256("")
        assert_eq!(
            aggregate_digest(empty()),
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
    }

    #[test]
    fn test_aggregate_digest_one_file() {
        let digest = aggregate_digest(vec![chksum("a.pol", X_CHECKSUM)]);
        assert_eq!(
            digest,
            "2AB2C643BC267BE6A2D634096CD63AFDA015F9229E19180AACA03B88AB6A8D86"
        );
    }

    #[test]
    fn test_aggregate_digest_two_files() {
        let digest = aggregate_digest(vec![
            chksum("a.pol", X_CHECKSUM),
            chksum("b.pol", Y_CHECKSUM),
        ]);
        assert_eq!(
            digest,
            "C6EF9B8EFEE8D6EDADAB43076BE388DE08F81FCC4FA3B00343A90A3F3778FFB6"
        );
    }

    #[test]
    fn test_aggregate_digest_order_sensitive() {
        let digest = aggregate_digest(vec![
            chksum("a.pol", Y_CHECKSUM),
            chksum("b.pol", X_CHECKSUM),
        ]);
        assert_eq!(
            digest,
            "31575947747B56C950A3F3C123D8F930F1BC994300D8D2B6DD7EF6C2BDE6E3BC"
        );
    }

    #[test]
    fn test_aggregate_digest_repeatable() {
        let files = vec![
            chksum("a.pol", X_CHECKSUM),
            chksum("b.pol", Y_CHECKSUM),
        ];
        assert_eq!(aggregate_digest(files.clone()), aggregate_digest(files));
    }

    #[test]
    fn test_summer_matches_free_function() {
        let mut summer = PoolSummer::new();
        summer.push(&chksum("a.pol", X_CHECKSUM));
        summer.push(&chksum("b.pol", Y_CHECKSUM));
        assert_eq!(
            summer.digest(),
            aggregate_digest(vec![
                chksum("a.pol", X_CHECKSUM),
                chksum("b.pol", Y_CHECKSUM),
            ])
        );
    }
}
