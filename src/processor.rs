//! Create and validate operations over a single pool directory
use crate::digest::PoolSummer;
use crate::errors::PoolError;
use crate::pool::{Pool, PoolFile};
use std::path::{Path, PathBuf};

/// Outcome of a create operation
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CreateOutcome {
    /// The aggregate digest was written to the pool's sidecar record
    Written { sidecar: PathBuf, digest: String },
    /// The pool holds no qualifying files; nothing was written
    NoFiles,
}

/// Outcome of a validate operation.  All four are normal results, not
/// errors; none of them aborts a batch.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ValidateOutcome {
    /// The freshly computed digest matches the stored one
    Valid,
    /// The digests differ: some qualifying file was changed, added, or
    /// removed since the sidecar record was created
    Tampered { stored: String, computed: String },
    /// No sidecar record exists for the pool
    NoSidecar { sidecar: PathBuf },
    /// The pool holds no qualifying files; no verdict
    NoFiles,
}

/// Checksum the pool at `dirpath` and store the result in its sidecar record
pub fn create_checksum<P: AsRef<Path>>(dirpath: P) -> Result<CreateOutcome, PoolError> {
    create_pool_checksum(&Pool::new(dirpath)?)
}

/// Check the pool at `dirpath` against its stored sidecar record
pub fn validate_checksum<P: AsRef<Path>>(dirpath: P) -> Result<ValidateOutcome, PoolError> {
    validate_pool_checksum(&Pool::new(dirpath)?)
}

pub fn create_pool_checksum(pool: &Pool) -> Result<CreateOutcome, PoolError> {
    let files = pool.pool_files()?;
    if files.is_empty() {
        return Ok(CreateOutcome::NoFiles);
    }
    let digest = digest_files(files)?;
    let sidecar = pool.write_sidecar(&digest)?;
    Ok(CreateOutcome::Written { sidecar, digest })
}

pub fn validate_pool_checksum(pool: &Pool) -> Result<ValidateOutcome, PoolError> {
    // Sidecar existence is checked before discovery, so a pool with neither
    // sidecar nor qualifying files reports NoSidecar.
    let stored = match pool.read_sidecar()? {
        Some(digest) => digest,
        None => {
            return Ok(ValidateOutcome::NoSidecar {
                sidecar: pool.sidecar_path()?,
            })
        }
    };
    let files = pool.pool_files()?;
    if files.is_empty() {
        return Ok(ValidateOutcome::NoFiles);
    }
    let computed = digest_files(files)?;
    if stored == computed {
        Ok(ValidateOutcome::Valid)
    } else {
        Ok(ValidateOutcome::Tampered { stored, computed })
    }
}

fn digest_files(files: Vec<PoolFile>) -> Result<String, PoolError> {
    let mut summer = PoolSummer::new();
    for f in files {
        summer.push(&f.into_checksum()?);
    }
    Ok(summer.digest())
}
