use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Error digesting file: {}: {source}", .path.display())]
    DigestFileError { path: PathBuf, source: io::Error },

    #[error("Error stat'ing path: {}: {source}", .path.display())]
    StatError { path: PathBuf, source: io::Error },

    #[error("Error reading directory: {}: {source}", .path.display())]
    ReaddirError { path: PathBuf, source: io::Error },

    #[error("Error resolving directory path: {}: {source}", .path.display())]
    ResolveError { path: PathBuf, source: io::Error },

    #[error("Error reading checksum file: {}: {source}", .path.display())]
    SidecarReadError { path: PathBuf, source: io::Error },

    #[error("Error writing checksum file: {}: {source}", .path.display())]
    SidecarWriteError { path: PathBuf, source: io::Error },

    #[error("Could not decode filename {:?}", .filename)]
    FilenameDecodeError { filename: OsString },

    #[error("Target path is not a directory: {}", .path.display())]
    NotDirError { path: PathBuf },
}

impl PoolError {
    pub fn digest_file_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::DigestFileError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn stat_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::StatError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn readdir_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::ReaddirError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn resolve_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::ResolveError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn sidecar_read_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::SidecarReadError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn sidecar_write_error<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        PoolError::SidecarWriteError {
            path: path.as_ref().into(),
            source,
        }
    }

    pub fn filename_decode_error(filename: OsString) -> Self {
        PoolError::FilenameDecodeError { filename }
    }

    pub fn not_dir_error<P: AsRef<Path>>(path: P) -> Self {
        PoolError::NotDirError {
            path: path.as_ref().into(),
        }
    }
}
