//! Pool directories, the qualifying files within, and their sidecar records
use crate::digest::{sha256_file, FileChecksum};
use crate::errors::PoolError;
use log::debug;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Extension (sans dot) that marks a file as belonging to a pool
pub const POOL_FILE_EXT: &str = "pol";

/// Leading component of every sidecar filename
pub const SIDECAR_PREFIX: &str = "Pool";

/// Extension (sans dot) of every sidecar filename.  Historical: the digest
/// stored inside is SHA-256, but downstream tooling matches on the literal
/// `.sha1` pattern, so it stays.
pub const SIDECAR_EXT: &str = "sha1";

/// Stand-in parent name for a pool directory at a filesystem root
pub const ROOT_PARENT_NAME: &str = "root";

/// A directory whose qualifying files are checksummed as one unit
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pool {
    path: PathBuf,
}

impl Pool {
    /// Construct a `Pool` from a directory path.  The path is resolved to
    /// canonical absolute form so that the basenames used for sidecar naming
    /// are well defined even for inputs like `.`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Pool, PoolError> {
        let path = path.as_ref();
        if !fs_err::metadata(path)
            .map_err(|e| PoolError::stat_error(path, e))?
            .is_dir()
        {
            return Err(PoolError::not_dir_error(path));
        }
        let path = fs_err::canonicalize(path).map_err(|e| PoolError::resolve_error(path, e))?;
        Ok(Pool { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filename of this pool's sidecar record, a pure function of the pool's
    /// own basename and its parent's basename
    pub fn sidecar_name(&self) -> Result<String, PoolError> {
        let own = dir_basename(&self.path)?;
        let parent = match self.path.parent() {
            Some(p) => dir_basename(p)?,
            None => String::from(ROOT_PARENT_NAME),
        };
        Ok(format!("{SIDECAR_PREFIX}_{parent}_{own}.{SIDECAR_EXT}"))
    }

    /// Full path of this pool's sidecar record, located inside the pool
    pub fn sidecar_path(&self) -> Result<PathBuf, PoolError> {
        Ok(self.path.join(self.sidecar_name()?))
    }

    /// List the qualifying files directly inside this pool, sorted ascending
    /// by filename.  Subdirectories are never qualifying files and are not
    /// descended into.
    pub fn pool_files(&self) -> Result<Vec<PoolFile>, PoolError> {
        let mut files = Vec::new();
        for p in fs_err::read_dir(&self.path).map_err(|e| PoolError::readdir_error(&self.path, e))?
        {
            let p = p.map_err(|e| PoolError::readdir_error(&self.path, e))?;
            let path = p.path();
            let ftype = p.file_type().map_err(|e| PoolError::stat_error(&path, e))?;
            let is_dir = ftype.is_dir()
                || (ftype.is_symlink()
                    && fs_err::metadata(&path)
                        .map_err(|e| PoolError::stat_error(&path, e))?
                        .is_dir());
            if is_dir || !has_pool_ext(&path) {
                continue;
            }
            let name = match p.file_name().to_str() {
                Some(s) => String::from(s),
                None => return Err(PoolError::filename_decode_error(p.file_name())),
            };
            files.push(PoolFile { path, name });
        }
        files.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Read the stored aggregate digest from this pool's sidecar record, if
    /// one exists, trimming surrounding whitespace
    pub fn read_sidecar(&self) -> Result<Option<String>, PoolError> {
        let path = self.sidecar_path()?;
        match fs_err::read_to_string(&path) {
            Ok(s) => Ok(Some(String::from(s.trim()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PoolError::sidecar_read_error(path, e)),
        }
    }

    /// Write the aggregate digest to this pool's sidecar record, overwriting
    /// any existing record unconditionally.  Returns the sidecar path.
    pub fn write_sidecar(&self, digest: &str) -> Result<PathBuf, PoolError> {
        let path = self.sidecar_path()?;
        fs_err::write(&path, digest).map_err(|e| PoolError::sidecar_write_error(&path, e))?;
        Ok(path)
    }
}

/// A qualifying file awaiting checksumming
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PoolFile {
    path: PathBuf,
    name: String,
}

impl PoolFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_checksum(self) -> Result<FileChecksum, PoolError> {
        let checksum = sha256_file(&self.path)?;
        debug!("Computed checksum for file {}: {checksum}", self.name);
        Ok(FileChecksum::new(self.name, checksum))
    }
}

fn has_pool_ext(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(POOL_FILE_EXT))
}

fn dir_basename(path: &Path) -> Result<String, PoolError> {
    match path.file_name() {
        Some(name) => match name.to_str() {
            Some(s) => Ok(String::from(s)),
            None => Err(PoolError::filename_decode_error(name.to_owned())),
        },
        // Only the filesystem root has no final component once canonicalized
        None => Ok(String::from(ROOT_PARENT_NAME)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[rstest]
    #[case("a.pol", true)]
    #[case("UPPER.pol", true)]
    #[case("with.dots.pol", true)]
    #[case("a.POL", false)]
    #[case("a.pol.bak", false)]
    #[case("pol", false)]
    #[case(".pol", false)]
    #[case("a.txt", false)]
    fn test_has_pool_ext(#[case] name: &str, #[case] b: bool) {
        assert_eq!(has_pool_ext(Path::new(name)), b);
    }

    #[test]
    fn test_sidecar_name() {
        let tmp = tempdir().unwrap();
        let dirpath = tmp.path().join("alpha");
        fs::create_dir(&dirpath).unwrap();
        let pool = Pool::new(&dirpath).unwrap();
        let parent = pool
            .path()
            .parent()
            .unwrap()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(pool.sidecar_name().unwrap(), format!("Pool_{parent}_alpha.sha1"));
    }

    #[test]
    fn test_sidecar_path_is_inside_pool() {
        let tmp = tempdir().unwrap();
        let dirpath = tmp.path().join("alpha");
        fs::create_dir(&dirpath).unwrap();
        let pool = Pool::new(&dirpath).unwrap();
        let sidecar = pool.sidecar_path().unwrap();
        assert_eq!(sidecar.parent().unwrap(), pool.path());
    }

    #[test]
    fn test_pool_files_filtered_and_sorted() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("b.pol"), "two").unwrap();
        fs::write(tmp.path().join("a.pol"), "one").unwrap();
        fs::write(tmp.path().join("c.txt"), "other").unwrap();
        fs::write(tmp.path().join("Pool_x_y.sha1"), "stale").unwrap();
        fs::create_dir(tmp.path().join("sub.pol")).unwrap();
        let pool = Pool::new(tmp.path()).unwrap();
        let names = pool
            .pool_files()
            .unwrap()
            .into_iter()
            .map(|f| String::from(f.name()))
            .collect::<Vec<_>>();
        assert_eq!(names, ["a.pol", "b.pol"]);
    }

    #[test]
    fn test_new_rejects_file() {
        let tmp = tempdir().unwrap();
        let filepath = tmp.path().join("a.pol");
        fs::write(&filepath, "x").unwrap();
        assert!(matches!(
            Pool::new(&filepath),
            Err(PoolError::NotDirError { .. })
        ));
    }

    #[test]
    fn test_new_rejects_missing() {
        let tmp = tempdir().unwrap();
        assert!(matches!(
            Pool::new(tmp.path().join("nope")),
            Err(PoolError::StatError { .. })
        ));
    }
}
