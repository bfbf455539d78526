//! Enumeration of the directories visited by a recursive batch
use crate::errors::PoolError;
use std::path::{Path, PathBuf};

/// List `base` and every directory below it: the base first, then each
/// subtree depth first with children in filename order, so a batch visits
/// directories in a deterministic order.  Symlinked directories are not
/// followed.
pub fn walk_dirs<P: AsRef<Path>>(base: P) -> Result<Vec<PathBuf>, PoolError> {
    let mut dirs = Vec::new();
    descend(base.as_ref(), &mut dirs)?;
    Ok(dirs)
}

fn descend(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PoolError> {
    out.push(dir.into());
    let mut children = Vec::new();
    for p in fs_err::read_dir(dir).map_err(|e| PoolError::readdir_error(dir, e))? {
        let p = p.map_err(|e| PoolError::readdir_error(dir, e))?;
        let ftype = p
            .file_type()
            .map_err(|e| PoolError::stat_error(p.path(), e))?;
        if ftype.is_dir() {
            children.push(p.path());
        }
    }
    children.sort_unstable();
    for child in children {
        descend(&child, out)?;
    }
    Ok(())
}
