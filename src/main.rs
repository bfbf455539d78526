use clap::{ArgGroup, Parser};
use log::{debug, error, LevelFilter};
use poolhash::pool::{Pool, POOL_FILE_EXT};
use poolhash::{
    create_pool_checksum, validate_pool_checksum, walk_dirs, CreateOutcome, PoolError,
    ValidateOutcome,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Create or validate aggregate SHA-256 checksums for directories of pool
/// files
#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[clap(version, group(ArgGroup::new("operation").required(true).args(["create", "validate"])))]
struct Arguments {
    /// Compute each directory's aggregate digest and write it to the
    /// directory's checksum file
    #[clap(long)]
    create: bool,

    /// Recompute each directory's aggregate digest and compare it against
    /// the stored checksum file
    #[clap(long)]
    validate: bool,

    /// Also process every subdirectory of the target directory, each one
    /// independently
    #[clap(long)]
    recursive: bool,

    /// Log per-file checksum details
    #[clap(short, long)]
    debug: bool,

    /// Directory to process [default: the current directory]
    dirpath: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.debug);
    let base = args.dirpath.unwrap_or_else(|| PathBuf::from("."));
    if !base.is_dir() {
        error!("Directory does not exist: {}", base.display());
        return ExitCode::FAILURE;
    }
    let dirs = if args.recursive {
        match walk_dirs(&base) {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        vec![base]
    };
    let mut clean = true;
    for dir in &dirs {
        println!("Processing directory: {}", dir.display());
        // A failure in one directory does not abort the rest of the batch.
        match process(dir, args.create) {
            Ok(ok) => clean &= ok,
            Err(e) => {
                error!("{e}");
                clean = false;
            }
        }
    }
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run one operation against one directory.  Returns whether the outcome
/// counts as clean for the process exit status.
fn process(dir: &Path, create: bool) -> Result<bool, PoolError> {
    let pool = Pool::new(dir)?;
    if create {
        match create_pool_checksum(&pool)? {
            CreateOutcome::Written { sidecar, digest } => {
                debug!("Aggregate digest: {digest}");
                println!("Checksum file created: {}", sidecar.display());
                Ok(true)
            }
            CreateOutcome::NoFiles => {
                println!("No .{POOL_FILE_EXT} files found in the directory.");
                Ok(true)
            }
        }
    } else {
        match validate_pool_checksum(&pool)? {
            ValidateOutcome::Valid => {
                println!("Directory is valid. No integrity issues found.");
                Ok(true)
            }
            ValidateOutcome::Tampered { stored, computed } => {
                debug!("Stored digest {stored}, computed digest {computed}");
                println!("Integrity check failed! Directory contents have been altered.");
                Ok(false)
            }
            ValidateOutcome::NoSidecar { sidecar } => {
                println!("No checksum file found in the directory: {}", sidecar.display());
                Ok(false)
            }
            ValidateOutcome::NoFiles => {
                println!("No .{POOL_FILE_EXT} files found in the directory.");
                Ok(true)
            }
        }
    }
}

fn init_logging(debug: bool) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5}] {message}", record.level()));
        })
        .level(if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .chain(std::io::stderr())
        .apply()
        .expect("no other logger should have been initialized");
}
