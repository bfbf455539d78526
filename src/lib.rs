pub mod digest;
pub mod errors;
pub mod pool;
pub mod processor;
pub mod walk;
pub use crate::processor::*;
pub use crate::walk::walk_dirs;
pub use errors::PoolError;
