//! Storage module for downloaded files
//!
//! Files are laid out as `<root>/<hostname>/<flattened-path>`. There is no
//! manifest or index; the directory tree is the only record of what was fetched.

mod local;
mod traits;

pub use local::LocalFileStore;
pub use traits::{FileStore, StorageError, StorageResult};
