//! Input/Output module: virtual file system

pub mod vfs;

pub use vfs::{Vfs, VfsError};
