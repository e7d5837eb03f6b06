/// FolderSleuth CLI — terminal frontend.
///
/// This crate contains all terminal I/O. Business logic lives in
/// `foldersleuth-core`.
pub mod app;
pub mod args;
pub mod display;
pub mod input;

pub use app::{run, Session};
pub use args::Cli;
