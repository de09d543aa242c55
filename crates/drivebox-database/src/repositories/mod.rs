//! Repository implementations for the three tree-store tables.

pub mod file;
pub mod folder;
pub mod share;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use share::ShareRepository;
