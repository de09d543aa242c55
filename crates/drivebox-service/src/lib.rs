//! # drivebox-service
//!
//! Business logic layer for Drivebox: the tree operations engine, size
//! aggregation, and share resolution. Each service orchestrates
//! repositories and the blob delegate to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. The resolved caller
//! identity is threaded into every operation as an explicit
//! [`RequestContext`] parameter; nothing in this crate touches session
//! tokens or ambient state.

pub mod context;
pub mod file;
pub mod folder;
pub mod reorder;
pub mod share;

pub use context::RequestContext;
pub use file::{FileService, UploadService};
pub use folder::{FolderService, SizeService, TreeService};
pub use reorder::ReorderService;
pub use share::{AccessService, LinkService, ShareService};

/// Traversals refuse to descend (or ascend) past this many levels.
///
/// A well-formed tree never gets close; hitting the cutoff means a cycle
/// or dangling parent link and surfaces as `CorruptTree` instead of
/// unbounded recursion.
pub const MAX_TREE_DEPTH: usize = 128;
