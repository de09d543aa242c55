pub mod service;
pub mod size;
pub mod tree;

pub use service::FolderService;
pub use size::SizeService;
pub use tree::TreeService;
