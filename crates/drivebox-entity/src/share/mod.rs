pub mod model;

pub use model::{CreateShare, Share};
