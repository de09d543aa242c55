//! Traits for the external collaborators.
//!
//! Drivebox treats byte storage and identity as external systems. The
//! traits are defined here in `drivebox-core` and implemented in
//! `drivebox-storage` and `drivebox-auth` respectively, so the service
//! layer depends only on the interfaces.

pub mod blob;
pub mod identity;

pub use blob::{BlobStore, ByteStream, StoredBlob};
pub use identity::SessionVerifier;
