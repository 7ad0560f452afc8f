mod kube_store;
mod memory;

pub use kube_store::KubeStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::kubemodel::ObjectId;

#[derive(Error, Debug)]
pub enum StoreError {
	/// Create lost a race against a concurrent creator
	#[error("object {0} already exists")]
	AlreadyExists(ObjectId),
	/// Update targeted a stale version of the object
	#[error("object {0} was modified since it was last read")]
	Conflict(ObjectId),
	#[error("kube error: {0}")]
	Kube(#[from] kube::Error),
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// Result of a point lookup.
///
/// Absence is not an error: it selects the create path, so it is a variant
/// callers match on rather than an error they have to probe.
#[derive(Clone, Debug)]
pub enum Fetched<O> {
	Found(O),
	NotFound,
}

/// Backing store for managed objects.
///
/// `update` must fail with [`StoreError::Conflict`] when the object changed
/// since it was last read; reconciliation relies on that instead of locks.
#[async_trait]
pub trait ObjectStore<O: Send + Sync>: Send + Sync {
	async fn fetch(&self, id: &ObjectId) -> Result<Fetched<O>, StoreError>;
	async fn create(&self, desired: &O) -> Result<(), StoreError>;
	async fn update(&self, merged: &O) -> Result<(), StoreError>;
}
