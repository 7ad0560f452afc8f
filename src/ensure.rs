use std::collections::BTreeMap;
use std::fmt::Debug;

use thiserror::Error;

use crate::kubemodel::ObjectId;
use crate::labels;
use crate::store::{Fetched, ObjectStore, StoreError};

#[derive(Error, Debug)]
pub enum EnsureError {
	#[error("failed to get {id}: {source}")]
	Fetch {
		id: ObjectId,
		#[source]
		source: StoreError,
	},
	#[error("failed to create {id}: {source}")]
	Create {
		id: ObjectId,
		#[source]
		source: StoreError,
	},
	#[error("failed to update {id}: {source}")]
	Update {
		id: ObjectId,
		#[source]
		source: StoreError,
	},
}

pub type Result<T, E = EnsureError> = std::result::Result<T, E>;

/// What a single reconciliation pass did to the object
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
	/// No object existed, the desired one was created
	Created,
	/// An owned object existed and differed in the compared fields
	Updated,
	/// An owned object existed and already matched
	Unchanged,
	/// An object exists at this id but is not owned by this instance;
	/// it was deliberately left alone
	Foreign,
}

/// A resource kind the convergence pass knows how to reconcile.
pub trait ManagedObject: Clone + Debug + Send + Sync {
	/// Store key of this object
	fn id(&self) -> ObjectId;

	/// Labels currently set on the object
	fn labels(&self) -> Option<&BTreeMap<String, String>>;

	/// Compares the fixed field set of `self` (the current object) against
	/// `desired`, returning a merged object plus whether anything differed.
	///
	/// The merged object keeps every non-compared field of `self`, in
	/// particular `metadata.resourceVersion`, so that the following update
	/// participates in the store's optimistic concurrency check.
	fn merge_from(&self, desired: &Self) -> (Self, bool);
}

/// Converges the object at `desired.id()` towards `desired`.
///
/// Issues at most one mutating call per invocation and never retries
/// internally; re-invocation is the recovery mechanism for lost races and
/// version conflicts. An existing object whose labels do not contain
/// `owner_labels` is foreign and is never mutated, no matter how far its
/// fields diverge.
pub async fn ensure<O, S>(
	store: &S,
	owner_labels: &BTreeMap<String, String>,
	desired: &O,
) -> Result<Outcome>
where
	O: ManagedObject,
	S: ObjectStore<O> + ?Sized,
{
	let id = desired.id();
	log::trace!("fetching current state of {}", id);
	let current = store.fetch(&id).await.map_err(|source| EnsureError::Fetch {
		id: id.clone(),
		source,
	})?;

	let current = match current {
		Fetched::Found(current) => current,
		Fetched::NotFound => {
			store
				.create(desired)
				.await
				.map_err(|source| EnsureError::Create {
					id: id.clone(),
					source,
				})?;
			log::debug!("created {}", id);
			return Ok(Outcome::Created);
		}
	};

	if !labels::contains_all(current.labels(), owner_labels) {
		log::warn!("{} exists but is not owned by this instance, leaving it as-is", id);
		return Ok(Outcome::Foreign);
	}

	let (merged, changed) = current.merge_from(desired);
	if !changed {
		log::trace!("{} is up to date", id);
		return Ok(Outcome::Unchanged);
	}

	store
		.update(&merged)
		.await
		.map_err(|source| EnsureError::Update {
			id: id.clone(),
			source,
		})?;
	log::debug!("updated {}", id);
	Ok(Outcome::Updated)
}
