use async_trait::async_trait;
use k8s_openapi::Resource;
use kube::api::{Api, Meta, PostParams};
use kube::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Fetched, ObjectStore, StoreError};
use crate::kubemodel::ObjectId;

/// Store backed by the cluster apiserver.
///
/// Version conflicts are detected by the apiserver itself: a replace carrying
/// a stale `resourceVersion` is rejected with a 409.
pub struct KubeStore<K> {
	api: Api<K>,
}

impl<K: Resource> KubeStore<K> {
	/// Store scoped to a single namespace
	pub fn namespaced(client: Client, namespace: &str) -> Self {
		Self {
			api: Api::namespaced(client, namespace),
		}
	}
}

fn id_of<K: Meta>(obj: &K) -> ObjectId {
	ObjectId::new(Meta::namespace(obj).unwrap_or_default(), Meta::name(obj))
}

#[async_trait]
impl<K> ObjectStore<K> for KubeStore<K>
where
	K: Meta + Clone + DeserializeOwned + Serialize + Send + Sync,
{
	async fn fetch(&self, id: &ObjectId) -> Result<Fetched<K>, StoreError> {
		match self.api.get(&id.name).await {
			Ok(obj) => Ok(Fetched::Found(obj)),
			Err(kube::Error::Api(e)) if e.code == 404 => Ok(Fetched::NotFound),
			Err(e) => Err(StoreError::Kube(e)),
		}
	}

	async fn create(&self, desired: &K) -> Result<(), StoreError> {
		match self.api.create(&PostParams::default(), desired).await {
			Ok(_) => Ok(()),
			Err(kube::Error::Api(e)) if e.code == 409 => {
				Err(StoreError::AlreadyExists(id_of(desired)))
			}
			Err(e) => Err(StoreError::Kube(e)),
		}
	}

	async fn update(&self, merged: &K) -> Result<(), StoreError> {
		let name = Meta::name(merged);
		match self.api.replace(&name, &PostParams::default(), merged).await {
			Ok(_) => Ok(()),
			Err(kube::Error::Api(e)) if e.code == 409 => Err(StoreError::Conflict(id_of(merged))),
			Err(e) => Err(StoreError::Kube(e)),
		}
	}
}
