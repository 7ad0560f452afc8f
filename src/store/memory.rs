use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{Fetched, ObjectStore, StoreError};
use crate::kubemodel::ObjectId;

/// In-memory store for reconciliation tests.
///
/// Objects are kept as raw JSON values, with `metadata.resourceVersion`
/// maintained the way the apiserver maintains it: bumped on every write,
/// and an update carrying any other version is rejected with a conflict.
/// Mutating calls are counted so tests can assert how many writes a
/// reconciliation pass issued.
#[derive(Default)]
pub struct MemoryStore {
	state: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
	objects: HashMap<ObjectId, Value>,
	version: u64,
	mutations: u64,
	fail_next_fetch: Option<String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of create/update calls accepted so far
	pub fn mutating_calls(&self) -> u64 {
		self.state.lock().unwrap().mutations
	}

	/// Makes the next fetch fail with the given reason
	pub fn fail_next_fetch(&self, reason: &str) {
		self.state.lock().unwrap().fail_next_fetch = Some(reason.to_owned());
	}
}

fn id_of(value: &Value) -> ObjectId {
	let field = |name: &str| {
		value
			.get("metadata")
			.and_then(|m| m.get(name))
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_owned()
	};
	ObjectId::new(field("namespace"), field("name"))
}

fn resource_version(value: &Value) -> Option<&str> {
	value
		.get("metadata")
		.and_then(|m| m.get("resourceVersion"))
		.and_then(Value::as_str)
}

#[async_trait]
impl<O> ObjectStore<O> for MemoryStore
where
	O: Serialize + DeserializeOwned + Send + Sync,
{
	async fn fetch(&self, id: &ObjectId) -> Result<Fetched<O>, StoreError> {
		let mut inner = self.state.lock().unwrap();
		if let Some(reason) = inner.fail_next_fetch.take() {
			return Err(StoreError::Other(anyhow!("{}", reason)));
		}
		match inner.objects.get(id) {
			Some(value) => {
				let obj = serde_json::from_value(value.clone()).map_err(anyhow::Error::from)?;
				Ok(Fetched::Found(obj))
			}
			None => Ok(Fetched::NotFound),
		}
	}

	async fn create(&self, desired: &O) -> Result<(), StoreError> {
		let mut value = serde_json::to_value(desired).map_err(anyhow::Error::from)?;
		let id = id_of(&value);
		let mut inner = self.state.lock().unwrap();
		if inner.objects.contains_key(&id) {
			return Err(StoreError::AlreadyExists(id));
		}
		inner.version += 1;
		value["metadata"]["resourceVersion"] = Value::String(inner.version.to_string());
		inner.objects.insert(id, value);
		inner.mutations += 1;
		Ok(())
	}

	async fn update(&self, merged: &O) -> Result<(), StoreError> {
		let mut value = serde_json::to_value(merged).map_err(anyhow::Error::from)?;
		let id = id_of(&value);
		let mut inner = self.state.lock().unwrap();
		let stored = match inner.objects.get(&id) {
			Some(stored) => stored,
			// deleted between read and write, same as any other lost race
			None => return Err(StoreError::Conflict(id)),
		};
		if resource_version(&value) != resource_version(stored) {
			return Err(StoreError::Conflict(id));
		}
		inner.version += 1;
		value["metadata"]["resourceVersion"] = Value::String(inner.version.to_string());
		inner.objects.insert(id, value);
		inner.mutations += 1;
		Ok(())
	}
}
