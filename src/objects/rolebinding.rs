use std::collections::BTreeMap;

use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::Resource;

use crate::ensure::{ensure, ManagedObject, Result};
use crate::kubemodel::ObjectId;
use crate::owner::OwnerDescriptor;
use crate::store::ObjectStore;

/// Constructs the desired RoleBinding with the provided name in the owner's
/// target namespace, granting `role` to `service_account` there. Pure and
/// deterministic; references are taken as-is, validating them is on the
/// caller.
pub fn desired_role_binding(
	name: &str,
	service_account: &str,
	role: &str,
	owner: &OwnerDescriptor,
) -> RoleBinding {
	RoleBinding {
		metadata: ObjectMeta {
			namespace: Some(owner.target_namespace.clone()),
			name: Some(name.to_owned()),
			labels: Some(owner.owner_labels()),
			..ObjectMeta::default()
		},
		subjects: Some(vec![Subject {
			kind: "ServiceAccount".to_owned(),
			name: service_account.to_owned(),
			namespace: Some(owner.target_namespace.clone()),
			api_group: None,
		}]),
		role_ref: RoleRef {
			api_group: RoleBinding::GROUP.to_owned(),
			kind: "Role".to_owned(),
			name: role.to_owned(),
		},
	}
}

impl ManagedObject for RoleBinding {
	fn id(&self) -> ObjectId {
		ObjectId::new(
			self.metadata.namespace.clone().unwrap_or_default(),
			self.metadata.name.clone().unwrap_or_default(),
		)
	}

	fn labels(&self) -> Option<&BTreeMap<String, String>> {
		self.metadata.labels.as_ref()
	}

	// The compared field set is exactly {subjects, roleRef}; metadata is
	// covered by the ownership check and kept from the current object.
	fn merge_from(&self, desired: &Self) -> (Self, bool) {
		let mut merged = self.clone();
		let mut changed = false;
		if self.subjects != desired.subjects {
			merged.subjects = desired.subjects.clone();
			changed = true;
		}
		if self.role_ref != desired.role_ref {
			merged.role_ref = desired.role_ref.clone();
			changed = true;
		}
		(merged, changed)
	}
}

/// Ensures a RoleBinding with the provided name exists in the owner's target
/// namespace and matches the desired subject and role. Safe to call on any
/// schedule; a lost race or version conflict surfaces as an error and is
/// resolved by the next invocation.
pub async fn ensure_role_binding<S>(
	store: &S,
	name: &str,
	service_account: &str,
	role: &str,
	owner: &OwnerDescriptor,
) -> Result<()>
where
	S: ObjectStore<RoleBinding> + ?Sized,
{
	let desired = desired_role_binding(name, service_account, role, owner);
	ensure(store, &owner.owner_labels(), &desired).await.map(|_| ())
}
