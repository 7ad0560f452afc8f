use std::collections::BTreeMap;

/// Label naming the instance which owns an object
pub const OWNING_INSTANCE_LABEL: &str = "shirogane.lach.pw/owning-instance";
/// Label naming the namespace of the owning instance
pub const OWNING_NAMESPACE_LABEL: &str = "shirogane.lach.pw/owning-namespace";

/// The workload instance on whose behalf objects are managed.
///
/// Owned objects are placed in `target_namespace` and labeled with the
/// instance name/namespace; those labels are the sole authorization for any
/// later mutation of the object.
#[derive(Clone, Debug)]
pub struct OwnerDescriptor {
	/// Name of the owning instance
	pub name: String,
	/// Namespace the owning instance lives in
	pub namespace: String,
	/// Namespace owned objects are created in
	pub target_namespace: String,
}

impl OwnerDescriptor {
	/// Labels every object owned by this instance must carry
	pub fn owner_labels(&self) -> BTreeMap<String, String> {
		let mut labels = BTreeMap::new();
		labels.insert(OWNING_INSTANCE_LABEL.to_owned(), self.name.clone());
		labels.insert(OWNING_NAMESPACE_LABEL.to_owned(), self.namespace.clone());
		labels
	}
}
