use std::fmt;

/// Identifies object in cluster
///
/// Unique within the backing store, immutable once the object exists.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjectId {
	pub namespace: String,
	pub name: String,
}

impl ObjectId {
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
		}
	}
}

impl fmt::Display for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.namespace, self.name)
	}
}
