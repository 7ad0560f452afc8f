use std::collections::BTreeMap;

/// Returns true if every required label is present in `actual` with the same
/// value. Extra labels on the object are fine.
pub fn contains_all(
	actual: Option<&BTreeMap<String, String>>,
	required: &BTreeMap<String, String>,
) -> bool {
	match actual {
		Some(actual) => required.iter().all(|(k, v)| actual.get(k) == Some(v)),
		None => required.is_empty(),
	}
}
