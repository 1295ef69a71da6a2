//! Path parameters captured by a route match.

use std::collections::HashMap;
use std::str::FromStr;

/// Parameters captured from the path, in pattern order.
///
/// # Example
///
/// ```ignore
/// router.add_route("/users/:id", |params: &RouteParams| {
///     let id: i64 = params.parse("id").unwrap_or_default();
///     FunctionComponent::new(move |_| user_page(id))
/// })?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	values: Vec<(String, String)>,
}

impl RouteParams {
	pub(crate) fn from_pairs(values: Vec<(String, String)>) -> Self {
		Self { values }
	}

	/// Returns the value captured for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Parses the value captured for `name`.
	///
	/// Returns `None` when the parameter is missing or does not parse.
	pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
		self.get(name)?.parse().ok()
	}

	/// Iterates `(name, value)` pairs in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Copies the parameters into a map.
	pub fn to_map(&self) -> HashMap<String, String> {
		self.values.iter().cloned().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_lookup_and_parse() {
		let params = RouteParams::from_pairs(vec![
			("id".to_string(), "42".to_string()),
			("slug".to_string(), "intro".to_string()),
		]);
		assert_eq!(params.get("slug"), Some("intro"));
		assert_eq!(params.parse::<i64>("id"), Some(42));
		assert_eq!(params.parse::<i64>("slug"), None);
		assert_eq!(params.get("missing"), None);
		assert_eq!(params.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["id", "slug"]);
		assert_eq!(params.to_map().get("id").map(String::as_str), Some("42"));
	}
}
