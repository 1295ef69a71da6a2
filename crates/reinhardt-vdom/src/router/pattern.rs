//! Route path patterns.

use std::fmt;

use regex::Regex;

use super::RouteParams;
use crate::error::RouterError;

/// A compiled route pattern such as `/profile/:username`.
///
/// Literal segments match exactly. A `:name` segment captures one path
/// segment (`[^/]+`). The whole path must match; one trailing slash is
/// tolerated.
#[derive(Clone)]
pub struct PathPattern {
	raw: String,
	regex: Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for an empty or malformed
	/// parameter name, a duplicate parameter name, or a pattern that does not
	/// start with `/`.
	///
	/// # Example
	///
	/// ```ignore
	/// let pattern = PathPattern::new("/profile/:username")?;
	/// let params = pattern.matches("/profile/joe").unwrap();
	/// assert_eq!(params.get("username"), Some("joe"));
	/// ```
	pub fn new(raw: &str) -> Result<Self, RouterError> {
		let invalid = |reason: String| RouterError::InvalidPattern {
			pattern: raw.to_string(),
			reason,
		};
		if !raw.starts_with('/') {
			return Err(invalid("pattern must start with '/'".to_string()));
		}

		let mut param_names: Vec<String> = Vec::new();
		let mut source = String::from("^");
		for segment in raw.trim_end_matches('/').split('/').skip(1) {
			source.push('/');
			match segment.strip_prefix(':') {
				Some(name) => {
					if !is_valid_name(name) {
						return Err(invalid(format!("invalid parameter name ':{}'", name)));
					}
					if param_names.iter().any(|existing| existing == name) {
						return Err(invalid(format!("duplicate parameter ':{}'", name)));
					}
					param_names.push(name.to_string());
					source.push_str("([^/]+)");
				}
				None => source.push_str(&regex::escape(segment)),
			}
		}
		source.push_str("/?$");

		let regex = Regex::new(&source).map_err(|e| invalid(e.to_string()))?;
		debug_assert_eq!(regex.captures_len() - 1, param_names.len());
		Ok(Self {
			raw: raw.to_string(),
			regex,
			param_names,
		})
	}

	/// Returns the pattern as written.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Returns the parameter names in order of appearance.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Matches a path, ignoring any query string or fragment.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		let path = strip_query(path);
		let captures = self.regex.captures(path)?;
		let values = self
			.param_names
			.iter()
			.zip(captures.iter().skip(1))
			.filter_map(|(name, value)| Some((name.clone(), value?.as_str().to_string())))
			.collect();
		Some(RouteParams::from_pairs(values))
	}
}

impl fmt::Debug for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PathPattern")
			.field("raw", &self.raw)
			.field("param_names", &self.param_names)
			.finish()
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The path part of a location, without `?query` or `#fragment`.
pub(crate) fn strip_query(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	match &path[..end] {
		"" => "/",
		path => path,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/", true)]
	#[case("/", "", true)]
	#[case("/about", "/about", true)]
	#[case("/about", "/about/", true)]
	#[case("/about", "/about/team", false)]
	#[case("/about", "/abou", false)]
	#[case("/a.b", "/axb", false)]
	#[case("/search", "/search?q=rust", true)]
	#[case("/profile/:username", "/profile/", false)]
	fn test_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		let pattern = PathPattern::new(pattern).unwrap();
		assert_eq!(pattern.matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_extracts_params() {
		let pattern = PathPattern::new("/users/:user_id/posts/:post").unwrap();
		let params = pattern.matches("/users/42/posts/hello-world").unwrap();
		assert_eq!(params.get("user_id"), Some("42"));
		assert_eq!(params.get("post"), Some("hello-world"));
		assert_eq!(pattern.param_names(), ["user_id", "post"]);
	}

	#[rstest]
	#[case("/profile/:")]
	#[case("/profile/:1st")]
	#[case("/profile/:user-name")]
	#[case("/a/:id/b/:id")]
	#[case("profile")]
	fn test_invalid_patterns(#[case] raw: &str) {
		let err = PathPattern::new(raw).unwrap_err();
		assert!(matches!(err, RouterError::InvalidPattern { .. }));
	}

	#[rstest]
	#[case("/search?q=1", "/search")]
	#[case("/page#top", "/page")]
	#[case("?x", "/")]
	fn test_strip_query(#[case] path: &str, #[case] expected: &str) {
		assert_eq!(strip_query(path), expected);
	}
}
