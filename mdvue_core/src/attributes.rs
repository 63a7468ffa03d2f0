use std::collections::HashMap;
use std::fmt;

/// Value of a single code block attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
	/// The key appeared on its own, e.g. `bar`. Rendered as `true`.
	Flag,
	/// The key carried a value, e.g. `preview=Demo`.
	Value(String),
}

impl AttributeValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Flag => None,
			Self::Value(value) => Some(value),
		}
	}
}

impl fmt::Display for AttributeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Flag => f.write_str("true"),
			Self::Value(value) => f.write_str(value),
		}
	}
}

/// Attributes parsed from the metadata string of a fenced code block.
///
/// The metadata is split on single spaces and each token on its first `=`.
/// Consecutive spaces produce empty tokens, which are kept as empty-key flags
/// so that [`params`](Self::params) stays aligned with the source tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockAttributes {
	values: HashMap<String, AttributeValue>,
	params: Vec<String>,
}

impl BlockAttributes {
	/// Parse a metadata string. An absent string is treated as empty.
	pub fn parse(meta: Option<&str>) -> Self {
		let mut attributes = Self::default();

		for token in meta.unwrap_or_default().split(' ') {
			let (key, value) = match token.split_once('=') {
				Some((key, value)) => (key, AttributeValue::Value(value.to_string())),
				None => (token, AttributeValue::Flag),
			};

			attributes.params.push(format!("{key}={value}"));
			attributes.values.insert(key.to_string(), value);
		}

		attributes
	}

	pub fn get(&self, key: &str) -> Option<&AttributeValue> {
		self.values.get(key)
	}

	/// The value of `key` when it was given as `key=value`.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(AttributeValue::as_str)
	}

	/// Normalized `key=value` strings in token order.
	pub fn params(&self) -> &[String] {
		&self.params
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}
