use std::sync::LazyLock;

use regex::Regex;

use crate::Node;

static COLUMNS_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"columns:\s*(\d+)").expect("valid columns pattern"));

/// Document-level layout read from front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDirective {
	pub columns: u32,
}

impl Default for LayoutDirective {
	fn default() -> Self {
		Self { columns: 1 }
	}
}

impl LayoutDirective {
	/// Scan the front matter nodes of `children` for a `columns: <n>` entry.
	///
	/// Front matter without the entry, or with a count that does not fit a
	/// `u32`, leaves the default single column. When several front matter
	/// nodes carry the entry the last one wins.
	pub fn scan(children: &[Node]) -> Self {
		children
			.iter()
			.filter_map(|node| {
				match node {
					Node::FrontMatter(front_matter) => parse_columns(&front_matter.value),
					_ => None,
				}
			})
			.last()
			.map_or_else(Self::default, |columns| Self { columns })
	}

	pub fn is_multi_column(self) -> bool {
		self.columns > 1
	}
}

/// The column count of a front matter body, if it has one.
pub fn parse_columns(value: &str) -> Option<u32> {
	COLUMNS_PATTERN
		.captures(value)
		.and_then(|captures| captures.get(1))
		.and_then(|columns| columns.as_str().parse().ok())
}

/// Remove every front matter node from the top level, whether or not it held a
/// directive.
pub fn strip_front_matter(children: &mut Vec<Node>) {
	children.retain(|node| !node.is_front_matter());
}
