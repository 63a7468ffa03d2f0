use crate::Columns;
use crate::Node;
use crate::Reference;

/// Fold every top-level reference into one [`Columns`] wrapper placed where
/// the first reference was. References are collected whether or not they are
/// adjacent. Does nothing when the top level holds no reference.
///
/// Returns the number of references folded.
pub fn fold_columns(children: &mut Vec<Node>, columns: u32, component: &str) -> usize {
	let Some(first) = children
		.iter()
		.position(|node| matches!(node, Node::Reference(_)))
	else {
		return 0;
	};

	let (references, rest): (Vec<Node>, Vec<Node>) = std::mem::take(children)
		.into_iter()
		.partition(|node| matches!(node, Node::Reference(_)));
	let references: Vec<Reference> = references
		.into_iter()
		.filter_map(|node| {
			match node {
				Node::Reference(reference) => Some(reference),
				_ => None,
			}
		})
		.collect();
	let folded = references.len();

	*children = rest;
	// Nothing before `first` was a reference, so the index is unchanged.
	children.insert(
		first,
		Node::Columns(Columns {
			component: component.to_string(),
			columns,
			references,
		}),
	);

	folded
}
