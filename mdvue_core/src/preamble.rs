use crate::Artifact;
use crate::Import;
use crate::Node;
use crate::Preamble;

/// Build the registration block importing `artifacts` in pass order.
pub fn build_preamble(artifacts: &[Artifact]) -> Preamble {
	Preamble {
		imports: artifacts
			.iter()
			.map(|artifact| {
				Import {
					name: artifact.name.clone(),
					path: artifact.path.clone(),
				}
			})
			.collect(),
	}
}

/// Insert the registration block as the first child. An empty block is still
/// inserted when no artifacts were generated.
pub fn insert_preamble(children: &mut Vec<Node>, artifacts: &[Artifact]) {
	children.insert(0, Node::Preamble(build_preamble(artifacts)));
}
