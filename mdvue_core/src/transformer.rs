use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use tracing::debug;
use tracing::info;

use crate::Artifact;
use crate::ArtifactRegistry;
use crate::BlockAttributes;
use crate::CodeBlock;
use crate::Document;
use crate::LayoutDirective;
use crate::MdvueError;
use crate::MdvueResult;
use crate::Node;
use crate::Reference;
use crate::SourceContext;
use crate::TransformConfig;
use crate::artifact_name;
use crate::artifact_path;
use crate::fold_columns;
use crate::insert_preamble;
use crate::strip_front_matter;

/// Characters left as-is by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encode `text` so it can sit inside a double-quoted attribute.
pub fn encode_component(text: &str) -> String {
	utf8_percent_encode(text, COMPONENT_ENCODE_SET).to_string()
}

/// What a single pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
	/// Artifacts generated by this pass, in document order.
	pub artifacts: Vec<Artifact>,
	/// Names produced by the previous pass over the same file.
	pub removed: Vec<String>,
	/// The layout directive found in front matter.
	pub layout: LayoutDirective,
}

/// Rewrites embedded code blocks into references to generated artifacts.
///
/// The transformer owns the [`ArtifactRegistry`], so names from earlier passes
/// are remembered for as long as the transformer lives.
#[derive(Debug, Default)]
pub struct Transformer {
	config: TransformConfig,
	registry: ArtifactRegistry,
}

/// A planned replacement of one code block.
struct Rewrite {
	/// Index path from the top level (front matter excluded) to the block.
	location: Vec<usize>,
	reference: Reference,
	artifact: Artifact,
}

impl Transformer {
	pub fn new(config: TransformConfig) -> Self {
		Self {
			config,
			registry: ArtifactRegistry::new(),
		}
	}

	pub fn config(&self) -> &TransformConfig {
		&self.config
	}

	pub fn registry(&self) -> &ArtifactRegistry {
		&self.registry
	}

	/// Run one pass over `document`.
	///
	/// Every replacement is computed before the tree is touched. If the
	/// highlighter or path resolution fails, the error is returned and the
	/// document, the registry and the store are left as they were.
	#[tracing::instrument(skip_all, fields(file = context.file))]
	pub fn transform(
		&self,
		document: &mut Document,
		context: &SourceContext<'_>,
	) -> MdvueResult<TransformOutput> {
		context.validate()?;

		let layout = LayoutDirective::scan(&document.children);
		debug!(columns = layout.columns, "read layout directive");

		let rewrites = self.plan(&document.children, context)?;

		strip_front_matter(&mut document.children);
		let mut artifacts = Vec::with_capacity(rewrites.len());
		for rewrite in rewrites {
			if let Some(slot) = node_at_mut(&mut document.children, &rewrite.location) {
				*slot = Node::Reference(rewrite.reference);
			}
			artifacts.push(rewrite.artifact);
		}

		let names: Vec<String> = artifacts.iter().map(|artifact| artifact.name.clone()).collect();

		let removed = self.registry.swap(context.file, names);
		context.store.remove(&removed);
		context.store.register(&artifacts);

		insert_preamble(&mut document.children, &artifacts);

		if layout.is_multi_column() {
			let folded = fold_columns(
				&mut document.children,
				layout.columns,
				&self.config.layout_component,
			);
			debug!(folded, columns = layout.columns, "folded references into columns");
		}

		info!(
			artifacts = artifacts.len(),
			removed = removed.len(),
			columns = layout.columns,
			"transformed document"
		);

		Ok(TransformOutput {
			artifacts,
			removed,
			layout,
		})
	}

	/// Top-level blocks are named by their index in the top-level child list.
	/// Blocks nested in containers are numbered in visiting order after the
	/// last top-level index, so names never repeat within a pass.
	fn plan(&self, children: &[Node], context: &SourceContext<'_>) -> MdvueResult<Vec<Rewrite>> {
		let top_level: Vec<&Node> = children
			.iter()
			.filter(|node| !node.is_front_matter())
			.collect();
		let mut planner = Planner {
			transformer: self,
			context,
			location: Vec::new(),
			next_nested: top_level.len(),
			rewrites: Vec::new(),
		};
		planner.visit(top_level)?;

		Ok(planner.rewrites)
	}

	fn is_embedded(&self, code: &CodeBlock) -> bool {
		code.lang.as_deref() == Some(self.config.language.as_str())
	}

	fn rewrite(
		&self,
		code: &CodeBlock,
		index: usize,
		location: Vec<usize>,
		context: &SourceContext<'_>,
	) -> MdvueResult<Rewrite> {
		let attributes = BlockAttributes::parse(code.meta.as_deref());
		let name = artifact_name(&self.config.name_prefix, context.file, index);
		let component = attributes
			.get_str(&self.config.preview_attribute)
			.unwrap_or(self.config.default_component.as_str())
			.to_string();
		let display = context.highlighter.highlight(&code.value).map_err(|e| {
			MdvueError::Highlight {
				name: name.clone(),
				reason: e.to_string(),
			}
		})?;
		let path = artifact_path(
			context.file,
			context.root,
			&format!("./{name}.{}", self.config.extension),
		)?;

		debug!(%name, %path, %component, "rewriting code block");

		Ok(Rewrite {
			location,
			reference: Reference {
				name: name.clone(),
				component,
				source: encode_component(&display),
				params: attributes.params().to_vec(),
			},
			artifact: Artifact {
				name,
				path,
				code: code.value.clone(),
			},
		})
	}
}

struct Planner<'t, 'c> {
	transformer: &'t Transformer,
	context: &'c SourceContext<'c>,
	location: Vec<usize>,
	next_nested: usize,
	rewrites: Vec<Rewrite>,
}

impl Planner<'_, '_> {
	fn visit<'n>(&mut self, children: impl IntoIterator<Item = &'n Node>) -> MdvueResult<()> {
		for (position, node) in children.into_iter().enumerate() {
			self.location.push(position);
			match node {
				Node::Code(code) if self.transformer.is_embedded(code) => {
					let index = self.index(position);
					let rewrite =
						self.transformer
							.rewrite(code, index, self.location.clone(), self.context)?;
					self.rewrites.push(rewrite);
				}
				Node::Container(container) => self.visit(&container.children)?,
				_ => {}
			}
			self.location.pop();
		}

		Ok(())
	}

	fn index(&mut self, position: usize) -> usize {
		if self.location.len() == 1 {
			return position;
		}

		let index = self.next_nested;
		self.next_nested += 1;
		index
	}
}

fn node_at_mut<'a>(children: &'a mut [Node], location: &[usize]) -> Option<&'a mut Node> {
	let (first, rest) = location.split_first()?;
	let mut node = children.get_mut(*first)?;
	for index in rest {
		node = node.children_mut()?.get_mut(*index)?;
	}

	Some(node)
}
