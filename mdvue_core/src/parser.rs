use markdown::Constructs;
use markdown::ParseOptions;
use markdown::mdast;
use markdown::to_mdast;
use markdown::unist::Position;

use crate::CodeBlock;
use crate::Container;
use crate::ContainerKind;
use crate::Document;
use crate::FrontMatter;
use crate::FrontMatterFormat;
use crate::Html;
use crate::Markdown;
use crate::MdvueError;
use crate::MdvueResult;
use crate::Node;
use crate::tree::ContainerSource;
use crate::tree::Slot;

impl Document {
	/// Parse markdown (GFM plus front matter) into a document tree.
	///
	/// Fenced code blocks, front matter and raw markup blocks become typed
	/// nodes. Block quotes, lists and footnote definitions become containers
	/// so the code blocks inside them are reachable. Everything else is kept
	/// as raw source.
	pub fn from_markdown(content: impl AsRef<str>) -> MdvueResult<Document> {
		let content = content.as_ref();
		let options = ParseOptions {
			constructs: Constructs {
				frontmatter: true,
				..Constructs::gfm()
			},
			..ParseOptions::gfm()
		};
		let root = to_mdast(content, &options).map_err(|e| MdvueError::Markdown(e.to_string()))?;
		let children = root
			.children()
			.map(|children| {
				children
					.iter()
					.map(|child| convert(child, content, true))
					.collect()
			})
			.unwrap_or_default();

		Ok(Document::new(children))
	}

	/// Serialize the tree back to markdown, one blank line between top-level
	/// blocks.
	pub fn to_markdown(&self) -> String {
		let mut output = self
			.children
			.iter()
			.map(render)
			.collect::<Vec<_>>()
			.join("\n\n");
		output.push('\n');
		output
	}
}

/// Convert one mdast block. Top-level code blocks and front matter keep their
/// source text; nested ones are written back through their container.
fn convert(node: &mdast::Node, source: &str, top_level: bool) -> Node {
	let verbatim = || {
		top_level
			.then(|| raw(node, source))
			.flatten()
			.map(ToString::to_string)
	};

	match node {
		mdast::Node::Yaml(yaml) => {
			Node::FrontMatter(FrontMatter {
				format: FrontMatterFormat::Yaml,
				value: yaml.value.clone(),
				raw: verbatim(),
			})
		}
		mdast::Node::Toml(toml) => {
			Node::FrontMatter(FrontMatter {
				format: FrontMatterFormat::Toml,
				value: toml.value.clone(),
				raw: verbatim(),
			})
		}
		mdast::Node::Code(code) => {
			Node::Code(CodeBlock {
				lang: code.lang.clone(),
				meta: code.meta.clone(),
				value: code.value.clone(),
				raw: verbatim(),
			})
		}
		mdast::Node::Html(html) => {
			Node::Html(Html {
				value: html.value.clone(),
			})
		}
		mdast::Node::Blockquote(_) => convert_container(node, ContainerKind::BlockQuote, source),
		mdast::Node::List(_) => convert_container(node, ContainerKind::List, source),
		mdast::Node::ListItem(_) => convert_container(node, ContainerKind::ListItem, source),
		mdast::Node::FootnoteDefinition(_) => {
			convert_container(node, ContainerKind::FootnoteDefinition, source)
		}
		_ => {
			Node::Markdown(Markdown {
				value: raw(node, source).map_or_else(|| node.to_string(), ToString::to_string),
			})
		}
	}
}

fn convert_container(node: &mdast::Node, kind: ContainerKind, source: &str) -> Node {
	let children = node.children().map(Vec::as_slice).unwrap_or_default();
	let converted = children
		.iter()
		.map(|child| convert(child, source, false))
		.collect();

	let container_source = node.position().and_then(|position| {
		let start = position.start.offset;
		let raw = source.get(start..position.end.offset)?;
		let slots = children
			.iter()
			.map(|child| {
				let child_position = child.position()?;
				Some(Slot {
					span: child_position.start.offset - start..child_position.end.offset - start,
					prefix: continuation_prefix(source, child_position),
				})
			})
			.collect::<Option<Vec<_>>>()?;

		Some(ContainerSource {
			raw: raw.to_string(),
			slots,
		})
	});

	Node::Container(Container {
		kind,
		children: converted,
		source: container_source,
	})
}

fn raw<'a>(node: &mdast::Node, source: &'a str) -> Option<&'a str> {
	let position = node.position()?;
	source.get(position.start.offset..position.end.offset)
}

/// The container markers (`>`) and indentation at the start of the last line
/// of a node.
fn continuation_prefix(source: &str, position: &Position) -> String {
	let end = position.end.offset.min(source.len());
	let line_start = source
		.get(..end)
		.and_then(|before| before.rfind('\n'))
		.map_or(0, |newline| newline + 1);

	source
		.get(line_start..end)
		.unwrap_or_default()
		.chars()
		.take_while(|ch| matches!(ch, ' ' | '\t' | '>'))
		.collect()
}

fn render(node: &Node) -> String {
	match node {
		Node::FrontMatter(front_matter) => front_matter.to_string(),
		Node::Code(code) => code.to_string(),
		Node::Html(html) => html.value.clone(),
		Node::Markdown(markdown) => markdown.value.clone(),
		Node::Container(container) => render_container(container),
		Node::Reference(reference) => reference.to_string(),
		Node::Preamble(preamble) => preamble.to_string(),
		Node::Columns(columns) => columns.to_string(),
	}
}

fn render_container(container: &Container) -> String {
	match &container.source {
		Some(source) if source.slots.len() == container.children.len() => {
			render_from_source(container, source)
		}
		_ => render_detached(container),
	}
}

/// Re-emit the original container source, replacing only generated children.
fn render_from_source(container: &Container, source: &ContainerSource) -> String {
	let mut output = String::with_capacity(source.raw.len());
	let mut cursor = 0;

	for (child, slot) in container.children.iter().zip(&source.slots) {
		output.push_str(source.raw.get(cursor..slot.span.start).unwrap_or_default());
		match child {
			Node::Container(inner) => output.push_str(&render_container(inner)),
			generated if generated.is_generated() => {
				output.push_str(&prefix_continuation(&render(generated), &slot.prefix));
			}
			_ => output.push_str(source.raw.get(slot.span.clone()).unwrap_or_default()),
		}
		cursor = slot.span.end;
	}

	output.push_str(source.raw.get(cursor..).unwrap_or_default());
	output
}

/// Render a container that was built in code rather than parsed.
fn render_detached(container: &Container) -> String {
	let separator = match container.kind {
		ContainerKind::List => "\n",
		_ => "\n\n",
	};
	let body = container
		.children
		.iter()
		.map(render)
		.collect::<Vec<_>>()
		.join(separator);

	match container.kind {
		ContainerKind::BlockQuote => prefix_lines(&body, "> ", "> "),
		ContainerKind::ListItem => prefix_lines(&body, "- ", "  "),
		ContainerKind::List | ContainerKind::FootnoteDefinition => body,
	}
}

fn prefix_continuation(text: &str, prefix: &str) -> String {
	text.replace('\n', &format!("\n{prefix}"))
}

fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
	format!("{first}{}", prefix_continuation(text, rest))
}
