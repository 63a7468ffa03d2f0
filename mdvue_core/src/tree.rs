use std::fmt;
use std::ops::Range;

use derive_more::Deref;
use derive_more::DerefMut;

/// An ordered document tree. Dereferences to its top-level children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Document {
	pub children: Vec<Node>,
}

impl Document {
	pub fn new(children: Vec<Node>) -> Self {
		Self { children }
	}

	/// Generated reference nodes at the top level, in document order.
	pub fn references(&self) -> impl Iterator<Item = &Reference> {
		self.children.iter().filter_map(Node::as_reference)
	}
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum Node {
	/// A metadata block at the top of the document.
	FrontMatter(FrontMatter),
	/// A fenced code block.
	Code(CodeBlock),
	/// A raw markup block.
	Html(Html),
	/// A flow container such as a block quote or a list item.
	Container(Container),
	/// Any other block, kept as its raw source.
	Markdown(Markdown),
	/// A reference to a generated artifact, wrapped in its preview component.
	Reference(Reference),
	/// The registration block importing every generated artifact.
	Preamble(Preamble),
	/// The multi-column wrapper folding every top-level reference.
	Columns(Columns),
}

impl Node {
	pub fn children(&self) -> Option<&[Node]> {
		match self {
			Self::Container(container) => Some(&container.children),
			_ => None,
		}
	}

	pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
		match self {
			Self::Container(container) => Some(&mut container.children),
			_ => None,
		}
	}

	pub fn is_front_matter(&self) -> bool {
		matches!(self, Self::FrontMatter(_))
	}

	pub fn as_reference(&self) -> Option<&Reference> {
		match self {
			Self::Reference(reference) => Some(reference),
			_ => None,
		}
	}

	/// Returns true for nodes produced by a transform pass.
	pub fn is_generated(&self) -> bool {
		matches!(
			self,
			Self::Reference(_) | Self::Preamble(_) | Self::Columns(_)
		)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
	Yaml,
	Toml,
}

impl FrontMatterFormat {
	pub fn fence(self) -> &'static str {
		match self {
			Self::Yaml => "---",
			Self::Toml => "+++",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
	pub format: FrontMatterFormat,
	/// Content between the fences.
	pub value: String,
	/// Source text including the fences, when read from markdown.
	pub(crate) raw: Option<String>,
}

impl FrontMatter {
	pub fn yaml(value: impl Into<String>) -> Self {
		Self {
			format: FrontMatterFormat::Yaml,
			value: value.into(),
			raw: None,
		}
	}
}

impl fmt::Display for FrontMatter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(raw) = &self.raw {
			return f.write_str(raw);
		}

		let fence = self.format.fence();
		write!(f, "{fence}\n{}\n{fence}", self.value)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
	pub lang: Option<String>,
	/// Everything after the language tag on the opening fence.
	pub meta: Option<String>,
	pub value: String,
	/// Source text of the whole block, when read from markdown.
	pub(crate) raw: Option<String>,
}

impl CodeBlock {
	pub fn new(lang: Option<&str>, meta: Option<&str>, value: impl Into<String>) -> Self {
		Self {
			lang: lang.map(ToString::to_string),
			meta: meta.map(ToString::to_string),
			value: value.into(),
			raw: None,
		}
	}

	/// A backtick fence longer than any backtick run in the body.
	fn fence(&self) -> String {
		let longest = self
			.value
			.split(|ch| ch != '`')
			.map(str::len)
			.max()
			.unwrap_or_default();

		"`".repeat(longest.max(2) + 1)
	}
}

impl fmt::Display for CodeBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(raw) = &self.raw {
			return f.write_str(raw);
		}

		let fence = self.fence();
		f.write_str(&fence)?;
		if let Some(lang) = &self.lang {
			f.write_str(lang)?;
		}
		if let Some(meta) = &self.meta {
			write!(f, " {meta}")?;
		}
		writeln!(f)?;
		if !self.value.is_empty() {
			writeln!(f, "{}", self.value)?;
		}
		f.write_str(&fence)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
	pub value: String,
}

/// A flow container. Containers read from markdown remember their raw source
/// so they can be written back with only the rewritten children changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
	pub kind: ContainerKind,
	pub children: Vec<Node>,
	pub(crate) source: Option<ContainerSource>,
}

impl Container {
	pub fn new(kind: ContainerKind, children: Vec<Node>) -> Self {
		Self {
			kind,
			children,
			source: None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
	BlockQuote,
	List,
	ListItem,
	FootnoteDefinition,
}

/// Raw source of a container and where each child sits inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContainerSource {
	pub raw: String,
	pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
	/// Byte range of the child within the container's raw source.
	pub span: Range<usize>,
	/// Text repeated at the start of each continuation line, e.g. `> `.
	pub prefix: String,
}

/// A generated artifact rendered inside its preview component.
///
/// ```html
/// <Demo source="%3Cdiv%3E" params="preview=Demo&bar=true">
///   <VueCodeb6d30f19I0 />
/// </Demo>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// Generated artifact name, used as the element name.
	pub name: String,
	/// Wrapper component name.
	pub component: String,
	/// Percent-encoded highlighted source.
	pub source: String,
	/// Normalized `key=value` parameters in metadata order.
	pub params: Vec<String>,
}

impl fmt::Display for Reference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"<{} source=\"{}\" params=\"{}\">",
			self.component,
			self.source,
			self.params.join("&")
		)?;
		writeln!(f, "  <{} />", self.name)?;
		write!(f, "</{}>", self.component)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
	pub name: String,
	pub path: String,
}

/// The `<script setup>` block binding every artifact name to its path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
	pub imports: Vec<Import>,
}

impl fmt::Display for Preamble {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "<script setup>")?;
		for import in &self.imports {
			writeln!(f, "import {} from \"{}\"", import.name, import.path)?;
		}
		f.write_str("</script>")
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
	pub component: String,
	pub columns: u32,
	pub references: Vec<Reference>,
}

impl fmt::Display for Columns {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{} columns=\"{}\">", self.component, self.columns)?;
		for reference in &self.references {
			write!(f, "{reference}")?;
		}
		write!(f, "</{}>", self.component)
	}
}
