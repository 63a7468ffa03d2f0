use serde::Deserialize;
use serde::Serialize;

use crate::AnyResult;
use crate::MdvueError;
use crate::MdvueResult;

/// A generated artifact, handed to the [`ArtifactStore`] to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
	/// Generated name, also the element name used to reference it.
	pub name: String,
	/// Root-relative path with a leading `/`, e.g. `/guide/VueCodef8da2798I0.vue`.
	pub path: String,
	/// The original source of the code block, not the highlighted display text.
	pub code: String,
}

/// Turns block source into the display text embedded in the preview wrapper.
pub trait Highlighter {
	fn highlight(&self, code: &str) -> AnyResult<String>;
}

impl<F> Highlighter for F
where
	F: Fn(&str) -> String,
{
	fn highlight(&self, code: &str) -> AnyResult<String> {
		Ok(self(code))
	}
}

/// Escapes markup characters and otherwise leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
	fn highlight(&self, code: &str) -> AnyResult<String> {
		let mut escaped = String::with_capacity(code.len());
		for ch in code.chars() {
			match ch {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				_ => escaped.push(ch),
			}
		}
		Ok(escaped)
	}
}

/// The external store that persists generated artifacts.
pub trait ArtifactStore {
	/// Retire artifacts that the latest pass no longer produces.
	fn remove(&self, names: &[String]);
	/// Materialize the artifacts of the latest pass.
	fn register(&self, artifacts: &[Artifact]);
}

/// An [`ArtifactStore`] made of two callbacks.
pub struct CallbackStore<R, U> {
	remove: R,
	register: U,
}

impl<R, U> CallbackStore<R, U>
where
	R: Fn(&[String]),
	U: Fn(&[Artifact]),
{
	pub fn new(remove: R, register: U) -> Self {
		Self { remove, register }
	}
}

impl<R, U> ArtifactStore for CallbackStore<R, U>
where
	R: Fn(&[String]),
	U: Fn(&[Artifact]),
{
	fn remove(&self, names: &[String]) {
		(self.remove)(names);
	}

	fn register(&self, artifacts: &[Artifact]) {
		(self.register)(artifacts);
	}
}

/// Per-pass input: which file is being transformed and its collaborators.
#[derive(Clone, Copy)]
pub struct SourceContext<'a> {
	/// Identity of the markdown file, e.g. `/docs/guide/intro.md`.
	pub file: &'a str,
	/// Project root that artifact paths are made relative to.
	pub root: &'a str,
	pub highlighter: &'a dyn Highlighter,
	pub store: &'a dyn ArtifactStore,
}

impl<'a> SourceContext<'a> {
	pub fn new(
		file: &'a str,
		root: &'a str,
		highlighter: &'a dyn Highlighter,
		store: &'a dyn ArtifactStore,
	) -> Self {
		Self {
			file,
			root,
			highlighter,
			store,
		}
	}

	pub(crate) fn validate(&self) -> MdvueResult<()> {
		if self.file.is_empty() {
			return Err(MdvueError::MissingFileIdentity);
		}

		if self.root.is_empty() {
			return Err(MdvueError::MissingRootIdentity(self.file.to_string()));
		}

		Ok(())
	}
}
