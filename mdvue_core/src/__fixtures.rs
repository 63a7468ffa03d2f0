use std::cell::RefCell;

use crate::AnyResult;
use crate::Artifact;
use crate::ArtifactStore;
use crate::CodeBlock;
use crate::FrontMatter;
use crate::Highlighter;
use crate::Markdown;
use crate::Node;

pub const FILE: &str = "/docs/a.md";
pub const ROOT: &str = "/docs";
/// First 8 hex characters of `sha256("/docs/a.md")`.
pub const FILE_HASH: &str = "b6d30f19";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
	Removed(Vec<String>),
	Registered(Vec<Artifact>),
}

/// Records every store notification in order.
#[derive(Debug, Default)]
pub struct RecordingStore {
	pub events: RefCell<Vec<StoreEvent>>,
}

impl RecordingStore {
	pub fn last_removed(&self) -> Option<Vec<String>> {
		self.events.borrow().iter().rev().find_map(|event| {
			match event {
				StoreEvent::Removed(names) => Some(names.clone()),
				StoreEvent::Registered(_) => None,
			}
		})
	}

	pub fn last_registered(&self) -> Option<Vec<Artifact>> {
		self.events.borrow().iter().rev().find_map(|event| {
			match event {
				StoreEvent::Registered(artifacts) => Some(artifacts.clone()),
				StoreEvent::Removed(_) => None,
			}
		})
	}
}

impl ArtifactStore for RecordingStore {
	fn remove(&self, names: &[String]) {
		self.events
			.borrow_mut()
			.push(StoreEvent::Removed(names.to_vec()));
	}

	fn register(&self, artifacts: &[Artifact]) {
		self.events
			.borrow_mut()
			.push(StoreEvent::Registered(artifacts.to_vec()));
	}
}

pub struct FailingHighlighter;

impl Highlighter for FailingHighlighter {
	fn highlight(&self, _code: &str) -> AnyResult<String> {
		Err("grammar not loaded".into())
	}
}

pub fn identity(code: &str) -> String {
	code.to_string()
}

pub fn vue(meta: Option<&str>, value: &str) -> Node {
	Node::Code(CodeBlock::new(Some("vue"), meta, value))
}

pub fn code(lang: &str, value: &str) -> Node {
	Node::Code(CodeBlock::new(Some(lang), None, value))
}

pub fn text(value: &str) -> Node {
	Node::Markdown(Markdown {
		value: value.to_string(),
	})
}

pub fn front_matter(value: &str) -> Node {
	Node::FrontMatter(FrontMatter::yaml(value))
}

pub fn name(index: usize) -> String {
	format!("VueCode{FILE_HASH}I{index}")
}
