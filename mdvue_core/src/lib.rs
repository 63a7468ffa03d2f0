//! `mdvue_core` rewrites fenced `vue` code blocks in a markdown document tree
//! into references to generated single-file components, so a documentation
//! page can render live demos next to their highlighted source.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Document tree (parsed by the host pipeline, or Document::from_markdown)
//!   → Directive scan (front matter `columns: n`, front matter removed)
//!   → Code block rewrite (attributes, name, highlight, path → Reference node)
//!   → Registry swap (previous names retired, new artifacts registered)
//!   → Preamble (`<script setup>` importing every artifact)
//!   → Layout (references folded into one columns wrapper when n > 1)
//! ```
//!
//! ## Key Types
//!
//! - [`Transformer`] — runs a pass and owns the [`ArtifactRegistry`].
//! - [`SourceContext`] — file and root identity plus the [`Highlighter`] and
//!   [`ArtifactStore`] collaborators for one pass.
//! - [`Document`] and [`Node`] — the tree being rewritten.
//! - [`Artifact`] — `{ name, path, code }` handed to the store.
//! - [`TransformConfig`] — language tag, names and components, loaded from
//!   `mdvue.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdvue_core::CallbackStore;
//! use mdvue_core::Document;
//! use mdvue_core::PlainHighlighter;
//! use mdvue_core::SourceContext;
//! use mdvue_core::Transformer;
//!
//! let mut document = Document::from_markdown("```vue preview=Demo\n<template />\n```\n").unwrap();
//! let store = CallbackStore::new(|_removed: &[String]| {}, |_artifacts: &[mdvue_core::Artifact]| {});
//! let context = SourceContext::new("/docs/guide/x.md", "/docs", &PlainHighlighter, &store);
//!
//! let output = Transformer::default().transform(&mut document, &context).unwrap();
//! assert_eq!(output.artifacts[0].path, "/guide/VueCodef8da2798I0.vue");
//! ```

pub use attributes::*;
pub use config::*;
pub use context::*;
pub use directive::*;
pub use error::*;
pub use identifier::*;
pub use layout::*;
pub use paths::*;
pub use preamble::*;
pub use registry::*;
pub use transformer::*;
pub use tree::*;

mod attributes;
pub mod config;
mod context;
mod directive;
#[allow(unused_assignments)]
mod error;
mod identifier;
mod layout;
mod parser;
mod paths;
mod preamble;
mod registry;
mod transformer;
mod tree;

#[cfg(test)]
mod __fixtures;
