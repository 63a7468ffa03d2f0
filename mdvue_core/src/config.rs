use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdvueError;
use crate::MdvueResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mdvue.toml", ".mdvue.toml", ".config/mdvue.toml"];

/// Configuration for a [`Transformer`](crate::Transformer), loaded from an
/// `mdvue.toml` file. Every key is optional.
///
/// ```toml
/// language = "vue"
/// name_prefix = "VueCode"
/// default_component = "VueCode"
/// preview_attribute = "preview"
/// layout_component = "VueMarkdown"
/// extension = "vue"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransformConfig {
	/// Language tag of the code blocks to rewrite. Matched exactly.
	pub language: String,
	/// Prefix of every generated artifact name.
	pub name_prefix: String,
	/// Wrapper component used when a block has no string `preview` attribute.
	pub default_component: String,
	/// Attribute key whose string value names the wrapper component.
	pub preview_attribute: String,
	/// Element wrapping all references when a `columns` directive is set.
	pub layout_component: String,
	/// File extension of generated artifacts, without the leading dot.
	pub extension: String,
}

impl Default for TransformConfig {
	fn default() -> Self {
		Self {
			language: "vue".to_string(),
			name_prefix: "VueCode".to_string(),
			default_component: "VueCode".to_string(),
			preview_attribute: "preview".to_string(),
			layout_component: "VueMarkdown".to_string(),
			extension: "vue".to_string(),
		}
	}
}

impl TransformConfig {
	/// Return the first config file that exists under `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> MdvueResult<Option<TransformConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	/// Parse a config from TOML source.
	pub fn from_toml(content: &str) -> MdvueResult<TransformConfig> {
		toml::from_str(content).map_err(|e| MdvueError::ConfigParse(e.to_string()))
	}
}
