use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdvueError {
	#[error(transparent)]
	#[diagnostic(code(mdvue::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdvue::markdown))]
	Markdown(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdvue::config_parse),
		help("check that mdvue.toml is valid TOML with string values for each key")
	)]
	ConfigParse(String),

	#[error("missing file identity for the document being transformed")]
	#[diagnostic(
		code(mdvue::missing_file_identity),
		help("pass the path of the markdown file as the `file` of the source context")
	)]
	MissingFileIdentity,

	#[error("missing root identity for file `{0}`")]
	#[diagnostic(
		code(mdvue::missing_root_identity),
		help("pass the project root as the `root` of the source context")
	)]
	MissingRootIdentity(String),

	#[error("file identity `{0}` has no parent directory")]
	#[diagnostic(
		code(mdvue::invalid_file_identity),
		help("file identities must name a file, e.g. `/docs/guide.md`")
	)]
	InvalidFileIdentity(String),

	#[error("highlighter failed for block `{name}`: {reason}")]
	#[diagnostic(code(mdvue::highlight))]
	Highlight { name: String, reason: String },
}

pub type MdvueResult<T> = Result<T, MdvueError>;
pub type AnyError = Box<dyn std::error::Error + Send + Sync>;
pub type AnyResult<T> = Result<T, AnyError>;
