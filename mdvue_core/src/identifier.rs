use sha2::Digest;
use sha2::Sha256;

/// Number of hex characters of the file hash kept in artifact names.
pub const SHORT_HASH_LENGTH: usize = 8;

/// The first [`SHORT_HASH_LENGTH`] hex characters of the SHA-256 of `file`.
pub fn short_hash(file: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(file.as_bytes());
	let mut hash = hex::encode(hasher.finalize());
	hash.truncate(SHORT_HASH_LENGTH);
	hash
}

/// Name of the artifact generated for the node at `index` among its siblings,
/// in the form `<prefix><hash>I<index>`.
///
/// Deterministic for a given file identity and index, so re-running a pass on
/// unchanged input reproduces the same names.
pub fn artifact_name(prefix: &str, file: &str, index: usize) -> String {
	format!("{prefix}{}I{index}", short_hash(file))
}
