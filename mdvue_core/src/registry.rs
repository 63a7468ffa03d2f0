use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Names of the artifacts produced by the most recent pass over each file.
///
/// Entries are only ever replaced by a later pass over the same file, never
/// merged. A file that is not transformed again keeps its last entry for the
/// lifetime of the registry.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
	entries: Mutex<HashMap<String, Vec<String>>>,
}

impl ArtifactRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Names recorded for `file` by its previous pass, or an empty list.
	pub fn previous(&self, file: &str) -> Vec<String> {
		self.lock().get(file).cloned().unwrap_or_default()
	}

	/// Record `names` for `file` and return the names they replace.
	///
	/// The read and the write happen under one lock, so two passes over the
	/// same file each observe a complete snapshot of the other.
	pub fn swap(&self, file: &str, names: Vec<String>) -> Vec<String> {
		self.lock()
			.insert(file.to_string(), names)
			.unwrap_or_default()
	}

	/// Forget every recorded file.
	pub fn clear(&self) {
		self.lock().clear();
	}

	/// Number of files with a recorded pass.
	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<String>>> {
		// Every write is a single insert or clear, so poisoning is ignored.
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
