use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::MdvueError;
use crate::MdvueResult;

/// Resolve `file_name` against the directory of `file` and express the result
/// relative to `root`, as a forward-slash path with a leading `/`.
///
/// Resolution is purely lexical; nothing is read from the file system.
/// Targets outside of `root` keep their `..` segments.
pub fn artifact_path(file: &str, root: &str, file_name: &str) -> MdvueResult<String> {
	let Some(directory) = Path::new(file).parent() else {
		return Err(MdvueError::InvalidFileIdentity(file.to_string()));
	};

	let target = normalize(&directory.join(file_name));
	let root = normalize(Path::new(root));
	let relative = pathdiff::diff_paths(&target, &root).unwrap_or(target);

	Ok(format!("/{}", to_slash(&relative)))
}

/// Remove `.` segments and fold `..` into the preceding segment.
fn normalize(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				match normalized.components().next_back() {
					Some(Component::Normal(_)) => {
						normalized.pop();
					}
					// `..` above the root stays at the root.
					Some(Component::RootDir | Component::Prefix(_)) => {}
					_ => normalized.push(".."),
				}
			}
			other => normalized.push(other.as_os_str()),
		}
	}

	normalized
}

fn to_slash(path: &Path) -> String {
	path.components()
		.filter_map(|component| {
			match component {
				Component::Normal(segment) => Some(segment.to_string_lossy()),
				Component::ParentDir => Some("..".into()),
				Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
			}
		})
		.collect::<Vec<_>>()
		.join("/")
}
