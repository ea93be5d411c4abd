use std::path::{Path, PathBuf};

/// Default probe locations for a bash shell. On Windows these are the
/// standard Git-for-Windows install paths; on Unix the system bash.
pub fn default_search_paths() -> Vec<PathBuf> {
    [
        r"C:\Program Files\Git\bin\bash.exe",
        r"C:\Program Files (x86)\Git\bin\bash.exe",
        r"D:\Program Files\Git\bin\bash.exe",
        r"E:\Program Files\Git\bin\bash.exe",
        "/bin/bash",
        "/usr/bin/bash",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Resolve the shell to execute commands with.
///
/// An explicitly configured path wins if it exists; otherwise the first
/// existing entry of the search list; otherwise fall back to `bash` and let
/// the OS resolve it on PATH at spawn time.
pub fn find_shell(explicit: Option<&Path>, search_paths: &[PathBuf]) -> PathBuf {
    if let Some(path) = explicit {
        if path.exists() {
            return path.to_path_buf();
        }
        tracing::warn!(
            "Configured shell {} does not exist, falling back to search paths",
            path.display()
        );
    }

    for candidate in search_paths {
        if candidate.exists() {
            return candidate.clone();
        }
    }

    tracing::debug!("No shell found in search paths, relying on PATH lookup of `bash`");
    PathBuf::from("bash")
}
