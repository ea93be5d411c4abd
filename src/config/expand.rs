use std::sync::OnceLock;

use regex::Regex;

/// Expand environment variables in a path-like string.
///
/// Supports Windows-style `%VAR%`, Unix-style `$VAR` and `${VAR}`, and a
/// leading `~` for the home directory. Unknown variables are left untouched
/// so the caller sees the literal text rather than an empty path component.
pub fn expand_env_vars(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut expanded = windows_var_re()
        .replace_all(path, |caps: &regex::Captures| {
            let name = &caps[1];
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned();

    expanded = unix_var_re()
        .replace_all(&expanded, |caps: &regex::Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned();

    if expanded == "~" || expanded.starts_with("~/") || expanded.starts_with(r"~\") {
        if let Some(base) = directories::BaseDirs::new() {
            let home = base.home_dir().to_string_lossy();
            expanded = format!("{}{}", home, &expanded[1..]);
        }
    }

    expanded
}

fn windows_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Compiled from a literal; cannot fail.
    RE.get_or_init(|| Regex::new(r"%([^%]+)%").unwrap())
}

fn unix_var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap())
}
