use std::collections::{HashMap, HashSet};

use regex::{Regex, RegexSet, RegexSetBuilder};

/// Checks raw command lines against two blocklist tables: regex patterns for
/// dangerous flag/argument combinations, and exact command names extracted
/// from the line the way a shell would parse it.
///
/// Pattern rules are checked first because they encode dangerous
/// *combinations* (redirection, `kill -9`, archive creation) that a
/// first-token check cannot see. Name rules assume the command is dangerous
/// in any form.
pub struct CommandFilter {
    patterns: RegexSet,
    pattern_reasons: Vec<String>,
    blocked_names: HashSet<String>,
    name_reasons: HashMap<String, String>,
    separators: Regex,
    subshell: Regex,
}

/// Information about a blocked command.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlockedCommand {
    pub blocked: bool,
    pub reason: String,
    pub command: String,
}

impl BlockedCommand {
    /// Serialize to a JSON string for returning to the agent / audit logging.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"blocked":true,"reason":"serialization failed"}"#.to_string())
    }
}

impl CommandFilter {
    /// Create a new filter from (pattern, reason) and (name, reason) tables.
    /// All patterns are compiled into one case-insensitive RegexSet so a
    /// check is a single multi-pattern pass.
    pub fn new(
        patterns: &[(String, String)],
        names: &[(String, String)],
    ) -> Result<Self, regex::Error> {
        let (regexes, reasons): (Vec<_>, Vec<_>) = patterns.iter().cloned().unzip();
        let patterns = RegexSetBuilder::new(&regexes).case_insensitive(true).build()?;

        let blocked_names = names.iter().map(|(n, _)| n.to_lowercase()).collect();
        let name_reasons = names
            .iter()
            .map(|(n, r)| (n.to_lowercase(), r.clone()))
            .collect();

        Ok(Self {
            patterns,
            pattern_reasons: reasons,
            blocked_names,
            name_reasons,
            // Pipe, OR, AND, and semicolon separators with optional whitespace.
            separators: Regex::new(r"\s*(?:\|{1,2}|&&|;)\s*")?,
            // $(...) and backtick subshell spans. [^()] keeps the match inside
            // one paren level, so for nested subshells the innermost span wins.
            subshell: Regex::new(r"\$\(([^()]*)\)|`([^`]*)`")?,
        })
    }

    /// Create a filter with the built-in rule tables.
    pub fn from_defaults() -> Result<Self, regex::Error> {
        Self::new(
            &super::defaults::default_pattern_rules(),
            &super::defaults::default_blocked_names(),
        )
    }

    /// Check if a command is blocked. Returns Some(BlockedCommand) if blocked,
    /// None if allowed. Pure: total over all inputs, never errors.
    pub fn check(&self, command: &str) -> Option<BlockedCommand> {
        // Step 1: pattern scan over the entire raw line.
        if let Some(idx) = self.patterns.matches(command).iter().next() {
            return Some(BlockedCommand {
                blocked: true,
                reason: self.pattern_reasons[idx].clone(),
                command: command.to_string(),
            });
        }

        // Step 2: name scan over the extracted per-segment command heads.
        for name in self.extract_commands(command) {
            if self.blocked_names.contains(&name) {
                let why = self
                    .name_reasons
                    .get(&name)
                    .map(String::as_str)
                    .unwrap_or("this command is not allowed");
                return Some(BlockedCommand {
                    blocked: true,
                    reason: format!("'{name}' is blocked: {why}"),
                    command: command.to_string(),
                });
            }
        }

        None
    }

    /// Extract the normalized command names a shell would actually invoke
    /// from a (possibly compound) command line.
    ///
    /// Handles pipes (`|`, `||`), chains (`&&`, `;`), and subshells
    /// (`$(...)`, backticks). Subshell commands are extracted recursively and
    /// appear before the enclosing segment's own candidate. Leading
    /// `NAME=value` environment assignments are skipped. Candidates are
    /// path-stripped, lowercased, and `.exe`-stripped, so `cp` inside a
    /// longer token like `mcpserver` never matches.
    pub fn extract_commands(&self, command: &str) -> Vec<String> {
        let mut commands = Vec::new();

        // Subshell spans are located before separator splitting so that a
        // pipe or chain inside $(...) does not tear the span in half. Each
        // span is recursed into and then blanked out of the outer line; its
        // commands are emitted when the enclosing segment is reached, keeping
        // inner commands ahead of the segment's own head. Malformed or
        // unterminated spans simply don't match and the line is processed as
        // ordinary text.
        let mut blanked = command.as_bytes().to_vec();
        let mut subshells: Vec<(usize, Vec<String>)> = Vec::new();
        for caps in self.subshell.captures_iter(command) {
            let Some(whole) = caps.get(0) else { continue };
            if let Some(inner) = caps.get(1).or_else(|| caps.get(2)) {
                subshells.push((whole.start(), self.extract_commands(inner.as_str())));
            }
            // The span starts and ends on char boundaries, so overwriting it
            // with ASCII spaces keeps the buffer valid UTF-8.
            blanked[whole.range()].fill(b' ');
        }
        let blanked = String::from_utf8_lossy(&blanked).into_owned();

        let mut segments = Vec::new();
        let mut start = 0;
        for sep in self.separators.find_iter(&blanked) {
            segments.push(start..sep.start());
            start = sep.end();
        }
        segments.push(start..blanked.len());

        let mut subshells = subshells.into_iter().peekable();
        for range in segments {
            // Emit subshell commands belonging to this segment first, even
            // when the segment itself is blank after the span was removed.
            while subshells
                .peek()
                .is_some_and(|(offset, _)| *offset < range.end)
            {
                if let Some((_, inner)) = subshells.next() {
                    commands.extend(inner);
                }
            }

            let segment = blanked[range].trim();
            if segment.is_empty() {
                continue;
            }

            // Skip leading VAR=value tokens; the first remaining token is the
            // command. An assignment-only segment contributes no candidate.
            let head = segment
                .split_whitespace()
                .find(|token| !is_env_assignment(token));
            if let Some(head) = head {
                if let Some(name) = normalize_command(head) {
                    commands.push(name);
                }
            }
        }

        commands
    }
}

/// True for tokens of the form `NAME=value` where NAME is a plausible
/// environment variable name.
fn is_env_assignment(token: &str) -> bool {
    match token.split_once('=') {
        Some((name, _)) => {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Normalize a head token into a candidate command name: keep only the final
/// path component (both `/` and `\` separators), lowercase, strip `.exe`.
fn normalize_command(token: &str) -> Option<String> {
    let base = token
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(token);
    let mut name = base.to_lowercase();
    if let Some(stripped) = name.strip_suffix(".exe") {
        name = stripped.to_string();
    }
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
