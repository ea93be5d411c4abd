/// Built-in blocklist tables for the command filter.
///
/// Two deliberately separate layers: name rules reject a command in *any*
/// form (there is a dedicated tool the agent should use instead, or the
/// command is flatly too dangerous); pattern rules reject otherwise-safe
/// commands only when specific flag/argument combinations appear.

/// Returns the default pattern blocklist of (regex, reason) tuples.
/// Patterns are matched case-insensitively against the entire raw line.
pub fn default_pattern_rules() -> Vec<(String, String)> {
    vec![
        // Output redirection
        (r"\s+>\s+".into(), "Output redirection is blocked. Use the write_file tool instead".into()),
        (r"\s+>>\s+".into(), "Append redirection is blocked. Use the write_file tool instead".into()),
        (r"\s+2>\s+".into(), "Stderr redirection is blocked. Use the write_file tool instead".into()),
        // Dangerous combinations
        (r"\bkill\s+-9\b".into(), "Forced kill (-9) is blocked".into()),
        (r"\bpkill\s+-9\b".into(), "Forced pkill (-9) is blocked".into()),
        (r"\binit\s+[06]\b".into(), "init 0/6 is blocked".into()),
        (r"\bdd\s+if=".into(), "dd write operations are blocked".into()),
        (r"\bsystemctl\s+(poweroff|reboot|halt)\b".into(), "systemctl power commands are blocked".into()),
        (r"\bshutdown\s+(now|-[hr])".into(), "shutdown commands are blocked".into()),
        (r"\bnetsh\s+advfirewall\b".into(), "Firewall modification is blocked".into()),
        // Package removal
        (r"\bapt(-get)?\s+(remove|purge)\b".into(), "Package removal is blocked".into()),
        (r"\byum\s+(remove|erase)\b".into(), "Package removal is blocked".into()),
        (r"\brpm\s+-e\b".into(), "Package removal is blocked".into()),
        (r"\bpip\s+uninstall\b".into(), "pip uninstall is blocked".into()),
        (r"\bnpm\s+uninstall\b".into(), "npm uninstall is blocked".into()),
        // Archive creation (viewing is allowed)
        (r"\btar\s+.*-c".into(), "Archive creation is blocked (listing with -t is allowed)".into()),
        (r"\bzip\s+-r\b".into(), "zip creation is blocked".into()),
        (r"\b7z\s+a\b".into(), "7z archive creation is blocked".into()),
    ]
}

/// Returns the default name blocklist of (command, reason) tuples.
/// Names match the extracted per-segment command head only, never substrings,
/// so a binary named `mcpserver` does not trip the `cp` rule.
pub fn default_blocked_names() -> Vec<(String, String)> {
    const NAMES: &[(&str, &str)] = &[
        // Deletion (use the delete_file tool instead)
        ("rm", "use the delete_file tool instead"),
        ("rmdir", "use the delete_file tool instead"),
        ("shred", "use the delete_file tool instead"),
        ("del", "use the delete_file tool instead"),
        ("erase", "use the delete_file tool instead"),
        // In-place writes (use the write_file tool instead)
        ("tee", "use the write_file tool instead"),
        // Interactive editors (use the edit_file tool instead)
        ("vi", "use the edit_file tool instead"),
        ("vim", "use the edit_file tool instead"),
        ("nvim", "use the edit_file tool instead"),
        ("nano", "use the edit_file tool instead"),
        ("emacs", "use the edit_file tool instead"),
        ("ed", "use the edit_file tool instead"),
        ("notepad", "use the edit_file tool instead"),
        // Move/rename (use the move_file tool instead)
        ("mv", "use the move_file tool instead"),
        ("rename", "use the move_file tool instead"),
        ("ren", "use the move_file tool instead"),
        // Copy (use the copy_file tool instead)
        ("cp", "use the copy_file tool instead"),
        ("xcopy", "use the copy_file tool instead"),
        ("robocopy", "use the copy_file tool instead"),
        // System power control
        ("reboot", "system power commands are not allowed"),
        ("shutdown", "system power commands are not allowed"),
        ("halt", "system power commands are not allowed"),
        ("poweroff", "system power commands are not allowed"),
        // Disk formatting/partitioning
        ("mkfs", "disk formatting is not allowed"),
        ("format", "disk formatting is not allowed"),
        ("fdisk", "disk operations are not allowed"),
        ("parted", "disk operations are not allowed"),
        ("gdisk", "disk operations are not allowed"),
        // Permission/ownership changes
        ("chmod", "permission changes are not allowed"),
        ("chown", "permission changes are not allowed"),
        ("chgrp", "permission changes are not allowed"),
        ("attrib", "permission changes are not allowed"),
        // User account management
        ("useradd", "user account management is not allowed"),
        ("userdel", "user account management is not allowed"),
        ("usermod", "user account management is not allowed"),
        ("passwd", "user account management is not allowed"),
        ("adduser", "user account management is not allowed"),
        ("deluser", "user account management is not allowed"),
        // Forceful process termination (use the kill_process tool instead)
        ("killall", "use the kill_process tool instead"),
        ("taskkill", "use the kill_process tool instead"),
        // Firewall
        ("iptables", "firewall modification is not allowed"),
    ];

    NAMES
        .iter()
        .map(|(n, r)| (n.to_string(), r.to_string()))
        .collect()
}

/// Human-readable category summary of the blocklist, shown by `bashgate rules`.
pub fn blocklist_summary() -> String {
    const CATEGORIES: &[(&str, &str)] = &[
        ("Delete (use delete_file)", "rm, rmdir, del, shred, erase"),
        ("Write (use write_file)", "tee, >, >>, 2>"),
        ("Edit (use edit_file)", "vim, nano, vi, emacs, ed, notepad"),
        ("Move (use move_file)", "mv, rename, ren"),
        ("Copy (use copy_file)", "cp, xcopy, robocopy"),
        ("System power", "reboot, shutdown, halt, poweroff, init 0/6"),
        ("Disk tools", "mkfs, fdisk, format, parted, gdisk, dd if="),
        ("Permissions", "chmod, chown, chgrp, attrib"),
        ("User accounts", "useradd, userdel, passwd, adduser, deluser"),
        ("Process kill (use kill_process)", "killall, taskkill, kill -9"),
        ("Firewall", "iptables, netsh advfirewall"),
        ("Package removal", "apt remove, yum remove, rpm -e, pip/npm uninstall"),
        ("Archive creation (viewing allowed)", "tar -c, zip -r, 7z a"),
    ];

    CATEGORIES
        .iter()
        .map(|(cat, cmds)| format!("  {cat}: {cmds}"))
        .collect::<Vec<_>>()
        .join("\n")
}
