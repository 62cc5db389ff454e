//! Small string helpers shared by the roster renderer and the commands.

/// Escapes Discord markdown control characters so user-chosen names render
/// verbatim.
pub fn escape_markdown(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '*' | '_' | '~' | '`' | '|' | '>' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Truncates a string to at most `max_chars` characters, ending with an
/// ellipsis when shortened.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Builds a display name: `username (nickname)` when a nickname is known and
/// differs from the username, otherwise the bare username.
pub fn display_name(username: &str, nickname: Option<&str>) -> String {
    match nickname.map(str::trim) {
        Some(nick) if !nick.is_empty() && nick != username => format!("{username} ({nick})"),
        _ => username.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("snake_case*bold*"), "snake\\_case\\*bold\\*");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ñññññññ", 5), "ññ...");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("zircon", Some("Zee")), "zircon (Zee)");
        assert_eq!(display_name("zircon", None), "zircon");
        assert_eq!(display_name("zircon", Some("  ")), "zircon");
        assert_eq!(display_name("zircon", Some("zircon")), "zircon");
    }
}
