//! Splits converted Markdown into bullet-ready lines.

use regex::Regex;
use std::sync::OnceLock;

fn heading_markers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:#+[ \t]*)*(.*)$").expect("static heading pattern"))
}

/// Strips any leading run of heading markers (`#`, `## `, `# ## `, ...).
pub fn strip_heading_markers(line: &str) -> &str {
    heading_markers()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(line, |m| m.as_str())
}

/// Yields one entry per non-empty Markdown line, heading markers removed.
///
/// Zero-length lines are dropped; a line that only held markers still yields
/// an (empty) entry so the count matches the Markdown's non-empty lines.
pub fn flatten(markdown: &str) -> impl Iterator<Item = &str> {
    markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(strip_heading_markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_atx_markers() {
        assert_eq!(strip_heading_markers("# Title"), "Title");
        assert_eq!(strip_heading_markers("###   Deep"), "Deep");
        assert_eq!(strip_heading_markers("#tag first"), "tag first");
        assert_eq!(strip_heading_markers("## # nested"), "nested");
    }

    #[test]
    fn keeps_inner_hashes() {
        assert_eq!(strip_heading_markers("issue #42 fixed"), "issue #42 fixed");
        assert_eq!(strip_heading_markers(" # indented"), " # indented");
    }

    #[test]
    fn drops_empty_lines_and_carriage_returns() {
        let lines: Vec<&str> = flatten("## Hi\r\n\r\nHello\n\n\n---\n").collect();
        assert_eq!(lines, vec!["Hi", "Hello", "---"]);
    }

    #[test]
    fn marker_only_line_still_counts() {
        let lines: Vec<&str> = flatten("a\n##\nb").collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn whitespace_lines_are_not_empty() {
        assert_eq!(flatten("  \n").count(), 1);
    }
}
