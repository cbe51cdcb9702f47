// src/sanitize/title.rs
//! Removes a restated slide title from the head of the slide body.
//!
//! Models often open a slide body with its own heading, formatted in any
//! number of ways: bold, colon-suffixed, punctuation-stripped. Three passes
//! run in order, and each only ever looks at the head of what is left:
//!
//! 1. a line-level match of the first line under every normalization,
//! 2. a prefix match of the whole remaining body against the
//!    alphanumeric form of the title,
//! 3. a final line-level equality check on the alphanumeric forms.

use super::normalize::{alphanumeric, echoes};

/// Characters left behind once a title prefix has been cut off.
const PREFIX_RESIDUE: &[char] = &[':', '\n', '\r', '\t', ' ', '-', '•'];

/// Returns `content` with any restated `title` removed from its head.
pub fn strip_title_echo(title: &str, content: &str) -> String {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return content.to_string();
    }

    let mut lines: Vec<&str> = content.split('\n').collect();
    drop_leading_blank_lines(&mut lines);
    if lines.is_empty() {
        return String::new();
    }

    if echoes(lines[0].trim(), title) {
        lines.remove(0);
        drop_leading_blank_lines(&mut lines);
    }

    let mut body = lines.join("\n");

    let title_key = alphanumeric(title);
    if !title_key.is_empty() && body.to_lowercase().starts_with(&title_key) {
        let cut = title_key.chars().count();
        let rest: String = body.chars().skip(cut).collect();
        body = rest.trim().trim_start_matches(PREFIX_RESIDUE).to_string();
    }

    let mut lines: Vec<&str> = body.split('\n').collect();
    let title_key = title_key.trim();
    if alphanumeric(lines[0]).trim() == title_key {
        lines.remove(0);
        drop_leading_blank_lines(&mut lines);
    }

    lines.join("\n").trim().to_string()
}

fn drop_leading_blank_lines(lines: &mut Vec<&str>) {
    let blank = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    lines.drain(..blank);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_exact_title_line() {
        assert_eq!(
            strip_title_echo(
                "Machine Learning",
                "Machine Learning\n• ML enables automation\n• ML improves with data"
            ),
            "• ML enables automation\n• ML improves with data"
        );
    }

    #[test]
    fn drops_separator_stripped_title_line() {
        assert_eq!(
            strip_title_echo("AI: An Overview", "AI An Overview\n• fact one\n• fact two"),
            "• fact one\n• fact two"
        );
    }

    #[test]
    fn drops_markdown_title_and_following_blank_lines() {
        assert_eq!(
            strip_title_echo("Key Benefits", "\n\n**Key Benefits:**\n\n\n• Faster builds\n• Fewer bugs"),
            "• Faster builds\n• Fewer bugs"
        );
    }

    #[test]
    fn strips_title_prefix_glued_to_the_first_bullet() {
        // Once the heading line is gone the body still opens with the title.
        assert_eq!(
            strip_title_echo(
                "Rust",
                "Rust\nRust: memory safety without a garbage collector\n• Zero-cost abstractions"
            ),
            "memory safety without a garbage collector\n• Zero-cost abstractions"
        );
    }

    #[test]
    fn blank_content_comes_back_empty() {
        assert_eq!(strip_title_echo("Anything", "  \n \n"), "");
    }

    #[test]
    fn content_that_was_only_the_title_becomes_empty() {
        assert_eq!(strip_title_echo("Summary", "Summary"), "");
    }

    #[test]
    fn untouched_when_title_is_absent() {
        let content = "• Data drives modern systems\n• Models learn patterns";
        assert_eq!(strip_title_echo("Machine Learning", content), content);
    }

    #[test]
    fn only_the_first_line_is_considered() {
        let content = "• Opening remark\nMachine Learning\n• Closing remark";
        assert_eq!(strip_title_echo("Machine Learning", content), content);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let once = strip_title_echo(
            "Cloud Costs",
            "Cloud Costs\n• Reserved capacity lowers spend\n• Idle resources waste budget",
        );
        assert_eq!(strip_title_echo("Cloud Costs", &once), once);
    }
}
