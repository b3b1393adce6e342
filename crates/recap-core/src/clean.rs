//! Boilerplate removal for daily notes
//!
//! Strips, in order: a leading frontmatter block, the `# Dailies` checklist,
//! the `calendar-nav` fenced block, and the `# Daily Law` checklist. Each
//! block is removed at most once per call. The result is trimmed.
//!
//! Leading whitespace and a byte order mark are dropped before matching, and
//! heading and fence lines match regardless of surrounding spaces, so the
//! final trim never exposes a block a second pass would remove.

use std::sync::OnceLock;

use regex::Regex;

const FRONTMATTER_DELIMITER: &str = "---";
const DAILIES_HEADING: &str = "# Dailies";
const DAILY_LAW_HEADING: &str = "# Daily Law";
const CALENDAR_NAV_FENCE: &str = "```calendar-nav";
const FENCE: &str = "```";
const BYTE_ORDER_MARK: char = '\u{feff}';

static CHECKLIST_ITEM: OnceLock<Regex> = OnceLock::new();

fn checklist_item() -> &'static Regex {
    CHECKLIST_ITEM.get_or_init(|| Regex::new(r"^- \[[ x]\](\s.*)?$").expect("valid checklist regex"))
}

/// Remove known boilerplate from the raw text of one note
pub fn clean(raw: &str) -> String {
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw).trim_start();
    let text = strip_frontmatter(raw);
    let text = strip_checklist_block(text, DAILIES_HEADING);
    let text = strip_fenced_block(&text, CALENDAR_NAV_FENCE);
    let text = strip_checklist_block(&text, DAILY_LAW_HEADING);
    text.trim().to_string()
}

/// Line content without its terminator
fn bare(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

/// Drop a leading `---` block and one blank line after it. An unterminated
/// block leaves the text untouched.
fn strip_frontmatter(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    match lines.next() {
        Some(first) if bare(first) == FRONTMATTER_DELIMITER => {}
        _ => return text,
    }

    let mut offset = text.find('\n').map_or(text.len(), |pos| pos + 1);
    let mut closed = false;
    for line in lines.by_ref() {
        offset += line.len();
        if bare(line) == FRONTMATTER_DELIMITER {
            closed = true;
            break;
        }
    }
    if !closed {
        return text;
    }

    if let Some(next) = lines.next() {
        if bare(next).trim().is_empty() {
            offset += next.len();
        }
    }
    &text[offset..]
}

/// Drop the first `heading` line and the checklist items directly below it
fn strip_checklist_block(text: &str, heading: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let Some(start) = lines.iter().position(|l| bare(l).trim() == heading) else {
        return text.to_string();
    };

    let end = lines[start + 1..]
        .iter()
        .position(|l| !checklist_item().is_match(bare(l)))
        .map_or(lines.len(), |n| start + 1 + n);

    let mut out = String::with_capacity(text.len());
    out.extend(lines[..start].iter().copied());
    out.extend(lines[end..].iter().copied());
    out
}

/// Drop the first fenced block opened by `opening`, through its closing fence.
/// An unclosed fence leaves the text untouched.
fn strip_fenced_block(text: &str, opening: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let Some(start) = lines.iter().position(|l| bare(l).trim() == opening) else {
        return text.to_string();
    };
    let Some(close) = lines[start + 1..]
        .iter()
        .position(|l| bare(l).trim() == FENCE)
    else {
        return text.to_string();
    };
    let end = start + 1 + close + 1;

    let mut out = String::with_capacity(text.len());
    out.extend(lines[..start].iter().copied());
    out.extend(lines[end..].iter().copied());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: &str = "---\ntag: a\n---\n\n# Dailies\n- [x] task one\n- [ ] task two\n\nBody text.\n";

    #[test]
    fn test_frontmatter_and_dailies_removed() {
        assert_eq!(clean(DAILY), "Body text.");
    }

    #[test]
    fn test_plain_text_only_trimmed() {
        assert_eq!(clean("\n  Just a thought.  \n\n"), "Just a thought.");
    }

    #[test]
    fn test_unterminated_frontmatter_left_untouched() {
        let raw = "---\ntag: a\nBody without closing delimiter";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_frontmatter_must_open_the_note() {
        let raw = "Intro\n---\ntag: a\n---\nBody";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_frontmatter_only_eats_one_blank_line() {
        assert_eq!(strip_frontmatter("---\na: 1\n---\n\n\nBody"), "\nBody");
        assert_eq!(strip_frontmatter("---\na: 1\n---\nBody"), "Body");
    }

    #[test]
    fn test_heading_without_checklist_drops_only_heading() {
        let raw = "# Dailies\nWent for a walk.\n- [ ] not part of block";
        assert_eq!(clean(raw), "Went for a walk.\n- [ ] not part of block");
    }

    #[test]
    fn test_checklist_run_stops_at_first_other_line() {
        let raw = "Morning\n# Dailies\n- [x] water\n- [ ] stretch\n- plain bullet\nEvening";
        assert_eq!(clean(raw), "Morning\n- plain bullet\nEvening");
    }

    #[test]
    fn test_calendar_nav_fence_removed() {
        let raw = "```calendar-nav\n[[2024-03-09]] | [[2024-03-11]]\n```\nNotes for the day.";
        assert_eq!(clean(raw), "Notes for the day.");
    }

    #[test]
    fn test_other_fences_kept() {
        let raw = "```rust\nfn main() {}\n```\nText";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_unclosed_calendar_nav_left_untouched() {
        let raw = "Top\n```calendar-nav\nnav";
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn test_daily_law_removed() {
        let raw = "Reflection.\n\n# Daily Law\n- [x] read\n- [x] exercise\n";
        assert_eq!(clean(raw), "Reflection.");
    }

    #[test]
    fn test_full_template() {
        let raw = "---\ncreated: 2024-03-10\n---\n\n```calendar-nav\nprev | next\n```\n# Dailies\n- [x] journal\n\nShipped the parser.\n\n# Daily Law\n- [ ] meditate\n";
        assert_eq!(clean(raw), "Shipped the parser.");
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "---\r\ntag: a\r\n---\r\n\r\n# Dailies\r\n- [x] one\r\nBody\r\n";
        assert_eq!(clean(raw), "Body");
    }

    #[test]
    fn test_block_removed_once_per_call() {
        let raw = "# Dailies\n- [x] one\nMiddle\n# Dailies\n- [ ] two\nEnd";
        assert_eq!(clean(raw), "Middle\n# Dailies\n- [ ] two\nEnd");
    }

    #[test]
    fn test_leading_whitespace_does_not_hide_blocks() {
        assert_eq!(clean("\n---\ntag: a\n---\n\nBody"), "Body");
        assert_eq!(clean("  # Dailies\n- [x] a\nBody"), "Body");
        assert_eq!(clean("---\na: 1\n---\n\n\n  # Dailies\n- [x] a\nBody"), "Body");
    }

    #[test]
    fn test_byte_order_mark_before_frontmatter() {
        assert_eq!(clean("\u{feff}---\ntag: a\n---\n\nBody text."), "Body text.");
        assert_eq!(clean("\u{feff}Plain"), "Plain");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            DAILY,
            "",
            "Body only",
            "---\nunterminated",
            "# Dailies\nText",
            "```calendar-nav\nx\n```\n# Daily Law\n- [x] a\nDone",
            "---\na: b\n---\n\n# Daily Law\n- [ ] x\n\n## Notes\n- [ ] keep me",
            "\n---\ntag: a\n---\n\nBody",
            "  # Dailies\n- [x] a\nBody",
            "---\na: 1\n---\n\n\n  # Dailies\n- [x] a\nBody",
            "\n\n  ```calendar-nav\nnav\n```\nBody",
            "\u{feff}---\ntag: a\n---\nBody",
            "\u{feff}\n# Daily Law\n- [ ] x\nBody",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
