//! Response formatting: turns raw model output into presentation-ready
//! text or an HTML fragment.
//!
//! Every transform here is pure, degrades gracefully on malformed input,
//! and never panics. Malformed structure (e.g. an unterminated code fence)
//! simply falls through to plain-paragraph handling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MULTI_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
/// Fenced code block with optional language tag. The lazy body match leaves
/// an unterminated fence unmatched, so it falls through to paragraph handling.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n?(.*?)```").unwrap());
/// Stricter fence shape used by quick formatting: the newline after the
/// opening marker is mandatory, so inline triple-backtick runs are left alone.
static CODE_FENCE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,6})\s*(.+)$").unwrap());
static LIST_MARKER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([*-])\s*(.+)$").unwrap());

/// Rendering strategy for a raw model response, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Identity: the response is returned untouched.
    Raw,
    /// Light cleanup that leaves headers and lists as received.
    Quick,
    /// HTML fragment for direct display.
    Html,
    /// Structured text cleanup, section by section. The default.
    Enhanced,
    /// Whitespace normalization only.
    Plain,
}

impl FormatMode {
    /// Resolves the mode string from a request. An absent mode means
    /// enhanced; an unrecognized mode falls back to plain text rather
    /// than erroring.
    pub fn parse(mode: Option<&str>) -> Self {
        match mode {
            None => FormatMode::Enhanced,
            Some("raw") => FormatMode::Raw,
            Some("quick") => FormatMode::Quick,
            Some("html") => FormatMode::Html,
            Some("enhanced") => FormatMode::Enhanced,
            Some("plain") => FormatMode::Plain,
            Some(_) => FormatMode::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatMode::Raw => "raw",
            FormatMode::Quick => "quick",
            FormatMode::Html => "html",
            FormatMode::Enhanced => "enhanced",
            FormatMode::Plain => "plain",
        }
    }
}

/// Structural classification of a blank-line-delimited section, judged by
/// its opening token. Checked in declaration order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Opens with a triple-backtick fence marker.
    CodeFence,
    /// Opens with a `#` header run.
    Header,
    /// First line opens with `- ` or `* `.
    UnorderedList,
    /// First line opens with `digits. `.
    OrderedList,
    /// Anything else: prose.
    Paragraph,
}

pub fn classify_section(section: &str) -> SectionKind {
    if section.starts_with("```") {
        SectionKind::CodeFence
    } else if section.starts_with('#') {
        SectionKind::Header
    } else if section.starts_with("- ") || section.starts_with("* ") {
        SectionKind::UnorderedList
    } else if ORDERED_MARKER.is_match(section) {
        SectionKind::OrderedList
    } else {
        SectionKind::Paragraph
    }
}

/// Formats a raw model response for display. Empty input short-circuits
/// to an empty string for every mode.
pub fn format(raw: &str, mode: FormatMode) -> String {
    if raw.is_empty() {
        return String::new();
    }

    match mode {
        FormatMode::Raw => raw.to_string(),
        FormatMode::Quick => format_quick(raw),
        FormatMode::Html => format_html(raw.trim()),
        FormatMode::Enhanced => format_enhanced(raw.trim()),
        FormatMode::Plain => format_plain(raw.trim()),
    }
}

/// Basic whitespace cleanup: 3+ newlines collapse to a paragraph break,
/// space/tab runs collapse to a single space. Idempotent.
pub fn format_plain(text: &str) -> String {
    let formatted = MULTI_NEWLINE.replace_all(text, "\n\n");
    let formatted = SPACE_RUN.replace_all(&formatted, " ");
    formatted.trim().to_string()
}

/// Structured text cleanup: splits on blank lines, tidies each section by
/// kind, and rejoins with exactly one blank line between sections.
/// Whitespace-only sections contribute nothing.
pub fn format_enhanced(text: &str) -> String {
    let mut sections: Vec<String> = Vec::new();

    for section in text.split("\n\n") {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        match classify_section(section) {
            // Code and headers are assumed well-formed; pass through verbatim.
            SectionKind::CodeFence | SectionKind::Header => sections.push(section.to_string()),
            SectionKind::UnorderedList => sections.push(tidy_list_lines(section)),
            // Text mode only opens a numbered list on the markers `1. ` to
            // `3. `; deeper numbering reads as prose.
            SectionKind::OrderedList if starts_with_text_list_marker(section) => {
                sections.push(tidy_list_lines(section))
            }
            SectionKind::OrderedList | SectionKind::Paragraph => {
                let cleaned = collapse_whitespace(section);
                if !cleaned.is_empty() {
                    sections.push(cleaned);
                }
            }
        }
    }

    sections.join("\n\n")
}

fn starts_with_text_list_marker(section: &str) -> bool {
    section.starts_with("1. ") || section.starts_with("2. ") || section.starts_with("3. ")
}

/// Trims each line of a list section and drops blank lines, preserving
/// per-item line breaks.
fn tidy_list_lines(section: &str) -> String {
    section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapses all whitespace runs, including embedded newlines, into single
/// spaces, producing one continuous line.
fn collapse_whitespace(section: &str) -> String {
    section.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders the response as an HTML fragment (no surrounding document).
///
/// The whole input is entity-escaped up front, then structure is rebuilt on
/// top of the escaped text, so user content can never inject markup. Not a
/// hardened sanitizer: escaping covers the standard entities only, and the
/// output is meant for a trusted rendering context.
pub fn format_html(text: &str) -> String {
    let escaped = escape_html(text);

    // Fence bodies were already escaped with the rest of the input; they are
    // escaped a second time here, so `&` in code renders as `&amp;amp;`.
    let with_code = CODE_FENCE.replace_all(&escaped, |caps: &Captures| {
        let lang = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str()).trim();
        format!(
            "<pre><code class=\"language-{lang}\">{}</code></pre>",
            escape_html(body)
        )
    });

    let mut paragraphs: Vec<String> = Vec::new();

    for para in with_code.split("\n\n") {
        let para = para.trim();
        // Empty chunks are carried through so paragraph spacing survives the
        // final rejoin; <pre> blocks were fully rendered above.
        if para.is_empty() || para.starts_with("<pre>") {
            paragraphs.push(para.to_string());
            continue;
        }

        match classify_section(para) {
            // A fence marker surviving to this point is unterminated; it
            // falls through to paragraph handling.
            SectionKind::CodeFence | SectionKind::Paragraph => {
                paragraphs.push(render_html_paragraph(para))
            }
            SectionKind::Header => paragraphs.push(render_html_header(para)),
            SectionKind::UnorderedList => paragraphs.push(render_html_unordered_list(para)),
            SectionKind::OrderedList => paragraphs.push(render_html_ordered_list(para)),
        }
    }

    let assembled = paragraphs.join("\n");
    INLINE_CODE
        .replace_all(&assembled, "<code>$1</code>")
        .into_owned()
}

fn render_html_header(para: &str) -> String {
    let level = para.chars().take_while(|&c| c == '#').count().min(6);
    let text = para.trim_start_matches(['#', ' ']).trim();
    format!("<h{level}>{text}</h{level}>")
}

fn render_html_unordered_list(para: &str) -> String {
    let items: String = para
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.starts_with("- ") || trimmed.starts_with("* ")
        })
        .map(|line| {
            let item: String = line.chars().skip(2).collect();
            format!("<li>{}</li>", item.trim())
        })
        .collect();
    format!("<ul>{items}</ul>")
}

fn render_html_ordered_list(para: &str) -> String {
    let items: String = para
        .lines()
        .map(str::trim)
        .filter(|line| ORDERED_MARKER.is_match(line))
        .map(|line| format!("<li>{}</li>", ORDERED_MARKER.replace(line, "").trim()))
        .collect();
    format!("<ol>{items}</ol>")
}

fn render_html_paragraph(para: &str) -> String {
    format!("<p>{}</p>", para.replace('\n', "<br>"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quick cleanup for immediate display: trims, collapses blank-line runs,
/// and normalizes fence padding. Headers and lists are left exactly as
/// received.
pub fn format_quick(text: &str) -> String {
    let formatted = text.trim();
    let formatted = MULTI_NEWLINE.replace_all(formatted, "\n\n");
    let formatted = CODE_FENCE_BLOCK.replace_all(&formatted, |caps: &Captures| {
        let lang = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str()).trim();
        format!("```{lang}\n{body}\n```")
    });
    formatted.into_owned()
}

/// Normalizes markdown conventions in place: one space after header runs
/// (with a blank line following), one space after list markers, and
/// paragraph breaks collapsed to a single blank line. Not wired into the
/// dispatch table; callers reach for it directly.
#[allow(dead_code)]
pub fn format_markdown(text: &str) -> String {
    let formatted = text.trim();
    let formatted = HEADER_LINE.replace_all(formatted, "$1 $2\n");
    let formatted = MULTI_NEWLINE.replace_all(&formatted, "\n\n");
    let formatted = LIST_MARKER_LINE.replace_all(&formatted, "$1 $2");
    formatted.into_owned()
}
