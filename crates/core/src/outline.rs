use scraper::{node::Element, ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Fixed first line of an outline in [`OutlineMode::Contents`]
pub const CONTENTS_HEADING: &str = "Contents";

/// Section titles that never carry article structure
pub const EXCLUDED_SECTIONS: &[&str] = &[
    "Contents",
    "Welcome to Wikipedia",
    "See also",
    "References",
    "External links",
    "Further reading",
    "Notes",
    "Bibliography",
];

/// Class of the inline "[edit]" control MediaWiki renders inside headings
const EDIT_SECTION_CLASS: &str = "mw-editsection";

static CONTENT: LazyLock<Selector> = LazyLock::new(|| selector("div#content"));
static BODY_CONTENT: LazyLock<Selector> = LazyLock::new(|| selector("div#bodyContent"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1#firstHeading"));
static STRUCTURAL: LazyLock<Selector> = LazyLock::new(|| selector("h2, h3, h4, h5, h6"));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    #[error("Could not locate the main content container in the fetched page.")]
    ContentNotFound,

    #[error("Successfully fetched the page, but could not extract sufficient content headings beyond the title.")]
    InsufficientHeadings,
}

/// Which preamble the outline starts with, and how far headings are shifted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineMode {
    /// `# Contents`, then `## <title>`, then H2 as `###`
    #[default]
    Contents,
    /// `# <title>`, then H2 as `##`
    Title,
}

impl OutlineMode {
    /// Added to an HTML heading level to get its Markdown level
    pub fn level_offset(self) -> usize {
        match self {
            OutlineMode::Contents => 1,
            OutlineMode::Title => 0,
        }
    }
}

impl fmt::Display for OutlineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineMode::Contents => write!(f, "contents"),
            OutlineMode::Title => write!(f, "title"),
        }
    }
}

/// A structural heading found inside the content container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub html_level: u8,
    /// All text under the heading, editor controls included
    pub raw_text: String,
    /// Text with editor controls removed, trimmed
    pub clean_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub headings: Vec<HeadingNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineLine {
    pub level: usize,
    pub text: String,
}

impl OutlineLine {
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for OutlineLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "#".repeat(self.level), self.text)
    }
}

/// Rendered outline: preamble lines followed by structural lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineDocument {
    title: Option<String>,
    lines: Vec<OutlineLine>,
    structural: usize,
}

impl OutlineDocument {
    /// Title detected on the page, never the subject fallback
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn lines(&self) -> &[OutlineLine] {
        &self.lines
    }

    /// Number of lines that came from structural headings
    pub fn structural_count(&self) -> usize {
        self.structural
    }

    /// Lines joined with `\n`, no trailing newline
    pub fn to_markdown(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for OutlineDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Parse an article page and collect its title and structural headings
///
/// Looks for `div#content`, falling back to `div#bodyContent`. The title is
/// searched across the whole document. Headings whose cleaned text is empty
/// or exactly matches [`EXCLUDED_SECTIONS`] are dropped.
pub fn extract_headings(html: &str) -> Result<ExtractedPage, OutlineError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&CONTENT)
        .next()
        .or_else(|| document.select(&BODY_CONTENT).next())
        .ok_or(OutlineError::ContentNotFound)?;

    let title = document
        .select(&TITLE)
        .next()
        .map(clean_text)
        .filter(|t| !t.is_empty());

    let headings = container
        .select(&STRUCTURAL)
        .filter_map(heading_node)
        .filter(|h| !is_excluded(&h.clean_text))
        .collect();

    Ok(ExtractedPage { title, headings })
}

/// Render extracted headings as a Markdown outline
///
/// `subject` stands in for the title in [`OutlineMode::Title`] when the page
/// had none. Levels are not clamped, so an H6 may come out with seven hashes.
pub fn render_outline(
    page: &ExtractedPage,
    subject: &str,
    mode: OutlineMode,
) -> Result<OutlineDocument, OutlineError> {
    let mut lines = Vec::with_capacity(page.headings.len() + 2);

    match mode {
        OutlineMode::Contents => {
            lines.push(OutlineLine::new(1, CONTENTS_HEADING));
            if let Some(title) = &page.title {
                lines.push(OutlineLine::new(2, title.as_str()));
            }
        }
        OutlineMode::Title => {
            let title = page
                .title
                .as_deref()
                .unwrap_or(subject)
                .trim()
                .to_string();
            let title = if title.is_empty() {
                CONTENTS_HEADING.to_string()
            } else {
                title
            };
            lines.push(OutlineLine::new(1, title));
        }
    }

    let offset = mode.level_offset();
    let mut structural = 0;
    for heading in &page.headings {
        lines.push(OutlineLine::new(
            usize::from(heading.html_level) + offset,
            heading.clean_text.as_str(),
        ));
        structural += 1;
    }

    if structural == 0 {
        return Err(OutlineError::InsufficientHeadings);
    }

    Ok(OutlineDocument {
        title: page.title.clone(),
        lines,
        structural,
    })
}

/// Extract and render in one step
pub fn build_outline(
    html: &str,
    subject: &str,
    mode: OutlineMode,
) -> Result<OutlineDocument, OutlineError> {
    let page = extract_headings(html)?;
    render_outline(&page, subject, mode)
}

pub fn is_excluded(text: &str) -> bool {
    EXCLUDED_SECTIONS.contains(&text)
}

fn heading_node(element: ElementRef<'_>) -> Option<HeadingNode> {
    let html_level = heading_level(element.value().name())?;
    let raw_text = element.text().collect::<String>();
    let clean_text = clean_text(element);

    if clean_text.is_empty() {
        return None;
    }

    Some(HeadingNode {
        html_level,
        raw_text,
        clean_text,
    })
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')?
        .parse()
        .ok()
        .filter(|level| (1..=6).contains(level))
}

fn clean_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    push_visible_text(element, &mut text);
    text.trim().to_string()
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_editor_control(child.value()) {
                push_visible_text(child, out);
            }
        }
    }
}

fn is_editor_control(element: &Element) -> bool {
    element.name() == "span" && element.classes().any(|class| class == EDIT_SECTION_CLASS)
}
