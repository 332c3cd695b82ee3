//! Core library for wikioutline
//!
//! This crate is the **Functional Core** of wikioutline. It holds pure
//! transformations with zero I/O, while the `wikioutline` crate does the
//! fetching, serving and printing (the Imperative Shell).
//!
//! # Module Organization
//!
//! - [`wiki`]: Article slugs, article URLs and upstream status classification
//! - [`outline`]: Heading extraction from article HTML and Markdown outline rendering
//!
//! # Example Usage
//!
//! ```rust
//! use wikioutline_core::outline::{build_outline, OutlineMode};
//!
//! let html = r#"<div id="content">
//!     <h1 id="firstHeading">France</h1>
//!     <h2>History</h2>
//!     <h2>References</h2>
//! </div>"#;
//!
//! let outline = build_outline(html, "France", OutlineMode::Contents).unwrap();
//! assert_eq!(outline.to_markdown(), "# Contents\n## France\n### History");
//! ```

pub mod outline;
pub mod wiki;
