//! Page file assembly.
//!
//! Each converted section is appended to two page-scoped files under the
//! project root: `pages/page-<page>.php` for markup and
//! `assets/css/pages/page-<page>.css` for styles. Missing files are created
//! with a short header first.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::CliError;

/// What happened to one destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub created: bool,
}

/// Wrap section markup in a labeled `<section>` block.
pub fn page_block(html: &str, section: &str, notes: &str) -> String {
    let mut lines = vec![format!("\n<!-- ========== Section: {section} ========== -->")];
    if !notes.is_empty() {
        lines.push(format!("<!-- Notes: {notes} -->"));
    }
    lines.push(format!("<section class=\"{section}\">"));
    lines.push(html.to_string());
    lines.push("</section>".to_string());
    lines.join("\n")
}

/// Wrap a rendered stylesheet in a labeled comment block.
///
/// The block ends with a single newline after the last rule.
pub fn css_block(css: &str, section: &str, notes: &str) -> String {
    let mut lines = vec![format!("\n/* ========== Section: {section} ========== */")];
    if !notes.is_empty() {
        lines.push(format!("/* Notes: {notes} */"));
    }
    lines.push(String::new());

    let rules = css.trim_end();
    if !rules.is_empty() {
        lines.push(rules.to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn page_path(base: &Path, page: &str) -> PathBuf {
    base.join("pages").join(format!("page-{page}.php"))
}

pub fn css_path(base: &Path, page: &str) -> PathBuf {
    base.join("assets")
        .join("css")
        .join("pages")
        .join(format!("page-{page}.css"))
}

fn page_header(page: &str) -> String {
    format!("<?php\n/**\n * Page: {page}\n */\n?>")
}

fn css_header(page: &str) -> String {
    format!("/**\n * Page: {page}\n */\n")
}

/// Append a section's markup and styles to the page files under `base`.
pub fn write_section(
    base: &Path,
    page: &str,
    section: &str,
    notes: &str,
    output: &figpress_codegen::SectionOutput,
) -> Result<[WriteOutcome; 2], CliError> {
    let page_outcome = append_or_create(
        &page_path(base, page),
        &page_header(page),
        &page_block(&output.html, section, notes),
    )?;
    let css_outcome = append_or_create(
        &css_path(base, page),
        &css_header(page),
        &css_block(&output.css, section, notes),
    )?;
    Ok([page_outcome, css_outcome])
}

/// Append `block` to `path`, or create it with `header` followed by `block`.
fn append_or_create(path: &Path, header: &str, block: &str) -> Result<WriteOutcome, CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let created = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    if created {
        file.write_all(header.as_bytes()).map_err(write_error)?;
    }
    file.write_all(block.as_bytes()).map_err(write_error)?;

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        created,
    })
}
