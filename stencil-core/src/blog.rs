//! Blogposts: Markdown files whose first lines are `<!-- key: value -->`
//! metadata comments. `date` is required; `title` falls back to `Untitled`.
//!
//! Accepted `date` formats, compared chronologically:
//! `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD HH:MM:SS`,
//! `YYYY-MM-DDTHH:MM:SS` and RFC 3339.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::config::SiteLayout;
use crate::error::{BuildError, Result};
use crate::indent::splice;
use crate::markdown::render_markdown;
use crate::tag::{self, Verb};

pub const UNTITLED: &str = "Untitled";
pub const CONTENT_SLOT: &str = "content";

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub filename: String,
    pub source: PathBuf,
    pub headers: BTreeMap<String, String>,
    pub date: NaiveDateTime,
    pub content: String,
}

impl BlogPost {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| BuildError::MissingResource(path.to_path_buf()))?;

        let headers = parse_headers(&content);
        let raw_date = headers.get("date").ok_or_else(|| BuildError::MissingHeader {
            path: path.to_path_buf(),
            key: "date",
        })?;
        let date = parse_date(raw_date).ok_or_else(|| BuildError::InvalidDate {
            path: path.to_path_buf(),
            value: raw_date.clone(),
        })?;

        Ok(Self {
            filename,
            source: path.to_path_buf(),
            headers,
            date,
            content,
        })
    }

    pub fn title(&self) -> &str {
        self.headers.get("title").map(String::as_str).unwrap_or(UNTITLED)
    }

    /// The `date` header exactly as written.
    pub fn raw_date(&self) -> &str {
        self.headers.get("date").map(String::as_str).unwrap_or_default()
    }

    pub fn output_name(&self) -> String {
        Path::new(&self.filename)
            .with_extension("html")
            .to_string_lossy()
            .to_string()
    }
}

/// Collect the leading metadata comments. Scanning stops at the first line
/// that is not one.
pub fn parse_headers(content: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    for line in content.split('\n') {
        let Some(body) = line.trim_end().strip_prefix(tag::TAG_START) else {
            break;
        };
        let body = body.strip_suffix(tag::TAG_END).unwrap_or(body);
        let Some((key, value)) = body.split_once(':') else {
            break;
        };
        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    headers
}

pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Every `.md` file in `folder`, newest first. Posts sharing a date keep
/// filename order.
pub fn read_posts(folder: &Path) -> Result<Vec<BlogPost>> {
    let entries = std::fs::read_dir(folder).map_err(|e| BuildError::io(folder, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BuildError::io(folder, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut posts = paths
        .iter()
        .map(|p| BlogPost::from_file(p))
        .collect::<Result<Vec<_>>>()?;
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(posts)
}

pub fn render_header(post: &BlogPost, blog_folder: &str) -> String {
    format!(
        "<div class=\"blogpost-header\">\n  <span class=\"blogpost-date\">{date}</span>\n  <a class=\"blogpost-link\" href=\"./{blog_folder}/{href}\">{title}</a>\n</div>\n",
        date = post.raw_date(),
        href = post.output_name(),
        title = post.title(),
    )
}

/// Splice the header list for the posts in `folder` (relative to the site
/// root) over its `blogposts` tag.
pub fn resolve_blogposts(
    template: &str,
    folder: &str,
    column: usize,
    layout: &SiteLayout,
) -> Result<String> {
    let posts = read_posts(&layout.root.join(folder))?;
    debug!(folder, count = posts.len(), "rendering blogpost headers");

    let rendered: String = posts
        .iter()
        .map(|p| render_header(p, &layout.blog_folder))
        .collect();

    Ok(splice(
        template,
        &tag::literal(Verb::Blogposts, folder),
        &rendered,
        column,
    ))
}

/// Render every post into the resolved generic template and write one page
/// per post. Returns the written paths.
pub fn convert_posts(layout: &SiteLayout) -> Result<Vec<PathBuf>> {
    let posts = read_posts(&layout.blogposts)?;
    let blog_dir = layout.output_blog();

    if blog_dir.exists() {
        std::fs::remove_dir_all(&blog_dir).map_err(|e| BuildError::io(&blog_dir, e))?;
    }
    std::fs::create_dir_all(&blog_dir).map_err(|e| BuildError::io(&blog_dir, e))?;

    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let generic_path = layout.resolved_generic_template();
    if !generic_path.is_file() {
        return Err(BuildError::MissingGenericTemplate(generic_path));
    }
    let generic = std::fs::read_to_string(&generic_path)
        .map_err(|e| BuildError::io(&generic_path, e))?;
    let slot = tag::literal(Verb::Blogpost, CONTENT_SLOT);

    let mut written = Vec::with_capacity(posts.len());
    for post in &posts {
        let body = render_markdown(&post.content, &layout.syntax_theme);
        let page = generic.replace(&slot, &body);

        let out_path = blog_dir.join(post.output_name());
        std::fs::write(&out_path, page).map_err(|e| BuildError::io(&out_path, e))?;
        debug!(post = %post.source.display(), out = %out_path.display(), "converted post");
        written.push(out_path);
    }

    info!(count = written.len(), "blogposts converted");
    Ok(written)
}
