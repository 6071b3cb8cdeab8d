use std::path::{Path, PathBuf};

use tracing::debug;

use crate::blog::resolve_blogposts;
use crate::config::SiteLayout;
use crate::error::{BuildError, Result};
use crate::partial::resolve_partial;
use crate::project::resolve_projects;
use crate::tag::{Tag, Verb, scan};

pub const TEMPLATE_EXTENSION: &str = "html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub path: PathBuf,
}

impl Template {
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| BuildError::io(&self.path, e))
    }
}

/// Resolve a single tag against the current text.
pub fn resolve_tag(text: &str, tag: &Tag, layout: &SiteLayout) -> Result<String> {
    debug!(verb = %tag.verb, argument = %tag.argument, column = tag.column, "resolving tag");

    match tag.verb {
        Verb::Replace => resolve_partial(text, &tag.argument, tag.column, layout),
        Verb::Projects => resolve_projects(text, &tag.argument, tag.column, layout),
        Verb::Blogposts => resolve_blogposts(text, &tag.argument, tag.column, layout),
        // Left for the post converter
        Verb::Blogpost => Ok(text.to_string()),
    }
}

/// Resolve every tag found in `text`, in line order. Each step sees the
/// output of the previous one.
pub fn resolve_template(text: &str, layout: &SiteLayout) -> Result<String> {
    scan(text)
        .iter()
        .try_fold(text.to_string(), |acc, tag| resolve_tag(&acc, tag, layout))
}

/// Templates in build order: the generic blogpost template first, then the
/// rest by filename.
pub fn discover_templates(layout: &SiteLayout) -> Result<Vec<Template>> {
    let dir = &layout.templates;
    let entries = std::fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;

    let mut templates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BuildError::io(dir, e))?.path();
        if !path.is_file() || !has_template_extension(&path) {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        templates.push(Template { name, path });
    }

    templates.sort_by(|a, b| {
        let a_rest = a.name != layout.generic_template;
        let b_rest = b.name != layout.generic_template;
        a_rest.cmp(&b_rest).then_with(|| a.name.cmp(&b.name))
    });

    Ok(templates)
}

fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == TEMPLATE_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, SiteLayout) {
        let dir = TempDir::new().unwrap();
        let layout = SiteLayout::with_defaults(dir.path(), dir.path().join("build"));
        for folder in [&layout.templates, &layout.partials, &layout.blogposts] {
            std::fs::create_dir_all(folder).unwrap();
        }
        (dir, layout)
    }

    #[test]
    fn test_no_tags_is_identity() {
        let (_dir, layout) = site();
        let text = "<html>\n  <!-- a comment -->\n  <p>plain</p>\r\n</html>\n";
        assert_eq!(resolve_template(text, &layout).unwrap(), text);
    }

    #[test]
    fn test_tags_resolved_in_order() {
        let (_dir, layout) = site();
        std::fs::write(layout.partials.join("head.html"), "<head>\n</head>").unwrap();
        std::fs::write(layout.partials.join("nav.html"), "<nav></nav>").unwrap();
        std::fs::write(
            layout.blogposts.join("p.md"),
            "<!-- date: 2024-01-01 -->\n<!-- title: P -->\n",
        )
        .unwrap();

        let text = "<html>\n  <!-- replace:head.html -->\n  <body>\n    <!-- replace:nav.html -->\n    <!-- blogposts:blogposts -->\n  </body>\n</html>";
        let out = resolve_template(text, &layout).unwrap();

        assert!(out.starts_with("<html>\n  <head>\n  </head>\n  <body>\n    <nav></nav>\n    <div class=\"blogpost-header\">"));
        assert!(!out.contains("<!-- replace:"));
        assert!(!out.contains("<!-- blogposts:"));
    }

    #[test]
    fn test_partial_tags_are_not_re_scanned() {
        let (_dir, layout) = site();
        std::fs::write(layout.partials.join("outer.html"), "<!-- replace:inner.html -->").unwrap();

        let out = resolve_template("<!-- replace:outer.html -->", &layout).unwrap();
        assert_eq!(out, "<!-- replace:inner.html -->");
    }

    #[test]
    fn test_blogpost_slot_untouched() {
        let (_dir, layout) = site();
        let text = "<article>\n  <!-- blogpost:content -->\n</article>";
        assert_eq!(resolve_template(text, &layout).unwrap(), text);
    }

    #[test]
    fn test_missing_partial_aborts() {
        let (_dir, layout) = site();
        let err = resolve_template("<!-- replace:nope.html -->", &layout).unwrap_err();
        assert!(matches!(err, BuildError::MissingResource(_)));
    }

    #[test]
    fn test_discover_generic_first() {
        let (_dir, layout) = site();
        for name in ["about.html", "blogpost_generic.html", "index.html", "projects.json"] {
            std::fs::write(layout.templates.join(name), "").unwrap();
        }

        let names: Vec<_> = discover_templates(&layout)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["blogpost_generic.html", "about.html", "index.html"]);
    }
}
