use tracing::debug;

use crate::config::SiteLayout;
use crate::error::{BuildError, Result};
use crate::indent::splice;
use crate::tag::{self, Verb};

/// Splice the partial named `filename` over its `replace` tag.
pub fn resolve_partial(
    template: &str,
    filename: &str,
    column: usize,
    layout: &SiteLayout,
) -> Result<String> {
    let path = layout.partials.join(filename);
    if !path.is_file() {
        return Err(BuildError::MissingResource(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
    debug!(partial = %path.display(), column, "inserting partial");

    Ok(splice(
        template,
        &tag::literal(Verb::Replace, filename),
        &content,
        column,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout_with_partial(name: &str, content: &str) -> (TempDir, SiteLayout) {
        let dir = TempDir::new().unwrap();
        let layout = SiteLayout::with_defaults(dir.path(), dir.path().join("build"));
        std::fs::create_dir_all(&layout.partials).unwrap();
        std::fs::write(layout.partials.join(name), content).unwrap();
        (dir, layout)
    }

    #[test]
    fn test_partial_replaces_tag() {
        let (_dir, layout) = layout_with_partial("footer.html", "<footer>\n  bye\n</footer>");
        let template = "<body>\n  <!-- replace:footer.html -->\n</body>";

        let out = resolve_partial(template, "footer.html", 2, &layout).unwrap();

        assert_eq!(out, "<body>\n  <footer>\n    bye\n  </footer>\n</body>");
        assert!(!out.contains("replace:footer.html"));
    }

    #[test]
    fn test_partial_only_first_occurrence() {
        let (_dir, layout) = layout_with_partial("hr.html", "<hr>");
        let template = "<!-- replace:hr.html -->\n<!-- replace:hr.html -->";

        let out = resolve_partial(template, "hr.html", 0, &layout).unwrap();

        assert_eq!(out, "<hr>\n<!-- replace:hr.html -->");
    }

    #[test]
    fn test_missing_partial() {
        let (_dir, layout) = layout_with_partial("a.html", "a");
        let err = resolve_partial("<!-- replace:b.html -->", "b.html", 0, &layout).unwrap_err();
        assert!(matches!(err, BuildError::MissingResource(p) if p.ends_with("b.html")));
    }
}
