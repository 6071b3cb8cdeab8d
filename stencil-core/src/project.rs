use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::SiteLayout;
use crate::error::{BuildError, Result};
use crate::indent::splice;
use crate::tag::{self, Verb};

/// One entry of a project listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    pub repo: String,
    pub desc: String,
    #[serde(default)]
    pub imgurl: Option<String>,
    #[serde(default)]
    pub videourl: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media<'a> {
    Image(&'a str),
    Video(&'a str),
}

impl Project {
    /// `imgurl` wins when both are set.
    pub fn media(&self) -> Option<Media<'_>> {
        match (&self.imgurl, &self.videourl) {
            (Some(url), _) => Some(Media::Image(url)),
            (None, Some(url)) => Some(Media::Video(url)),
            (None, None) => None,
        }
    }
}

/// Read and validate a project list.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let data = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
    let projects: Vec<Project> = serde_json::from_str(&data).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(index) = projects.iter().position(|p| p.media().is_none()) {
        return Err(BuildError::MissingProjectField {
            path: path.to_path_buf(),
            index,
            field: "imgurl",
        });
    }

    Ok(projects)
}

pub fn render_project(project: &Project, github_icon: &str) -> String {
    let media = match project.media() {
        Some(Media::Image(url)) => format!("<img class=\"project-pic\" src=\"{url}\"/>"),
        Some(Media::Video(url)) => {
            format!("<video class=\"project-pic\" src=\"{url}\" controls> </video>")
        }
        None => String::new(),
    };

    format!(
        r#"<div class="project">
    <span class="project-title"> {name}
        <a href='{repo}'>
            <img class="github-link" src='{github_icon}'>
        </a>
    </span>
    {media}
    <span class="project-desc">{desc}</span>
</div>
"#,
        name = project.name,
        repo = project.repo,
        desc = project.desc,
    )
}

/// Splice the rendered project list from `json_filename` (relative to the
/// templates folder) over its `projects` tag.
pub fn resolve_projects(
    template: &str,
    json_filename: &str,
    column: usize,
    layout: &SiteLayout,
) -> Result<String> {
    let path = layout.templates.join(json_filename);
    let projects = load_projects(&path)?;
    debug!(list = %path.display(), count = projects.len(), "rendering projects");

    let rendered: String = projects
        .iter()
        .map(|p| render_project(p, &layout.github_icon))
        .collect();

    Ok(splice(
        template,
        &tag::literal(Verb::Projects, json_filename),
        &rendered,
        column,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LIST: &str = r#"[
        {"name": "Alpha", "repo": "https://example.com/alpha", "desc": "first", "imgurl": "a.png"},
        {"name": "Beta", "repo": "https://example.com/beta", "desc": "second", "videourl": "b.mp4"},
        {"name": "Gamma", "repo": "https://example.com/gamma", "desc": "third", "imgurl": "c.png"}
    ]"#;

    fn layout_with_list(content: &str) -> (TempDir, SiteLayout) {
        let dir = TempDir::new().unwrap();
        let layout = SiteLayout::with_defaults(dir.path(), dir.path().join("build"));
        std::fs::create_dir_all(&layout.templates).unwrap();
        std::fs::write(layout.templates.join("projects.json"), content).unwrap();
        (dir, layout)
    }

    #[test]
    fn test_render_image_project() {
        let project = Project {
            name: "Alpha".into(),
            repo: "https://example.com/alpha".into(),
            desc: "first".into(),
            imgurl: Some("a.png".into()),
            videourl: None,
        };
        let html = render_project(&project, "icon.png");
        assert!(html.contains(r#"<img class="project-pic" src="a.png"/>"#));
        assert!(html.contains("<img class=\"github-link\" src='icon.png'>"));
        assert!(!html.contains("<video"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_image_preferred_over_video() {
        let project = Project {
            name: "Both".into(),
            repo: "r".into(),
            desc: "d".into(),
            imgurl: Some("i.png".into()),
            videourl: Some("v.mp4".into()),
        };
        assert_eq!(project.media(), Some(Media::Image("i.png")));
    }

    #[test]
    fn test_resolve_projects_in_order() {
        let (_dir, layout) = layout_with_list(LIST);
        let template = "<main>\n    <!-- projects:projects.json -->\n</main>";

        let out = resolve_projects(template, "projects.json", 4, &layout).unwrap();

        assert_eq!(out.matches("<div class=\"project\">").count(), 3);
        assert_eq!(out.matches("<video").count(), 1);
        let alpha = out.find("Alpha").unwrap();
        let beta = out.find("Beta").unwrap();
        let gamma = out.find("Gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
        assert!(out.starts_with("<main>\n    <div class=\"project\">\n        <span"));
        assert!(!out.contains("projects:projects.json"));
    }

    #[test]
    fn test_missing_media_field() {
        let (_dir, layout) =
            layout_with_list(r#"[{"name": "x", "repo": "r", "desc": "d"}]"#);
        let err = resolve_projects("<!-- projects:projects.json -->", "projects.json", 0, &layout)
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingProjectField { index: 0, .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let (_dir, layout) = layout_with_list(r#"[{"name": "x", "desc": "d", "imgurl": "i"}]"#);
        let err = resolve_projects("<!-- projects:projects.json -->", "projects.json", 0, &layout)
            .unwrap_err();
        assert!(matches!(err, BuildError::Json { .. }));
        assert!(err.to_string().contains("repo"));
    }

    #[test]
    fn test_malformed_json() {
        let (_dir, layout) = layout_with_list("[{");
        let err = resolve_projects("", "projects.json", 0, &layout).unwrap_err();
        assert!(matches!(err, BuildError::Json { .. }));
    }

    #[test]
    fn test_missing_json_file() {
        let (_dir, layout) = layout_with_list("[]");
        let err = resolve_projects("", "other.json", 0, &layout).unwrap_err();
        assert!(matches!(err, BuildError::MissingResource(_)));
    }
}
