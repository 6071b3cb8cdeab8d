use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}

/// Contents of `stencil.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub blog: BlogConfig,
    pub projects: ProjectsConfig,
    pub markdown: MarkdownConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }
}

/// Input folders, relative to the site root.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub templates: String,
    pub partials: String,
    pub assets: String,
    pub blogposts: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: "templates".into(),
            partials: "partials".into(),
            assets: "assets".into(),
            blogposts: "blogposts".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BlogConfig {
    /// Folder under the output root that receives one page per post.
    pub output_folder: String,
    /// Template that each post body is injected into.
    pub generic_template: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            output_folder: "blog".into(),
            generic_template: "blogpost_generic.html".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectsConfig {
    pub github_icon: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            github_icon: "assets/img/github-mark-white.png".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MarkdownConfig {
    pub syntax_theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            syntax_theme: "base16-ocean.dark".into(),
        }
    }
}

/// Concrete locations for one build. Every component takes this instead of
/// reaching for process-wide paths, so tests can point a build at a temp dir.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub root: PathBuf,
    pub templates: PathBuf,
    pub partials: PathBuf,
    pub assets: PathBuf,
    pub blogposts: PathBuf,
    pub output: PathBuf,
    pub blog_folder: String,
    pub generic_template: String,
    pub github_icon: String,
    pub syntax_theme: String,
}

impl SiteLayout {
    pub fn new<R: AsRef<Path>, O: AsRef<Path>>(root: R, output: O, config: &Config) -> Self {
        let root = root.as_ref().to_path_buf();

        Self {
            templates: root.join(&config.paths.templates),
            partials: root.join(&config.paths.partials),
            assets: root.join(&config.paths.assets),
            blogposts: root.join(&config.paths.blogposts),
            root,
            output: output.as_ref().to_path_buf(),
            blog_folder: config.blog.output_folder.clone(),
            generic_template: config.blog.generic_template.clone(),
            github_icon: config.projects.github_icon.clone(),
            syntax_theme: config.markdown.syntax_theme.clone(),
        }
    }

    /// Layout with every default, as the original build script hardcoded it.
    pub fn with_defaults<R: AsRef<Path>, O: AsRef<Path>>(root: R, output: O) -> Self {
        Self::new(root, output, &Config::default())
    }

    pub fn output_assets(&self) -> PathBuf {
        self.output.join("assets")
    }

    pub fn output_blog(&self) -> PathBuf {
        self.output.join(&self.blog_folder)
    }

    /// Where the resolved generic blogpost template lands before post conversion.
    pub fn resolved_generic_template(&self) -> PathBuf {
        self.output.join(&self.generic_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_defaults() {
        let layout = SiteLayout::with_defaults("site", "build");
        assert_eq!(layout.templates, PathBuf::from("site/templates"));
        assert_eq!(layout.partials, PathBuf::from("site/partials"));
        assert_eq!(layout.blogposts, PathBuf::from("site/blogposts"));
        assert_eq!(layout.output_blog(), PathBuf::from("build/blog"));
        assert_eq!(
            layout.resolved_generic_template(),
            PathBuf::from("build/blogpost_generic.html")
        );
    }

    #[test]
    fn test_read_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stencil.toml");
        std::fs::write(
            &path,
            "[paths]\ntemplates = \"pages\"\n\n[markdown]\nsyntax_theme = \"InspiredGitHub\"\n",
        )
        .unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.paths.templates, "pages");
        assert_eq!(config.paths.partials, "partials");
        assert_eq!(config.markdown.syntax_theme, "InspiredGitHub");
        assert_eq!(config.blog, BlogConfig::default());
    }

    #[test]
    fn test_read_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stencil.toml");
        std::fs::write(&path, "[paths\n").unwrap();

        assert!(matches!(Config::read(&path), Err(ConfigError::Parsing(_))));
    }
}
