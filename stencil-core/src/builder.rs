use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::blog::convert_posts;
use crate::config::{Config, SiteLayout};
use crate::error::{BuildError, Result};
use crate::template::{discover_templates, resolve_template};

/// The ordered steps of a build. Later phases depend on the output of
/// earlier ones: post conversion reads the resolved generic template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Prepare,
    ResolveTemplates,
    CopyAssets,
    ConvertPosts,
    PruneIntermediate,
}

impl BuildPhase {
    pub const ALL: [BuildPhase; 5] = [
        BuildPhase::Prepare,
        BuildPhase::ResolveTemplates,
        BuildPhase::CopyAssets,
        BuildPhase::ConvertPosts,
        BuildPhase::PruneIntermediate,
    ];
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildPhase::Prepare => "prepare",
            BuildPhase::ResolveTemplates => "resolve-templates",
            BuildPhase::CopyAssets => "copy-assets",
            BuildPhase::ConvertPosts => "convert-posts",
            BuildPhase::PruneIntermediate => "prune-intermediate",
        };
        f.write_str(name)
    }
}

/// What a finished build wrote.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub posts: Vec<PathBuf>,
    pub assets: usize,
}

pub struct SiteBuilder {
    root: PathBuf,
    output_dir: PathBuf,
    config: Config,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("./site"),
            output_dir: PathBuf::from("./build"),
            config: Config::default(),
        }
    }

    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Site {
        Site {
            layout: SiteLayout::new(&self.root, &self.output_dir, &self.config),
        }
    }
}

pub struct Site {
    layout: SiteLayout,
}

impl Site {
    pub fn new(layout: SiteLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    /// Run every phase in order. The first failure aborts the build.
    pub fn render_all(&self) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        for phase in BuildPhase::ALL {
            info!(%phase, "starting phase");
            match phase {
                BuildPhase::Prepare => self.prepare()?,
                BuildPhase::ResolveTemplates => report.pages = self.resolve_templates()?,
                BuildPhase::CopyAssets => report.assets = self.copy_assets()?,
                BuildPhase::ConvertPosts => report.posts = convert_posts(&self.layout)?,
                BuildPhase::PruneIntermediate => self.prune_intermediate(&mut report.pages)?,
            }
        }

        Ok(report)
    }

    fn prepare(&self) -> Result<()> {
        let output = &self.layout.output;
        if output.exists() {
            std::fs::remove_dir_all(output).map_err(|e| BuildError::io(output, e))?;
        }
        std::fs::create_dir_all(output).map_err(|e| BuildError::io(output, e))
    }

    fn resolve_templates(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for template in discover_templates(&self.layout)? {
            let text = template.read()?;
            let resolved = resolve_template(&text, &self.layout)?;

            let output_path = self.layout.output.join(&template.name);
            std::fs::write(&output_path, resolved).map_err(|e| BuildError::io(&output_path, e))?;
            debug!(template = %template.name, out = %output_path.display(), "template written");
            written.push(output_path);
        }

        Ok(written)
    }

    /// Recreate `<output>/assets` as a verbatim copy of the assets folder.
    fn copy_assets(&self) -> Result<usize> {
        let source = &self.layout.assets;
        let dest = self.layout.output_assets();

        if !source.is_dir() {
            return Err(BuildError::MissingResource(source.clone()));
        }
        if dest.exists() {
            std::fs::remove_dir_all(&dest).map_err(|e| BuildError::io(&dest, e))?;
        }

        let mut copied = 0;
        for entry in WalkDir::new(source) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source.as_path()).to_path_buf();
                BuildError::io(path, e.into())
            })?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|_| BuildError::MissingResource(entry.path().to_path_buf()))?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
            } else {
                std::fs::copy(entry.path(), &target).map_err(|e| BuildError::io(entry.path(), e))?;
                copied += 1;
            }
        }

        info!(count = copied, dest = %dest.display(), "assets copied");
        Ok(copied)
    }

    /// The resolved generic blogpost template is only an input to post
    /// conversion, never a published page.
    fn prune_intermediate(&self, pages: &mut Vec<PathBuf>) -> Result<()> {
        let generic = self.layout.resolved_generic_template();
        if generic.exists() {
            std::fs::remove_file(&generic).map_err(|e| BuildError::io(&generic, e))?;
            debug!(path = %generic.display(), "removed intermediate template");
        }
        pages.retain(|p| p != &generic);

        Ok(())
    }
}
