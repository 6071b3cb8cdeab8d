//! Build a static site by resolving placeholder tags in HTML templates.
//!
//! A template line consisting only of `<!-- verb:argument -->` is replaced
//! with generated content indented to the tag's column:
//!
//! | Tag | Replacement |
//! |-----|-------------|
//! | `<!-- replace:nav.html -->` | the partial `partials/nav.html` |
//! | `<!-- projects:projects.json -->` | one block per entry of `templates/projects.json` |
//! | `<!-- blogposts:blogposts -->` | one header link per Markdown post, newest first |
//!
//! Each post is also rendered into the generic blogpost template at its
//! `<!-- blogpost:content -->` slot and written under `blog/`.

pub mod blog;
pub mod builder;
pub mod config;
pub mod error;
pub mod indent;
pub mod markdown;
pub mod partial;
pub mod project;
pub mod tag;
pub mod template;

// Re-export main types
pub use builder::{BuildPhase, BuildReport, Site, SiteBuilder};
pub use config::{Config, SiteLayout};
pub use error::BuildError;
pub use tag::{Tag, Verb};

/// Build the site under `root` into `output` using `config`.
pub fn build_site(
    config: &Config,
    root: &std::path::Path,
    output: &std::path::Path,
) -> Result<BuildReport, BuildError> {
    SiteBuilder::new()
        .root(root)
        .output_dir(output)
        .config(config.clone())
        .build()
        .render_all()
}
