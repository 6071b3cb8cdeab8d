use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `BuildError`.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Everything that can abort a build. Nothing is recovered: the first error
/// propagates to the caller and the output tree is left as-is.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A referenced partial, JSON file, folder or template does not exist.
    #[error("missing resource: {}", .0.display())]
    MissingResource(PathBuf),

    /// The generic blogpost template was not resolved before post conversion.
    #[error("generic blogpost template has not been generated: {}", .0.display())]
    MissingGenericTemplate(PathBuf),

    /// A project listing is not valid JSON or does not match the schema.
    #[error("malformed project list {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required project field is absent.
    #[error("project {index} in {} is missing `{field}`", .path.display())]
    MissingProjectField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    /// A blogpost header lacks a required key.
    #[error("blogpost {} has no `{key}` header", .path.display())]
    MissingHeader { path: PathBuf, key: &'static str },

    /// A blogpost `date` header is not in one of the accepted formats.
    #[error("blogpost {} has an unparseable date `{value}`", .path.display())]
    InvalidDate { path: PathBuf, value: String },

    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BuildError::MissingResource(path)
        } else {
            BuildError::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_missing_resource() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = BuildError::io("partials/nav.html", io_err);
        assert!(matches!(err, BuildError::MissingResource(_)));
        assert!(err.to_string().contains("partials/nav.html"));
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = BuildError::io("build", io_err);
        assert!(matches!(err, BuildError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_missing_header_message() {
        let err = BuildError::MissingHeader {
            path: "blogposts/first.md".into(),
            key: "date",
        };
        assert_eq!(err.to_string(), "blogpost blogposts/first.md has no `date` header");
    }
}
