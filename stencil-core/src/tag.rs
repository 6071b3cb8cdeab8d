//! Placeholder tags: single-line HTML comments of the form
//! `<!-- verb:argument -->`. The spaces inside the comment markers are
//! mandatory.

use std::fmt;

pub const TAG_START: &str = "<!-- ";
pub const TAG_END: &str = " -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Insert a partial from the partials folder.
    Replace,
    /// Render a JSON project list.
    Projects,
    /// Render the blogpost header list for a folder.
    Blogposts,
    /// Content slot inside the generic blogpost template.
    Blogpost,
}

impl Verb {
    /// Verbs the template driver resolves. `Blogpost` is left in place for
    /// the post converter.
    pub const DRIVER: [Verb; 3] = [Verb::Replace, Verb::Projects, Verb::Blogposts];

    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Replace => "replace",
            Verb::Projects => "projects",
            Verb::Blogposts => "blogposts",
            Verb::Blogpost => "blogpost",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub verb: Verb,
    pub argument: String,
    /// Leading whitespace of the line the tag sits on.
    pub column: usize,
}

impl Tag {
    pub fn new(verb: Verb, argument: impl Into<String>, column: usize) -> Self {
        Self {
            verb,
            argument: argument.into(),
            column,
        }
    }

    /// Parse a template line into a driver tag, if it is one.
    pub fn parse_line(line: &str) -> Option<Tag> {
        Verb::DRIVER
            .into_iter()
            .find_map(|verb| Self::parse_line_as(line, verb))
    }

    /// Parse a line as a tag with a specific verb.
    pub fn parse_line_as(line: &str, verb: Verb) -> Option<Tag> {
        let trimmed = line.trim();
        let argument = trimmed
            .strip_prefix(TAG_START)?
            .strip_prefix(verb.keyword())?
            .strip_prefix(':')?
            .strip_suffix(TAG_END)?;
        let column = line.len() - line.trim_start().len();

        Some(Tag::new(verb, argument, column))
    }

    /// The exact text this tag occupies in a template.
    pub fn literal(&self) -> String {
        literal(self.verb, &self.argument)
    }
}

pub fn literal(verb: Verb, argument: &str) -> String {
    format!("{TAG_START}{verb}:{argument}{TAG_END}")
}

/// All driver tags in `text`, in line order.
pub fn scan(text: &str) -> Vec<Tag> {
    text.split('\n').filter_map(Tag::parse_line).collect()
}
