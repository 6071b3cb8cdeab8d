use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use std::sync::LazyLock;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Render a Markdown document to HTML with every HTML comment stripped, so
/// metadata headers never show up in a rendered post.
pub fn render_markdown(content: &str, syntax_theme: &str) -> String {
    let parser = Parser::new_ext(content, Options::all());

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::new();
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                let mut code_content = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code_content.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                processed_events.push(Event::Html(
                    highlight_code(&code_content, lang, syntax_theme).into(),
                ));
            }
            Event::Start(Tag::HtmlBlock) => {
                // A block comment can span several Html events, strip it as a whole
                let mut block = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::HtmlBlock) => break,
                        Event::Html(text) | Event::Text(text) => block.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                let stripped = strip_comments(&block);
                if !stripped.trim().is_empty() {
                    processed_events.push(Event::Html(stripped.into()));
                }
            }
            Event::Html(text) | Event::InlineHtml(text) if text.trim_start().starts_with("<!--") => {
                let stripped = strip_comments(text);
                if !stripped.trim().is_empty() {
                    processed_events.push(Event::Html(stripped.into()));
                }
            }
            _ => {
                processed_events.push(events[i].clone());
            }
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());

    out
}

fn highlight_code(code: &str, lang: &str, syntax_theme: &str) -> String {
    let plain = || format!("<pre><code>{}</code></pre>\n", html_escape::encode_text(code));

    if lang.is_empty() {
        return plain();
    }

    let syntax = SYNTAX_SET.find_syntax_by_token(lang).or_else(|| {
        // Fallback mappings for unsupported languages
        match lang {
            "nix" => SYNTAX_SET.find_syntax_by_name("JavaScript"),
            "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
            _ => None,
        }
    });

    match (syntax, THEME_SET.themes.get(syntax_theme)) {
        (Some(syntax), Some(theme)) => {
            highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).unwrap_or_else(|_| plain())
        }
        _ => plain(),
    }
}

/// Remove every `<!-- ... -->` span. An unterminated comment runs to the end.
pub fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return out,
        }
    }
    out.push_str(rest);

    out
}
