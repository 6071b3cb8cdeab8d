/// Prefix every line of `text` with `width` spaces.
///
/// Lines are split on `\n` only, so a trailing newline yields a final
/// whitespace-only line. That mirrors how fragments have always been spliced
/// and keeps rebuilt pages byte-identical.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the first occurrence of `tag` in `template` with `fragment`,
/// indented to `column`.
///
/// The tag line already carries its own leading whitespace, so the first
/// fragment line is inserted without the extra padding.
pub fn splice(template: &str, tag: &str, fragment: &str, column: usize) -> String {
    let indented = indent(fragment, column);
    let body = &indented[column..];
    template.replacen(tag, body, 1)
}
