//! Plain-text rendering of doc-comment markup.

use roxmltree::Node;

/// Render the children of `node` as readable text.
///
/// `<see cref="T:A.B"/>` renders as `B`, `<paramref name="x"/>` as `x`,
/// `<c>x</c>` as `` `x` `` and `<para>` blocks as blank-line separated
/// paragraphs. Indentation shared by all lines is removed.
pub(crate) fn humanize(node: Node<'_, '_>) -> String {
    let mut raw = String::new();
    render_children(node, &mut raw);
    normalize_layout(&raw)
}

fn render_children(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or_default());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "see" | "seealso" => {
                if let Some(cref) = child.attribute("cref") {
                    out.push_str(short_cref(cref));
                } else if let Some(word) = child.attribute("langword") {
                    out.push_str(word);
                } else if child.has_children() {
                    render_children(child, out);
                } else if let Some(href) = child.attribute("href") {
                    out.push_str(href);
                }
            }
            "paramref" | "typeparamref" => {
                out.push_str(child.attribute("name").unwrap_or_default());
            }
            "c" => {
                out.push('`');
                render_children(child, out);
                out.push('`');
            }
            "code" => {
                out.push_str("\n```\n");
                render_children(child, out);
                out.push_str("\n```\n");
            }
            "para" => {
                out.push_str("\n\n");
                render_children(child, out);
                out.push_str("\n\n");
            }
            "br" => out.push('\n'),
            _ => render_children(child, out),
        }
    }
}

/// Last path segment of a `cref`, without its member-kind prefix or parameter list.
fn short_cref(cref: &str) -> &str {
    let unprefixed = match cref.split_once(':') {
        Some((kind, rest)) if kind.len() == 1 => rest,
        _ => cref,
    };
    let without_params = unprefixed.split('(').next().unwrap_or(unprefixed);
    without_params.rsplit('.').next().unwrap_or(without_params)
}

fn normalize_layout(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();

    // the first line follows the opening tag and never carries indentation
    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let mut text = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                line.trim_start()
            } else {
                strip_chars(line, indent)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    while text.contains("\n\n\n") {
        text = text.replace("\n\n\n", "\n\n");
    }
    text.trim().to_string()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_chars(line: &str, count: usize) -> &str {
    let offset = line
        .char_indices()
        .nth(count)
        .map_or(line.len(), |(index, _)| index);
    &line[offset..]
}
