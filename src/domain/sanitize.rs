// src/domain/sanitize.rs
//! Allow-list HTML filter for text that is rendered back to clients.
//!
//! Markup on the allow-list survives with its permitted attributes only; every other
//! tag is escaped so it displays as text. Event handler attributes never survive and
//! URL attributes must carry a safe scheme. Output of the filter is a fixed point:
//! sanitizing it again yields the same string.

use regex::Regex;
use std::sync::OnceLock;

static TAG: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
static NUMERIC_ENTITY: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>")
            .expect("compile html tag regex")
    })
}

fn attribute_regex() -> &'static Regex {
    ATTRIBUTE.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .expect("compile html attribute regex")
    })
}

fn numeric_entity_regex() -> &'static Regex {
    NUMERIC_ENTITY.get_or_init(|| {
        Regex::new(r"(?i)&#(x[0-9a-f]+|[0-9]+);?").expect("compile numeric entity regex")
    })
}

const URL_ATTRIBUTES: [&str; 4] = ["href", "src", "cite", "poster"];
const SAFE_SCHEMES: [&str; 5] = ["http", "https", "mailto", "tel", "ftp"];

/// Attributes permitted per tag; `None` means the tag itself is not allowed.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attributes: &'static [&'static str] = match tag {
        "a" => &["target", "href", "title"],
        "abbr" => &["title"],
        "area" => &["shape", "coords", "href", "alt"],
        "audio" => &["autoplay", "controls", "loop", "muted", "preload", "src"],
        "bdi" | "bdo" => &["dir"],
        "blockquote" => &["cite"],
        "col" | "colgroup" => &["align", "valign", "span", "width"],
        "del" | "ins" => &["datetime"],
        "details" => &["open"],
        "font" => &["color", "size", "face"],
        "img" => &["src", "alt", "title", "width", "height", "loading"],
        "table" => &["width", "border", "align", "valign"],
        "tbody" | "tfoot" | "thead" => &["align", "valign"],
        "td" | "th" => &["width", "rowspan", "colspan", "align", "valign"],
        "tr" => &["rowspan", "align", "valign"],
        "video" => &[
            "controls", "loop", "muted", "playsinline", "poster", "preload", "src", "height",
            "width",
        ],
        "address" | "article" | "aside" | "b" | "big" | "br" | "caption" | "center" | "cite"
        | "code" | "dd" | "div" | "dl" | "dt" | "em" | "figcaption" | "figure" | "footer"
        | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "i" | "kbd" | "li"
        | "mark" | "nav" | "ol" | "p" | "pre" | "s" | "section" | "small" | "span" | "strike"
        | "strong" | "sub" | "summary" | "sup" | "tt" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attributes)
}

/// Sanitize a fragment of user-supplied text.
pub fn sanitize_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for captures in tag_regex().captures_iter(input) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        output.push_str(&escape_text(&input[last..whole.start()]));
        last = whole.end();

        // comments are dropped entirely
        if whole.as_str().starts_with("<!--") {
            continue;
        }

        let closing = captures.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = captures
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let rest = captures.get(3).map_or("", |m| m.as_str());

        match allowed_attributes(&name) {
            Some(allowed) => output.push_str(&render_tag(&name, closing, rest, allowed)),
            None => output.push_str(&escape_text(whole.as_str())),
        }
    }

    output.push_str(&escape_text(&input[last..]));
    output
}

/// Sanitize an optional field, passing `None` through.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize_html)
}

fn render_tag(name: &str, closing: bool, rest: &str, allowed: &[&str]) -> String {
    if closing {
        return format!("</{}>", name);
    }

    let mut tag = format!("<{}", name);
    for captures in attribute_regex().captures_iter(rest) {
        let Some(attr_name) = captures.get(1).map(|m| m.as_str().to_ascii_lowercase()) else {
            continue;
        };
        if !allowed.contains(&attr_name.as_str()) {
            continue;
        }
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .or_else(|| captures.get(4))
            .map(|m| m.as_str());

        match value {
            Some(value) => {
                if URL_ATTRIBUTES.contains(&attr_name.as_str()) && !is_safe_url(value) {
                    continue;
                }
                tag.push_str(&format!(" {}=\"{}\"", attr_name, escape_attribute(value)));
            }
            None => {
                tag.push(' ');
                tag.push_str(&attr_name);
            }
        }
    }

    if rest.trim_end().ends_with('/') {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

fn is_safe_url(value: &str) -> bool {
    // browsers decode entities and ignore embedded whitespace and control characters
    let compact: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if compact.starts_with("data:image/") {
        return true;
    }

    match compact.find(':') {
        None => true,
        Some(colon) => {
            let scheme = &compact[..colon];
            // a ':' after a path, query or fragment delimiter is not a scheme separator
            if scheme.contains(['/', '?', '#']) {
                return true;
            }
            SAFE_SCHEMES.contains(&scheme)
        }
    }
}

fn decode_entities(value: &str) -> String {
    let decoded = numeric_entity_regex().replace_all(value, |captures: &regex::Captures<'_>| {
        let digits = &captures[1];
        let code = match digits.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => digits.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    decoded
        .replace("&colon;", ":")
        .replace("&Tab;", "\t")
        .replace("&tab;", "\t")
        .replace("&NewLine;", "\n")
        .replace("&newline;", "\n")
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
