/// A fragment of limited markup: the only structure result panels and
/// static labels may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(String),
    Link { href: String, text: String },
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Plain,
    Strong,
    Link(String),
}

/// Parse trusted static strings containing `<strong>`, `<a href=...>` and
/// `<br>` into spans. Unknown tags are dropped, their text is kept.
///
/// Never call this on server-provided text.
pub fn parse_markup(source: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut mode = Mode::Plain;
    let mut buffer = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        buffer.push_str(&rest[..open]);
        let tag = rest[open + 1..open + close].trim();
        rest = &rest[open + close + 1..];

        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let closing = tag.starts_with('/');

        match (name.as_str(), closing) {
            ("br", _) => {
                flush(&mut spans, &mode, &mut buffer);
                spans.push(Span::LineBreak);
            }
            ("strong", false) => {
                flush(&mut spans, &mode, &mut buffer);
                mode = Mode::Strong;
            }
            ("a", false) => {
                flush(&mut spans, &mode, &mut buffer);
                mode = Mode::Link(extract_href(tag).unwrap_or_default());
            }
            ("strong", true) | ("a", true) => {
                flush(&mut spans, &mode, &mut buffer);
                mode = Mode::Plain;
            }
            _ => {}
        }
    }

    buffer.push_str(rest);
    flush(&mut spans, &mode, &mut buffer);
    spans
}

/// Flatten spans into plain text; links keep only their text.
pub fn plain_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) | Span::Strong(text) => text.as_str(),
            Span::Link { text, .. } => text.as_str(),
            Span::LineBreak => "\n",
        })
        .collect()
}

fn flush(spans: &mut Vec<Span>, mode: &Mode, buffer: &mut String) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    spans.push(match mode {
        Mode::Plain => Span::Text(text),
        Mode::Strong => Span::Strong(text),
        Mode::Link(href) => Span::Link {
            href: href.clone(),
            text,
        },
    });
}

fn extract_href(tag: &str) -> Option<String> {
    let start = tag.find("href=")? + "href=".len();
    let value = &tag[start..];
    match value.chars().next()? {
        quote @ ('\'' | '"') => {
            let inner = &value[1..];
            let end = inner.find(quote)?;
            Some(inner[..end].to_string())
        }
        _ => value.split_whitespace().next().map(ToOwned::to_owned),
    }
}
