/// Helper for escaping prose into markup-safe text
pub struct MarkupEscaper;

impl MarkupEscaper {
    /// Backslash-escapes every character Markdown reserves. Only applies
    /// to prose; literal regions bypass this entirely.
    pub fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

/// Helper for asset names referenced from rendered output
pub struct AssetPaths;

impl AssetPaths {
    /// Name of the converted copy of an asset that is not natively
    /// renderable. The conversion itself runs outside the render pass;
    /// we only reference the materialized artifact.
    pub fn converted(&self, name: &str) -> String {
        match name.rfind('.') {
            Some(dot) => format!("{}.png", &name[..dot]),
            None => format!("{name}.png"),
        }
    }
}
