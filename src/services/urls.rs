//! URL sanitizing for image sources

use url::Url;

/// Clean a caller-supplied image URL.
///
/// Whitespace and control characters are stripped, bare host names get an
/// `http://` prefix, and only `http`/`https` URLs or root-relative paths are
/// kept. Anything else comes back as an empty string.
pub fn sanitize_url(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| is_url_char(*c))
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    if cleaned.starts_with('/') && !cleaned.starts_with("//") {
        return cleaned;
    }

    let candidate = if cleaned.starts_with("//") {
        format!("http:{}", cleaned)
    } else if !cleaned.contains(':') && !cleaned.starts_with('#') && !cleaned.starts_with('?') {
        format!("http://{}", cleaned)
    } else {
        cleaned
    };

    match Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            url.to_string()
        }
        _ => String::new(),
    }
}

fn is_url_char(c: char) -> bool {
    !c.is_control()
        && !c.is_whitespace()
        && !matches!(c, '<' | '>' | '"' | '`' | '{' | '}' | '\\' | '^')
}
