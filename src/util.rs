use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Decimal character references, including the double-escaped form the
    /// API emits in some string fields.
    static ref ENTITY_PATTERN: Regex = Regex::new(r"&(?:amp;)?#(\d+);").unwrap();

    /// Splits a comment page path into its prefix, link id and title slug.
    pub(crate) static ref COMMENTS_PATH_PATTERN: Regex =
        Regex::new(r"(?P<start>.*comments)/(?P<link_id>\w+)/(?P<link_title>\w+)/").unwrap();
}

/// Joins path segments with `/`, trimming stray slashes from each one and
/// skipping empty ones.
pub(crate) fn urljoin<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds the JSON endpoint URL for `path` under `base`.
///
/// A path that already starts with `base` is used as-is, and `/.json` is
/// appended unless the path already names a `.json` resource.
pub(crate) fn api_url(base: &str, path: &str) -> String {
    let mut url = if path.starts_with(base) {
        urljoin(&[path])
    } else {
        urljoin(&[base, path])
    };
    if !url.ends_with(".json") {
        url.push_str("/.json");
    }
    url
}

/// Decodes `&#NNN;` (and `&amp;#NNN;`) into the characters they name.
pub(crate) fn unescape_entities(s: &str) -> String {
    if !s.contains('#') {
        return s.to_string();
    }
    ENTITY_PATTERN
        .replace_all(s, |caps: &Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Truncates `s` to `max_length` characters, ending in `...` when cut.
#[cfg_attr(not(feature = "display"), allow(dead_code))]
pub(crate) fn limstr(s: &str, max_length: usize) -> String {
    if s.chars().count() <= max_length {
        return s.to_string();
    }
    if max_length <= 3 {
        return ".".repeat(max_length);
    }
    let mut out: String = s.chars().take(max_length - 3).collect();
    out.push_str("...");
    out
}
