use std::sync::LazyLock;

use regex::Regex;

use super::{
    EXTINF_PREFIX, HEADER,
    entry::{Attribute, StreamEntry, UNKNOWN_NAME},
};

static TVG_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex(Attribute::TvgId));
static TVG_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex(Attribute::TvgName));
static TVG_LOGO_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex(Attribute::TvgLogo));
static GROUP_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| attribute_regex(Attribute::GroupTitle));

fn attribute_regex(attribute: Attribute) -> Regex {
    // Keys are fixed ASCII, the pattern is always valid
    Regex::new(&format!(r#"{}="([^"]*)""#, regex::escape(attribute.key()))).unwrap()
}

fn regex_for(attribute: Attribute) -> &'static LazyLock<Regex> {
    match attribute {
        Attribute::TvgId => &TVG_ID_REGEX,
        Attribute::TvgName => &TVG_NAME_REGEX,
        Attribute::TvgLogo => &TVG_LOGO_REGEX,
        Attribute::GroupTitle => &GROUP_TITLE_REGEX,
    }
}

/// Parses playlist text into its entries, in document order
///
/// Never fails. Lines that can't be paired into an entry are skipped:
/// - blank lines and the `#EXTM3U` header
/// - anything that is not an `#EXTINF:` line
/// - an `#EXTINF:` line whose next line is missing, blank or another `#` line.
///   Scanning resumes at that next line.
#[must_use]
pub fn parse(content: &str) -> Vec<StreamEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines().map(str::trim).peekable();

    while let Some(line) = lines.next() {
        if line.is_empty() || line == HEADER || !line.starts_with(EXTINF_PREFIX) {
            continue;
        }

        let Some(url) = lines.next_if(|next| !next.is_empty() && !next.starts_with('#')) else {
            continue;
        };

        let name = extract_name(line);
        if let Some(entry) = StreamEntry::new(name, url) {
            entries.push(
                entry
                    .with_tvg_id(extract_attribute(line, Attribute::TvgId))
                    .with_tvg_name(extract_attribute(line, Attribute::TvgName))
                    .with_tvg_logo(extract_attribute(line, Attribute::TvgLogo))
                    .with_group_title(extract_attribute(line, Attribute::GroupTitle)),
            );
        }
    }

    entries
}

/// Value of `key="value"` on a metadata line, empty when the key is absent or badly quoted
#[must_use]
pub fn extract_attribute(line: &str, attribute: Attribute) -> &str {
    regex_for(attribute)
        .captures(line)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}

/// Display name: whatever follows the last comma
///
/// A comma inside an attribute value written after the name separator is
/// taken as the separator.
#[must_use]
pub fn extract_name(line: &str) -> &str {
    line.rsplit_once(',')
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_NAME)
}
