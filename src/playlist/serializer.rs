use std::fmt::Write as _;

use super::{
    EXTINF_PREFIX, HEADER,
    entry::{Attribute, StreamEntry},
};

/// Duration written for every entry, live streams have none
const LIVE_DURATION: i32 = -1;

/// Renders one entry as its metadata line and URL line
///
/// Empty attributes are left out entirely. Values are written verbatim, a `"`
/// inside a value is not escaped and produces a line other players may misread.
#[must_use]
pub fn serialize_entry(entry: &StreamEntry) -> String {
    let mut out = String::new();
    write_entry(&mut out, entry);
    out
}

/// Renders a whole playlist: the header followed by every entry in order
#[must_use]
pub fn serialize_playlist(entries: &[StreamEntry]) -> String {
    let mut out = format!("{HEADER}\n");
    for entry in entries {
        write_entry(&mut out, entry);
    }
    out
}

fn write_entry(out: &mut String, entry: &StreamEntry) {
    out.push_str(EXTINF_PREFIX);
    // Writing into a String can't fail
    let _ = write!(out, "{LIVE_DURATION}");

    for attribute in Attribute::ALL {
        let value = entry.attribute(attribute);
        if !value.is_empty() {
            let _ = write!(out, r#" {}="{value}""#, attribute.key());
        }
    }

    let _ = writeln!(out, ",{}", entry.name());
    let _ = writeln!(out, "{}", entry.url());
}
