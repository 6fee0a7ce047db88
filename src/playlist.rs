pub mod entry;
pub mod parser;
pub mod serializer;

pub use entry::StreamEntry;
pub use parser::parse;
pub use serializer::{serialize_entry, serialize_playlist};

/// Document header marker, the first line of every playlist
pub const HEADER: &str = "#EXTM3U";
/// Prefix of a metadata line describing the entry on the next line
pub const EXTINF_PREFIX: &str = "#EXTINF:";
