use strum::EnumIter;

/// One segment of a fingerprint, listed in fingerprint order.
#[derive(EnumIter, strum::Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum IdentifierKind {
    Board,
    Disk,
    Username,
}

impl IdentifierKind {
    /// Placeholder used when the platform has no provider for this identifier.
    pub fn sentinel(self) -> &'static str {
        match self {
            IdentifierKind::Board => "unknown_board",
            IdentifierKind::Disk => "unknown_hdd",
            IdentifierKind::Username => "unknown_username",
        }
    }
}

// space, \t, \n, \r, form-feed, vertical-tab. Nothing else counts.
fn is_identifier_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c' | '\x0b')
}

/// Strips leading and trailing space, `\t`, `\n`, `\r`, form-feed (`\x0c`)
/// and vertical-tab (`\x0b`) from a raw identifier.
///
/// Unlike [`str::trim`], other Unicode whitespace (e.g. U+00A0) is kept, so a
/// serial that happens to carry one keeps its bytes.
pub fn trim_identifier(raw: &str) -> &str {
    raw.trim_matches(is_identifier_whitespace)
}
