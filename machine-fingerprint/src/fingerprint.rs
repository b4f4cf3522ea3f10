use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{FingerprintParseError, ProviderError};
use crate::identifier::{IdentifierKind, trim_identifier};
use crate::provider::IdentifierProvider;

pub const SEPARATOR: char = '#';

/// Board, disk and username identifiers of one machine.
///
/// Segments may be empty when the platform query failed or reported nothing;
/// the two cases are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    board: String,
    disk: String,
    username: String,
}

impl Fingerprint {
    /// Queries each identifier from `provider`. Never fails.
    pub fn collect<P: IdentifierProvider + ?Sized>(provider: &P) -> Self {
        Self {
            board: read_segment(provider, IdentifierKind::Board),
            disk: read_segment(provider, IdentifierKind::Disk),
            username: read_segment(provider, IdentifierKind::Username),
        }
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn disk(&self) -> &str {
        &self.disk
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn get(&self, kind: IdentifierKind) -> &str {
        match kind {
            IdentifierKind::Board => &self.board,
            IdentifierKind::Disk => &self.disk,
            IdentifierKind::Username => &self.username,
        }
    }
}

fn read_segment<P: IdentifierProvider + ?Sized>(provider: &P, kind: IdentifierKind) -> String {
    match provider.read(kind) {
        Ok(raw) => {
            let value = trim_identifier(&raw);
            debug!(%kind, len = value.len(), "Read identifier");
            value.to_string()
        }
        Err(ProviderError::Unsupported) => kind.sentinel().to_string(),
        Err(e) => {
            debug!(%kind, error = %e, "Identifier unavailable, leaving segment empty");
            String::new()
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.board, self.disk, self.username
        )
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintParseError;

    /// Splits a stored fingerprint back into its segments, as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        match parts.as_slice() {
            [board, disk, username] => Ok(Self {
                board: board.to_string(),
                disk: disk.to_string(),
                username: username.to_string(),
            }),
            _ => Err(FingerprintParseError { found: parts.len() }),
        }
    }
}
