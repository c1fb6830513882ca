//! Identifier for files in the blob store.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`FileId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum FileIdError {
    /// The input string is not a valid file identifier.
    #[error("malformed file id: {0}")]
    Malformed(String),
}

/// Identifier of a stored file.
///
/// File ids are generated server-side when a blob is written and travel
/// through JSON bodies and URLs in their canonical string form
/// (e.g. `"3fa4a0f0-6ad1-4ee0-9d4b-6f41cbb4f0a2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a fresh random file id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `FileId` from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`FileIdError::Malformed`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, FileIdError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| FileIdError::Malformed(s.to_owned()))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for FileId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FileId {
    type Err = FileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for FileId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for FileId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for FileId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = FileId::generate();
        let parsed = FileId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            FileId::parse("not-a-file-id"),
            Err(FileIdError::Malformed(_))
        ));
        assert!(FileId::parse("").is_err());
    }

    #[test]
    fn test_serde_string_form() {
        let id = FileId::parse("3fa4a0f0-6ad1-4ee0-9d4b-6f41cbb4f0a2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3fa4a0f0-6ad1-4ee0-9d4b-6f41cbb4f0a2\"");

        let back: FileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
