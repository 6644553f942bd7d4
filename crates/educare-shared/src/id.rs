use std::fmt::Display;

/// Primary key of a row in the data service.
///
/// Depending on how the table was created the service hands these out either
/// as integers or as uuid strings, both are accepted and kept as text.
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "RawId", into = "String")]
pub struct DbId(String);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawId> for DbId {
    type Error = anyhow::Error;

    fn try_from(value: RawId) -> Result<Self, Self::Error> {
        match value {
            RawId::Number(n) if n >= 0 => Ok(Self(n.to_string())),
            RawId::Number(n) => {
                anyhow::bail!("Negative values not supported as Id's. Value: {n}")
            }
            RawId::Text(s) if s.is_empty() => anyhow::bail!("Empty Id's are not supported"),
            RawId::Text(s) => Ok(Self(s)),
        }
    }
}

impl From<u64> for DbId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<DbId> for String {
    fn from(value: DbId) -> Self {
        value.0
    }
}

impl AsRef<str> for DbId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for DbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
