use serde::ser::{Serialize, SerializeTuple, Serializer};
use sqlx::FromRow;

/// One row of the catalog table.
///
/// Serialized positionally as the JSON array `[id, name, holder]` to match
/// the wire format of the catalog endpoints; `holder` may be `null`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub holder: Option<String>,
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.id)?;
        tup.serialize_element(&self.name)?;
        tup.serialize_element(&self.holder)?;
        tup.end()
    }
}
