use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use folio_store::Model;

/// A schemaless JSON object stored by the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Model for Record {
    const DOMAIN: &'static str = "folio-record-v1";
}

impl Record {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        match serde_json::from_str(text)? {
            Value::Object(map) => Ok(Self(map)),
            other => anyhow::bail!("a record must be a JSON object, got: {other}"),
        }
    }
}
