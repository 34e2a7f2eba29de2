use crate::models::NewsItem;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body accepted by create and update. Values of any JSON type are taken
/// as-is, unknown keys are ignored and a missing field becomes `null`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsPayload {
    #[serde(default)]
    pub name: Bson,
    #[serde(default)]
    pub anons: Bson,
    #[serde(default)]
    pub full: Bson,
    #[serde(default)]
    pub key: Bson,
    #[serde(default)]
    pub img: Bson,
}

impl From<NewsPayload> for NewsItem {
    fn from(payload: NewsPayload) -> Self {
        Self {
            id: None,
            name: payload.name,
            anons: payload.anons,
            full: payload.full,
            key: payload.key,
            img: payload.img,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsResponse {
    #[serde(rename = "_id")]
    pub id: Value,
    pub name: Value,
    pub anons: Value,
    pub full: Value,
    pub key: Value,
    pub img: Value,
}

/// ObjectIds go out as plain hex strings; everything else as relaxed
/// extended JSON, so numbers stay numbers.
fn to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

impl From<NewsItem> for NewsResponse {
    fn from(item: NewsItem) -> Self {
        Self {
            id: item.id.map(to_json).unwrap_or(Value::Null),
            name: to_json(item.name),
            anons: to_json(item.anons),
            full: to_json(item.full),
            key: to_json(item.key),
            img: to_json(item.img),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
