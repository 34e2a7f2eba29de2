use mongodb::bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};

/// One record in the news collection.
///
/// Field values are stored exactly as received, whatever their type; absent
/// ones are persisted as explicit `null`. `_id` is kept as raw BSON so that
/// documents written by other clients still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
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

impl NewsItem {
    /// `$set` document overwriting all five fields, `null` included.
    pub fn replacement(&self) -> Document {
        doc! {
            "$set": {
                "name": self.name.clone(),
                "anons": self.anons.clone(),
                "full": self.full.clone(),
                "key": self.key.clone(),
                "img": self.img.clone(),
            }
        }
    }
}
