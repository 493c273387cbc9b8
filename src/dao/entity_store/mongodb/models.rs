//! Filter helpers shared by the MongoDB store.
//!
//! UUIDs travel through serde as hyphenated strings, so every filter that
//! matches on an id must compare against the same string form.

use mongodb::bson::{Document, doc};
use uuid::Uuid;

/// Filter matching a document by its primary key.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

/// Filter matching a document by primary key and owning account.
pub fn doc_id_owned(id: Uuid, owner: Uuid) -> Document {
    doc! {"_id": id.to_string(), "owner": owner.to_string()}
}

/// Filter matching a document by primary key, optionally scoped to an owner.
pub fn doc_id_scoped(id: Uuid, owner: Option<Uuid>) -> Document {
    match owner {
        Some(owner) => doc_id_owned(id, owner),
        None => doc_id(id),
    }
}
