// src/models.rs

pub mod access_group;
pub mod access_point;
pub mod invitation;
pub mod location;
pub mod options;
pub mod organization;
pub mod roblox;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize};

/// Generic `{ "message": "..." }` body used by the XCS API for mutations and errors.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiMessage {
    #[schema(example = "Successfully updated access point.")]
    pub message: String,
}

/// Response of a create call. The backend names the new id after the entity
/// (`organizationId`, `locationId`, ...), so every spelling lands in `id`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: String,
    #[serde(
        default,
        alias = "organizationId",
        alias = "locationId",
        alias = "accessPointId",
        alias = "accessGroupId"
    )]
    pub id: Option<String>,
}

/// Records that live in id-keyed JSON objects (`{"<id>": {...}}`).
pub trait Keyed {
    fn fill_id(&mut self, key: String);
}

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Decodes a collection that may arrive either as an array or as an object
/// keyed by id, keeping document order in both cases.
pub(crate) mod keyed {
    use std::{fmt, marker::PhantomData};

    use serde::{
        de::{Error, MapAccess, SeqAccess, Visitor},
        Deserialize, Deserializer,
    };

    use super::Keyed;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Keyed,
    {
        deserializer.deserialize_any(KeyedVisitor(PhantomData))
    }

    struct KeyedVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for KeyedVisitor<T>
    where
        T: Deserialize<'de> + Keyed,
    {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list or an object keyed by id")
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(items)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut items = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, mut item)) = map.next_entry::<String, T>()? {
                item.fill_id(key);
                items.push(item);
            }
            Ok(items)
        }
    }
}

/// Wrapper for endpoints whose whole body is a keyed collection.
#[derive(Debug, Deserialize)]
#[serde(transparent, bound(deserialize = "T: Deserialize<'de> + Keyed"))]
pub(crate) struct KeyedList<T>(#[serde(deserialize_with = "keyed::deserialize")] pub Vec<T>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::access_group::AccessGroup;

    #[test]
    fn keyed_object_keeps_document_order_and_fills_ids() {
        let body = r#"{
            "zeta": {"name": "Zeta", "type": "organization"},
            "alpha": {"id": "alpha-explicit", "name": "Alpha", "type": "organization"}
        }"#;

        let KeyedList(groups) = serde_json::from_str::<KeyedList<AccessGroup>>(body).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "zeta");
        assert_eq!(groups[0].name, "Zeta");
        assert_eq!(groups[1].id, "alpha-explicit");
    }

    #[test]
    fn keyed_accepts_arrays_and_null() {
        let KeyedList(groups) = serde_json::from_str::<KeyedList<AccessGroup>>(
            r#"[{"id": "g1", "name": "Front", "type": "organization"}]"#,
        )
        .unwrap();
        assert_eq!(groups[0].id, "g1");

        let KeyedList(empty) = serde_json::from_str::<KeyedList<AccessGroup>>("null").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn created_response_reads_entity_specific_id() {
        let created: CreatedResponse =
            serde_json::from_str(r#"{"message": "Created.", "locationId": "loc-9"}"#).unwrap();
        assert_eq!(created.id.as_deref(), Some("loc-9"));
    }
}
