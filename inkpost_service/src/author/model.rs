use inkpost_common::{btree_map_into, date_time::UtcDateTime};
use inkpost_request::{
    schema::{FieldMemberSchema, Schema, SchemaMapped, ValueType},
    value::Value,
};
use serde::Serialize;

use crate::entity::{Entity, entity_id};

entity_id!(AuthorId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub create_time: UtcDateTime,
}

impl Author {
    pub const NAME_FIELD_NAME: &str = "name";
    pub const EMAIL_FIELD_NAME: &str = "email";
}

impl Entity for Author {
    type Id = AuthorId;

    const KIND: &'static str = "Author";
    const UNIQUE_KEY: &'static str = Self::EMAIL_FIELD_NAME;

    fn id(&self) -> AuthorId {
        self.id
    }

    fn unique_key(&self) -> &str {
        &self.email
    }

    fn get_schema() -> Schema {
        Schema {
            members: btree_map_into! {
                "id" => FieldMemberSchema::new_ordered(ValueType::String),
                "name" => FieldMemberSchema::new_ordered(ValueType::String).searchable(),
                "email" => FieldMemberSchema::new_ordered(ValueType::String).searchable(),
                "createdAt" => FieldMemberSchema::new_ordered(ValueType::Timestamp),
            },
        }
    }
}

impl SchemaMapped for Author {
    fn get_field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.to_string().into(),
            "name" => self.name.clone().into(),
            "email" => self.email.clone().into(),
            "createdAt" => self.create_time.into(),
            _ => unimplemented!("SchemaMapped for Author::{name}"),
        }
    }
}
