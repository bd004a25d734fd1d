use inkpost_common::btree_map_into;
use inkpost_common::date_time::UtcDateTime;

use crate::schema::{FieldMemberSchema, Schema, SchemaMapped, ValueType};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub bio: String,
    pub age: i32,
    pub create_time: UtcDateTime,
}

impl UserItem {
    pub fn new(id: &str, display_name: &str, age: i32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: format!(
                "{}@example.com",
                display_name.to_lowercase().replace(' ', ".")
            ),
            bio: String::new(),
            age,
            create_time: UtcDateTime::UNIX_EPOCH,
        }
    }

    pub fn get_schema() -> Schema {
        Schema {
            members: btree_map_into! {
                "id" => FieldMemberSchema::new_ordered(ValueType::String),
                "displayName" => FieldMemberSchema::new_ordered(ValueType::String).searchable(),
                "email" => FieldMemberSchema::new_ordered(ValueType::String).searchable(),
                "bio" => FieldMemberSchema::new(ValueType::String).searchable(),
                "age" => FieldMemberSchema::new_ordered(ValueType::Integer),
                "createdAt" => FieldMemberSchema::new_ordered(ValueType::Timestamp),
            },
        }
    }
}

impl SchemaMapped for UserItem {
    fn get_field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.clone().into(),
            "displayName" => self.display_name.clone().into(),
            "email" => self.email.clone().into(),
            "bio" => self.bio.clone().into(),
            "age" => self.age.into(),
            "createdAt" => self.create_time.into(),
            _ => unimplemented!("SchemaMapped: UserItem::{}", name),
        }
    }
}
