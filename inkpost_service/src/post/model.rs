use inkpost_common::{btree_map_into, date_time::UtcDateTime};
use inkpost_request::{
    schema::{FieldMemberSchema, Schema, SchemaMapped, ValueType},
    value::Value,
};
use serde::Serialize;

use crate::{
    author::model::AuthorId,
    entity::{Entity, entity_id},
};

entity_id!(PostId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub author_id: AuthorId,
    pub published: bool,
    #[serde(rename = "createdAt")]
    pub create_time: UtcDateTime,
}

impl Post {
    pub const TITLE_FIELD_NAME: &str = "title";
    pub const CONTENT_FIELD_NAME: &str = "content";
    pub const SLUG_FIELD_NAME: &str = "slug";
}

/// Transliterates `title` to ASCII, lowercases it and joins its alphanumeric
/// runs with `-`.
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

impl Entity for Post {
    type Id = PostId;

    const KIND: &'static str = "Post";
    const UNIQUE_KEY: &'static str = Self::SLUG_FIELD_NAME;

    fn id(&self) -> PostId {
        self.id
    }

    fn unique_key(&self) -> &str {
        &self.slug
    }

    fn get_schema() -> Schema {
        Schema {
            members: btree_map_into! {
                "id" => FieldMemberSchema::new_ordered(ValueType::String),
                "title" => FieldMemberSchema::new_ordered(ValueType::String).searchable(),
                "content" => FieldMemberSchema::new(ValueType::String).searchable(),
                "slug" => FieldMemberSchema::new_ordered(ValueType::String),
                "authorId" => FieldMemberSchema::new(ValueType::String),
                "published" => FieldMemberSchema::new_ordered(ValueType::Boolean),
                "createdAt" => FieldMemberSchema::new_ordered(ValueType::Timestamp),
            },
        }
    }
}

impl SchemaMapped for Post {
    fn get_field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.to_string().into(),
            "title" => self.title.clone().into(),
            "content" => self.content.clone().into(),
            "slug" => self.slug.clone().into(),
            "authorId" => self.author_id.to_string().into(),
            "published" => self.published.into(),
            "createdAt" => self.create_time.into(),
            _ => unimplemented!("SchemaMapped for Post::{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_title() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust 2024 -- edition  "), "rust-2024-edition");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_transliterates() {
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");

        let slug = slugify("日本語");
        assert!(!slug.is_empty());
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }

    #[test]
    fn schema() {
        let schema = Post::get_schema();
        assert_eq!(schema.searchable_members(), ["content", "title"]);
        assert!(schema.is_ordered("published"));
        assert!(!schema.is_ordered("content"));
    }
}
