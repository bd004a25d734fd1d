use crate::{
    ordering::{Ordering, OrderingDirection},
    query::error::QueryResult,
    schema::Schema,
};

use super::{SqlDialect, SqlRenameMap, utility::get_identifier};

pub struct SqlOrderingBuilder<'a> {
    dialect: SqlDialect,
    schema: &'a Schema,
    rename_map: Option<&'a SqlRenameMap>,
}

impl<'a> SqlOrderingBuilder<'a> {
    pub fn new(dialect: SqlDialect, schema: &'a Schema) -> Self {
        Self {
            dialect,
            schema,
            rename_map: None,
        }
    }

    pub fn set_rename_map(&mut self, rename_map: &'a SqlRenameMap) -> &mut Self {
        self.rename_map = Some(rename_map);
        self
    }

    /// Renders `ordering` as an `ORDER BY` list. Only ordered members of the
    /// schema are accepted.
    pub fn build(&self, ordering: &Ordering) -> QueryResult<String> {
        ordering.check(self.schema)?;

        let mut result = String::new();
        for (i, term) in ordering.terms.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }

            if let Some(rename_map) = self.rename_map {
                result.push_str(&get_identifier(
                    self.dialect,
                    &rename_map.rename_member(&term.name),
                    true,
                ));
            } else {
                result.push_str(&get_identifier(self.dialect, &term.name, true));
            }

            result.push(' ');

            match term.direction {
                OrderingDirection::Ascending => {
                    result.push_str("ASC");
                }
                OrderingDirection::Descending => {
                    result.push_str("DESC");
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use inkpost_common::btree_map_into;

    use crate::{ordering::OrderingTerm, query::error::QueryError, testing::schema::UserItem};

    use super::*;

    #[test]
    fn it_works() {
        let schema = UserItem::get_schema();
        let rename_map = SqlRenameMap::new(btree_map_into! {
            "createdAt" => "created_at",
        });

        assert_eq!(
            SqlOrderingBuilder::new(SqlDialect::Postgres, &schema)
                .set_rename_map(&rename_map)
                .build(&Ordering::new(vec![
                    OrderingTerm::descending("createdAt"),
                    OrderingTerm::descending("id"),
                ]))
                .unwrap(),
            r#""created_at" DESC, "id" DESC"#
        );
        assert_eq!(
            SqlOrderingBuilder::new(SqlDialect::Postgres, &schema)
                .build(&Ordering::new(vec![OrderingTerm::ascending("password")])),
            Err(QueryError::UnknownOrderingMember("password".into()))
        );
    }

    #[test]
    fn rejects_unordered_member() {
        let schema = UserItem::get_schema();
        assert!(schema.get_field("bio").is_some());
        assert_eq!(
            SqlOrderingBuilder::new(SqlDialect::Postgres, &schema).build(&Ordering::new(vec![
                OrderingTerm::ascending("displayName"),
                OrderingTerm::ascending("bio"),
            ])),
            Err(QueryError::UnknownOrderingMember("bio".into()))
        );
    }
}
