use crate::query::{error::QueryResult, search::SearchQuery};
use crate::schema::Schema;
use crate::sql::{
    SqlArgumentStyle, SqlDialect, SqlFilterBuilder, SqlOrderingBuilder, SqlRenameMap,
    utility::get_argument_parameter,
};
use crate::value::Value;

/// Builder for query SQL statements.
#[derive(Debug, Clone)]
pub struct QuerySqlBuilder {
    dialect: SqlDialect,
    argument_style: SqlArgumentStyle,
    schema: Schema,
    rename_map: SqlRenameMap,
}

/// Query SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySqlStatement {
    /// WHERE clause.
    pub where_clause: Option<String>,
    /// Arguments of the WHERE clause, enough for the count query.
    pub arguments: Vec<Value>,
    /// ORDER BY clause.
    pub order_by_clause: Option<String>,
    /// Paged LIMIT and OFFSET clause.
    pub paged_limit_clause: String,
    /// Arguments of the page query.
    pub paged_arguments: Vec<Value>,
}

impl QuerySqlBuilder {
    /// Creates a new query SQL builder.
    pub fn new(dialect: SqlDialect, schema: Schema) -> Self {
        Self {
            dialect,
            argument_style: SqlArgumentStyle::default(),
            schema,
            rename_map: SqlRenameMap::default(),
        }
    }

    /// Sets the rename map.
    pub fn set_rename_map(&mut self, rename_map: SqlRenameMap) -> &mut Self {
        self.rename_map = rename_map;
        self
    }

    /// Sets the argument style.
    pub fn set_argument_style(&mut self, argument_style: SqlArgumentStyle) -> &mut Self {
        self.argument_style = argument_style;
        self
    }

    /// Builds a search query SQL statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan names members the schema cannot order or
    /// search.
    pub fn build(&self, query: &SearchQuery) -> QueryResult<QuerySqlStatement> {
        let (where_clause, arguments) = if query.filter.is_empty() {
            (None, Vec::new())
        } else {
            let (where_clause, arguments) = SqlFilterBuilder::new(self.dialect, &self.schema)
                .set_rename_map(&self.rename_map)
                .set_argument_style(self.argument_style.clone())
                .build(&query.filter)?;
            (Some(where_clause), arguments)
        };

        let order_by_clause = if query.ordering.is_empty() {
            None
        } else {
            Some(
                SqlOrderingBuilder::new(self.dialect, &self.schema)
                    .set_rename_map(&self.rename_map)
                    .build(&query.ordering)?,
            )
        };

        let mut paged_arguments = arguments.clone();
        let paged_limit_clause = format!(
            "LIMIT {} OFFSET {}",
            get_argument_parameter(&self.argument_style, paged_arguments.len() + 1),
            get_argument_parameter(&self.argument_style, paged_arguments.len() + 2),
        );
        paged_arguments.push(Self::integer_argument(query.limit()));
        paged_arguments.push(Self::integer_argument(query.offset()));

        Ok(QuerySqlStatement {
            where_clause,
            arguments,
            order_by_clause,
            paged_limit_clause,
            paged_arguments,
        })
    }

    fn integer_argument(value: u64) -> Value {
        i64::try_from(value).unwrap_or(i64::MAX).into()
    }
}

impl QuerySqlStatement {
    /// `SELECT COUNT(*)` over `from`, restricted by the filter.
    pub fn count_statement(&self, from: &str) -> String {
        match &self.where_clause {
            Some(where_clause) => format!("SELECT COUNT(*) FROM {from} WHERE {where_clause}"),
            None => format!("SELECT COUNT(*) FROM {from}"),
        }
    }

    /// Page query selecting `columns` from `from`.
    pub fn select_statement(&self, columns: &str, from: &str) -> String {
        let mut sql = format!("SELECT {columns} FROM {from}");
        if let Some(where_clause) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }
        if let Some(order_by_clause) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by_clause);
        }
        sql.push(' ');
        sql.push_str(&self.paged_limit_clause);
        sql
    }
}
