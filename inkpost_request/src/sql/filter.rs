use crate::{
    filter::Filter,
    query::error::{QueryError, QueryResult},
    schema::Schema,
    sql::{
        SqlArgumentStyle, SqlDialect, SqlRenameMap,
        utility::{escape_like_pattern, get_argument_parameter, get_identifier},
    },
    value::Value,
};

pub struct SqlFilterBuilder<'a> {
    dialect: SqlDialect,
    argument_style: SqlArgumentStyle,
    schema: &'a Schema,
    rename_map: Option<&'a SqlRenameMap>,
    argument_offset: usize,
}

impl<'a> SqlFilterBuilder<'a> {
    pub fn new(dialect: SqlDialect, schema: &'a Schema) -> Self {
        Self {
            dialect,
            argument_style: SqlArgumentStyle::default(),
            schema,
            rename_map: None,
            argument_offset: 0,
        }
    }

    pub fn set_rename_map(&mut self, rename_map: &'a SqlRenameMap) -> &mut Self {
        self.rename_map = Some(rename_map);
        self
    }

    pub fn set_argument_offset(&mut self, offset: usize) -> &mut Self {
        self.argument_offset = offset;
        self
    }

    pub fn set_argument_style(&mut self, argument_style: SqlArgumentStyle) -> &mut Self {
        self.argument_style = argument_style;
        self
    }

    /// Renders the filter as a disjunction of `ILIKE` tests over its members.
    ///
    /// With indexed arguments the pattern is bound once and shared by every
    /// member; positional arguments repeat it.
    pub fn build(&self, filter: &Filter) -> QueryResult<(String, Vec<Value>)> {
        for member in &filter.members {
            if !self
                .schema
                .get_field(member)
                .is_some_and(|field| field.searchable)
            {
                return Err(QueryError::UnsearchableMember(member.clone()));
            }
        }

        let pattern: Value = format!("%{}%", escape_like_pattern(&filter.text)).into();
        let mut arguments = Vec::new();
        let mut parts = Vec::with_capacity(filter.members.len());
        for member in &filter.members {
            let column = match self.rename_map {
                Some(rename_map) => rename_map.rename_member(member),
                None => member.clone(),
            };
            let reuse = matches!(self.argument_style, SqlArgumentStyle::Indexed { .. })
                && !arguments.is_empty();
            if !reuse {
                arguments.push(pattern.clone());
            }
            parts.push(format!(
                "{} ILIKE {}",
                get_identifier(self.dialect, &column, true),
                get_argument_parameter(
                    &self.argument_style,
                    self.argument_offset + arguments.len()
                ),
            ));
        }

        let mut result = parts.join(" OR ");
        if parts.len() > 1 {
            result = format!("({result})");
        }
        Ok((result, arguments))
    }
}
