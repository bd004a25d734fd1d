use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use crate::value::Value;

/// Which members of an entity can be ordered and searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub members: BTreeMap<String, FieldMemberSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMemberSchema {
    pub value_type: ValueType,
    /// Whether the field may be used as an order key.
    pub ordered: bool,
    /// Whether the field takes part in free-text filtering.
    pub searchable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Boolean,
    /// The only type free-text filters look at.
    String,
    Timestamp,
}

/// Records that expose their members by schema name.
///
/// Only called with names present in the record's schema.
pub trait SchemaMapped {
    fn get_field(&self, name: &str) -> Value;
}

impl Schema {
    pub fn get_field(&self, name: &str) -> Option<&FieldMemberSchema> {
        self.members.get(name)
    }

    /// Checks whether `name` belongs to the sortable field set.
    pub fn is_ordered(&self, name: &str) -> bool {
        self.get_field(name).is_some_and(|field| field.ordered)
    }

    /// Members that may be used as an order key.
    pub fn ordered_members(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|(_, field)| field.ordered)
            .map(|(name, _)| name.as_str())
    }

    /// Members matched by a free-text filter, in a fixed order.
    pub fn searchable_members(&self) -> Vec<String> {
        self.members
            .iter()
            .filter(|(_, field)| field.searchable && field.value_type == ValueType::String)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl FieldMemberSchema {
    pub const fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            ordered: false,
            searchable: false,
        }
    }

    /// A member that can also be used as a sort key.
    pub const fn new_ordered(value_type: ValueType) -> Self {
        Self {
            value_type,
            ordered: true,
            searchable: false,
        }
    }

    /// Marks the field as searchable.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
