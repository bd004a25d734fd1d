use std::{
    cmp,
    fmt::{self, Display, Formatter},
};

use itertools::Itertools;

use crate::{
    query::error::{QueryError, QueryResult},
    schema::{Schema, SchemaMapped},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ordering {
    pub terms: Vec<OrderingTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingTerm {
    pub name: String,
    pub direction: OrderingDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingDirection {
    Ascending,
    Descending,
}

impl Ordering {
    pub fn new(terms: Vec<OrderingTerm>) -> Self {
        Ordering { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn evaluate<T>(&self, lhs: &T, rhs: &T) -> Option<cmp::Ordering>
    where
        T: SchemaMapped,
    {
        for term in &self.terms {
            let a = lhs.get_field(&term.name);
            let b = rhs.get_field(&term.name);
            match a.partial_cmp(&b)? {
                cmp::Ordering::Equal => {}
                ordering => {
                    return Some(match term.direction {
                        OrderingDirection::Ascending => ordering,
                        OrderingDirection::Descending => ordering.reverse(),
                    });
                }
            }
        }
        Some(cmp::Ordering::Equal)
    }

    /// Fails on the first term that does not name an ordered member of
    /// `schema`.
    pub fn check(&self, schema: &Schema) -> QueryResult<()> {
        match self.terms.iter().find(|term| !schema.is_ordered(&term.name)) {
            Some(term) => Err(QueryError::UnknownOrderingMember(term.name.clone())),
            None => Ok(()),
        }
    }
}

impl OrderingTerm {
    pub fn new<S: Into<String>>(name: S, direction: OrderingDirection) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    pub fn ascending<S: Into<String>>(name: S) -> Self {
        Self::new(name, OrderingDirection::Ascending)
    }

    pub fn descending<S: Into<String>>(name: S) -> Self {
        Self::new(name, OrderingDirection::Descending)
    }
}

impl OrderingDirection {
    /// Accepts only the exact tokens `asc` and `desc`.
    pub fn parse(source: &str) -> Option<Self> {
        match source {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.iter().map(ToString::to_string).join(", "))
    }
}

impl Display for OrderingTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.direction)
    }
}

impl Display for OrderingDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OrderingDirection::Ascending => f.write_str("asc"),
            OrderingDirection::Descending => f.write_str("desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::schema::UserItem;

    use super::*;

    #[test]
    fn parse_direction() {
        assert_eq!(
            OrderingDirection::parse("asc"),
            Some(OrderingDirection::Ascending)
        );
        assert_eq!(
            OrderingDirection::parse("desc"),
            Some(OrderingDirection::Descending)
        );
        assert_eq!(OrderingDirection::parse("ASC"), None);
        assert_eq!(OrderingDirection::parse(" desc"), None);
        assert_eq!(OrderingDirection::parse(""), None);
    }

    #[test]
    fn evaluate() {
        let a = UserItem::new("1", "a", 30);
        let b = UserItem::new("2", "b", 30);
        assert_eq!(
            Ordering::new(vec![OrderingTerm::ascending("displayName")]).evaluate(&a, &b),
            Some(cmp::Ordering::Less)
        );
        assert_eq!(
            Ordering::new(vec![OrderingTerm::descending("displayName")]).evaluate(&a, &b),
            Some(cmp::Ordering::Greater)
        );
        assert_eq!(
            Ordering::new(vec![OrderingTerm::ascending("age")]).evaluate(&a, &b),
            Some(cmp::Ordering::Equal)
        );
        assert_eq!(
            Ordering::new(vec![
                OrderingTerm::ascending("age"),
                OrderingTerm::descending("id"),
            ])
            .evaluate(&a, &b),
            Some(cmp::Ordering::Greater)
        );
    }

    #[test]
    fn validate() {
        let schema = UserItem::get_schema();
        let ordering = Ordering::new(vec![
            OrderingTerm::descending("createdAt"),
            OrderingTerm::descending("id"),
        ]);
        assert_eq!(ordering.check(&schema), Ok(()));
        assert_eq!(ordering.to_string(), "createdAt desc, id desc");
        assert_eq!(
            Ordering::new(vec![
                OrderingTerm::ascending("age"),
                OrderingTerm::ascending("bio"),
                OrderingTerm::ascending("password"),
            ])
            .check(&schema),
            Err(QueryError::UnknownOrderingMember("bio".into()))
        );
    }
}
