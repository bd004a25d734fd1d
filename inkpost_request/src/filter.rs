use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::schema::SchemaMapped;

/// Free-text predicate: matches when `text` is a case-insensitive substring of
/// any of `members`. An empty text matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub text: String,
    pub members: Vec<String>,
}

impl Filter {
    pub fn new<S, M, I>(text: S, members: M) -> Self
    where
        S: Into<String>,
        M: IntoIterator<Item = I>,
        I: Into<String>,
    {
        Self {
            text: text.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || self.members.is_empty()
    }

    pub fn evaluate<T>(&self, item: &T) -> bool
    where
        T: SchemaMapped,
    {
        if self.is_empty() {
            return true;
        }
        self.members
            .iter()
            .any(|member| item.get_field(member).contains_insensitive(&self.text))
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let text = self.text.replace('\\', "\\\\").replace('"', "\\\"");
        f.write_str(
            &self
                .members
                .iter()
                .map(|member| format!("{member}:\"{text}\""))
                .join(" OR "),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::schema::UserItem;

    use super::*;

    #[test]
    fn it_works() {
        let item = UserItem::new("1", "Jane Doe", 30);
        let members = ["displayName", "email"];

        assert!(Filter::new("doe", members).evaluate(&item));
        assert!(Filter::new("EXAMPLE.com", members).evaluate(&item));
        assert!(!Filter::new("john", members).evaluate(&item));
        assert!(Filter::default().evaluate(&item));
        assert!(Filter::new("", members).evaluate(&item));
        assert!(!Filter::new("30", ["age"]).evaluate(&item));
    }

    #[test]
    fn display() {
        assert_eq!(
            Filter::new(r#"a"b"#, ["email", "name"]).to_string(),
            r#"email:"a\"b" OR name:"a\"b""#
        );
        assert_eq!(Filter::default().to_string(), "");
    }
}
