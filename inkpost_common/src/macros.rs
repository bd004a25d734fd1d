//! # Common macros.

/// Builds a `BTreeMap`, converting every key and value with `Into`.
///
/// # Examples
///
/// ```
/// # use std::collections::BTreeMap;
/// use inkpost_common::btree_map_into;
///
/// let columns: BTreeMap<String, String> = btree_map_into! {
///     "createdAt" => "created_at",
///     "authorId" => "author_id",
/// };
/// assert_eq!(columns["createdAt"], "created_at");
/// ```
#[macro_export]
macro_rules! btree_map_into {
    ($($key:expr => $value:expr),* $(,)?) => {
        ::std::collections::BTreeMap::from_iter([
            $(($key.into(), $value.into())),*
        ])
    };
}
