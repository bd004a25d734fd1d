use super::{SqlArgumentStyle, SqlDialect};

pub fn get_identifier(dialect: SqlDialect, name: &str, escape: bool) -> String {
    match dialect {
        SqlDialect::Postgres => {
            if escape {
                format!("\"{}\"", name.replace('"', "\"\""))
            } else {
                name.into()
            }
        }
    }
}

pub fn get_argument_parameter(style: &SqlArgumentStyle, argument: usize) -> String {
    match style {
        SqlArgumentStyle::Indexed { prefix } => {
            format!("{prefix}{argument}")
        }
        SqlArgumentStyle::Positional { symbol } => symbol.clone(),
    }
}

/// Escapes `LIKE` wildcards so `text` is matched literally, using the default
/// `\` escape character.
pub fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
