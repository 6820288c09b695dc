//! Subscript type syntax used in hierarchy files.
//!
//! ```text
//! expr  := name | name '[' args ']'
//! args  := arg (',' arg)*
//! arg   := expr | '[' [expr (',' expr)*] ']' | '()'
//! ```
//!
//! Bracketed lists only make sense as the parameter list of `Callable` and
//! `()` only as the argument of an empty `Tuple`; the parser accepts them
//! anywhere and leaves the check to lowering.

use std::fmt;

/// Parsed, unresolved type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name` or `Name[args...]`.
    Named {
        name: String,
        args: Option<Vec<TypeExpr>>,
    },
    /// `[A, B]`, as in `Callable[[A, B], R]`.
    List(Vec<TypeExpr>),
    /// `()`, as in `Tuple[()]`.
    Unit,
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Named {
            name: name.to_string(),
            args: None,
        }
    }

    pub fn subscript(name: &str, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Named {
            name: name.to_string(),
            args: Some(args),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSyntaxError {
    pub input: String,
    pub message: String,
}

impl fmt::Display for TypeSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type `{}`: {}", self.input, self.message)
    }
}

impl std::error::Error for TypeSyntaxError {}

/// Parse a complete type expression.
pub fn parse_type(input: &str) -> Result<TypeExpr, TypeSyntaxError> {
    parse_expr(input.trim()).map_err(|message| TypeSyntaxError {
        input: input.to_string(),
        message,
    })
}

fn parse_expr(s: &str) -> Result<TypeExpr, String> {
    if s.is_empty() {
        return Err("empty type".to_string());
    }
    if s == "()" {
        return Ok(TypeExpr::Unit);
    }
    if let Some(inner) = s.strip_prefix('[') {
        let inner = enclosed(s, 0, inner)?;
        if inner.trim().is_empty() {
            return Ok(TypeExpr::List(Vec::new()));
        }
        return split_args(inner)?
            .into_iter()
            .map(parse_expr)
            .collect::<Result<_, _>>()
            .map(TypeExpr::List);
    }

    let Some(open) = s.find('[') else {
        validate_name(s)?;
        return Ok(TypeExpr::named(s));
    };

    let name = s[..open].trim();
    validate_name(name)?;
    let inner = enclosed(s, open, &s[open + 1..])?;
    if inner.trim().is_empty() {
        return Err(format!("`{name}[]` needs at least one argument"));
    }
    let args = split_args(inner)?
        .into_iter()
        .map(parse_expr)
        .collect::<Result<_, _>>()?;
    Ok(TypeExpr::subscript(name, args))
}

/// The text between the `[` at `open` and its matching `]`, which must be the
/// last character of `s`. `rest` is `s` after the `[`.
fn enclosed<'a>(s: &str, open: usize, rest: &'a str) -> Result<&'a str, String> {
    let mut depth = 1i32;
    for (i, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    if open + 1 + i + 1 != s.len() {
                        return Err(format!(
                            "unexpected `{}` after closing `]`",
                            &rest[i + 1..]
                        ));
                    }
                    return Ok(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    Err("unclosed `[`".to_string())
}

/// Split on top-level commas, tracking bracket and parenthesis depth.
fn split_args(s: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth_bracket = 0i32;
    let mut depth_paren = 0i32;
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        match ch {
            '[' => depth_bracket += 1,
            ']' => depth_bracket -= 1,
            '(' => depth_paren += 1,
            ')' => depth_paren -= 1,
            ',' if depth_bracket == 0 && depth_paren == 0 => {
                parts.push(non_empty(&s[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
        if depth_bracket < 0 || depth_paren < 0 {
            return Err("unbalanced brackets".to_string());
        }
    }
    if depth_bracket != 0 || depth_paren != 0 {
        return Err("unbalanced brackets".to_string());
    }
    parts.push(non_empty(&s[start..])?);
    Ok(parts)
}

fn non_empty(arg: &str) -> Result<&str, String> {
    let arg = arg.trim();
    if arg.is_empty() {
        Err("empty argument".to_string())
    } else {
        Ok(arg)
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_alphabetic() || ch == '_');
    if valid_start && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '.') {
        Ok(())
    } else {
        Err(format!("`{name}` is not a valid name"))
    }
}
