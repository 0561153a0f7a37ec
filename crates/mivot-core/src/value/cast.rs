use super::Value;

const NULL_TOKENS: [&str; 5] = ["notset", "noset", "null", "none", "nan"];

/// Returns `true` if `text` is one of the tokens standing for an absent value.
pub fn is_null_token(text: &str) -> bool {
    let text = text.trim();
    NULL_TOKENS.iter().any(|token| text.eq_ignore_ascii_case(token))
}

/// Casts the text of a cell or literal to the scalar matching `dmtype`.
///
/// The scalar kind comes from the type name after the model prefix: names
/// starting with `bool`, `real`/`double`/`float` or `int`/`long`/`short`.
/// Never fails: text that cannot be represented under a numeric or boolean
/// type becomes [`Value::Null`].
pub fn cast(text: &str, dmtype: &str) -> Value {
    if is_null_token(text) {
        return Value::Null;
    }

    let name = type_name(dmtype);
    let is = |prefixes: &[&str]| prefixes.iter().any(|prefix| name.starts_with(prefix));
    let trimmed = text.trim();

    if is(&["bool"]) {
        cast_bool(trimmed)
    } else if is(&["real", "double", "float"]) {
        trimmed.parse::<f64>().map(Value::F64).unwrap_or(Value::Null)
    } else if is(&["int", "long", "short"]) {
        cast_integer(trimmed)
    } else {
        Value::String(text.to_string())
    }
}

/// `ivoa:RealQuantity` -> `realquantity`
fn type_name(dmtype: &str) -> String {
    dmtype
        .rsplit(':')
        .next()
        .unwrap_or(dmtype)
        .to_ascii_lowercase()
}

fn cast_bool(text: &str) -> Value {
    match text.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" => Value::Bool(true),
        "0" | "false" | "f" | "no" => Value::Bool(false),
        _ => Value::Null,
    }
}

fn cast_integer(text: &str) -> Value {
    if let Ok(v) = text.parse::<i64>() {
        return Value::I64(v);
    }

    match text.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Value::I64(v as i64),
        _ => Value::Null,
    }
}

impl Value {
    /// Casts this value's text rendering to the scalar matching `dmtype`.
    pub fn cast(&self, dmtype: &str) -> Value {
        match self {
            Value::Null => Value::Null,
            _ => cast(&self.to_text(), dmtype),
        }
    }
}
