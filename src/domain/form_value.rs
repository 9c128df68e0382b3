use serde_json::Value;

/// One field of a JSON form body, whatever JSON type the client sent.
///
/// Forms post loosely typed values, so presence follows form semantics:
/// absent, `null`, `false`, `0` and `""` all count as not filled in.
/// Anything else is read back as text.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct FormValue(Option<Value>);

impl FormValue {
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            None | Some(Value::Null) | Some(Value::Bool(false)) => true,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// The field as text, or `None` when it is blank.
    pub fn into_text(self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        self.0.map(|value| as_text(&value))
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        Self(Some(value))
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(as_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
