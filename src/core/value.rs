use serde::Serialize;

/// The bound model value of a picker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn serializes_untagged() {
        let text = serde_json::to_string(&Value::Text("1399/06/10".into())).expect("json");
        assert_eq!(text, "\"1399/06/10\"");
        let list = serde_json::to_string(&Value::List(vec!["a".into(), "b".into()])).expect("json");
        assert_eq!(list, "[\"a\",\"b\"]");
        assert_eq!(serde_json::to_string(&Value::None).expect("json"), "null");
    }

    #[test]
    fn empty_values() {
        assert!(Value::None.is_empty());
        assert!(Value::Text(String::new()).is_empty());
        assert!(!Value::List(vec!["x".into()]).is_empty());
    }
}
