use std::fmt;

/// Key of a table entry
///
/// Integer keys order before string keys. Integers compare numerically,
/// strings bytewise.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "Key({i})"),
            Key::Str(s) => write!(f, "Key(\"{s}\")"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_creation() {
        assert_eq!(Key::from("hello"), Key::Str("hello".to_string()));
        assert_eq!(Key::from(7i32), Key::Int(7));
        assert_eq!(Key::from(3usize).as_int(), Some(3));
        assert_eq!(Key::from("x").as_str(), Some("x"));
        assert_eq!(Key::from(1i64).as_str(), None);
    }

    #[test]
    fn test_key_compare() {
        assert!(Key::from("abc") < Key::from("abd"));
        assert!(Key::from(2i64) < Key::from(10i64));
        // integers always sort first
        assert!(Key::from(i64::MAX) < Key::from(""));
    }

    #[test]
    fn test_key_format() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(-4i64).to_string(), "-4");
        assert_eq!(format!("{:?}", Key::from("a")), "Key(\"a\")");
        assert_eq!(format!("{:?}", Key::from(1i64)), "Key(1)");
    }
}
