//! Application-level values carried through encodings.

use dcirc_aig::Word;
use indexmap::IndexMap;
use itertools::Itertools;

/// Named application values, one per port.
pub type Values = IndexMap<String, Value>;

/// A value as the application sees it, before encoding onto wires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Raw wire bits.
    Word(Word),
    /// A truth value.
    Bool(bool),
    /// An unsigned integer.
    UInt(u64),
    /// A signed integer.
    Int(i64),
    /// A member of a finite set of names.
    Symbol(String),
    /// An ordered group of values, as read and written by
    /// [`Encoding::tuple`](crate::Encoding::tuple).
    Tuple(Vec<Value>),
}

impl Value {
    /// The raw word, if this is one.
    #[must_use]
    pub const fn as_word(&self) -> Option<&Word> {
        match self {
            Self::Word(word) => Some(word),
            _ => None,
        }
    }

    /// The truth value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The unsigned integer, if this is one.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(value) => Some(*value),
            _ => None,
        }
    }

    /// The signed integer, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The symbol name, if this is one.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// The tuple members, if this is a tuple.
    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word(word) => write!(f, "{word}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Tuple(items) => write!(f, "({})", items.iter().join(", ")),
        }
    }
}

impl From<Word> for Value {
    fn from(word: Word) -> Self {
        Self::Word(word)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Self::Symbol(name.to_owned())
    }
}

impl From<String> for Value {
    fn from(name: String) -> Self {
        Self::Symbol(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::UInt(5), "5")]
    #[case(Value::Int(-2), "-2")]
    #[case(Value::Bool(true), "true")]
    #[case(Value::from("idle"), "idle")]
    #[case(Value::Word(Word::from_uint(4, 3)), "4'b0011")]
    #[case(Value::Tuple(vec![Value::UInt(1), Value::from("a")]), "(1, a)")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::UInt(7).as_uint(), Some(7));
        assert_eq!(Value::UInt(7).as_int(), None);
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from("a").as_symbol(), Some("a"));
        assert_eq!(Value::Tuple(vec![]).as_tuple(), Some(&[][..]));
    }
}
