//! Encodings between application values and port words.

use std::sync::Arc;

use contracts::*;
use dcirc_aig::{Word, split_timed_name};
use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::{EncodingError, Value};

type EncodeFn = dyn Fn(&Value) -> Result<Word, EncodingError> + Send + Sync;
type DecodeFn = dyn Fn(&Word) -> Value + Send + Sync;

lazy_static! {
    static ref IDENTITY: Encoding = Encoding::new(
        "identity",
        |value| match value {
            Value::Word(word) => Ok(word.clone()),
            other => Err(EncodingError::Unsupported {
                encoding: "identity".to_owned(),
                value: other.clone(),
            }),
        },
        |word| Value::Word(word.clone()),
    );
}

/// A pair of pure functions translating one port's values to and from
/// wire words.
///
/// Clones share the underlying functions. Nothing checks that `decode`
/// inverts `encode`.
#[derive(Clone)]
pub struct Encoding {
    encode: Arc<EncodeFn>,
    decode: Arc<DecodeFn>,
    label: Arc<str>,
}

impl std::fmt::Debug for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Encoding").field(&self.label).finish()
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::identity()
    }
}

impl Encoding {
    /// An encoding from arbitrary closures.
    pub fn new<E, D>(label: &str, encode: E, decode: D) -> Self
    where
        E: Fn(&Value) -> Result<Word, EncodingError> + Send + Sync + 'static,
        D: Fn(&Word) -> Value + Send + Sync + 'static,
    {
        Self {
            encode: Arc::new(encode),
            decode: Arc::new(decode),
            label: Arc::from(label),
        }
    }

    /// Raw words in both directions. Only [`Value::Word`] can be encoded.
    #[must_use]
    pub fn identity() -> Self {
        IDENTITY.clone()
    }

    /// Unsigned integers of `width` bits.
    #[requires(width <= 64, "integer encodings are limited to 64 bits")]
    #[must_use]
    pub fn unsigned(width: usize) -> Self {
        Self::new(
            "unsigned",
            move |value| match value {
                Value::UInt(n) if width == 64 || *n >> width == 0 => Ok(Word::from_uint(width, *n)),
                Value::UInt(_) => Err(EncodingError::OutOfRange {
                    value: value.clone(),
                    width,
                }),
                other => Err(EncodingError::Unsupported {
                    encoding: "unsigned".to_owned(),
                    value: other.clone(),
                }),
            },
            |word| Value::UInt(word.to_uint()),
        )
    }

    /// Two's complement integers of `width` bits.
    #[requires((1..=64).contains(&width), "signed encodings need 1 to 64 bits")]
    #[must_use]
    pub fn signed(width: usize) -> Self {
        let min = i64::MIN >> (64 - width);
        let max = i64::MAX >> (64 - width);
        Self::new(
            "signed",
            move |value| match value {
                Value::Int(n) if (min..=max).contains(n) => Ok(Word::from_int(width, *n)),
                Value::Int(_) => Err(EncodingError::OutOfRange {
                    value: value.clone(),
                    width,
                }),
                other => Err(EncodingError::Unsupported {
                    encoding: "signed".to_owned(),
                    value: other.clone(),
                }),
            },
            |word| Value::Int(word.to_int()),
        )
    }

    /// Single-bit truth values.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(
            "boolean",
            |value| match value {
                Value::Bool(bit) => Ok(Word::from_bool(*bit)),
                other => Err(EncodingError::Unsupported {
                    encoding: "boolean".to_owned(),
                    value: other.clone(),
                }),
            },
            |word| Value::Bool(word.get(0).unwrap_or(false)),
        )
    }

    /// Symbols numbered by their position in `names`.
    ///
    /// Codes without a name decode to the raw word.
    #[requires(width < 64 && names.len() <= 1 << width, "every symbol needs a code")]
    #[must_use]
    pub fn symbols<S: AsRef<str>>(width: usize, names: &[S]) -> Self {
        let names: Arc<[String]> = names.iter().map(|name| name.as_ref().to_owned()).collect();
        let lookup = Arc::clone(&names);
        Self::new(
            "symbols",
            move |value| {
                let code = value
                    .as_symbol()
                    .and_then(|symbol| lookup.iter().position(|name| name == symbol));
                match code {
                    Some(code) => Ok(Word::from_uint(width, code as u64)),
                    None => Err(EncodingError::Unsupported {
                        encoding: "symbols".to_owned(),
                        value: value.clone(),
                    }),
                }
            },
            move |word| {
                usize::try_from(word.to_uint())
                    .ok()
                    .and_then(|code| names.get(code))
                    .map_or_else(|| Value::Word(word.clone()), |name| Value::Symbol(name.clone()))
            },
        )
    }

    /// Fixed-width fields packed least significant first, each with its
    /// own encoding. Only [`Value::Tuple`] values with one item per field
    /// can be encoded.
    #[must_use]
    pub fn tuple(fields: Vec<(usize, Self)>) -> Self {
        let fields: Arc<[(usize, Self)]> = fields.into();
        let unpack = Arc::clone(&fields);
        Self::new(
            "tuple",
            move |value| {
                let items = value
                    .as_tuple()
                    .filter(|items| items.len() == fields.len())
                    .ok_or_else(|| EncodingError::Unsupported {
                        encoding: "tuple".to_owned(),
                        value: value.clone(),
                    })?;
                let mut bits = Vec::new();
                for (item, (width, encoding)) in items.iter().zip(fields.iter()) {
                    let word = encoding.encode(item)?;
                    if word.width() != *width {
                        return Err(EncodingError::OutOfRange {
                            value: item.clone(),
                            width: *width,
                        });
                    }
                    bits.extend_from_slice(word.bits());
                }
                Ok(Word::from_bits(bits))
            },
            move |word| {
                let mut rest = word.bits();
                let items = unpack
                    .iter()
                    .map(|(width, encoding)| {
                        let (field, tail) = rest.split_at((*width).min(rest.len()));
                        rest = tail;
                        encoding.decode(&Word::from_bits(field.iter().copied()))
                    })
                    .collect();
                Value::Tuple(items)
            },
        )
    }

    /// Translate an application value to a word.
    ///
    /// # Errors
    ///
    /// [`EncodingError`] when the value is outside the encoding's domain.
    pub fn encode(&self, value: &Value) -> Result<Word, EncodingError> {
        (self.encode)(value)
    }

    /// Translate a word back to an application value.
    #[must_use]
    pub fn decode(&self, word: &Word) -> Value {
        (self.decode)(word)
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both handles share the same functions.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.encode, &other.encode) && Arc::ptr_eq(&self.decode, &other.decode)
    }
}

/// Encodings keyed by port name. Unlisted ports use [`Encoding::identity`].
#[derive(Debug, Clone, Default)]
pub struct EncodingTable(IndexMap<String, Encoding>);

impl EncodingTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoding for `name`, or the identity when none is registered.
    #[must_use]
    pub fn get(&self, name: &str) -> &Encoding {
        self.0.get(name).unwrap_or(&*IDENTITY)
    }

    /// Whether `name` has a registered encoding.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of registered encodings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no encodings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registered names and encodings, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Encoding)> + '_ {
        self.0.iter().map(|(name, encoding)| (name.as_str(), encoding))
    }

    /// A copy with `name` mapped to `encoding`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, encoding: Encoding) -> Self {
        self.0.insert(name.into(), encoding);
        self
    }

    /// Keep only the entries for `keys`.
    #[must_use]
    pub fn project<I, S>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| self.0.get_key_value(key.as_ref()))
            .map(|(name, encoding)| (name.clone(), encoding.clone()))
            .collect()
    }

    /// Drop the entries for `keys`.
    #[must_use]
    pub fn without<I, S>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = self.0.clone();
        for key in keys {
            kept.shift_remove(key.as_ref());
        }
        Self(kept)
    }

    /// Union of both tables; entries of `self` shadow those of `other`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.0.clone();
        for (name, encoding) in &other.0 {
            merged
                .entry(name.clone())
                .or_insert_with(|| encoding.clone());
        }
        Self(merged)
    }

    /// Rename keys; names absent from `renames` are kept.
    #[must_use]
    pub fn rename(&self, renames: &IndexMap<String, String>) -> Self {
        self.0
            .iter()
            .map(|(name, encoding)| {
                let target = renames.get(name).unwrap_or(name);
                (target.clone(), encoding.clone())
            })
            .collect()
    }

    /// A table for timed port names, each inheriting the encoding of its
    /// base name.
    #[must_use]
    pub fn retime<'a, I>(&self, timed_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        timed_names
            .into_iter()
            .filter_map(|timed| {
                let (base, _) = split_timed_name(timed)?;
                let encoding = self.0.get(base)?;
                Some((timed.to_owned(), encoding.clone()))
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Encoding)> for EncodingTable {
    fn from_iter<T: IntoIterator<Item = (K, Encoding)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, encoding)| (name.into(), encoding))
                .collect(),
        )
    }
}
