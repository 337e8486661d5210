//! Structured inputs for query-string encoding.
//!
//! [`QueryInput`] is a tagged union with one explicit constructor per shape the
//! encoder accepts: an ordered mapping, an ordered pair sequence, or a submitted
//! form described field by field. The caller resolves the shape at the call site;
//! the codec never re-detects it.

use indexmap::IndexMap;

/// A value attached to a query key: a scalar or an array of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// One value, encoded as `key=value`.
    Single(String),
    /// Multiple values, encoded as `key[0]=a&key[1]=b&…`.
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(String::from).collect())
    }
}

/// One option of a multiple-select form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Option value submitted when selected.
    pub value: String,
    /// Whether the option is selected.
    pub selected: bool,
}

impl SelectOption {
    /// Create a select option.
    pub fn new(value: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            selected,
        }
    }
}

/// The control behind a form field, with its submission state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Plain text-like input.
    Text {
        /// Current value, if the control carries one.
        value: Option<String>,
    },
    /// Checkbox: submitted only when checked, with a per-name index suffix.
    Checkbox {
        /// Current value, if the control carries one.
        value: Option<String>,
        /// Whether the box is ticked.
        checked: bool,
    },
    /// Radio button: submitted only when checked, no index suffix.
    Radio {
        /// Current value, if the control carries one.
        value: Option<String>,
        /// Whether the button is selected.
        checked: bool,
    },
    /// Multiple select: one pair per selected option.
    SelectMultiple {
        /// Options in document order.
        options: Vec<SelectOption>,
    },
    /// Any other control type: submitted as a single `name=value` pair.
    Other {
        /// Current value, if the control carries one.
        value: Option<String>,
    },
}

/// A form field descriptor: a name and the control behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Submitted field name. Anything from the first `[` on is ignored
    /// when encoding.
    pub name: String,
    /// The control and its state.
    pub control: Control,
}

impl FormField {
    /// A text input with a value.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control: Control::Text {
                value: Some(value.into()),
            },
        }
    }

    /// A field with no value at all; the encoder skips it.
    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control: Control::Text { value: None },
        }
    }

    /// A checkbox with a value and checked state.
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            control: Control::Checkbox {
                value: Some(value.into()),
                checked,
            },
        }
    }

    /// A radio button with a value and checked state.
    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            control: Control::Radio {
                value: Some(value.into()),
                checked,
            },
        }
    }

    /// A multiple-select control with its options in document order.
    pub fn select_multiple(
        name: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        Self {
            name: name.into(),
            control: Control::SelectMultiple {
                options: options.into_iter().collect(),
            },
        }
    }

    /// Any other control type carrying a value.
    pub fn other(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control: Control::Other {
                value: Some(value.into()),
            },
        }
    }
}

/// Caller-resolved input shape for the query encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// Ordered mapping from key to value(s). Iteration order defines output order.
    Map(IndexMap<String, QueryValue>),
    /// Ordered sequence of `(key, value)` pairs; duplicate keys are kept as-is.
    Pairs(Vec<(String, QueryValue)>),
    /// A submitted form, field by field in document order.
    Form(Vec<FormField>),
}

impl QueryInput {
    /// Build a map-shaped input from an ordered iterator of entries.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a pair-sequence input.
    pub fn pairs<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        Self::Pairs(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a form-shaped input.
    pub fn form(fields: impl IntoIterator<Item = FormField>) -> Self {
        Self::Form(fields.into_iter().collect())
    }

    /// Returns `true` when the input holds nothing to encode.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Map(map) => map.is_empty(),
            Self::Pairs(pairs) => pairs.is_empty(),
            Self::Form(fields) => fields.is_empty(),
        }
    }
}
