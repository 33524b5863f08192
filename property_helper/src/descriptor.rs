use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Writable,
    Enumerable,
    Configurable,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [
        Attribute::Writable,
        Attribute::Enumerable,
        Attribute::Configurable,
    ];
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Attribute::Writable => "writable",
            Attribute::Enumerable => "enumerable",
            Attribute::Configurable => "configurable",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Get,
    Set,
}

impl Display for Accessor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Accessor::Get => "get",
            Accessor::Set => "set",
        })
    }
}

/// What a check expects to find. `value`, `get` and `set` are only compared
/// when present; the three attributes are always compared.
#[derive(Debug, Clone)]
pub struct ExpectedDescriptor<V> {
    pub value: Option<V>,
    pub get: Option<V>,
    pub set: Option<V>,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl<V> ExpectedDescriptor<V> {
    pub fn new(writable: bool, enumerable: bool, configurable: bool) -> Self {
        ExpectedDescriptor {
            value: None,
            get: None,
            set: None,
            writable,
            enumerable,
            configurable,
        }
    }

    pub fn data(value: V, writable: bool, enumerable: bool, configurable: bool) -> Self {
        ExpectedDescriptor::new(writable, enumerable, configurable).with_value(value)
    }

    #[must_use]
    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_getter(mut self, getter: V) -> Self {
        self.get = Some(getter);
        self
    }

    #[must_use]
    pub fn with_setter(mut self, setter: V) -> Self {
        self.set = Some(setter);
        self
    }

    pub fn attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Writable => self.writable,
            Attribute::Enumerable => self.enumerable,
            Attribute::Configurable => self.configurable,
        }
    }
}

/// An own property as reported by the target.
#[derive(Debug, Clone)]
pub enum ActualDescriptor<V> {
    Data {
        value: V,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<V>,
        set: Option<V>,
        enumerable: bool,
        configurable: bool,
    },
}

impl<V> ActualDescriptor<V> {
    /// Accessors have no `[[Writable]]` and report `false`.
    pub fn writable(&self) -> bool {
        match self {
            ActualDescriptor::Data { writable, .. } => *writable,
            ActualDescriptor::Accessor { .. } => false,
        }
    }

    pub fn enumerable(&self) -> bool {
        match self {
            ActualDescriptor::Data { enumerable, .. }
            | ActualDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub fn configurable(&self) -> bool {
        match self {
            ActualDescriptor::Data { configurable, .. }
            | ActualDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Writable => self.writable(),
            Attribute::Enumerable => self.enumerable(),
            Attribute::Configurable => self.configurable(),
        }
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self, ActualDescriptor::Accessor { .. })
    }

    /// Structural equality with a caller-supplied value comparison.
    pub fn same_as(&self, other: &Self, same_value: impl Fn(&V, &V) -> bool) -> bool {
        let same_slot = |a: &Option<V>, b: &Option<V>| match (a, b) {
            (Some(a), Some(b)) => same_value(a, b),
            (None, None) => true,
            _ => false,
        };

        match (self, other) {
            (
                ActualDescriptor::Data { value: a, .. },
                ActualDescriptor::Data { value: b, .. },
            ) => same_value(a, b) && self.same_attributes(other),
            (
                ActualDescriptor::Accessor {
                    get: get_a,
                    set: set_a,
                    ..
                },
                ActualDescriptor::Accessor {
                    get: get_b,
                    set: set_b,
                    ..
                },
            ) => same_slot(get_a, get_b) && same_slot(set_a, set_b) && self.same_attributes(other),
            _ => false,
        }
    }

    fn same_attributes(&self, other: &Self) -> bool {
        Attribute::ALL
            .iter()
            .all(|attribute| self.attribute(*attribute) == other.attribute(*attribute))
    }
}
