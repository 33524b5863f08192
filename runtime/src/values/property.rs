use std::fmt::{Debug, Display, Formatter};

use colored::Colorize;

use super::object::JsObject;
use super::string::JsPrimitiveString;
use super::symbols::JsSymbol;
use super::value::RuntimeValue;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(JsPrimitiveString),
    Symbol(JsSymbol),
}

impl PropertyKey {
    pub fn as_array_index(&self) -> Option<usize> {
        match self {
            PropertyKey::String(str) => str.as_array_index(),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        PropertyKey::String(value.into())
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value.into())
    }
}

impl From<usize> for PropertyKey {
    fn from(value: usize) -> Self {
        PropertyKey::String(value.to_string().into())
    }
}

impl From<JsPrimitiveString> for PropertyKey {
    fn from(value: JsPrimitiveString) -> Self {
        PropertyKey::String(value)
    }
}

impl From<JsSymbol> for PropertyKey {
    fn from(value: JsSymbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

impl From<PropertyKey> for RuntimeValue {
    fn from(key: PropertyKey) -> Self {
        match key {
            PropertyKey::String(str) => RuntimeValue::String(str),
            PropertyKey::Symbol(symbol) => RuntimeValue::Symbol(symbol),
        }
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(str) => Display::fmt(str, f),
            PropertyKey::Symbol(symbol) => Display::fmt(symbol, f),
        }
    }
}

impl Debug for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(str) => Debug::fmt(str, f),
            PropertyKey::Symbol(symbol) => Debug::fmt(symbol, f),
        }
    }
}

/// A complete own property as stored on an object.
#[derive(Clone)]
pub enum Property {
    DataDescriptor {
        value: RuntimeValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    AccessorDescriptor {
        getter: Option<JsObject>,
        setter: Option<JsObject>,
        enumerable: bool,
        configurable: bool,
    },
}

impl Property {
    /// The attributes an assignment or object literal gives a new property.
    pub fn value(value: impl Into<RuntimeValue>) -> Property {
        Property::DataDescriptor {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn enumerable(&self) -> bool {
        match self {
            Property::DataDescriptor { enumerable, .. }
            | Property::AccessorDescriptor { enumerable, .. } => *enumerable,
        }
    }

    pub fn configurable(&self) -> bool {
        match self {
            Property::DataDescriptor { configurable, .. }
            | Property::AccessorDescriptor { configurable, .. } => *configurable,
        }
    }

    pub fn to_descriptor(&self) -> PropertyDescriptor {
        match self.clone() {
            Property::DataDescriptor {
                value,
                writable,
                enumerable,
                configurable,
            } => PropertyDescriptor::data(value, writable, enumerable, configurable),
            Property::AccessorDescriptor {
                getter,
                setter,
                enumerable,
                configurable,
            } => PropertyDescriptor::accessor(getter, setter, enumerable, configurable),
        }
    }
}

impl Debug for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let flags = |writable: Option<bool>, enumerable: bool, configurable: bool| {
            let mut flags = String::new();
            if writable.unwrap_or(false) {
                flags.push('w');
            }
            if enumerable {
                flags.push('e');
            }
            if configurable {
                flags.push('c');
            }
            flags
        };

        match self {
            Property::DataDescriptor {
                value,
                writable,
                enumerable,
                configurable,
            } => f.write_fmt(format_args!(
                "{:?} {}",
                value,
                flags(Some(*writable), *enumerable, *configurable).blue()
            )),
            Property::AccessorDescriptor {
                enumerable,
                configurable,
                ..
            } => f.write_fmt(format_args!(
                "{} {}",
                "accessor".blue(),
                flags(None, *enumerable, *configurable).blue()
            )),
        }
    }
}

/// A possibly partial descriptor, as passed to `Object.defineProperty`.
///
/// Absent fields keep their current value on an existing property and
/// default to `undefined`/`false` on a new one.
#[derive(Clone, Default, Debug)]
pub struct PropertyDescriptor {
    pub value: Option<RuntimeValue>,
    pub writable: Option<bool>,
    pub get: Option<Option<JsObject>>,
    pub set: Option<Option<JsObject>>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub fn data(
        value: impl Into<RuntimeValue>,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        PropertyDescriptor {
            value: Some(value.into()),
            writable: Some(writable),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Default::default()
        }
    }

    pub fn accessor(
        get: Option<JsObject>,
        set: Option<JsObject>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        PropertyDescriptor {
            get: Some(get),
            set: Some(set),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Default::default()
        }
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_accessor_descriptor() && !self.is_data_descriptor()
    }

    /// Builds the property a definition creates when no property exists yet.
    pub(crate) fn into_property(self) -> Property {
        let enumerable = self.enumerable.unwrap_or(false);
        let configurable = self.configurable.unwrap_or(false);

        if self.is_accessor_descriptor() {
            Property::AccessorDescriptor {
                getter: self.get.flatten(),
                setter: self.set.flatten(),
                enumerable,
                configurable,
            }
        } else {
            Property::DataDescriptor {
                value: self.value.unwrap_or_default(),
                writable: self.writable.unwrap_or(false),
                enumerable,
                configurable,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::values::property::{Property, PropertyDescriptor, PropertyKey};
    use crate::RuntimeValue;
    use assert_matches::assert_matches;

    #[test]
    fn test_partial_descriptor_defaults_to_false() {
        let property = PropertyDescriptor {
            value: Some(RuntimeValue::Float(0.0)),
            ..Default::default()
        }
        .into_property();

        assert_matches!(
            property,
            Property::DataDescriptor {
                writable: false,
                enumerable: false,
                configurable: false,
                ..
            }
        );
    }

    #[test]
    fn test_accessor_descriptor_detection() {
        let descriptor = PropertyDescriptor::accessor(None, None, false, true);

        assert!(descriptor.is_accessor_descriptor());
        assert!(!descriptor.is_data_descriptor());
        assert!(PropertyDescriptor::default().is_generic_descriptor());
    }

    #[test]
    fn test_index_keys() {
        assert_eq!(PropertyKey::from(3usize).as_array_index(), Some(3));
        assert_eq!(PropertyKey::from("length").as_array_index(), None);
    }
}
