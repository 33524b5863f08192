use std::fmt::Display;

use verify_runtime::{
    JsObject, Property, PropertyDescriptor, PropertyKey, RuntimeValue, MAX_LENGTH,
};

use crate::descriptor::ActualDescriptor;

/// The reflective surface a target exposes to the checker.
///
/// Everything except `assign` and `redefine` must be free of side effects.
pub trait PropertyReflection {
    type Key: Clone + Display + PartialEq;
    type Value: Clone;

    /// The own property at `key`, if any. Inherited properties are not reported.
    fn own_property(&self, key: &Self::Key) -> Option<ActualDescriptor<Self::Value>>;

    /// Ordinary assignment (`target[key] = value`). Returns whether the
    /// target accepted the write; the checker re-reads rather than trusting it.
    fn assign(&self, key: &Self::Key, value: Self::Value) -> bool;

    /// Puts back a descriptor previously read with `own_property`.
    fn redefine(&self, key: &Self::Key, descriptor: &ActualDescriptor<Self::Value>) -> bool;

    /// Whether deleting `key` would succeed. Must not delete.
    fn can_delete(&self, key: &Self::Key) -> bool;

    /// Own keys that enumeration visits.
    fn enumerable_keys(&self) -> Vec<Self::Key>;

    fn same_value(a: &Self::Value, b: &Self::Value) -> bool;

    /// A value distinct from `current` that `key` can legally hold, used to
    /// observe whether writes stick.
    fn unlikely_value(&self, key: &Self::Key, current: &Self::Value) -> Self::Value;

    fn describe(value: &Self::Value) -> String;
}

impl From<Property> for ActualDescriptor<RuntimeValue> {
    fn from(property: Property) -> Self {
        match property {
            Property::DataDescriptor {
                value,
                writable,
                enumerable,
                configurable,
            } => ActualDescriptor::Data {
                value,
                writable,
                enumerable,
                configurable,
            },
            Property::AccessorDescriptor {
                getter,
                setter,
                enumerable,
                configurable,
            } => ActualDescriptor::Accessor {
                get: getter.map(RuntimeValue::from),
                set: setter.map(RuntimeValue::from),
                enumerable,
                configurable,
            },
        }
    }
}

fn function_slot(value: &Option<RuntimeValue>) -> Option<JsObject> {
    match value {
        Some(RuntimeValue::Object(function)) => Some(function.clone()),
        _ => None,
    }
}

fn to_property_descriptor(descriptor: &ActualDescriptor<RuntimeValue>) -> PropertyDescriptor {
    match descriptor {
        ActualDescriptor::Data {
            value,
            writable,
            enumerable,
            configurable,
        } => PropertyDescriptor::data(value.clone(), *writable, *enumerable, *configurable),
        ActualDescriptor::Accessor {
            get,
            set,
            enumerable,
            configurable,
        } => PropertyDescriptor::accessor(
            function_slot(get),
            function_slot(set),
            *enumerable,
            *configurable,
        ),
    }
}

const UNLIKELY_VALUE: &str = "unlikelyValue";

impl PropertyReflection for JsObject {
    type Key = PropertyKey;
    type Value = RuntimeValue;

    fn own_property(&self, key: &PropertyKey) -> Option<ActualDescriptor<RuntimeValue>> {
        self.get_own_property(key).map(ActualDescriptor::from)
    }

    fn assign(&self, key: &PropertyKey, value: RuntimeValue) -> bool {
        self.write_own_data(key, value).unwrap_or(false)
    }

    fn redefine(&self, key: &PropertyKey, descriptor: &ActualDescriptor<RuntimeValue>) -> bool {
        self.define_own_property(key.clone(), to_property_descriptor(descriptor))
    }

    fn can_delete(&self, key: &PropertyKey) -> bool {
        JsObject::can_delete(self, key)
    }

    fn enumerable_keys(&self) -> Vec<PropertyKey> {
        self.enumerable_own_keys()
    }

    fn same_value(a: &RuntimeValue, b: &RuntimeValue) -> bool {
        a.same_value(b)
    }

    fn unlikely_value(&self, key: &PropertyKey, current: &RuntimeValue) -> RuntimeValue {
        // An array's length only accepts lengths. Growing by one is undone by
        // restoring; at the maximum, shrinking past a trailing hole is too.
        if let (Some(elements), true) = (self.elements(), key.to_string() == "length") {
            let length = elements.len();
            let next = if length == MAX_LENGTH && !elements.contains(length - 1) {
                length - 1
            } else {
                length + 1
            };

            return next.into();
        }

        match current {
            RuntimeValue::String(str) if str.as_ref() == UNLIKELY_VALUE => {
                format!("{}{}", UNLIKELY_VALUE, UNLIKELY_VALUE).into()
            }
            _ => UNLIKELY_VALUE.into(),
        }
    }

    fn describe(value: &RuntimeValue) -> String {
        value.to_string()
    }
}
