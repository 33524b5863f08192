use std::cell::RefCell;
use std::fmt::{Debug, Display, Formatter, Write};
use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;

use crate::debugging::{DebugRepresentation, Renderer, Representation};
use crate::primordials::Realm;
use crate::result::JsResult;
use crate::values::function::BuiltIn;
use crate::values::property::{Property, PropertyDescriptor, PropertyKey};

use super::elements::ArrayElements;
use super::string::JsPrimitiveString;
use super::value::RuntimeValue;

#[derive(Clone)]
pub struct JsObject {
    inner: Rc<RefCell<JsObjectInner>>,
}

struct JsObjectInner {
    properties: IndexMap<PropertyKey, Property, RandomState>,
    indexed_properties: Option<ArrayElements>,
    name: Option<JsPrimitiveString>,
    prototype: Option<JsObject>,
    callable: Option<BuiltIn>,
    extensible: bool,
}

impl Default for JsObjectInner {
    fn default() -> Self {
        JsObjectInner {
            properties: IndexMap::with_hasher(RandomState::new()),
            indexed_properties: None,
            name: None,
            prototype: None,
            callable: None,
            extensible: true,
        }
    }
}

pub struct JsObjectBuilder {
    inner: JsObjectInner,
}

impl JsObjectBuilder {
    pub fn with_callable(mut self, function: BuiltIn) -> Self {
        self.inner.callable = Some(function);
        self
    }

    pub fn with_prototype(mut self, prototype: JsObject) -> Self {
        self.inner.prototype = Some(prototype);
        self
    }

    pub fn with_name(mut self, name: impl Into<JsPrimitiveString>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn with_indexed_properties(mut self, properties: Vec<RuntimeValue>) -> Self {
        self.inner.indexed_properties = Some(properties.into());
        self
    }

    pub fn with_elements(mut self, elements: ArrayElements) -> Self {
        self.inner.indexed_properties = Some(elements);
        self
    }

    pub fn with_property(
        mut self,
        key: impl Into<PropertyKey>,
        value: impl Into<RuntimeValue>,
    ) -> Self {
        self.inner
            .properties
            .insert(key.into(), Property::value(value.into()));
        self
    }

    pub fn with_value_property(
        mut self,
        key: impl Into<PropertyKey>,
        value: impl Into<RuntimeValue>,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        self.inner.properties.insert(
            key.into(),
            Property::DataDescriptor {
                value: value.into(),
                writable,
                enumerable,
                configurable,
            },
        );
        self
    }

    pub fn build(self) -> JsObject {
        JsObject {
            inner: Rc::new(RefCell::new(self.inner)),
        }
    }
}

impl JsObject {
    pub fn builder() -> JsObjectBuilder {
        JsObjectBuilder {
            inner: JsObjectInner::default(),
        }
    }

    pub fn new() -> Self {
        JsObject::builder().build()
    }

    pub fn is_function(&self) -> bool {
        self.inner.borrow().callable.is_some()
    }

    pub fn is_array(&self) -> bool {
        self.inner.borrow().indexed_properties.is_some()
    }

    pub fn callable(&self) -> Option<BuiltIn> {
        self.inner.borrow().callable.clone()
    }

    pub fn name(&self) -> Option<JsPrimitiveString> {
        self.inner.borrow().name.clone()
    }

    pub fn prototype(&self) -> Option<JsObject> {
        self.inner.borrow().prototype.clone()
    }

    pub fn set_prototype(&self, prototype: Option<JsObject>) {
        self.inner.borrow_mut().prototype = prototype;
    }

    pub fn is_extensible(&self) -> bool {
        self.inner.borrow().extensible
    }

    pub fn prevent_extensions(&self) {
        self.inner.borrow_mut().extensible = false;
    }

    /// Indexed storage of an array object.
    pub fn elements(&self) -> Option<ArrayElements> {
        self.inner.borrow().indexed_properties.clone()
    }

    pub(crate) fn replace_elements(&self, elements: ArrayElements) {
        if let Some(current) = &mut self.inner.borrow_mut().indexed_properties {
            *current = elements;
        }
    }

    /// [[GetOwnProperty]]
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<Property> {
        let inner = self.inner.borrow();

        if let Some(elements) = &inner.indexed_properties {
            if let Some(index) = key.as_array_index() {
                return elements.get(index).cloned().map(Property::value);
            }

            if is_length(key) {
                return Some(Property::DataDescriptor {
                    value: elements.len().into(),
                    writable: true,
                    enumerable: false,
                    configurable: false,
                });
            }
        }

        inner.properties.get(key).cloned()
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.get_own_property(key).is_some()
    }

    /// Looks the property up along the prototype chain.
    pub fn get_property(&self, key: &PropertyKey) -> Option<Property> {
        self.get_own_property(key)
            .or_else(|| self.prototype().and_then(|prototype| prototype.get_property(key)))
    }

    /// [[DefineOwnProperty]]. Returns `false` when the definition is rejected.
    pub fn define_own_property(
        &self,
        key: impl Into<PropertyKey>,
        descriptor: PropertyDescriptor,
    ) -> bool {
        let key = key.into();

        if self.is_array() {
            if let Some(index) = key.as_array_index() {
                return self.define_element(index, descriptor);
            }

            if is_length(&key) {
                return self.define_length(descriptor);
            }
        }

        let current = self.inner.borrow().properties.get(&key).cloned();
        let extensible = self.is_extensible();

        match validate_and_apply(extensible, current, descriptor) {
            Some(property) => {
                self.inner.borrow_mut().properties.insert(key, property);
                true
            }
            None => {
                log::trace!("Rejected definition of {:?}", key);
                false
            }
        }
    }

    pub fn define_value_property(
        &self,
        key: impl Into<PropertyKey>,
        value: impl Into<RuntimeValue>,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> bool {
        self.define_own_property(
            key,
            PropertyDescriptor::data(value, writable, enumerable, configurable),
        )
    }

    pub fn define_accessor_property(
        &self,
        key: impl Into<PropertyKey>,
        getter: Option<JsObject>,
        setter: Option<JsObject>,
        enumerable: bool,
        configurable: bool,
    ) -> bool {
        self.define_own_property(
            key,
            PropertyDescriptor::accessor(getter, setter, enumerable, configurable),
        )
    }

    /// [[Get]]
    pub fn get(&self, key: &PropertyKey, realm: &Realm) -> JsResult {
        match self.get_property(key) {
            Some(Property::DataDescriptor { value, .. }) => Ok(value),
            Some(Property::AccessorDescriptor {
                getter: Some(getter),
                ..
            }) => realm.call(&getter, &self.clone().into(), &[]),
            _ => Ok(RuntimeValue::Undefined),
        }
    }

    /// Assigns to an own data property the way `obj[key] = value` would.
    ///
    /// `None` when there is no own data property, otherwise whether the
    /// write took effect.
    pub fn write_own_data(&self, key: &PropertyKey, value: RuntimeValue) -> Option<bool> {
        match self.get_own_property(key)? {
            Property::DataDescriptor { writable: true, .. } => Some(self.define_own_property(
                key.clone(),
                PropertyDescriptor {
                    value: Some(value),
                    ..Default::default()
                },
            )),
            Property::DataDescriptor { .. } => {
                log::trace!("Ignored write to read-only {:?}", key);
                Some(false)
            }
            Property::AccessorDescriptor { .. } => None,
        }
    }

    /// [[Set]] with the object as its own receiver.
    pub fn set(&self, key: PropertyKey, value: RuntimeValue, realm: &Realm) -> JsResult<bool> {
        if let Some(written) = self.write_own_data(&key, value.clone()) {
            return Ok(written);
        }

        match self.get_property(&key) {
            Some(Property::DataDescriptor {
                writable: false, ..
            }) => Ok(false),
            Some(Property::AccessorDescriptor {
                setter: Some(setter),
                ..
            }) => {
                realm.call(&setter, &self.clone().into(), &[value])?;
                Ok(true)
            }
            Some(Property::AccessorDescriptor { setter: None, .. }) => Ok(false),
            _ => Ok(self.define_own_property(key, PropertyDescriptor::data(value, true, true, true))),
        }
    }

    /// [[Delete]]
    pub fn delete(&self, key: &PropertyKey) -> bool {
        match self.get_own_property(key) {
            None => true,
            Some(property) if !property.configurable() => false,
            Some(_) => {
                let mut inner = self.inner.borrow_mut();

                if let (Some(elements), Some(index)) =
                    (&mut inner.indexed_properties, key.as_array_index())
                {
                    elements.remove(index);
                    return true;
                }

                inner.properties.shift_remove(key);
                true
            }
        }
    }

    /// Whether [[Delete]] would succeed, without deleting anything.
    pub fn can_delete(&self, key: &PropertyKey) -> bool {
        self.get_own_property(key)
            .map_or(true, |property| property.configurable())
    }

    /// [[OwnPropertyKeys]]: integer indices ascending, then strings in
    /// insertion order, then symbols in insertion order.
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        let inner = self.inner.borrow();
        let mut keys = Vec::with_capacity(inner.properties.len());

        if let Some(elements) = &inner.indexed_properties {
            keys.extend(elements.indices().map(PropertyKey::from));
        }

        let mut indices: Vec<(usize, &PropertyKey)> = inner
            .properties
            .keys()
            .filter_map(|key| key.as_array_index().map(|index| (index, key)))
            .collect();
        indices.sort_by(|(a, _), (b, _)| a.cmp(b));
        keys.extend(indices.into_iter().map(|(_, key)| key.clone()));

        if inner.indexed_properties.is_some() {
            keys.push("length".into());
        }

        keys.extend(
            inner
                .properties
                .keys()
                .filter(|key| !key.is_symbol() && key.as_array_index().is_none())
                .cloned(),
        );
        keys.extend(inner.properties.keys().filter(|key| key.is_symbol()).cloned());

        keys
    }

    /// Own keys whose property is enumerable, symbols included.
    pub fn enumerable_own_keys(&self) -> Vec<PropertyKey> {
        self.own_property_keys()
            .into_iter()
            .filter(|key| {
                self.get_own_property(key)
                    .map_or(false, |property| property.enumerable())
            })
            .collect()
    }

    fn define_element(&self, index: usize, descriptor: PropertyDescriptor) -> bool {
        let plain = !descriptor.is_accessor_descriptor()
            && descriptor.writable != Some(false)
            && descriptor.enumerable != Some(false)
            && descriptor.configurable != Some(false);

        if !plain {
            log::trace!("Array element {} only supports default attributes", index);
            return false;
        }

        let extensible = self.is_extensible();
        let mut inner = self.inner.borrow_mut();
        let Some(elements) = &mut inner.indexed_properties else {
            return false;
        };

        let value = match elements.get(index) {
            Some(current) => descriptor.value.unwrap_or_else(|| current.clone()),
            None if !extensible => return false,
            None => descriptor.value.unwrap_or_default(),
        };
        elements.set(index, value);

        true
    }

    fn define_length(&self, descriptor: PropertyDescriptor) -> bool {
        if descriptor.is_accessor_descriptor()
            || descriptor.configurable == Some(true)
            || descriptor.enumerable == Some(true)
            || descriptor.writable == Some(false)
        {
            log::trace!("Array length only supports its default attributes");
            return false;
        }

        let Some(value) = descriptor.value else {
            return true;
        };

        let RuntimeValue::Float(length) = value else {
            return false;
        };

        if length.fract() != 0.0 || length < 0.0 || length > f64::from(u32::MAX) {
            return false;
        }

        if let Some(elements) = &mut self.inner.borrow_mut().indexed_properties {
            elements.set_length(length as usize);
        }

        true
    }
}

fn is_length(key: &PropertyKey) -> bool {
    matches!(key, PropertyKey::String(str) if str.as_ref() == "length")
}

fn same_function(a: &Option<JsObject>, b: &Option<JsObject>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}

/// ValidateAndApplyPropertyDescriptor: the property that results from
/// applying `descriptor` over `current`, or `None` if the change is not allowed.
fn validate_and_apply(
    extensible: bool,
    current: Option<Property>,
    descriptor: PropertyDescriptor,
) -> Option<Property> {
    let Some(current) = current else {
        return extensible.then(|| descriptor.into_property());
    };

    if !current.configurable() {
        if descriptor.configurable == Some(true) {
            return None;
        }

        if descriptor
            .enumerable
            .map_or(false, |enumerable| enumerable != current.enumerable())
        {
            return None;
        }

        match &current {
            Property::DataDescriptor { .. } if descriptor.is_accessor_descriptor() => return None,
            Property::AccessorDescriptor { .. } if descriptor.is_data_descriptor() => return None,
            Property::AccessorDescriptor { getter, setter, .. } => {
                if let Some(get) = &descriptor.get {
                    if !same_function(get, getter) {
                        return None;
                    }
                }

                if let Some(set) = &descriptor.set {
                    if !same_function(set, setter) {
                        return None;
                    }
                }
            }
            Property::DataDescriptor {
                value,
                writable: false,
                ..
            } => {
                if descriptor.writable == Some(true) {
                    return None;
                }

                if let Some(new_value) = &descriptor.value {
                    if !new_value.same_value(value) {
                        return None;
                    }
                }
            }
            Property::DataDescriptor { .. } => {}
        }
    }

    let enumerable = descriptor.enumerable.unwrap_or(current.enumerable());
    let configurable = descriptor.configurable.unwrap_or(current.configurable());

    let property = match current {
        Property::DataDescriptor { .. } if descriptor.is_accessor_descriptor() => {
            Property::AccessorDescriptor {
                getter: descriptor.get.flatten(),
                setter: descriptor.set.flatten(),
                enumerable,
                configurable,
            }
        }
        Property::AccessorDescriptor { .. } if descriptor.is_data_descriptor() => {
            Property::DataDescriptor {
                value: descriptor.value.unwrap_or_default(),
                writable: descriptor.writable.unwrap_or(false),
                enumerable,
                configurable,
            }
        }
        Property::DataDescriptor {
            value, writable, ..
        } => Property::DataDescriptor {
            value: descriptor.value.unwrap_or(value),
            writable: descriptor.writable.unwrap_or(writable),
            enumerable,
            configurable,
        },
        Property::AccessorDescriptor { getter, setter, .. } => Property::AccessorDescriptor {
            getter: descriptor.get.unwrap_or(getter),
            setter: descriptor.set.unwrap_or(setter),
            enumerable,
            configurable,
        },
    };

    Some(property)
}

impl Default for JsObject {
    fn default() -> Self {
        JsObject::new()
    }
}

impl From<JsObject> for RuntimeValue {
    fn from(obj: JsObject) -> Self {
        RuntimeValue::Object(obj)
    }
}

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Display for JsObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();

        if let Some(callable) = &inner.callable {
            return f.write_fmt(format_args!("function {}() {{ [native code] }}", callable.name));
        }

        match &inner.name {
            Some(name) => f.write_fmt(format_args!("[object {}]", name)),
            None if inner.indexed_properties.is_some() => f.write_str("[object Array]"),
            None => f.write_str("[object Object]"),
        }
    }
}

impl Debug for JsObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut renderer = Renderer::debug(f, 2);

        renderer.render(self)
    }
}

impl DebugRepresentation for JsObject {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        let value = self.inner.borrow();

        if let Some(callable) = &value.callable {
            renderer.function(callable.name)?;

            if renderer.representation == Representation::Compact {
                return Ok(());
            }

            renderer.formatter.write_char(' ')?;
        } else if let Some(name) = &value.name {
            renderer.formatter.write_fmt(format_args!("{} ", name))?;
        }

        if renderer.representation == Representation::Compact {
            return renderer.literal("{...}");
        }

        renderer.formatter.write_char('{')?;
        if let Some(elements) = &value.indexed_properties {
            for (index, element) in elements.iter() {
                renderer.internal_index(index)?;
                renderer.render(element)?;
                renderer.formatter.write_str(", ")?;
            }
        }

        for (key, property) in &value.properties {
            renderer.formatter.write_fmt(format_args!("{}: ", key))?;
            match property {
                Property::DataDescriptor { value, .. } => renderer.render(value)?,
                Property::AccessorDescriptor { .. } => renderer.literal("[Getter/Setter]")?,
            };
            renderer.formatter.write_str(", ")?;
        }

        renderer.formatter.write_char('}')?;

        Ok(())
    }
}
