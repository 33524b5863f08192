use super::object_target;
use crate::primordials::Realm;
use crate::result::{ExecutionError, JsResult};
use crate::values::function::{argument, BuiltinFn};
use crate::values::property::{Property, PropertyDescriptor, PropertyKey};
use crate::{JsObject, RuntimeValue};

pub(crate) const STATIC_FUNCTIONS: &[(&str, usize, BuiltinFn)] = &[
    ("getOwnPropertyDescriptor", 2, get_own_property_descriptor),
    ("defineProperty", 3, define_property),
    ("keys", 1, keys),
    ("getOwnPropertyNames", 1, get_own_property_names),
    ("preventExtensions", 1, prevent_extensions),
    ("isExtensible", 1, is_extensible),
];

pub(crate) const PROTOTYPE_FUNCTIONS: &[(&str, usize, BuiltinFn)] = &[
    ("hasOwnProperty", 1, has_own_property),
    ("propertyIsEnumerable", 1, property_is_enumerable),
];

pub(crate) fn constructor(
    realm: &Realm,
    _: &RuntimeValue,
    arguments: &[RuntimeValue],
) -> JsResult {
    match argument(arguments, 0) {
        RuntimeValue::Object(obj) => Ok(obj.into()),
        _ => Ok(realm.new_object().into()),
    }
}

/// FromPropertyDescriptor
fn from_property(realm: &Realm, property: Property) -> JsObject {
    let object = realm.new_object();

    match property {
        Property::DataDescriptor {
            value,
            writable,
            enumerable,
            configurable,
        } => {
            object.define_value_property("value", value, true, true, true);
            object.define_value_property("writable", writable, true, true, true);
            object.define_value_property("enumerable", enumerable, true, true, true);
            object.define_value_property("configurable", configurable, true, true, true);
        }
        Property::AccessorDescriptor {
            getter,
            setter,
            enumerable,
            configurable,
        } => {
            let getter = RuntimeValue::from(getter.map(RuntimeValue::from));
            let setter = RuntimeValue::from(setter.map(RuntimeValue::from));

            object.define_value_property("get", getter, true, true, true);
            object.define_value_property("set", setter, true, true, true);
            object.define_value_property("enumerable", enumerable, true, true, true);
            object.define_value_property("configurable", configurable, true, true, true);
        }
    }

    object
}

fn read_field(realm: &Realm, object: &JsObject, key: &str) -> JsResult<Option<RuntimeValue>> {
    let key = PropertyKey::from(key);

    if object.get_property(&key).is_none() {
        return Ok(None);
    }

    object.get(&key, realm).map(Some)
}

fn read_accessor(
    realm: &Realm,
    object: &JsObject,
    key: &str,
) -> JsResult<Option<Option<JsObject>>> {
    match read_field(realm, object, key)? {
        None => Ok(None),
        Some(RuntimeValue::Undefined) => Ok(Some(None)),
        Some(RuntimeValue::Object(function)) if function.is_function() => Ok(Some(Some(function))),
        Some(other) => Err(ExecutionError::TypeError(format!(
            "Getter or setter must be a function: {}",
            other
        ))),
    }
}

/// ToPropertyDescriptor
fn to_property_descriptor(realm: &Realm, value: &RuntimeValue) -> JsResult<PropertyDescriptor> {
    let RuntimeValue::Object(object) = value else {
        return Err(ExecutionError::TypeError(format!(
            "Property description must be an object: {}",
            value
        )));
    };

    let descriptor = PropertyDescriptor {
        enumerable: read_field(realm, object, "enumerable")?.map(|v| v.to_bool()),
        configurable: read_field(realm, object, "configurable")?.map(|v| v.to_bool()),
        value: read_field(realm, object, "value")?,
        writable: read_field(realm, object, "writable")?.map(|v| v.to_bool()),
        get: read_accessor(realm, object, "get")?,
        set: read_accessor(realm, object, "set")?,
    };

    if descriptor.is_accessor_descriptor() && descriptor.is_data_descriptor() {
        return Err(ExecutionError::TypeError(
            "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute"
                .to_owned(),
        ));
    }

    Ok(descriptor)
}

fn get_own_property_descriptor(
    realm: &Realm,
    _: &RuntimeValue,
    arguments: &[RuntimeValue],
) -> JsResult {
    let target = argument(arguments, 0);
    let object = object_target(&target, "Object.getOwnPropertyDescriptor")?;
    let key = argument(arguments, 1).to_property_key()?;

    let descriptor = object
        .get_own_property(&key)
        .map(|property| RuntimeValue::from(from_property(realm, property)));

    Ok(descriptor.into())
}

fn define_property(realm: &Realm, _: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let target = argument(arguments, 0);
    let object = object_target(&target, "Object.defineProperty")?;
    let key = argument(arguments, 1).to_property_key()?;
    let descriptor = to_property_descriptor(realm, &argument(arguments, 2))?;

    if !object.define_own_property(key.clone(), descriptor) {
        return Err(ExecutionError::TypeError(format!(
            "Cannot redefine property: {}",
            key
        )));
    }

    Ok(target)
}

fn keys(realm: &Realm, _: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let target = argument(arguments, 0);
    let object = object_target(&target, "Object.keys")?;

    let keys = object
        .enumerable_own_keys()
        .into_iter()
        .filter(|key| !key.is_symbol())
        .map(RuntimeValue::from)
        .collect();

    Ok(realm.new_array(keys).into())
}

fn get_own_property_names(
    realm: &Realm,
    _: &RuntimeValue,
    arguments: &[RuntimeValue],
) -> JsResult {
    let target = argument(arguments, 0);
    let object = object_target(&target, "Object.getOwnPropertyNames")?;

    let names = object
        .own_property_keys()
        .into_iter()
        .filter(|key| !key.is_symbol())
        .map(RuntimeValue::from)
        .collect();

    Ok(realm.new_array(names).into())
}

fn prevent_extensions(_: &Realm, _: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let target = argument(arguments, 0);

    if let RuntimeValue::Object(object) = &target {
        object.prevent_extensions();
    }

    Ok(target)
}

fn is_extensible(_: &Realm, _: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let extensible = match argument(arguments, 0) {
        RuntimeValue::Object(object) => object.is_extensible(),
        _ => false,
    };

    Ok(extensible.into())
}

fn has_own_property(_: &Realm, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let key = argument(arguments, 0).to_property_key()?;
    let object = object_target(target, "Object.prototype.hasOwnProperty")?;

    Ok(object.has_own_property(&key).into())
}

fn property_is_enumerable(
    _: &Realm,
    target: &RuntimeValue,
    arguments: &[RuntimeValue],
) -> JsResult {
    let key = argument(arguments, 0).to_property_key()?;
    let object = object_target(target, "Object.prototype.propertyIsEnumerable")?;

    let enumerable = object
        .get_own_property(&key)
        .map_or(false, |property| property.enumerable());

    Ok(enumerable.into())
}

#[cfg(test)]
mod test {
    use crate::{ExecutionError, JsObject, Realm, RuntimeValue};
    use assert_matches::assert_matches;

    fn call(
        realm: &Realm,
        path: &str,
        target: RuntimeValue,
        arguments: &[RuntimeValue],
    ) -> RuntimeValue {
        let function = realm.resolve_path(path).unwrap();

        realm
            .call(function.as_object().unwrap(), &target, arguments)
            .unwrap()
    }

    fn field(realm: &Realm, object: &RuntimeValue, key: &str) -> RuntimeValue {
        object.as_object().unwrap().get(&key.into(), realm).unwrap()
    }

    #[test]
    fn test_get_own_property_descriptor_of_builtin_length() {
        let realm = Realm::new();
        let to_reversed = realm.resolve_path("Array.prototype.toReversed").unwrap();

        let descriptor = call(
            &realm,
            "Object.getOwnPropertyDescriptor",
            RuntimeValue::Undefined,
            &[to_reversed, "length".into()],
        );

        assert_eq!(field(&realm, &descriptor, "value"), RuntimeValue::Float(0.0));
        assert_eq!(
            field(&realm, &descriptor, "writable"),
            RuntimeValue::from(false)
        );
        assert_eq!(
            field(&realm, &descriptor, "enumerable"),
            RuntimeValue::from(false)
        );
        assert_eq!(
            field(&realm, &descriptor, "configurable"),
            RuntimeValue::from(true)
        );
    }

    #[test]
    fn test_missing_descriptor_is_undefined() {
        let realm = Realm::new();

        let descriptor = call(
            &realm,
            "Object.getOwnPropertyDescriptor",
            RuntimeValue::Undefined,
            &[realm.new_object().into(), "missing".into()],
        );

        assert!(descriptor.is_undefined());
    }

    #[test]
    fn test_define_property_defaults() {
        let realm = Realm::new();
        let object = realm.new_object();
        let descriptor = realm.new_object();
        descriptor.define_value_property("value", 0.0, true, true, true);

        call(
            &realm,
            "Object.defineProperty",
            RuntimeValue::Undefined,
            &[object.clone().into(), "length".into(), descriptor.into()],
        );

        let keys = call(
            &realm,
            "Object.keys",
            RuntimeValue::Undefined,
            &[object.clone().into()],
        );
        assert_eq!(keys.as_object().unwrap().elements().unwrap().len(), 0);

        let names = call(
            &realm,
            "Object.getOwnPropertyNames",
            RuntimeValue::Undefined,
            &[object.into()],
        );
        assert_eq!(
            names
                .as_object()
                .unwrap()
                .elements()
                .unwrap()
                .values()
                .cloned()
                .collect::<Vec<_>>(),
            vec![RuntimeValue::from("length")]
        );
    }

    #[test]
    fn test_define_property_rejects_redefinition() {
        let realm = Realm::new();
        let object = JsObject::new();
        object.define_value_property("fixed", 1.0, false, false, false);

        let descriptor = realm.new_object();
        descriptor.define_value_property("value", 2.0, true, true, true);

        let define = realm.resolve_path("Object.defineProperty").unwrap();
        let result = realm.call(
            define.as_object().unwrap(),
            &RuntimeValue::Undefined,
            &[object.into(), "fixed".into(), descriptor.into()],
        );

        assert_matches!(
            result,
            Err(ExecutionError::TypeError(message)) if message.contains("fixed")
        );
    }

    #[test]
    fn test_has_own_property_and_enumerability() {
        let realm = Realm::new();
        let object = realm.new_object();
        object.define_value_property("hidden", 1.0, true, false, true);

        let has_own = call(
            &realm,
            "Object.prototype.hasOwnProperty",
            object.clone().into(),
            &["hidden".into()],
        );
        let enumerable = call(
            &realm,
            "Object.prototype.propertyIsEnumerable",
            object.into(),
            &["hidden".into()],
        );

        assert_eq!(has_own, RuntimeValue::from(true));
        assert_eq!(enumerable, RuntimeValue::from(false));
    }
}
