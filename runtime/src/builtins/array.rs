use super::object_target;
use crate::primordials::Realm;
use crate::result::{ExecutionError, JsResult};
use crate::values::elements::{ArrayElements, MAX_LENGTH};
use crate::values::function::{argument, BuiltinFn};
use crate::{JsObject, RuntimeValue};

pub(crate) const STATIC_FUNCTIONS: &[(&str, usize, BuiltinFn)] = &[("isArray", 1, is_array)];

pub(crate) const PROTOTYPE_FUNCTIONS: &[(&str, usize, BuiltinFn)] = &[
    ("at", 1, at),
    ("includes", 1, includes),
    ("push", 1, push),
    ("reverse", 0, reverse),
    ("toReversed", 0, to_reversed),
];

/// Longest array `toReversed` will copy; holes are copied as `undefined`.
const MAX_COPY_LENGTH: usize = 1 << 24;

pub(crate) fn constructor(
    realm: &Realm,
    _: &RuntimeValue,
    arguments: &[RuntimeValue],
) -> JsResult {
    if let [RuntimeValue::Float(length)] = arguments {
        if length.fract() != 0.0 || *length < 0.0 || *length > f64::from(u32::MAX) {
            return Err(ExecutionError::TypeError(format!(
                "Invalid array length: {}",
                length
            )));
        }

        return Ok(realm
            .new_array_from(ArrayElements::with_length(*length as usize))
            .into());
    }

    Ok(realm.new_array(arguments.to_vec()).into())
}

/// Arrays only; array-likes are not supported.
fn elements_of<'v>(
    target: &'v RuntimeValue,
    method: &str,
) -> JsResult<(&'v JsObject, ArrayElements)> {
    let object = object_target(target, method)?;

    match object.elements() {
        Some(elements) => Ok((object, elements)),
        None => Err(ExecutionError::TypeError(format!(
            "{} called on a non-array object",
            method
        ))),
    }
}

fn is_array(_: &Realm, _: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let is_array = match argument(arguments, 0) {
        RuntimeValue::Object(object) => object.is_array(),
        _ => false,
    };

    Ok(is_array.into())
}

fn at(_: &Realm, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let (_, elements) = elements_of(target, "Array.prototype.at")?;

    let relative = argument(arguments, 0).to_integer();
    let index = if relative >= 0.0 {
        relative
    } else {
        elements.len() as f64 + relative
    };

    if index < 0.0 || index >= elements.len() as f64 {
        return Ok(RuntimeValue::Undefined);
    }

    Ok(elements.get(index as usize).cloned().unwrap_or_default())
}

fn includes(_: &Realm, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let (_, elements) = elements_of(target, "Array.prototype.includes")?;
    let search = argument(arguments, 0);

    // SameValueZero; holes read as undefined
    let found = elements.values().any(|element| match (element, &search) {
        (RuntimeValue::Float(a), RuntimeValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        (a, b) => a.same_value(b),
    }) || (search.is_undefined() && elements.has_holes());

    Ok(found.into())
}

fn push(_: &Realm, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    let (object, elements) = elements_of(target, "Array.prototype.push")?;
    let mut length = elements.len();

    if length + arguments.len() > MAX_LENGTH {
        return Err(ExecutionError::TypeError(format!(
            "Pushing {} elements exceeds the maximum array length",
            arguments.len()
        )));
    }

    for value in arguments {
        if !object.define_value_property(length, value.clone(), true, true, true) {
            return Err(ExecutionError::TypeError(format!(
                "Cannot add property {}, object is not extensible",
                length
            )));
        }

        length += 1;
    }

    Ok(length.into())
}

fn reverse(_: &Realm, target: &RuntimeValue, _: &[RuntimeValue]) -> JsResult {
    let (object, elements) = elements_of(target, "Array.prototype.reverse")?;

    object.replace_elements(elements.reversed());

    Ok(target.clone())
}

fn to_reversed(realm: &Realm, target: &RuntimeValue, _: &[RuntimeValue]) -> JsResult {
    let (_, elements) = elements_of(target, "Array.prototype.toReversed")?;

    let Some(mut copy) = elements.to_dense(MAX_COPY_LENGTH) else {
        return Err(ExecutionError::TypeError(format!(
            "Array of length {} is too long to copy",
            elements.len()
        )));
    };
    copy.reverse();

    Ok(realm.new_array(copy).into())
}

#[cfg(test)]
mod test {
    use crate::{PropertyKey, Realm, RuntimeValue};

    fn call(
        realm: &Realm,
        path: &str,
        target: &RuntimeValue,
        arguments: &[RuntimeValue],
    ) -> RuntimeValue {
        let function = realm.resolve_path(path).unwrap();

        realm
            .call(function.as_object().unwrap(), target, arguments)
            .unwrap()
    }

    fn elements(value: &RuntimeValue) -> Vec<RuntimeValue> {
        value
            .as_object()
            .unwrap()
            .elements()
            .unwrap()
            .to_dense(16)
            .unwrap()
    }

    #[test]
    fn test_to_reversed_copies() {
        let realm = Realm::new();
        let array: RuntimeValue = realm.new_array(vec![1.0.into(), 2.0.into(), 3.0.into()]).into();

        let reversed = call(&realm, "Array.prototype.toReversed", &array, &[]);

        assert_eq!(elements(&reversed), vec![RuntimeValue::Float(3.0), 2.0.into(), 1.0.into()]);
        assert_eq!(elements(&array), vec![RuntimeValue::Float(1.0), 2.0.into(), 3.0.into()]);
        assert!(reversed != array);
    }

    #[test]
    fn test_reverse_in_place() {
        let realm = Realm::new();
        let array: RuntimeValue = realm.new_array(vec![1.0.into(), 2.0.into()]).into();

        let result = call(&realm, "Array.prototype.reverse", &array, &[]);

        assert!(result == array);
        assert_eq!(elements(&array), vec![RuntimeValue::Float(2.0), 1.0.into()]);
    }

    #[test]
    fn test_push_and_at() {
        let realm = Realm::new();
        let array: RuntimeValue = realm.new_array(Vec::new()).into();

        let length = call(&realm, "Array.prototype.push", &array, &["a".into(), "b".into()]);

        assert_eq!(length, RuntimeValue::Float(2.0));
        assert_eq!(
            call(&realm, "Array.prototype.at", &array, &[(-1.0).into()]),
            RuntimeValue::from("b")
        );
        assert!(call(&realm, "Array.prototype.at", &array, &[5.0.into()]).is_undefined());
    }

    #[test]
    fn test_includes_finds_nan() {
        let realm = Realm::new();
        let array: RuntimeValue = realm.new_array(vec![f64::NAN.into(), 0.0.into()]).into();

        assert_eq!(
            call(&realm, "Array.prototype.includes", &array, &[f64::NAN.into()]),
            RuntimeValue::from(true)
        );
        assert_eq!(
            call(&realm, "Array.prototype.includes", &array, &[(-0.0).into()]),
            RuntimeValue::from(true)
        );
    }

    #[test]
    fn test_constructor_with_length() {
        let realm = Realm::new();

        let array = call(&realm, "Array", &RuntimeValue::Undefined, &[3.0.into()]);

        assert_eq!(
            elements(&array),
            vec![RuntimeValue::Undefined, RuntimeValue::Undefined, RuntimeValue::Undefined]
        );
        assert!(!array
            .as_object()
            .unwrap()
            .has_own_property(&PropertyKey::from(0usize)));
        assert_eq!(
            call(&realm, "Array.isArray", &RuntimeValue::Undefined, &[array]),
            RuntimeValue::from(true)
        );
    }

    #[test]
    fn test_reverse_rejects_plain_objects() {
        let realm = Realm::new();
        let object: RuntimeValue = realm.new_object().into();
        let reverse = realm.resolve_path("Array.prototype.reverse").unwrap();

        assert!(realm.call(reverse.as_object().unwrap(), &object, &[]).is_err());
    }

    #[test]
    fn test_huge_lengths_stay_sparse() {
        let realm = Realm::new();

        let array = call(
            &realm,
            "Array",
            &RuntimeValue::Undefined,
            &[4_294_967_295.0.into()],
        );
        let object = array.as_object().unwrap();

        assert_eq!(object.elements().unwrap().len(), 4_294_967_295);
        assert!(call(&realm, "Array.prototype.at", &array, &[(-1.0).into()]).is_undefined());
        assert_eq!(
            call(&realm, "Array.prototype.includes", &array, &[RuntimeValue::Undefined]),
            RuntimeValue::from(true)
        );

        let push = realm.resolve_path("Array.prototype.push").unwrap();
        assert!(realm
            .call(push.as_object().unwrap(), &array, &[1.0.into()])
            .is_err());

        let to_reversed = realm.resolve_path("Array.prototype.toReversed").unwrap();
        assert!(realm
            .call(to_reversed.as_object().unwrap(), &array, &[])
            .is_err());
    }

    #[test]
    fn test_reverse_moves_holes() {
        let realm = Realm::new();
        let array: RuntimeValue = realm.new_array(vec![1.0.into(), 2.0.into(), 3.0.into()]).into();
        let object = array.as_object().unwrap();
        object.delete(&PropertyKey::from(0usize));

        call(&realm, "Array.prototype.reverse", &array, &[]);

        assert!(!object.has_own_property(&PropertyKey::from(2usize)));
        assert_eq!(
            elements(&array),
            vec![RuntimeValue::Float(3.0), 2.0.into(), RuntimeValue::Undefined]
        );

        let reversed = call(&realm, "Array.prototype.toReversed", &array, &[]);
        assert!(reversed
            .as_object()
            .unwrap()
            .has_own_property(&PropertyKey::from(0usize)));
    }
}
