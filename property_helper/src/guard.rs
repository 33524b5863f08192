use crate::descriptor::ActualDescriptor;
use crate::error::VerificationError;
use crate::reflect::PropertyReflection;

/// Holds the descriptor a property had before a probe mutated it and puts it
/// back, either through `restore` or, if the probe bails out early or
/// unwinds, on drop.
pub(crate) struct RestoreGuard<'t, T: PropertyReflection + ?Sized> {
    target: &'t T,
    key: T::Key,
    original: Option<ActualDescriptor<T::Value>>,
}

impl<'t, T: PropertyReflection + ?Sized> RestoreGuard<'t, T> {
    pub(crate) fn new(target: &'t T, key: T::Key, original: ActualDescriptor<T::Value>) -> Self {
        RestoreGuard {
            target,
            key,
            original: Some(original),
        }
    }

    pub(crate) fn restore(mut self) -> Result<(), VerificationError> {
        match self.original.take() {
            Some(original) if !put_back(self.target, &self.key, &original) => {
                Err(VerificationError::RestoreFailed {
                    key: self.key.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl<'t, T: PropertyReflection + ?Sized> Drop for RestoreGuard<'t, T> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            if !put_back(self.target, &self.key, &original) {
                log::error!("Unable to restore {} after probing it", self.key);
            }
        }
    }
}

/// Redefines `original` if the property drifted, then confirms the result.
fn put_back<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    original: &ActualDescriptor<T::Value>,
) -> bool {
    let unchanged = |target: &T| {
        target
            .own_property(key)
            .map_or(false, |current| current.same_as(original, T::same_value))
    };

    if unchanged(target) {
        return true;
    }

    log::trace!("Restoring {}", key);

    target.redefine(key, original) && unchanged(target)
}

#[cfg(test)]
mod test {
    use crate::descriptor::ActualDescriptor;
    use crate::error::VerificationError;
    use crate::guard::RestoreGuard;
    use crate::reflect::PropertyReflection;
    use assert_matches::assert_matches;
    use verify_runtime::{JsObject, PropertyKey, RuntimeValue};

    fn length_of(object: &JsObject) -> RuntimeValue {
        match object.own_property(&"length".into()) {
            Some(ActualDescriptor::Data { value, .. }) => value,
            _ => RuntimeValue::Undefined,
        }
    }

    #[test]
    fn test_restore_puts_value_back() {
        let object = JsObject::new();
        object.define_value_property("length", 0.0, true, false, true);
        let key = PropertyKey::from("length");

        let guard = RestoreGuard::new(&object, key.clone(), object.own_property(&key).unwrap());
        assert!(object.assign(&key, "changed".into()));

        guard.restore().unwrap();

        assert_eq!(length_of(&object), RuntimeValue::Float(0.0));
    }

    #[test]
    fn test_drop_restores_on_early_exit() {
        let object = JsObject::new();
        object.define_value_property("length", 0.0, true, false, false);
        let key = PropertyKey::from("length");

        {
            let _guard =
                RestoreGuard::new(&object, key.clone(), object.own_property(&key).unwrap());
            object.assign(&key, "changed".into());
        }

        assert_eq!(length_of(&object), RuntimeValue::Float(0.0));
    }

    #[test]
    fn test_restore_fails_loudly_when_locked() {
        let object = JsObject::new();
        object.define_value_property("length", 0.0, true, false, false);
        let key = PropertyKey::from("length");

        let guard = RestoreGuard::new(&object, key.clone(), object.own_property(&key).unwrap());

        // Freeze the property with a different value so the original can't come back.
        object.define_value_property("length", 1.0, false, false, false);

        assert_matches!(
            guard.restore(),
            Err(VerificationError::RestoreFailed { key }) if key == "length"
        );
    }
}
