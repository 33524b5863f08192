use anyhow::Context;
use verify_runtime::{ExecutionError, JsObject, PropertyKey, Realm, RuntimeValue};

use crate::descriptor::{Accessor, ActualDescriptor, Attribute, ExpectedDescriptor};
use crate::error::{AttributeMismatch, VerificationError};
use crate::guard::RestoreGuard;
use crate::options::{Report, VerifyOptions};
use crate::reflect::PropertyReflection;

pub type Verification = Result<(), VerificationError>;

/// Checks that `target` has an own property `key` described by `expected`,
/// with every behavioural probe enabled and all mismatches reported.
///
/// The target is left exactly as it was found, whether the check passes or not.
pub fn verify_property<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    expected: &ExpectedDescriptor<T::Value>,
) -> Verification {
    verify_property_with(target, key, expected, &VerifyOptions::default())
}

pub fn verify_property_with<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    expected: &ExpectedDescriptor<T::Value>,
    options: &VerifyOptions,
) -> Verification {
    log::debug!("Verifying own property {}", key);

    let actual = own_property(target, key)?;

    compare_values::<T>(key, expected, &actual)?;
    compare_attributes(key, expected, &actual, options.report)?;

    if options.probe_writability {
        probe_writability(target, key, &actual)?;
    }

    if options.probe_enumerability {
        probe_enumerability(target, key, &actual)?;
    }

    if options.probe_configurability {
        probe_configurability(target, key, &actual)?;
    }

    Ok(())
}

/// Checks only the value, with SameValue semantics.
pub fn verify_equal_to<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    value: T::Value,
) -> Verification {
    let actual = own_property(target, key)?;

    compare_value::<T>(key, &value, &actual)
}

pub fn verify_writable<T: PropertyReflection + ?Sized>(target: &T, key: &T::Key) -> Verification {
    verify_attribute(target, key, Attribute::Writable, true)
}

pub fn verify_not_writable<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
) -> Verification {
    verify_attribute(target, key, Attribute::Writable, false)
}

pub fn verify_enumerable<T: PropertyReflection + ?Sized>(target: &T, key: &T::Key) -> Verification {
    verify_attribute(target, key, Attribute::Enumerable, true)
}

pub fn verify_not_enumerable<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
) -> Verification {
    verify_attribute(target, key, Attribute::Enumerable, false)
}

pub fn verify_configurable<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
) -> Verification {
    verify_attribute(target, key, Attribute::Configurable, true)
}

pub fn verify_not_configurable<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
) -> Verification {
    verify_attribute(target, key, Attribute::Configurable, false)
}

/// Resolves `path` (e.g. `Array.prototype.toReversed`) in `realm` and
/// verifies its own property `key`.
pub fn verify_intrinsic(
    realm: &Realm,
    path: &str,
    key: impl Into<PropertyKey>,
    expected: &ExpectedDescriptor<RuntimeValue>,
) -> anyhow::Result<()> {
    let key = key.into();

    let target = realm
        .resolve_path(path)
        .map_err(ExecutionError::render)
        .with_context(|| format!("Resolving {}", path))?;

    let object: &JsObject = target
        .as_object()
        .map_err(ExecutionError::render)
        .with_context(|| format!("Resolving {}", path))?;

    verify_property(object, &key, expected).with_context(|| format!("{}[{}]", path, key))
}

fn own_property<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
) -> Result<ActualDescriptor<T::Value>, VerificationError> {
    target
        .own_property(key)
        .ok_or_else(|| VerificationError::MissingProperty {
            key: key.to_string(),
        })
}

fn verify_attribute<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    attribute: Attribute,
    expected: bool,
) -> Verification {
    let actual = own_property(target, key)?;
    let declared = actual.attribute(attribute);

    if declared != expected {
        return Err(VerificationError::AttributeMismatch {
            key: key.to_string(),
            mismatches: vec![AttributeMismatch {
                attribute,
                expected,
                actual: declared,
            }],
        });
    }

    match attribute {
        Attribute::Writable => probe_writability(target, key, &actual),
        Attribute::Enumerable => probe_enumerability(target, key, &actual),
        Attribute::Configurable => probe_configurability(target, key, &actual),
    }
}

fn compare_value<T: PropertyReflection + ?Sized>(
    key: &T::Key,
    expected: &T::Value,
    actual: &ActualDescriptor<T::Value>,
) -> Verification {
    let actual = match actual {
        ActualDescriptor::Data { value, .. } if T::same_value(value, expected) => return Ok(()),
        ActualDescriptor::Data { value, .. } => T::describe(value),
        ActualDescriptor::Accessor { .. } => "an accessor".to_owned(),
    };

    Err(VerificationError::ValueMismatch {
        key: key.to_string(),
        expected: T::describe(expected),
        actual,
    })
}

fn compare_values<T: PropertyReflection + ?Sized>(
    key: &T::Key,
    expected: &ExpectedDescriptor<T::Value>,
    actual: &ActualDescriptor<T::Value>,
) -> Verification {
    if let Some(value) = &expected.value {
        compare_value::<T>(key, value, actual)?;
    }

    for (accessor, expected) in [(Accessor::Get, &expected.get), (Accessor::Set, &expected.set)] {
        let Some(expected) = expected else {
            continue;
        };

        let actual = match (accessor, actual) {
            (Accessor::Get, ActualDescriptor::Accessor { get, .. }) => get.as_ref(),
            (Accessor::Set, ActualDescriptor::Accessor { set, .. }) => set.as_ref(),
            (_, ActualDescriptor::Data { .. }) => None,
        };

        if !actual.map_or(false, |actual| T::same_value(actual, expected)) {
            return Err(VerificationError::AccessorMismatch {
                key: key.to_string(),
                accessor,
                expected: T::describe(expected),
                actual: actual.map_or_else(|| "nothing".to_owned(), T::describe),
            });
        }
    }

    Ok(())
}

fn compare_attributes<K: ToString, V>(
    key: &K,
    expected: &ExpectedDescriptor<V>,
    actual: &ActualDescriptor<V>,
    report: Report,
) -> Verification {
    let mut mismatches = Attribute::ALL
        .iter()
        .filter(|attribute| expected.attribute(**attribute) != actual.attribute(**attribute))
        .map(|attribute| AttributeMismatch {
            attribute: *attribute,
            expected: expected.attribute(*attribute),
            actual: actual.attribute(*attribute),
        });

    let mismatches: Vec<AttributeMismatch> = match report {
        Report::All => mismatches.collect(),
        Report::First => mismatches.next().into_iter().collect(),
    };

    if mismatches.is_empty() {
        return Ok(());
    }

    Err(VerificationError::AttributeMismatch {
        key: key.to_string(),
        mismatches,
    })
}

/// Assigns a sentinel and checks that it sticks exactly when the property is
/// declared writable. The original descriptor is restored on every path.
fn probe_writability<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    actual: &ActualDescriptor<T::Value>,
) -> Verification {
    let ActualDescriptor::Data {
        value, writable, ..
    } = actual
    else {
        return Ok(());
    };

    let guard = RestoreGuard::new(target, key.clone(), actual.clone());
    let sentinel = target.unlikely_value(key, value);

    let accepted = target.assign(key, sentinel.clone());
    let observed = match target.own_property(key) {
        Some(ActualDescriptor::Data { value, .. }) => T::same_value(&value, &sentinel),
        _ => false,
    };

    log::trace!(
        "Assigned to {}: accepted {}, observed {}",
        key,
        accepted,
        observed
    );

    guard.restore()?;

    if observed != *writable {
        return Err(VerificationError::WritabilityCheckFailed {
            key: key.to_string(),
            declared: *writable,
            observed,
        });
    }

    Ok(())
}

fn probe_enumerability<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    actual: &ActualDescriptor<T::Value>,
) -> Verification {
    let observed = target.enumerable_keys().contains(key);

    if observed != actual.enumerable() {
        return Err(VerificationError::EnumerabilityCheckFailed {
            key: key.to_string(),
            declared: actual.enumerable(),
            observed,
        });
    }

    Ok(())
}

fn probe_configurability<T: PropertyReflection + ?Sized>(
    target: &T,
    key: &T::Key,
    actual: &ActualDescriptor<T::Value>,
) -> Verification {
    let observed = target.can_delete(key);

    if observed != actual.configurable() {
        return Err(VerificationError::ConfigurabilityCheckFailed {
            key: key.to_string(),
            declared: actual.configurable(),
            observed,
        });
    }

    Ok(())
}
