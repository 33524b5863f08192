use std::cell::RefCell;

use super::builtins::{array, objects};
use crate::result::{ExecutionError, JsResult};
use crate::values::elements::ArrayElements;
use crate::values::function::{BuiltIn, BuiltinFn};
use crate::values::object::JsObject;
use crate::values::property::PropertyKey;
use crate::values::string::JsPrimitiveString;
use crate::values::symbols::{JsSymbol, SymbolRegistry};
use crate::values::value::RuntimeValue;

pub(crate) trait Helpers {
    fn define_readonly_value(&self, key: &str, value: impl Into<RuntimeValue>);

    /// Installs a value the way clause 17 installs properties of built-in
    /// objects: writable and configurable, but not enumerable.
    fn define_builtin_value(&self, key: &str, value: impl Into<RuntimeValue>);
}

impl Helpers for JsObject {
    fn define_readonly_value(&self, key: &str, value: impl Into<RuntimeValue>) {
        self.define_value_property(key, value, false, false, false);
    }

    fn define_builtin_value(&self, key: &str, value: impl Into<RuntimeValue>) {
        self.define_value_property(key, value, true, false, true);
    }
}

/// The objects every realm starts with.
#[derive(Clone)]
pub(crate) struct Intrinsics {
    pub(crate) object_prototype: JsObject,
    pub(crate) function_prototype: JsObject,
    pub(crate) array_prototype: JsObject,
}

pub struct Realm {
    pub(crate) global_this: JsObject,
    pub(crate) intrinsics: Intrinsics,
    symbols: RefCell<SymbolRegistry>,
}

impl Default for Realm {
    fn default() -> Self {
        Realm::new()
    }
}

impl Realm {
    pub fn new() -> Realm {
        let object_prototype = JsObject::builder().build();
        let function_prototype = JsObject::builder()
            .with_prototype(object_prototype.clone())
            .with_callable(BuiltIn::new("", 0, |_, _, _| Ok(RuntimeValue::Undefined)))
            .build();
        let array_prototype = JsObject::builder()
            .with_prototype(object_prototype.clone())
            .with_indexed_properties(Vec::new())
            .build();

        let intrinsics = Intrinsics {
            object_prototype,
            function_prototype,
            array_prototype,
        };

        let global_this = JsObject::builder()
            .with_prototype(intrinsics.object_prototype.clone())
            .build();

        let realm = Realm {
            global_this,
            intrinsics,
            symbols: RefCell::new(SymbolRegistry::new()),
        };

        realm.init_function_prototype();
        realm.init_object();
        realm.init_array();

        realm.global_this.define_readonly_value("undefined", RuntimeValue::Undefined);
        realm.global_this.define_readonly_value("NaN", f64::NAN);
        realm.global_this.define_readonly_value("Infinity", f64::INFINITY);
        realm
            .global_this
            .define_builtin_value("globalThis", realm.global_this.clone());

        log::debug!("Realm initialised");

        realm
    }

    pub fn global_this(&self) -> &JsObject {
        &self.global_this
    }

    /// Creates a built-in function object with `length` and `name` set per
    /// clause 17: `{ writable: false, enumerable: false, configurable: true }`.
    pub fn new_builtin_function(&self, builtin: BuiltIn) -> JsObject {
        let length = builtin.arity;
        let name = builtin.name;

        let function = JsObject::builder()
            .with_prototype(self.intrinsics.function_prototype.clone())
            .with_callable(builtin)
            .build();

        function.define_value_property("length", length, false, false, true);
        function.define_value_property("name", name, false, false, true);

        function
    }

    pub fn new_object(&self) -> JsObject {
        JsObject::builder()
            .with_prototype(self.intrinsics.object_prototype.clone())
            .build()
    }

    pub fn new_array(&self, elements: Vec<RuntimeValue>) -> JsObject {
        JsObject::builder()
            .with_prototype(self.intrinsics.array_prototype.clone())
            .with_indexed_properties(elements)
            .build()
    }

    pub fn new_array_from(&self, elements: ArrayElements) -> JsObject {
        JsObject::builder()
            .with_prototype(self.intrinsics.array_prototype.clone())
            .with_elements(elements)
            .build()
    }

    /// `Symbol(description)`
    pub fn new_symbol(&self, description: Option<&str>) -> JsSymbol {
        self.symbols
            .borrow_mut()
            .create_unique(description.map(JsPrimitiveString::from))
    }

    /// `Symbol.for(key)`
    pub fn symbol_for(&self, key: &str) -> JsSymbol {
        self.symbols.borrow_mut().create(key.into())
    }

    pub fn call(
        &self,
        function: &JsObject,
        target: &RuntimeValue,
        arguments: &[RuntimeValue],
    ) -> JsResult {
        match function.callable() {
            Some(callable) => callable.apply(self, target, arguments),
            None => Err(ExecutionError::TypeError(format!(
                "{} is not a function",
                function
            ))),
        }
    }

    /// Resolves a dotted path such as `Array.prototype.toReversed` starting
    /// from the global object. Getters along the path are invoked.
    pub fn resolve_path(&self, path: &str) -> JsResult {
        let mut current: RuntimeValue = self.global_this.clone().into();

        for segment in path.split('.') {
            let object = current
                .as_object()
                .map_err(|_| {
                    ExecutionError::TypeError(format!(
                        "Cannot read property '{}' of {} while resolving {}",
                        segment, current, path
                    ))
                })?
                .clone();

            current = object.get(&PropertyKey::from(segment), self)?;
        }

        Ok(current)
    }

    fn install_functions(
        &self,
        target: &JsObject,
        functions: &[(&'static str, usize, BuiltinFn)],
    ) {
        for (name, arity, op) in functions {
            let function = self.new_builtin_function(BuiltIn::new(*name, *arity, *op));
            target.define_builtin_value(name, function);
        }
    }

    fn install_constructor(
        &self,
        name: &'static str,
        arity: usize,
        op: BuiltinFn,
        prototype: &JsObject,
    ) -> JsObject {
        let constructor = self.new_builtin_function(BuiltIn::new(name, arity, op));

        constructor.define_value_property("prototype", prototype.clone(), false, false, false);
        prototype.define_builtin_value("constructor", constructor.clone());
        self.global_this.define_builtin_value(name, constructor.clone());

        constructor
    }

    fn init_function_prototype(&self) {
        let prototype = &self.intrinsics.function_prototype;

        prototype.define_value_property("length", 0.0, false, false, true);
        prototype.define_value_property("name", "", false, false, true);
    }

    fn init_object(&self) {
        let constructor = self.install_constructor(
            "Object",
            1,
            objects::constructor,
            &self.intrinsics.object_prototype,
        );

        self.install_functions(&constructor, objects::STATIC_FUNCTIONS);
        self.install_functions(
            &self.intrinsics.object_prototype,
            objects::PROTOTYPE_FUNCTIONS,
        );
    }

    fn init_array(&self) {
        let constructor = self.install_constructor(
            "Array",
            1,
            array::constructor,
            &self.intrinsics.array_prototype,
        );

        self.install_functions(&constructor, array::STATIC_FUNCTIONS);
        self.install_functions(
            &self.intrinsics.array_prototype,
            array::PROTOTYPE_FUNCTIONS,
        );
    }
}

#[cfg(test)]
mod test {
    use crate::values::property::Property;
    use crate::{Realm, RuntimeValue};
    use assert_matches::assert_matches;

    #[test]
    fn test_builtin_function_length() {
        let realm = Realm::new();

        let to_reversed = realm.resolve_path("Array.prototype.toReversed").unwrap();
        let to_reversed = to_reversed.as_object().unwrap();

        assert_matches!(
            to_reversed.get_own_property(&"length".into()),
            Some(Property::DataDescriptor {
                value: RuntimeValue::Float(v),
                writable: false,
                enumerable: false,
                configurable: true,
            }) if v == 0.0
        );
    }

    #[test]
    fn test_builtin_function_name() {
        let realm = Realm::new();

        let push = realm.resolve_path("Array.prototype.push").unwrap();

        assert_eq!(
            push.as_object().unwrap().get_own_property(&"name".into()).map(|p| {
                match p {
                    Property::DataDescriptor { value, .. } => value.to_string(),
                    Property::AccessorDescriptor { .. } => String::new(),
                }
            }),
            Some("\"push\"".to_owned())
        );
    }

    #[test]
    fn test_global_constants_are_locked() {
        let realm = Realm::new();

        assert_matches!(
            realm.global_this().get_own_property(&"NaN".into()),
            Some(Property::DataDescriptor {
                writable: false,
                enumerable: false,
                configurable: false,
                ..
            })
        );
    }

    #[test]
    fn test_resolve_missing_path() {
        let realm = Realm::new();

        assert!(realm.resolve_path("Array.nothing.here").is_err());
        assert!(realm.resolve_path("Array.nothing").unwrap().is_undefined());
    }

    #[test]
    fn test_symbols() {
        let realm = Realm::new();

        assert_eq!(realm.symbol_for("a"), realm.symbol_for("a"));
        assert_ne!(realm.new_symbol(Some("a")), realm.new_symbol(Some("a")));
    }
}
