use crate::JsPrimitiveString;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JsSymbol {
    id: u32,
    description: Option<JsPrimitiveString>,
}

impl JsSymbol {
    pub fn description(&self) -> Option<&JsPrimitiveString> {
        self.description.as_ref()
    }
}

impl Display for JsSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => f.write_fmt(format_args!("Symbol({})", description)),
            None => f.write_str("Symbol()"),
        }
    }
}

impl Debug for JsSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}#{}", self, self.id))
    }
}

/// Hands out symbol identities for a realm. `create` backs `Symbol.for`,
/// `create_unique` backs `Symbol()`.
#[derive(Clone, Default)]
pub(crate) struct SymbolRegistry {
    registry: HashMap<JsPrimitiveString, JsSymbol>,
    allocator: u32,
}

impl SymbolRegistry {
    pub(crate) fn new() -> SymbolRegistry {
        SymbolRegistry::default()
    }

    pub(crate) fn create(&mut self, name: JsPrimitiveString) -> JsSymbol {
        if let Some(symbol) = self.registry.get(&name) {
            return symbol.clone();
        }

        let symbol = self.create_unique(Some(name.clone()));
        self.registry.insert(name, symbol.clone());
        symbol
    }

    pub(crate) fn create_unique(&mut self, description: Option<JsPrimitiveString>) -> JsSymbol {
        self.allocator += 1;

        JsSymbol {
            id: self.allocator,
            description,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::values::symbols::SymbolRegistry;

    #[test]
    fn test_registered_symbols_are_shared() {
        let mut registry = SymbolRegistry::new();

        let first = registry.create("tag".into());
        let second = registry.create("tag".into());

        assert_eq!(first, second);
    }

    #[test]
    fn test_unique_symbols_differ() {
        let mut registry = SymbolRegistry::new();

        let first = registry.create_unique(Some("tag".into()));
        let second = registry.create_unique(Some("tag".into()));

        assert_ne!(first, second);
        assert_eq!(first.to_string(), "Symbol(tag)");
    }
}
