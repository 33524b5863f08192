use std::collections::BTreeMap;

use super::value::RuntimeValue;

/// The largest length an array can have, 2^32 - 1.
pub const MAX_LENGTH: usize = u32::MAX as usize;

/// Indexed storage of an array object.
///
/// Only present elements are stored. Holes and long lengths take no space, so
/// `length` can be anything up to [`MAX_LENGTH`] without allocating for it.
#[derive(Clone, Debug, Default)]
pub struct ArrayElements {
    length: usize,
    values: BTreeMap<usize, RuntimeValue>,
}

impl ArrayElements {
    /// An array of `length` holes.
    pub fn with_length(length: usize) -> Self {
        ArrayElements {
            length,
            values: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, index: usize) -> Option<&RuntimeValue> {
        self.values.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.values.contains_key(&index)
    }

    pub fn has_holes(&self) -> bool {
        self.values.len() < self.length
    }

    /// Indices of present elements, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.values.keys().copied()
    }

    /// Present elements in index order, holes skipped.
    pub fn values(&self) -> impl Iterator<Item = &RuntimeValue> {
        self.values.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &RuntimeValue)> {
        self.values.iter().map(|(index, value)| (*index, value))
    }

    /// Stores `value` at `index`, growing the length past it if needed.
    pub(crate) fn set(&mut self, index: usize, value: RuntimeValue) {
        if index >= self.length {
            self.length = index + 1;
        }

        self.values.insert(index, value);
    }

    /// Turns `index` into a hole. The length is unchanged.
    pub(crate) fn remove(&mut self, index: usize) -> Option<RuntimeValue> {
        self.values.remove(&index)
    }

    /// Truncates or extends with holes.
    pub(crate) fn set_length(&mut self, length: usize) {
        self.values.split_off(&length);
        self.length = length;
    }

    /// The same elements in reverse index order, holes included.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|(index, value)| (self.length - 1 - index, value.clone()))
            .collect();

        ArrayElements {
            length: self.length,
            values,
        }
    }

    /// Every element with holes read as `undefined`, or `None` when the
    /// length exceeds `limit`.
    pub fn to_dense(&self, limit: usize) -> Option<Vec<RuntimeValue>> {
        if self.length > limit {
            return None;
        }

        Some(
            (0..self.length)
                .map(|index| self.values.get(&index).cloned().unwrap_or_default())
                .collect(),
        )
    }
}

impl From<Vec<RuntimeValue>> for ArrayElements {
    fn from(values: Vec<RuntimeValue>) -> Self {
        ArrayElements {
            length: values.len(),
            values: values.into_iter().enumerate().collect(),
        }
    }
}
