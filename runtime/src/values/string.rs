use crate::RuntimeValue;
use ahash::AHasher;
use colored::Colorize;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Clone, Eq)]
pub struct JsPrimitiveString {
    inner: Rc<str>,
    hash: u64,
}

impl JsPrimitiveString {
    /// Parses the string as a canonical array index (`"0"`, `"17"`, never `"01"`).
    pub fn as_array_index(&self) -> Option<usize> {
        let str = self.inner.as_ref();

        if str.is_empty() || (str.len() > 1 && str.starts_with('0')) {
            return None;
        }

        if !str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        str.parse::<u32>()
            .ok()
            .filter(|index| *index != u32::MAX)
            .map(|index| index as usize)
    }
}

impl Debug for JsPrimitiveString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.inner.as_ref().yellow()))
    }
}

impl Display for JsPrimitiveString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.inner.as_ref())
    }
}

impl Hash for JsPrimitiveString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialEq for JsPrimitiveString {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.inner.as_ref() == other.inner.as_ref()
    }
}

impl<T: Into<String>> From<T> for JsPrimitiveString {
    fn from(value: T) -> Self {
        let str = value.into();
        let mut hash = AHasher::default();
        hash.write(str.as_bytes());

        JsPrimitiveString {
            inner: Rc::from(str),
            hash: hash.finish(),
        }
    }
}

impl From<JsPrimitiveString> for RuntimeValue {
    fn from(string: JsPrimitiveString) -> Self {
        RuntimeValue::String(string)
    }
}

impl AsRef<str> for JsPrimitiveString {
    fn as_ref(&self) -> &str {
        self.inner.as_ref()
    }
}

#[cfg(test)]
mod test {
    use crate::JsPrimitiveString;

    #[test]
    fn test_array_index() {
        assert_eq!(JsPrimitiveString::from("0").as_array_index(), Some(0));
        assert_eq!(JsPrimitiveString::from("42").as_array_index(), Some(42));
        assert_eq!(JsPrimitiveString::from("042").as_array_index(), None);
        assert_eq!(JsPrimitiveString::from("length").as_array_index(), None);
        assert_eq!(JsPrimitiveString::from("").as_array_index(), None);
        assert_eq!(JsPrimitiveString::from("4294967295").as_array_index(), None);
    }

    #[test]
    fn test_equality_ignores_allocation() {
        assert_eq!(
            JsPrimitiveString::from("length"),
            JsPrimitiveString::from(String::from("length"))
        );
    }
}
