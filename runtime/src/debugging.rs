use colored::Colorize;
use std::cmp::Ordering;
use std::fmt::{Formatter, Result, Write};

pub struct Renderer<'b, 'c> {
    max_depth: usize,
    current_depth: usize,
    pub(crate) representation: Representation,
    pub(crate) formatter: &'b mut Formatter<'c>,
}

impl<'b, 'c> Renderer<'b, 'c> {
    pub fn render(&mut self, object: &dyn DebugRepresentation) -> Result {
        match self.current_depth.cmp(&self.max_depth) {
            Ordering::Equal | Ordering::Greater => {
                let representation = self.representation;
                self.representation = Representation::Compact;
                let result = object.render(self);
                self.representation = representation;

                result
            }
            Ordering::Less => {
                self.current_depth += 1;

                let result = object.render(self);

                self.current_depth -= 1;

                result
            }
        }
    }

    pub fn compact(formatter: &'b mut Formatter<'c>) -> Self {
        Renderer {
            max_depth: 0,
            current_depth: 1,
            formatter,
            representation: Representation::Compact,
        }
    }

    pub fn debug(formatter: &'b mut Formatter<'c>, depth: usize) -> Self {
        Renderer {
            max_depth: depth,
            current_depth: 0,
            formatter,
            representation: Representation::Debug,
        }
    }

    #[inline]
    pub(crate) fn internal_index(&mut self, index: usize) -> Result {
        self.formatter
            .write_fmt(format_args!("{}: ", index.to_string().blue()))
    }

    #[inline]
    pub(crate) fn literal(&mut self, value: &str) -> Result {
        self.formatter
            .write_fmt(format_args!("{}", value.bright_yellow()))
    }

    #[inline]
    pub(crate) fn string_literal(&mut self, value: &str) -> Result {
        self.formatter
            .write_fmt(format_args!("\"{}\"", value.bright_yellow()))
    }

    #[inline]
    pub(crate) fn function(&mut self, name: &str) -> Result {
        self.formatter.write_fmt(format_args!(
            "{}{}{}",
            "[Function: ".green(),
            name.green(),
            "]".green()
        ))
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Representation {
    Compact,
    Debug,
}

pub trait DebugRepresentation {
    fn render(&self, renderer: &mut Renderer) -> Result;
}

impl<T> DebugRepresentation for Vec<T>
where
    T: DebugRepresentation,
{
    fn render(&self, renderer: &mut Renderer) -> Result {
        renderer.formatter.write_char('[')?;

        let mut after_first = false;
        for item in self {
            if after_first {
                renderer.formatter.write_str(", ")?;
            } else {
                after_first = true;
            }

            renderer.render(item)?;
        }

        renderer.formatter.write_char(']')?;
        Ok(())
    }
}

/// Wraps a value so `{}` prints it compactly and `{:?}` prints it in full.
pub struct Debuggable<'v>(pub &'v dyn DebugRepresentation);

impl std::fmt::Debug for Debuggable<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        Renderer::debug(f, 5).render(self.0)
    }
}

impl std::fmt::Display for Debuggable<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        Renderer::compact(f).render(self.0)
    }
}
