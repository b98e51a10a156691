use crate::diag::{At, Diagnostic, ErrorKind, SourceResult, bail, error};
use crate::foundations::cast::FromValue;
use crate::foundations::{IntoValue, Value};
use ecow::{EcoString, EcoVec};
use std::fmt;

/// The arguments of one invocation.
///
/// Positional arguments are consumed front to back, named arguments by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub items: EcoVec<Arg>,
}

impl Args {
    pub fn new<T: IntoValue>(items: impl IntoIterator<Item = T>) -> Self {
        let items = items
            .into_iter()
            .map(|value| Arg {
                name: None,
                value: value.into_value(),
            })
            .collect();
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl IntoValue) {
        self.items.push(Arg {
            name: None,
            value: value.into_value(),
        });
    }

    pub fn push_named(&mut self, name: impl Into<EcoString>, value: impl IntoValue) {
        self.items.push(Arg {
            name: Some(name.into()),
            value: value.into_value(),
        });
    }

    pub fn with_named(mut self, name: impl Into<EcoString>, value: impl IntoValue) -> Self {
        self.push_named(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of positional arguments left.
    pub fn positional_len(&self) -> usize {
        self.items.iter().filter(|arg| arg.name.is_none()).count()
    }

    /// Consume the first positional argument, if any.
    pub fn eat<T>(&mut self) -> SourceResult<Option<T>>
    where
        T: FromValue,
    {
        let Some(index) = self.items.iter().position(|arg| arg.name.is_none()) else {
            return Ok(None);
        };

        let value = self.items.remove(index).value;
        T::from_value(value).at(ErrorKind::Argument).map(Some)
    }

    pub fn expect<T>(&mut self, what: &str) -> SourceResult<T>
    where
        T: FromValue,
    {
        match self.eat()? {
            Some(v) => Ok(v),
            None => bail!(self.missing_argument(what)),
        }
    }

    /// Consume the named argument `name`, if present.
    pub fn named<T>(&mut self, name: &str) -> SourceResult<Option<T>>
    where
        T: FromValue,
    {
        let Some(index) = self
            .items
            .iter()
            .position(|arg| arg.name.as_deref() == Some(name))
        else {
            return Ok(None);
        };

        let value = self.items.remove(index).value;
        T::from_value(value)
            .map_err(|msg| ecow::eco_format!("argument `{name}`: {msg}"))
            .at(ErrorKind::Argument)
            .map(Some)
    }

    /// Consume all remaining positional arguments.
    pub fn all<T>(&mut self) -> SourceResult<Vec<T>>
    where
        T: FromValue,
    {
        let mut values = Vec::new();
        while let Some(value) = self.eat()? {
            values.push(value);
        }
        Ok(values)
    }

    /// Transform every positional argument, leaving named ones untouched.
    pub fn map_positional<F>(mut self, mut f: F) -> SourceResult<Self>
    where
        F: FnMut(Value) -> SourceResult<Value>,
    {
        for arg in self.items.make_mut() {
            if arg.name.is_none() {
                arg.value = f(std::mem::take(&mut arg.value))?;
            }
        }
        Ok(self)
    }

    fn missing_argument(&self, what: &str) -> Diagnostic {
        error!(ErrorKind::Argument, "missing argument `{}`", what)
    }

    /// Take out all arguments into a new instance.
    pub fn take(&mut self) -> Self {
        Self {
            items: std::mem::take(&mut self.items),
        }
    }

    /// Return an "unexpected argument" error if there is any remaining
    /// argument.
    pub fn finish(self) -> SourceResult<()> {
        if let Some(arg) = self.items.first() {
            match &arg.name {
                Some(name) => bail!(ErrorKind::Argument, "unexpected argument `{}`", name),
                None => bail!(
                    ErrorKind::Argument, "unexpected argument {}", arg.value.repr();
                    hint: "the function takes {} fewer positional argument(s)", self.positional_len()
                ),
            }
        }
        Ok(())
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(name) = &arg.name {
                write!(f, "{name} = ")?;
            }
            f.write_str(&arg.value.repr())?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<EcoString>,
    pub value: Value,
}
