use crate::diag::{ErrorKind, SourceResult, bail};
use crate::foundations::{Args, Func, Wrapper};
use ecow::EcoString;
use std::fmt;

/// The identity of a callable, as seen by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncMeta {
    pub name: EcoString,
    pub docs: Option<EcoString>,
}

impl FuncMeta {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            docs: None,
        }
    }

    pub fn with_docs(mut self, docs: impl Into<EcoString>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}

/// How many positional arguments a callable takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    Variadic { min: usize },
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => count == n,
            Arity::Variadic { min } => count >= min,
        }
    }

    pub fn check(self, args: &Args) -> SourceResult<()> {
        let count = args.positional_len();
        if !self.accepts(count) {
            bail!(
                ErrorKind::Argument, "expected {} positional argument(s), found {}", self, count
            );
        }
        Ok(())
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{n}"),
            Arity::Variadic { min } => write!(f, "{min}+"),
        }
    }
}

/// Copy the name and documentation of `source` onto `target`.
///
/// Transparent wrappers call this right after construction, before the
/// wrapper is handed out, so introspecting the wrapper reports the wrapped
/// function.
pub fn copy_identity(source: &Func, target: &mut Wrapper) {
    target.meta = source.meta();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity() {
        assert!(Arity::Fixed(1).accepts(1));
        assert!(!Arity::Fixed(1).accepts(2));
        assert!(Arity::Variadic { min: 1 }.accepts(4));
        assert!(!Arity::Variadic { min: 1 }.accepts(0));
        assert_eq!(Arity::Variadic { min: 2 }.to_string(), "2+");

        let errors = Arity::Fixed(0).check(&Args::new([1i64])).unwrap_err();
        assert_eq!(
            errors[0].message.as_str(),
            "expected 0 positional argument(s), found 1"
        );
    }
}
