use crate::diag::{At, ErrorKind, SourceResult, bail};
use crate::foundations::{Args, Arity, FromValue, FuncMeta, IntoValue, Scope, Value};
use decor_utils::trace_fn;
use ecow::EcoString;
use std::cell::RefCell;
use std::rc::Rc;
use tap::Tap;

/// The variables captured by one enclosing invocation.
///
/// Every function built from the same record shares it, so a write to a
/// mutable binding is visible to all of them. Records built by separate
/// invocations are independent. Not meant for concurrent mutation.
#[derive(Debug, Clone)]
pub struct Captured(Rc<RefCell<Scope>>);

impl Captured {
    pub fn new(scope: Scope) -> Self {
        Self(Rc::new(RefCell::new(scope)))
    }

    pub fn get(&self, name: &str) -> SourceResult<Value> {
        match self.0.borrow().get(name) {
            Some(binding) => Ok(binding.read().clone()),
            None => bail!(
                ErrorKind::Unbound, "variable `{}` was not captured", name;
                hint: "captured variables: {}",
                self.names()
                    .tap_mut(|names| names.sort_unstable())
                    .iter()
                    .map(EcoString::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Read a captured variable as `T`.
    pub fn read<T: FromValue>(&self, name: &str) -> SourceResult<T> {
        self.get(name)?.cast().at(ErrorKind::Type)
    }

    pub fn set(&self, name: &str, value: impl IntoValue) -> SourceResult<()> {
        let mut scope = self.0.borrow_mut();
        let Some(binding) = scope.get_mut(name) else {
            bail!(ErrorKind::Unbound, "variable `{}` was not captured", name);
        };
        *binding.write(name)? = value.into_value();
        Ok(())
    }

    pub fn names(&self) -> Vec<EcoString> {
        self.0.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Whether both handles refer to the same record.
    pub fn is_shared_with(&self, other: &Captured) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Scope {
    /// Turn these bindings into a fresh closure record.
    pub fn capture(self) -> Captured {
        Captured::new(self)
    }
}

/// The body of a closure. All state it reads comes from the captured record.
pub type ClosureBody = fn(&Captured, &mut Args) -> SourceResult<Value>;

#[derive(Debug)]
pub struct Closure {
    meta: FuncMeta,
    arity: Arity,
    captured: Captured,
    body: ClosureBody,
}

impl Closure {
    pub fn new(meta: FuncMeta, arity: Arity, captured: Captured, body: ClosureBody) -> Self {
        Self {
            meta,
            arity,
            captured,
            body,
        }
    }

    pub fn meta(&self) -> &FuncMeta {
        &self.meta
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn call(&self, mut args: Args) -> SourceResult<Value> {
        trace_fn!(self.meta.name.as_str(), "{}", args);
        self.arity.check(&args)?;
        let output = (self.body)(&self.captured, &mut args)?;
        args.finish()?;
        Ok(output)
    }
}
