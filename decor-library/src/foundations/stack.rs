use crate::diag::{At, ErrorKind, SourceResult, bail};
use crate::foundations::{Args, Decorator, Func, Value};

/// An ordered list of decorators, written top to bottom.
///
/// The first decorator becomes the outermost layer: a stack of `[d1, d2]`
/// applied to `f` is `d1(d2(f))`. Decorators are never reordered and every
/// one of them adds one call frame per invocation.
#[derive(Default)]
pub struct Stack {
    decorators: Vec<Box<dyn Decorator>>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decorator below the ones already listed.
    pub fn with(mut self, decorator: impl Decorator + 'static) -> Self {
        self.push(decorator);
        self
    }

    pub fn push(&mut self, decorator: impl Decorator + 'static) {
        self.decorators.push(Box::new(decorator));
    }

    /// Apply the stack, innermost (last listed) decorator first.
    pub fn apply(&self, base: Func) -> Func {
        self.decorators
            .iter()
            .rev()
            .fold(base, |func, decorator| decorator.decorate(func))
    }
}

impl Decorator for Stack {
    fn decorate(&self, target: Func) -> Func {
        self.apply(target)
    }
}

/// Apply `decorators` to `base`, the first one ending up outermost.
pub fn apply_all(decorators: &[&dyn Decorator], base: Func) -> Func {
    decorators
        .iter()
        .rev()
        .fold(base, |func, decorator| decorator.decorate(func))
}

/// Use a runtime value as a decorator.
///
/// The value must be callable and return a function when called with
/// `target`.
pub fn decorate_with(decorator: &Value, target: Func) -> SourceResult<Func> {
    if !decorator.is_callable() {
        bail!(
            ErrorKind::NotCallable, "cannot decorate with a value of type `{}`", decorator.ty();
            hint: "a decorator is a function that takes and returns a function"
        );
    }

    decorator
        .call(Args::new([target]))?
        .cast::<Func>()
        .map_err(|_| "decorator did not return a function")
        .at(ErrorKind::Type)
}

/// [`apply_all`] for decorators only known at runtime.
pub fn apply_values(decorators: &[Value], base: Func) -> SourceResult<Func> {
    decorators
        .iter()
        .rev()
        .try_fold(base, |func, decorator| decorate_with(decorator, func))
}
