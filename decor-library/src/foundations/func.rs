use crate::diag::SourceResult;
use crate::foundations::{
    Args, Arity, Callable, Captured, Closure, ClosureBody, Decorator, FuncMeta, Value, Wrapper,
};
use decor_utils::{Static, trace_fn};
use std::fmt;
use std::rc::Rc;

/// A callable value.
///
/// Cloning a function is cheap and yields the same function: clones compare
/// equal and share their closure state.
#[derive(Clone)]
pub struct Func {
    kind: FuncKind,
}

#[derive(Clone)]
pub enum FuncKind {
    /// A Rust function registered with `#[func]`.
    Native(Static<NativeFuncData>),
    /// A body paired with the state it captured.
    Closure(Rc<Closure>),
    /// A layer around exactly one inner function.
    Wrapper(Rc<Wrapper>),
    /// A stateful object exposing the invocation contract.
    Object(Rc<dyn Callable>),
}

impl Func {
    /// The function registered for `T`, with its declared decorators applied.
    pub fn of<T: NativeFunc>() -> Func {
        T::func()
    }

    pub fn closure(meta: FuncMeta, arity: Arity, captured: Captured, body: ClosureBody) -> Func {
        Closure::new(meta, arity, captured, body).into()
    }

    pub fn object(object: impl Callable + 'static) -> Func {
        Func {
            kind: FuncKind::Object(Rc::new(object)),
        }
    }

    pub fn kind(&self) -> &FuncKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            FuncKind::Native(native) => native.name,
            FuncKind::Closure(closure) => &closure.meta().name,
            FuncKind::Wrapper(wrapper) => &wrapper.meta().name,
            FuncKind::Object(object) => object.name(),
        }
    }

    pub fn docs(&self) -> Option<&str> {
        match &self.kind {
            FuncKind::Native(native) => native.docs,
            FuncKind::Closure(closure) => closure.meta().docs.as_deref(),
            FuncKind::Wrapper(wrapper) => wrapper.meta().docs.as_deref(),
            FuncKind::Object(object) => object.docs(),
        }
    }

    pub fn meta(&self) -> FuncMeta {
        FuncMeta {
            name: self.name().into(),
            docs: self.docs().map(Into::into),
        }
    }

    pub fn arity(&self) -> Arity {
        match &self.kind {
            FuncKind::Native(native) => native.arity,
            FuncKind::Closure(closure) => closure.arity(),
            FuncKind::Wrapper(wrapper) => wrapper.inner().arity(),
            FuncKind::Object(object) => object.arity(),
        }
    }

    pub fn call(&self, args: Args) -> SourceResult<Value> {
        match &self.kind {
            FuncKind::Native(native) => {
                trace_fn!(native.name, "{}", args);
                native.arity.check(&args)?;
                let mut args = args;
                (native.closure)(&mut args)
            }
            FuncKind::Closure(closure) => closure.call(args),
            FuncKind::Wrapper(wrapper) => wrapper.call(args),
            FuncKind::Object(object) => {
                object.arity().check(&args)?;
                object.call(args)
            }
        }
    }

    /// The function this one wraps, if it is a wrapper.
    pub fn inner(&self) -> Option<&Func> {
        match &self.kind {
            FuncKind::Wrapper(wrapper) => Some(wrapper.inner()),
            _ => None,
        }
    }

    /// The number of wrapper layers around the innermost function.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut func = self;
        while let Some(inner) = func.inner() {
            depth += 1;
            func = inner;
        }
        depth
    }

    /// The innermost function below all wrapper layers.
    pub fn innermost(&self) -> &Func {
        let mut func = self;
        while let Some(inner) = func.inner() {
            func = inner;
        }
        func
    }

    /// Apply `decorator` to this function. Same as `decorator.decorate(self)`.
    pub fn decorate(self, decorator: &impl Decorator) -> Func {
        decorator.decorate(self)
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (FuncKind::Native(a), FuncKind::Native(b)) => a == b,
            (FuncKind::Closure(a), FuncKind::Closure(b)) => Rc::ptr_eq(a, b),
            (FuncKind::Wrapper(a), FuncKind::Wrapper(b)) => Rc::ptr_eq(a, b),
            (FuncKind::Object(a), FuncKind::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            FuncKind::Native(_) => "native",
            FuncKind::Closure(_) => "closure",
            FuncKind::Wrapper(_) => "wrapper",
            FuncKind::Object(_) => "object",
        };
        f.debug_struct("Func")
            .field("name", &self.name())
            .field("kind", &kind)
            .field("depth", &self.depth())
            .finish()
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<func {}>", self.name())
    }
}

pub trait NativeFunc {
    fn data() -> &'static NativeFuncData;

    /// The registered function. `#[func]` overrides this to apply the
    /// decorators listed with `#[decorate(..)]`.
    fn func() -> Func {
        Func::from(Self::data())
    }
}

#[derive(Debug)]
pub struct NativeFuncData {
    pub closure: fn(&mut Args) -> SourceResult<Value>,
    pub name: &'static str,
    pub docs: Option<&'static str>,
    pub arity: Arity,
}

impl From<&'static NativeFuncData> for Func {
    fn from(data: &'static NativeFuncData) -> Self {
        Func {
            kind: FuncKind::Native(Static(data)),
        }
    }
}

impl From<Closure> for Func {
    fn from(closure: Closure) -> Self {
        Func {
            kind: FuncKind::Closure(Rc::new(closure)),
        }
    }
}

impl From<Wrapper> for Func {
    fn from(wrapper: Wrapper) -> Self {
        Func {
            kind: FuncKind::Wrapper(Rc::new(wrapper)),
        }
    }
}
