use crate::diag::SourceResult;
use crate::foundations::{Args, Func, FuncMeta, Value, copy_identity};
use decor_utils::trace_fn;
use ecow::EcoString;
use std::rc::Rc;

/// Maps a function to a new function around it.
///
/// A decorator never mutates its input. It builds and returns a wrapper that
/// refers to it.
pub trait Decorator {
    fn decorate(&self, target: Func) -> Func;
}

impl<F> Decorator for F
where
    F: Fn(Func) -> Func,
{
    fn decorate(&self, target: Func) -> Func {
        self(target)
    }
}

/// The behavior of one wrapper layer.
pub trait Layer {
    /// The layer's own name, reported only by opaque layers.
    fn name(&self) -> &str;

    fn docs(&self) -> Option<&str> {
        None
    }

    /// Whether the wrapper reports the identity of the function it wraps.
    ///
    /// Layers returning `false` deliberately expose their own name and docs.
    fn transparent(&self) -> bool {
        true
    }

    /// Handle one invocation. `inner` is the wrapped function; the layer
    /// decides how to call it and what to do with the result.
    fn call(&self, inner: &Func, args: Args) -> SourceResult<Value>;
}

/// A function that delegates to exactly one inner function through a [`Layer`].
pub struct Wrapper {
    inner: Func,
    layer: Rc<dyn Layer>,
    pub(crate) meta: FuncMeta,
}

impl Wrapper {
    pub fn build(target: Func, layer: impl Layer + 'static) -> Func {
        let layer: Rc<dyn Layer> = Rc::new(layer);
        let meta = FuncMeta {
            name: layer.name().into(),
            docs: layer.docs().map(Into::into),
        };
        let mut wrapper = Wrapper {
            inner: target,
            layer,
            meta,
        };
        if wrapper.layer.transparent() {
            let source = wrapper.inner.clone();
            copy_identity(&source, &mut wrapper);
        }
        wrapper.into()
    }

    pub fn inner(&self) -> &Func {
        &self.inner
    }

    pub fn meta(&self) -> &FuncMeta {
        &self.meta
    }

    /// The name of the layer, regardless of the identity the wrapper reports.
    pub fn layer_name(&self) -> &str {
        self.layer.name()
    }

    pub fn call(&self, args: Args) -> SourceResult<Value> {
        trace_fn!(self.layer.name(), "around `{}`", self.inner.name());
        self.layer.call(&self.inner, args)
    }
}

/// A transparent layer backed by a closure.
pub struct FnLayer<F> {
    name: EcoString,
    f: F,
}

impl<F> FnLayer<F>
where
    F: Fn(&Func, Args) -> SourceResult<Value>,
{
    pub fn new(name: impl Into<EcoString>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Layer for FnLayer<F>
where
    F: Fn(&Func, Args) -> SourceResult<Value>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, inner: &Func, args: Args) -> SourceResult<Value> {
        (self.f)(inner, args)
    }
}

/// Wrap `target` in a transparent layer running `f` on every call.
pub fn wrap<F>(target: Func, name: &str, f: F) -> Func
where
    F: Fn(&Func, Args) -> SourceResult<Value> + 'static,
{
    Wrapper::build(target, FnLayer::new(name, f))
}

/// Wrap `target` so its arguments pass through `f` before each call.
pub fn map_args<F>(target: Func, name: &str, f: F) -> Func
where
    F: Fn(Args) -> SourceResult<Args> + 'static,
{
    wrap(target, name, move |inner, args| inner.call(f(args)?))
}

/// Wrap `target` so its result passes through `f` after each call.
pub fn map_result<F>(target: Func, name: &str, f: F) -> Func
where
    F: Fn(Value) -> SourceResult<Value> + 'static,
{
    wrap(target, name, move |inner, args| f(inner.call(args)?))
}
