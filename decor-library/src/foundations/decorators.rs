use crate::diag::{At, ErrorKind, SourceResult, is_fatal};
use crate::foundations::{
    Args, Arity, Decorator, Func, FuncMeta, IntoValue, Layer, Scope, Value, Wrapper, map_result,
    wrap,
};
use decor_macros::func;
use decor_utils::trace_log;
use ecow::{EcoString, eco_format};

/// Pass every call through unchanged.
#[func]
pub fn null_decorator(target: Func) -> Func {
    wrap(target, "null_decorator", |inner, args| inner.call(args))
}

/// Uppercase the text a function returns.
#[func]
pub fn uppercase(target: Func) -> Func {
    map_result(target, "uppercase", |value| {
        let text: EcoString = value.cast().at(ErrorKind::Type)?;
        Ok(text.as_str().to_uppercase().into_value())
    })
}

/// Surround the text a function returns with `<strong>` tags.
#[func]
pub fn strong(target: Func) -> Func {
    surround(target, "strong", "strong")
}

/// Surround the text a function returns with `<em>` tags.
#[func]
pub fn emphasis(target: Func) -> Func {
    surround(target, "emphasis", "em")
}

fn surround(target: Func, name: &str, tag: &'static str) -> Func {
    map_result(target, name, move |value| {
        let text: EcoString = value.cast().at(ErrorKind::Type)?;
        Ok(eco_format!("<{tag}>{text}</{tag}>").into_value())
    })
}

/// Log the arguments and the result of every call.
#[func]
pub fn traced(target: Func) -> Func {
    wrap(target, "traced", |inner, args| {
        trace_log!("calling `{}` with {}", inner.name(), args);
        let result = inner.call(args);
        match &result {
            Ok(value) => {
                trace_log!("`{}` returned {}", inner.name(), value.repr());
            }
            Err(errors) => {
                trace_log!("`{}` failed with {} error(s)", inner.name(), errors.len());
            }
        }
        result
    })
}

/// Replaces failures of the wrapped function with a fallback value.
///
/// Precondition violations are fatal and always pass through.
#[derive(Debug, Clone)]
pub struct Recover {
    fallback: Value,
}

impl Recover {
    pub fn new(fallback: impl IntoValue) -> Self {
        Self {
            fallback: fallback.into_value(),
        }
    }
}

impl Decorator for Recover {
    fn decorate(&self, target: Func) -> Func {
        let fallback = self.fallback.clone();
        wrap(target, "recover", move |inner, args| match inner.call(args) {
            Err(errors) if !is_fatal(&errors) => {
                trace_log!("recovered from {} error(s)", errors.len());
                Ok(fallback.clone())
            }
            result => result,
        })
    }
}

pub fn recover(fallback: impl IntoValue) -> Recover {
    Recover::new(fallback)
}

/// Build a decorator replacing failures with `fallback`.
#[func(name = "recover")]
pub fn recover_with(fallback: Value) -> Func {
    Func::closure(
        FuncMeta::new("recover").with_docs("Replace failures of a function with a fallback value."),
        Arity::Fixed(1),
        Scope::new().with("fallback", fallback).capture(),
        |captured, args| {
            let target: Func = args.expect("target")?;
            let fallback = captured.get("fallback")?;
            Ok(Recover::new(fallback).decorate(target).into_value())
        },
    )
}

/// Gives the wrapped function a new identity.
///
/// This layer is opaque: introspection reports its own name and docs, not
/// the ones of the function it wraps.
#[derive(Debug, Clone)]
pub struct Renamed {
    meta: FuncMeta,
}

impl Renamed {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            meta: FuncMeta::new(name),
        }
    }

    pub fn with_docs(mut self, docs: impl Into<EcoString>) -> Self {
        self.meta = self.meta.with_docs(docs);
        self
    }
}

impl Layer for Renamed {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn docs(&self) -> Option<&str> {
        self.meta.docs.as_deref()
    }

    fn transparent(&self) -> bool {
        false
    }

    fn call(&self, inner: &Func, args: Args) -> SourceResult<Value> {
        inner.call(args)
    }
}

impl Decorator for Renamed {
    fn decorate(&self, target: Func) -> Func {
        Wrapper::build(target, self.clone())
    }
}

pub fn renamed(name: impl Into<EcoString>) -> Renamed {
    Renamed::new(name)
}

/// Build a decorator exposing a function under a new name.
#[func(name = "renamed")]
pub fn rename_to(name: EcoString, #[named] docs: Option<EcoString>) -> Func {
    Func::closure(
        FuncMeta::new("renamed").with_docs("Expose a function under a new name."),
        Arity::Fixed(1),
        Scope::new().with("name", name).with("docs", docs).capture(),
        |captured, args| {
            let target: Func = args.expect("target")?;
            let mut renamed = Renamed::new(captured.read::<EcoString>("name")?);
            if let Some(docs) = captured.read::<Option<EcoString>>("docs")? {
                renamed = renamed.with_docs(docs);
            }
            Ok(renamed.decorate(target).into_value())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::bail;
    use crate::foundations::{Adder, NativeFunc, Stack, apply_values};
    use crate::test::{assert_call, call_err};

    fn greet() -> Func {
        Func::closure(
            FuncMeta::new("greet").with_docs("Return a friendly greeting."),
            Arity::Fixed(0),
            Scope::new().capture(),
            |_, _| Ok("Hello".into_value()),
        )
    }

    fn out_of_stock() -> Func {
        Func::closure(
            FuncMeta::new("stock"),
            Arity::Fixed(0),
            Scope::new().capture(),
            |_, _| bail!(ErrorKind::Failure, "out of stock"),
        )
    }

    fn broken_invariant() -> Func {
        Func::closure(
            FuncMeta::new("broken"),
            Arity::Fixed(0),
            Scope::new().capture(),
            |_, _| {
                crate::diag::ensure!(1 > 2, "price went negative");
                Ok(Value::unit())
            },
        )
    }

    #[test]
    fn null_decorator_is_identity_preserving() {
        let wrapped = null_decorator(greet());
        assert_eq!(wrapped.depth(), 1);
        assert_call(&wrapped, Args::empty(), "Hello");
        assert_eq!(wrapped.name(), "greet");
        assert_eq!(wrapped.docs(), Some("Return a friendly greeting."));
    }

    #[test]
    fn uppercase_transforms_the_result() {
        assert_call(&uppercase(greet()), Args::empty(), "HELLO");
        let numbers = uppercase(Func::object(Adder::new(1)));
        let errors = call_err(&numbers, Args::new([1i64]));
        assert_eq!(errors[0].kind, ErrorKind::Type);
    }

    #[test]
    fn strong_above_emphasis() {
        let stacked = strong(emphasis(greet()));
        assert_call(&stacked, Args::empty(), "<strong><em>Hello</em></strong>");
        let swapped = emphasis(strong(greet()));
        assert_call(&swapped, Args::empty(), "<em><strong>Hello</strong></em>");
    }

    #[test]
    fn traced_logs_arguments_and_result() {
        let (result, lines) = decor_utils::capture(|| traced(greet()).call(Args::empty()));
        assert_eq!(result, Ok(Value::Str("Hello".into())));
        assert!(lines.iter().any(|line| line.contains("calling `greet` with ()")));
        assert!(lines.iter().any(|line| line.contains("`greet` returned \"Hello\"")));
    }

    #[test]
    fn recover_replaces_failures() {
        let recovered = out_of_stock().decorate(&recover(0i64));
        assert_eq!(recovered.call(Args::empty()), Ok(Value::Int(0)));
        assert_eq!(recovered.name(), "stock");
    }

    #[test]
    fn recover_never_swallows_preconditions() {
        let recovered = broken_invariant().decorate(&recover(0i64));
        let errors = call_err(&recovered, Args::empty());
        assert_eq!(errors[0].kind, ErrorKind::Precondition);
        assert_eq!(errors[0].message.as_str(), "price went negative");
    }

    #[test]
    fn renamed_is_opaque() {
        let wrapped = greet().decorate(&renamed("salute").with_docs("Salute someone."));
        assert_eq!(wrapped.name(), "salute");
        assert_eq!(wrapped.docs(), Some("Salute someone."));
        assert_eq!(wrapped.innermost().name(), "greet");
        assert_call(&wrapped, Args::empty(), "Hello");

        // Transparent layers above an opaque one report the new identity.
        let outer = strong(wrapped);
        assert_eq!(outer.name(), "salute");
    }

    #[test]
    fn registered_decorators_work_at_runtime() {
        let decorators = [
            Value::Func(Func::of::<strong>()),
            Value::Func(Func::of::<emphasis>()),
        ];
        let stacked = apply_values(&decorators, greet()).unwrap();
        assert_call(&stacked, Args::empty(), "<strong><em>Hello</em></strong>");
        assert_eq!(stacked.name(), "greet");
    }

    #[test]
    fn registered_decorator_factories() {
        let recover = Func::of::<recover_with>().call(Args::new(["sold out"])).unwrap();
        let recovered = apply_values(&[recover], out_of_stock()).unwrap();
        assert_call(&recovered, Args::empty(), "sold out");

        let rename = Func::of::<rename_to>()
            .call(Args::new(["salute"]).with_named("docs", "Salute someone."))
            .unwrap();
        let wrapped = apply_values(&[rename], greet()).unwrap();
        assert_eq!(wrapped.name(), "salute");
        assert_eq!(wrapped.docs(), Some("Salute someone."));
    }

    #[test]
    fn native_metadata_comes_from_the_declaration() {
        assert_eq!(strong::data().name, "strong");
        assert_eq!(
            strong::data().docs,
            Some("Surround the text a function returns with `<strong>` tags.")
        );
        assert_eq!(recover_with::data().name, "recover");
        assert_eq!(rename_to::data().arity, Arity::Fixed(1));
    }

    #[test]
    fn a_stack_of_registered_decorators() {
        let stacked = Stack::new().with(strong).with(uppercase).apply(greet());
        assert_call(&stacked, Args::empty(), "<strong>HELLO</strong>");
        assert_eq!(stacked.depth(), 2);
    }
}
