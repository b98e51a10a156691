/*!
# Decor

Function values that can be wrapped, stacked and introspected.

```rust
use decor::library::foundations::{Args, Func, Value, emphasis, strong};

let greet = decor::library::library().func("greet").unwrap();
let headline = strong(emphasis(greet));

assert_eq!(
    headline.call(Args::empty()),
    Ok(Value::Str("<strong><em>Hello</em></strong>".into()))
);
// Decorated functions still report the identity of the function they wrap.
assert_eq!(headline.name(), "greet");
assert_eq!(headline.depth(), 2);
```

Features:
- Decorators are plain functions from [`Func`] to [`Func`]. Applying one never
  changes its input; it builds a wrapper around it.
- Wrappers copy the name and docs of the function they wrap, unless their
  layer is opaque on purpose.
- A [`Stack`] applies decorators in the order they are written, the first one
  ending up outermost.
- Closures pair a body with the variables captured by the call that built
  them. Functions built by one call share those variables.
- Stateful objects implementing [`Callable`] can be wrapped and stacked like
  any other function.

## Declaring native functions

`#[func]` registers a Rust function. Its `///` docs become the function's
documentation and `#[decorate(..)]` applies decorators, the topmost one
outermost:

```ignore
use decor::{decorate, func};
use decor::library::foundations::{emphasis, strong};
use ecow::EcoString;

/// Return a friendly greeting.
#[func]
#[decorate(strong)]
#[decorate(emphasis)]
pub fn headline() -> EcoString {
    "Hello".into()
}
```

## Writing a decorator

A decorator is anything implementing [`Decorator`], including every
`Fn(Func) -> Func`. The [`wrap`], [`map_args`] and [`map_result`] helpers build
transparent wrappers:

```rust
use decor::library::foundations::{Args, Func, Stack, Value, map_args};

fn double_args(target: Func) -> Func {
    map_args(target, "double_args", |args| {
        args.map_positional(|value| match value {
            Value::Int(n) => Ok(Value::Int(n * 2)),
            other => Ok(other),
        })
    })
}

let add = decor::library::library().func("add_three").unwrap();
let doubled = Stack::new().with(double_args).apply(add);
assert_eq!(doubled.call(Args::new([2i64])), Ok(Value::Int(7)));
```

## Errors

Calls return a [`SourceResult`]. Wrappers pass the errors of the functions
they wrap through unchanged. Only layers whose purpose is to handle errors,
like [`Recover`], translate them, and even those never hide a precondition
violation.

## Tracing

Set [`decor_utils::ENABLE_TRACE`] to print the enter and exit of every call and
wrapper layer to stderr. Tests can collect the same lines with
[`decor_utils::capture`].

[`Func`]: library::foundations::Func
[`Stack`]: library::foundations::Stack
[`Callable`]: library::foundations::Callable
[`Decorator`]: library::foundations::Decorator
[`wrap`]: library::foundations::wrap
[`map_args`]: library::foundations::map_args
[`map_result`]: library::foundations::map_result
[`Recover`]: library::foundations::Recover
[`SourceResult`]: library::diag::SourceResult
*/

pub use decor_library as library;
pub use decor_macros::{decorate, func};
pub use decor_utils;
