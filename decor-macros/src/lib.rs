mod func;
mod kw;
mod util;

use proc_macro::TokenStream as BoundaryStream;

/// Register a Rust function as a native callable.
///
/// The function's name and `///` documentation become its metadata.
/// Parameters are read from the call's arguments in order; mark a parameter
/// `#[named]` to read it by name or `#[variadic]` to collect the remaining
/// positional arguments.
///
/// Decorators listed with `#[decorate(..)]` below `#[func]` are applied to the
/// registered function, the topmost one ending up outermost:
///
/// ```ignore
/// #[func]
/// #[decorate(strong)]
/// #[decorate(emphasis)]
/// pub fn headline() -> EcoString { "Hello".into() }
/// ```
///
/// registers the same function as `strong(emphasis(headline))`.
#[proc_macro_attribute]
pub fn func(stream: BoundaryStream, item: BoundaryStream) -> BoundaryStream {
    let item = syn::parse_macro_input!(item as syn::ItemFn);
    func::func(stream.into(), item)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// List decorators for a `#[func]` function. Only valid below `#[func]`,
/// which consumes it.
#[proc_macro_attribute]
pub fn decorate(_stream: BoundaryStream, item: BoundaryStream) -> BoundaryStream {
    let item = proc_macro2::TokenStream::from(item);
    syn::Error::new_spanned(item, "`#[decorate(..)]` must be placed below `#[func]`")
        .to_compile_error()
        .into()
}
