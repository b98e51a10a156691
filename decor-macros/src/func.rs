use crate::kw;
use crate::util::{bail, documentation, foundations, take_attrs};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, FnArg, ItemFn, LitStr, Result, Token};

pub fn func(stream: TokenStream, mut item: ItemFn) -> Result<TokenStream> {
    let func = parse(stream, &mut item)?;
    Ok(create(&func, &item))
}

fn create(func: &Func, item: &ItemFn) -> TokenStream {
    let Func { rust_name, vis, .. } = func;
    let foundations = foundations();
    let data = create_func_data(func);

    // The decorators are applied every time the function is looked up, so
    // `func()` is only overridden when there are any.
    let func_impl = (!func.decorators.is_empty()).then(|| {
        let decorators = &func.decorators;
        quote! {
            fn func() -> #foundations::Func {
                #foundations::Stack::new()
                    #(.with(#decorators))*
                    .apply(#foundations::Func::from(<Self as #foundations::NativeFunc>::data()))
            }
        }
    });

    quote! {
        #item

        #[doc(hidden)]
        #[allow(non_camel_case_types)]
        #vis enum #rust_name {}

        impl #foundations::NativeFunc for #rust_name {
            fn data() -> &'static #foundations::NativeFuncData {
                static DATA: #foundations::NativeFuncData = #data;
                &DATA
            }

            #func_impl
        }
    }
}

fn create_func_data(func: &Func) -> TokenStream {
    let Func { name, docs, .. } = func;
    let foundations = foundations();
    let closure = create_wrapper_closure(func);

    let docs = match docs {
        Some(docs) => quote! { ::std::option::Option::Some(#docs) },
        None => quote! { ::std::option::Option::None },
    };

    let positional = func
        .params
        .iter()
        .filter(|param| param.kind == ParamKind::Positional)
        .count();
    let arity = if func.params.iter().any(|param| param.kind == ParamKind::Variadic) {
        quote! { #foundations::Arity::Variadic { min: #positional } }
    } else {
        quote! { #foundations::Arity::Fixed(#positional) }
    };

    quote! {
        #foundations::NativeFuncData {
            closure: #closure,
            name: #name,
            docs: #docs,
            arity: #arity,
        }
    }
}

fn create_wrapper_closure(func: &Func) -> TokenStream {
    let foundations = foundations();
    let handlers = func.params.iter().map(create_param_parser);
    let forwarded = func.params.iter().map(|param| &param.ident);
    let ident = &func.rust_name;

    quote! {
        |args| {
            let __func = #ident;
            #(#handlers)*
            args.take().finish()?;
            let ret = __func(#(#forwarded,)*);
            #foundations::IntoResult::into_result(ret)
        }
    }
}

fn create_param_parser(param: &Param) -> TokenStream {
    let Param {
        ident, ty, name, kind,
    } = param;

    let value = match kind {
        ParamKind::Positional => quote! { args.expect(#name)? },
        ParamKind::Named => quote! { args.named(#name)? },
        ParamKind::Variadic => quote! { args.all()? },
    };

    quote! {
        let #ident: #ty = #value;
    }
}

struct Func {
    /// The name the function is registered under.
    name: String,
    rust_name: Ident,
    docs: Option<String>,
    params: Vec<Param>,
    /// Decorator expressions, outermost first.
    decorators: Vec<Expr>,
    vis: syn::Visibility,
}

struct Param {
    ident: Ident,
    ty: syn::Type,
    name: String,
    kind: ParamKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Positional,
    /// `#[named]`: read by name, the type must accept absence.
    Named,
    /// `#[variadic]`: every remaining positional argument.
    Variadic,
}

/// Parse the function and strip the attributes only `#[func]` understands.
fn parse(stream: TokenStream, item: &mut ItemFn) -> Result<Func> {
    let meta: Meta = syn::parse2(stream)?;
    let name = meta.name.unwrap_or_else(|| item.sig.ident.to_string());

    let mut decorators = Vec::new();
    for attr in take_attrs(&mut item.attrs, "decorate") {
        let exprs = attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)?;
        if exprs.is_empty() {
            bail!(attr, "expected at least one decorator");
        }
        decorators.extend(exprs);
    }

    let mut params = Vec::new();
    for input in &mut item.sig.inputs {
        let param = parse_param(input)?;
        let after_variadic = params
            .last()
            .is_some_and(|last: &Param| last.kind == ParamKind::Variadic);
        if after_variadic && param.kind != ParamKind::Named {
            bail!(param.ident, "a variadic parameter must be the last positional one");
        }
        params.push(param);
    }

    Ok(Func {
        name,
        rust_name: item.sig.ident.clone(),
        docs: documentation(&item.attrs),
        params,
        decorators,
        vis: item.vis.clone(),
    })
}

fn parse_param(input: &mut FnArg) -> Result<Param> {
    let typed = match input {
        FnArg::Receiver(recv) => bail!(recv, "methods cannot be registered as functions"),
        FnArg::Typed(typed) => typed,
    };

    let named = !take_attrs(&mut typed.attrs, "named").is_empty();
    let variadic = !take_attrs(&mut typed.attrs, "variadic").is_empty();
    let kind = match (named, variadic) {
        (false, false) => ParamKind::Positional,
        (true, false) => ParamKind::Named,
        (false, true) => ParamKind::Variadic,
        (true, true) => bail!(typed, "a parameter cannot be both named and variadic"),
    };

    let ident = match typed.pat.as_ref() {
        syn::Pat::Ident(syn::PatIdent { ident, .. }) => ident.clone(),
        _ => bail!(
            typed.pat,
            "expected identifier. Destructuring is not supported"
        ),
    };

    Ok(Param {
        name: ident.to_string(),
        ident,
        ty: *typed.ty.clone(),
        kind,
    })
}

/// The `..` in `#[func(..)]`.
struct Meta {
    /// The registered name, if it differs from the Rust name.
    name: Option<String>,
}

impl Parse for Meta {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name = None;
        if input.peek(kw::name) {
            input.parse::<kw::name>()?;
            input.parse::<Token![=]>()?;
            name = Some(input.parse::<LitStr>()?.value());
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        if !input.is_empty() {
            return Err(input.error("unexpected argument"));
        }
        Ok(Self { name })
    }
}
