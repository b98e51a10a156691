//! The core of decor: function values, decorators and the built-in library.

// Lets `#[func]` expansions refer to `::decor_library` from inside this crate.
extern crate self as decor_library;

pub mod diag;
pub mod foundations;


pub use diag::{SourceResult, StrResult};
pub use foundations::{Func, Value};

use crate::diag::{ErrorKind, bail};
use crate::foundations::{
    Adder, Scope, apply_discount, describe, emphasis, greet, greet_person, headline, make_adder,
    make_counter, null_decorator, product, recover_with, rename_to, strong, traced, uppercase,
    yell,
};

/// The functions and decorators available by name.
#[derive(Debug, Clone)]
pub struct Library {
    pub global: Scope,
}

impl Library {
    pub fn empty() -> Self {
        Self {
            global: Scope::new(),
        }
    }

    /// Look up the value bound to `name`.
    pub fn get(&self, name: &str) -> SourceResult<&Value> {
        match self.global.get(name) {
            Some(binding) => Ok(binding.read()),
            None => bail!(
                ErrorKind::Unbound, "unknown name `{}`", name;
                hint: "run `decor list` to see the available functions"
            ),
        }
    }

    /// Look up the function bound to `name`.
    pub fn func(&self, name: &str) -> SourceResult<Func> {
        match self.get(name)? {
            Value::Func(func) => Ok(func.clone()),
            other => bail!(
                ErrorKind::NotCallable, "`{}` is a {}, not a function", name, other.ty()
            ),
        }
    }

    /// Every binding with a function, in definition order.
    ///
    /// The binding name may differ from the name the function reports.
    pub fn funcs(&self) -> impl Iterator<Item = (&str, &Func)> {
        self.global
            .iter()
            .filter_map(|(name, binding)| match binding.read() {
                Value::Func(func) => Some((name.as_str(), func)),
                _ => None,
            })
    }
}

impl Default for Library {
    fn default() -> Self {
        library()
    }
}

/// Build the standard library.
pub fn library() -> Library {
    let mut global = Scope::new();

    global.define_func::<greet>();
    global.define_func::<headline>();
    global.define_func::<yell>();
    global.define_func::<greet_person>();
    global.define_func::<product>();
    global.define_func::<apply_discount>();
    global.define_func::<make_adder>();
    global.define_func::<make_counter>();
    global.define_func::<describe>();

    global.define_func::<null_decorator>();
    global.define_func::<uppercase>();
    global.define_func::<strong>();
    global.define_func::<emphasis>();
    global.define_func::<traced>();
    global.define_func::<recover_with>();
    global.define_func::<rename_to>();

    global.define("add_three", Func::object(Adder::new(3)));
    global.define("shout", Func::of::<yell>());

    Library { global }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundations::Args;
    use crate::test::assert_call;

    #[test]
    fn functions_are_first_class() {
        let library = library();
        let greet = library.func("greet").unwrap();
        let strong = library.func("strong").unwrap();

        let decorated = strong.call(Args::new([greet])).unwrap();
        let decorated: Func = decorated.cast().unwrap();
        assert_call(&decorated, Args::empty(), "<strong>Hello</strong>");
        assert_eq!(decorated.name(), "greet");
    }

    #[test]
    fn bindings_are_independent_of_names() {
        let library = library();
        assert_eq!(library.func("shout").unwrap().name(), "yell");
        assert_eq!(library.func("add_three").unwrap().name(), "adder");
        assert_eq!(library.func("recover").unwrap().name(), "recover");
    }

    #[test]
    fn unknown_names() {
        let library = library();
        let errors = library.func("whisper").unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Unbound);
        assert!(library.get("greet").is_ok());
        assert!(Library::empty().get("greet").is_err());
    }

    #[test]
    fn listed_in_definition_order() {
        let library = library();
        let names: Vec<&str> = library.funcs().map(|(name, _)| name).take(3).collect();
        assert_eq!(names, ["greet", "headline", "yell"]);
    }
}
