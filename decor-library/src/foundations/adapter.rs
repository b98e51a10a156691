use crate::diag::{ErrorKind, SourceResult, bail};
use crate::foundations::{Args, Arity, Func, Value};

/// Anything that can be invoked like a function.
///
/// Implemented by [`Func`] itself and by stateful objects, which become
/// functions through [`Func::object`]. Generic code can take a `&dyn Callable`
/// without knowing which one it received.
///
/// ```
/// use decor_library::foundations::{Adder, Args, Func, Value};
///
/// let add_three = Func::object(Adder::new(3));
/// assert_eq!(add_three.call(Args::new([4i64])), Ok(Value::Int(7)));
/// ```
pub trait Callable {
    fn name(&self) -> &str;

    fn docs(&self) -> Option<&str> {
        None
    }

    fn arity(&self) -> Arity {
        Arity::Variadic { min: 0 }
    }

    fn call(&self, args: Args) -> SourceResult<Value>;
}

impl Callable for Func {
    fn name(&self) -> &str {
        Func::name(self)
    }

    fn docs(&self) -> Option<&str> {
        Func::docs(self)
    }

    fn arity(&self) -> Arity {
        Func::arity(self)
    }

    fn call(&self, args: Args) -> SourceResult<Value> {
        Func::call(self, args)
    }
}

/// Whether `value` can be invoked.
pub fn is_callable(value: &Value) -> bool {
    value.is_callable()
}

/// Adds a fixed amount to its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adder {
    n: i64,
}

impl Adder {
    pub fn new(n: i64) -> Self {
        Self { n }
    }
}

impl Callable for Adder {
    fn name(&self) -> &str {
        "adder"
    }

    fn docs(&self) -> Option<&str> {
        Some("Add a fixed amount to a number.")
    }

    fn arity(&self) -> Arity {
        Arity::Fixed(1)
    }

    fn call(&self, mut args: Args) -> SourceResult<Value> {
        let x: i64 = args.expect("x")?;
        args.finish()?;
        match x.checked_add(self.n) {
            Some(sum) => Ok(Value::Int(sum)),
            None => bail!(ErrorKind::Failure, "integer overflow adding {} to {}", self.n, x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundations::{IntoValue, Record, wrap};

    fn call_twice(callable: &dyn Callable, x: i64) -> i64 {
        let once = callable.call(Args::new([x])).unwrap();
        callable.call(Args::new([once])).unwrap().cast().unwrap()
    }

    #[test]
    fn objects_behave_like_functions() {
        let adder = Func::object(Adder::new(3));
        assert_eq!(adder.call(Args::new([4i64])), Ok(Value::Int(7)));
        assert!(is_callable(&adder.clone().into_value()));
        assert_eq!(adder.name(), "adder");
        assert_eq!(adder.arity(), Arity::Fixed(1));
    }

    #[test]
    fn generic_code_accepts_both() {
        assert_eq!(call_twice(&Adder::new(3), 1), 7);
        assert_eq!(call_twice(&Func::object(Adder::new(2)), 1), 5);
    }

    #[test]
    fn objects_can_be_wrapped() {
        let wrapped = wrap(Func::object(Adder::new(1)), "checked", |inner, args| {
            inner.call(args)
        });
        assert_eq!(wrapped.name(), "adder");
        assert_eq!(wrapped.call(Args::new([1i64])), Ok(Value::Int(2)));
    }

    #[test]
    fn arity_is_checked_before_the_call() {
        let adder = Func::object(Adder::new(3));
        let errors = adder.call(Args::empty()).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Argument);
    }

    #[test]
    fn overflow_is_a_failure() {
        let adder = Func::object(Adder::new(3));
        let errors = adder.call(Args::new([i64::MAX])).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Failure);
        assert_eq!(
            errors[0].message.as_str(),
            "integer overflow adding 3 to 9223372036854775807"
        );
        assert_eq!(adder.call(Args::new([i64::MIN])), Ok(Value::Int(i64::MIN + 3)));
    }

    #[test]
    fn capability_check() {
        assert!(!is_callable(&Value::Int(1)));
        assert!(!is_callable(&Record::new("state").with("n", 3i64).into_value()));
        assert!(is_callable(&Func::object(Adder::new(0)).into_value()));
    }
}
