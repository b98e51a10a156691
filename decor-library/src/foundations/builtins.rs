use crate::diag::{At, ErrorKind, SourceResult, bail, ensure};
use crate::foundations::{
    Arity, Func, FuncMeta, Record, Scope, Value, emphasis, strong, uppercase,
};
use decor_macros::func;
use decor_utils::trace_log;
use ecow::{EcoString, eco_format};

/// Return a friendly greeting.
#[func]
pub fn greet() -> EcoString {
    "Hello".into()
}

/// Return a friendly greeting, set as a headline.
#[func]
#[decorate(strong)]
#[decorate(emphasis)]
pub fn headline() -> EcoString {
    "Hello".into()
}

/// Shout the given text.
#[func]
#[decorate(uppercase)]
pub fn yell(text: EcoString) -> EcoString {
    trace_log!("yelling {:?}", text);
    eco_format!("{text}!")
}

/// Greet someone by name, optionally asking how something is going.
#[func]
pub fn greet_person(name: EcoString, #[named] question: Option<EcoString>) -> EcoString {
    let question = question.unwrap_or_else(|| "going".into());
    eco_format!("Hello, {name}! How's it {question}?")
}

/// Build a product record. The price is in cents.
#[func]
pub fn product(name: EcoString, price: i64) -> Record {
    Record::new("product").with("name", name).with("price", price)
}

/// Apply a discount between 0 and 1 to the price of a product.
///
/// A discount outside that range yields a price the product can never have,
/// which is reported as a precondition violation.
#[func]
pub fn apply_discount(product: Record, discount: f64) -> SourceResult<i64> {
    if !discount.is_finite() {
        bail!(
            ErrorKind::Argument, "discount must be a finite number, found {}", discount;
            hint: "use a value between 0 and 1"
        );
    }

    let price: i64 = product
        .get("price")
        .at(ErrorKind::Argument)?
        .clone()
        .cast()
        .at(ErrorKind::Type)?;

    let discounted = (price as f64 * (1.0 - discount)) as i64;
    ensure!(
        0 <= discounted && discounted <= price,
        "discounted price {} is outside of 0..={}",
        discounted,
        price
    );
    Ok(discounted)
}

/// Build a function adding `n` to its argument.
#[func]
pub fn make_adder(n: i64) -> Func {
    Func::closure(
        FuncMeta::new("add").with_docs("Add the captured amount to a number."),
        Arity::Fixed(1),
        Scope::new().with("n", n).capture(),
        |captured, args| {
            let x: i64 = args.expect("x")?;
            let n: i64 = captured.read("n")?;
            match x.checked_add(n) {
                Some(sum) => Ok(Value::Int(sum)),
                None => bail!(ErrorKind::Failure, "integer overflow adding {} to {}", n, x),
            }
        },
    )
}

/// Build an `increment` and a `current` function sharing one counter.
#[func]
pub fn make_counter(start: i64) -> Vec<Func> {
    let captured = Scope::new().with_mutable("count", start).capture();
    let increment = Func::closure(
        FuncMeta::new("increment").with_docs("Add one to the counter and return it."),
        Arity::Fixed(0),
        captured.clone(),
        |captured, _| {
            let Some(count) = captured.read::<i64>("count")?.checked_add(1) else {
                bail!(ErrorKind::Failure, "counter overflowed");
            };
            captured.set("count", count)?;
            Ok(Value::Int(count))
        },
    );
    let current = Func::closure(
        FuncMeta::new("current").with_docs("Return the counter."),
        Arity::Fixed(0),
        captured,
        |captured, _| captured.get("count"),
    );
    vec![increment, current]
}

/// Describe the arguments of a call.
#[func]
pub fn describe(
    required: Value,
    #[variadic] rest: Vec<Value>,
    #[named] label: Option<EcoString>,
) -> EcoString {
    let rest: Vec<String> = rest.iter().map(|v| v.repr().to_string()).collect();
    let label = label.map_or_else(|| "none".into(), |label| eco_format!("{label:?}"));
    eco_format!(
        "required: {}, rest: [{}], label: {}",
        required.repr(),
        rest.join(", "),
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundations::{Args, IntoValue, null_decorator};
    use crate::foundations::func::NativeFunc;
    use crate::test::{assert_call, call_err};

    #[test]
    fn declared_decorators_are_applied() {
        let headline = Func::of::<headline>();
        assert_call(&headline, Args::empty(), "<strong><em>Hello</em></strong>");
        assert_eq!(headline.depth(), 2);
        assert_eq!(headline.name(), "headline");
        assert_eq!(headline.docs(), Some("Return a friendly greeting, set as a headline."));
    }

    #[test]
    fn declared_decorators_match_manual_application() {
        let manual = strong(emphasis(Func::from(headline::data())));
        assert_eq!(
            manual.call(Args::empty()),
            Func::of::<headline>().call(Args::empty())
        );
    }

    #[test]
    fn yell_uppercases() {
        assert_call(&Func::of::<yell>(), Args::new(["hey"]), "HEY!");
    }

    #[test]
    fn greet_person_with_named_question() {
        let greet_person = Func::of::<greet_person>();
        assert_call(&greet_person, Args::new(["Ada"]), "Hello, Ada! How's it going?");
        assert_call(
            &greet_person,
            Args::new(["Ada"]).with_named("question", "hanging"),
            "Hello, Ada! How's it hanging?",
        );

        let errors = call_err(&greet_person, Args::new(["Ada"]).with_named("mood", "good"));
        assert_eq!(errors[0].message.as_str(), "unexpected argument `mood`");
    }

    #[test]
    fn discount_within_range() {
        let shoes = product("Fancy Shoes".into(), 14900);
        assert_call(
            &Func::of::<apply_discount>(),
            Args::new([shoes.into_value(), Value::Float(0.25)]),
            11175i64,
        );
    }

    #[test]
    fn discount_out_of_range_violates_precondition() {
        let shoes = product("Fancy Shoes".into(), 14900);
        let errors = call_err(
            &Func::of::<apply_discount>(),
            Args::new([shoes.into_value(), Value::Float(2.0)]),
        );
        assert_eq!(errors[0].kind, ErrorKind::Precondition);
        assert_eq!(
            errors[0].message.as_str(),
            "discounted price -14900 is outside of 0..=14900"
        );
    }

    #[test]
    fn non_finite_discounts_are_rejected() {
        let apply_discount = Func::of::<apply_discount>();
        for discount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let shoes = product("Fancy Shoes".into(), 14900);
            let errors = call_err(
                &apply_discount,
                Args::new([shoes.into_value(), Value::Float(discount)]),
            );
            assert_eq!(errors[0].kind, ErrorKind::Argument);
            assert!(
                errors[0]
                    .message
                    .starts_with("discount must be a finite number")
            );
        }
    }

    #[test]
    fn adder_overflow_is_a_failure() {
        let errors = call_err(&make_adder(i64::MAX), Args::new([1i64]));
        assert_eq!(errors[0].kind, ErrorKind::Failure);
        assert_eq!(
            errors[0].message.as_str(),
            "integer overflow adding 9223372036854775807 to 1"
        );
    }

    #[test]
    fn adders_capture_independently() {
        let add_five = make_adder(5);
        let add_ten = make_adder(10);
        assert_call(&add_five, Args::new([4i64]), 9i64);
        assert_call(&add_ten, Args::new([4i64]), 14i64);
        assert_call(&add_five, Args::new([4i64]), 9i64);
        assert_eq!(add_five.name(), "add");
    }

    #[test]
    fn counters_share_state_per_call() {
        let counter = make_counter(0);
        let other = make_counter(0);
        counter[0].call(Args::empty()).unwrap();
        counter[0].call(Args::empty()).unwrap();
        assert_call(&counter[1], Args::empty(), 2i64);
        assert_call(&other[1], Args::empty(), 0i64);

        let full = make_counter(i64::MAX);
        assert_eq!(call_err(&full[0], Args::empty())[0].kind, ErrorKind::Failure);
        assert_call(&full[1], Args::empty(), i64::MAX);
    }

    #[test]
    fn variadic_and_named_arguments() {
        let describe = Func::of::<describe>();
        assert_eq!(describe.arity(), Arity::Variadic { min: 1 });
        assert_call(
            &describe,
            Args::new([1i64, 2, 3]).with_named("label", "nums"),
            "required: 1, rest: [2, 3], label: \"nums\"",
        );
        assert_call(&describe, Args::new(["only"]), "required: \"only\", rest: [], label: none");
        assert_eq!(call_err(&describe, Args::empty())[0].kind, ErrorKind::Argument);
    }

    #[test]
    fn wrappers_forward_arguments_untouched() {
        let direct = Func::of::<describe>();
        let wrapped = null_decorator(direct.clone());
        let args = Args::new([1i64, 2]).with_named("label", "x");
        assert_eq!(wrapped.call(args.clone()), direct.call(args));
    }
}
