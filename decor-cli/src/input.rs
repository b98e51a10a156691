use crate::error::CliError;
use decor_library::diag::{SourceResult, eco_format};
use decor_library::foundations::{Args, IntoValue, Value};
use decor_library::Library;
use ecow::EcoString;

/// Read a command line argument as a value.
///
/// Integers, floats and booleans are recognized, everything else stays a
/// string. `()` is the unit value.
pub fn parse_value(text: &str) -> Value {
    if text == "()" {
        Value::Unit
    } else if let Ok(int) = text.parse::<i64>() {
        Value::Int(int)
    } else if let Ok(float) = text.parse::<f64>() {
        Value::Float(float)
    } else if let Ok(bool) = text.parse::<bool>() {
        Value::Bool(bool)
    } else {
        text.into_value()
    }
}

/// Read a `key=value` argument.
pub fn parse_named(text: &str) -> Result<(EcoString, Value), CliError> {
    match text.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.into(), parse_value(value))),
        _ => Err(CliError::Input(eco_format!(
            "expected `key=value`, found `{text}`"
        ))),
    }
}

/// Build the arguments of a call.
pub fn call_args(positional: &[String], named: &[String]) -> Result<Args, CliError> {
    let mut args = Args::new(positional.iter().map(|text| parse_value(text)));
    for text in named {
        let (key, value) = parse_named(text)?;
        args.push_named(key, value);
    }
    Ok(args)
}

/// Resolve decorators given on the command line.
///
/// A plain name refers to a decorator of the library. `factory=value` calls
/// the factory with `value` and uses the decorator it returns.
pub fn decorators(library: &Library, names: &[String]) -> SourceResult<Vec<Value>> {
    names
        .iter()
        .map(|text| match text.split_once('=') {
            Some((factory, value)) => library
                .func(factory)?
                .call(Args::new([parse_value(value)])),
            None => library.get(text).cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use decor_library::diag::ErrorKind;
    use decor_library::foundations::{Func, apply_values};

    #[test]
    fn values() {
        assert_eq!(parse_value("42"), Value::Int(42));
        assert_eq!(parse_value("-3"), Value::Int(-3));
        assert_eq!(parse_value("0.25"), Value::Float(0.25));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("()"), Value::Unit);
        assert_eq!(parse_value("Ada"), Value::Str("Ada".into()));
    }

    #[test]
    fn named_values() {
        let (key, value) = parse_named("question=hanging").unwrap();
        assert_eq!(key.as_str(), "question");
        assert_eq!(value, Value::Str("hanging".into()));
        assert!(parse_named("question").is_err());
        assert!(parse_named("=x").is_err());
    }

    #[test]
    fn arguments() {
        let args = call_args(&["Ada".to_string()], &["question=hanging".to_string()]).unwrap();
        assert_eq!(args.to_string(), "(\"Ada\", question = \"hanging\")");
    }

    #[test]
    fn resolves_decorators_and_factories() {
        let library = decor_library::library();
        let names = ["strong".to_string(), "renamed=salute".to_string()];
        let decorators = decorators(&library, &names).unwrap();
        let greet = library.func("greet").unwrap();

        let decorated: Func = apply_values(&decorators, greet).unwrap();
        assert_eq!(decorated.name(), "salute");
        assert_eq!(
            decorated.call(Args::empty()),
            Ok(Value::Str("<strong>Hello</strong>".into()))
        );
    }

    #[test]
    fn unknown_decorators() {
        let library = decor_library::library();
        let errors = decorators(&library, &["whisper".to_string()]).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Unbound);
    }
}
