use crate::diag::{ErrorKind, SourceResult, StrResult, bail};
use crate::foundations::{Args, FromValue, Func};
use ecow::{EcoString, EcoVec, eco_format};
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(EcoString),
    Array(EcoVec<Value>),
    Func(Func),
    Record(Record),
}

impl Value {
    pub fn unit() -> Self {
        Value::Unit
    }

    /// The name of this value's type.
    pub fn ty(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Array(_) => "array",
            Value::Func(_) => "func",
            Value::Record(_) => "record",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Func(_))
    }

    /// Invoke this value.
    ///
    /// Fails with [`ErrorKind::NotCallable`] for anything but a function.
    pub fn call(&self, args: Args) -> SourceResult<Value> {
        match self {
            Value::Func(func) => func.call(args),
            other => bail!(
                ErrorKind::NotCallable, "value of type `{}` is not callable", other.ty();
                hint: "only functions and callable objects can be invoked"
            ),
        }
    }

    pub fn cast<T: FromValue>(self) -> StrResult<T> {
        T::from_value(self)
    }

    /// A representation of this value that distinguishes strings from other values.
    pub fn repr(&self) -> EcoString {
        match self {
            Value::Str(s) => eco_format!("{s:?}"),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| v.repr().to_string()).collect();
                eco_format!("[{}]", items.join(", "))
            }
            other => eco_format!("{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.pad("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.pad(s),
            Value::Array(_) => f.pad(&self.repr()),
            Value::Func(func) => write!(f, "{func}"),
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

/// A named bag of fields. Holds state but cannot be invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: EcoString,
    fields: IndexMap<EcoString, Value>,
}

impl Record {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<EcoString>, value: impl IntoValue) -> Self {
        self.fields.insert(field.into(), value.into_value());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: &str) -> StrResult<&Value> {
        match self.fields.get(field) {
            Some(value) => Ok(value),
            None => bail!("record `{}` has no field `{field}`", self.name),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{field}: {}", value.repr())?;
        }
        if !self.fields.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! impl_into_value {
    ($($t:ty => $i:ident,)+ $(,)?) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::$i(self)
                }
            }
        )*
    }
}

impl_into_value!(
    i64 => Int,
    bool => Bool,
    f64 => Float,
    EcoString => Str,
    Func => Func,
    Record => Record,
    EcoVec<Value> => Array,
);

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Unit
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.into())
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self.into())
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_not_callable() {
        let shoes = Record::new("product").with("price", 14900i64);
        let value = shoes.clone().into_value();
        assert!(!value.is_callable());

        let errors = value.call(Args::empty()).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::NotCallable);
        assert_eq!(
            errors[0].message.as_str(),
            "value of type `record` is not callable"
        );
        assert_eq!(shoes.get("price"), Ok(&Value::Int(14900)));
        assert!(shoes.get("colour").is_err());
    }

    #[test]
    fn display() {
        let shoes = Record::new("product")
            .with("name", "Fancy Shoes")
            .with("price", 14900i64);
        assert_eq!(
            shoes.to_string(),
            r#"product { name: "Fancy Shoes", price: 14900 }"#
        );
        assert_eq!(Record::new("empty").to_string(), "empty {}");
        assert_eq!(vec![1i64, 2].into_value().to_string(), "[1, 2]");
        assert_eq!("hi".into_value().to_string(), "hi");
        assert_eq!("hi".into_value().repr().as_str(), "\"hi\"");
    }
}
