use crate::diag::{At, ErrorKind, SourceResult, StrResult, bail};
use crate::foundations::{Func, IntoValue, Record, Value};
use ecow::EcoString;

/// Conversion of a native function's return value into a call result.
pub trait IntoResult {
    fn into_result(self) -> SourceResult<Value>;
}

impl<T: IntoValue> IntoResult for T {
    fn into_result(self) -> SourceResult<Value> {
        Ok(self.into_value())
    }
}

impl<T: IntoValue> IntoResult for StrResult<T> {
    fn into_result(self) -> SourceResult<Value> {
        self.map(IntoValue::into_value).at(ErrorKind::Failure)
    }
}

impl<T: IntoValue> IntoResult for SourceResult<T> {
    fn into_result(self) -> SourceResult<Value> {
        self.map(IntoValue::into_value)
    }
}

pub trait FromValue: Sized {
    fn from_value(value: Value) -> StrResult<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> StrResult<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> StrResult<Self> {
        match value {
            Value::Unit => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> StrResult<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => bail!("expected array, found {}", other.ty()),
        }
    }
}

macro_rules! impl_from_value {
    ($expected:literal: $(($variant:ident => $transform:expr))* => $ty:ty) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> StrResult<Self> {
                match value {
                    $(Value::$variant(v) => Ok($transform(v)),)*
                    other => bail!("expected {}, found {}", $expected, other.ty()),
                }
            }
        }
    };
}

impl_from_value!("int": (Int => |v| v) => i64);
impl_from_value!("float": (Float => |v| v) (Int => |v| v as f64) => f64);
impl_from_value!("bool": (Bool => |v| v) => bool);
impl_from_value!("string": (Str => |v| v) => EcoString);
impl_from_value!("function": (Func => |v| v) => Func);
impl_from_value!("record": (Record => |v| v) => Record);
