use crate::diag::{ErrorKind, SourceResult, bail};
use crate::foundations::{Func, IntoValue, NativeFunc, Value};
use ecow::EcoString;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Named bindings, kept in definition order.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    map: IndexMap<EcoString, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn bind(&mut self, name: EcoString, binding: Binding) -> &mut Binding {
        match self.map.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(binding);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(binding),
        }
    }

    pub fn define(&mut self, name: impl Into<EcoString>, value: impl IntoValue) {
        self.bind(name.into(), Binding::new(value));
    }

    pub fn define_mutable(&mut self, name: impl Into<EcoString>, value: impl IntoValue) {
        self.bind(name.into(), Binding::new_mutable(value));
    }

    /// Define a native function under its own name.
    pub fn define_func<T: NativeFunc>(&mut self) {
        let func = Func::of::<T>();
        self.define(T::data().name, func);
    }

    pub fn with(mut self, name: impl Into<EcoString>, value: impl IntoValue) -> Self {
        self.define(name, value);
        self
    }

    pub fn with_mutable(mut self, name: impl Into<EcoString>, value: impl IntoValue) -> Self {
        self.define_mutable(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.map.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EcoString, &Binding)> {
        self.map.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    value: Value,
    kind: BindingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Immutable,
    Mutable,
}

impl Binding {
    pub fn new(value: impl IntoValue) -> Self {
        Self {
            kind: BindingKind::Immutable,
            value: value.into_value(),
        }
    }

    pub fn new_mutable(value: impl IntoValue) -> Self {
        Self {
            kind: BindingKind::Mutable,
            value: value.into_value(),
        }
    }

    pub fn read(&self) -> &Value {
        &self.value
    }

    /// Get a mutable reference to the value behind the binding.
    ///
    /// Returns an error if the value is not mutable.
    pub fn write(&mut self, name: &str) -> SourceResult<&mut Value> {
        match self.kind {
            BindingKind::Immutable => bail!(
                ErrorKind::Immutable, "cannot assign to immutable variable `{}`", name;
                hint: "capture it as mutable to share updates between functions"
            ),
            BindingKind::Mutable => Ok(&mut self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_keeps_order() {
        let mut scope = Scope::new().with("a", 1i64).with("b", 2i64);
        scope.define("a", 3i64);
        let names: Vec<_> = scope.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(scope.get("a").map(Binding::read), Some(&Value::Int(3)));
    }

    #[test]
    fn immutable_bindings_reject_writes() {
        let mut scope = Scope::new().with("n", 1i64).with_mutable("count", 0i64);
        let errors = scope.get_mut("n").unwrap().write("n").unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Immutable);

        *scope.get_mut("count").unwrap().write("count").unwrap() = Value::Int(5);
        assert_eq!(scope.get("count").unwrap().read(), &Value::Int(5));
    }
}
