mod trace;

use std::hash::Hash;
use std::ops::Deref;

pub use trace::*;

/// A `'static` reference compared and hashed by address.
#[derive(Debug)]
pub struct Static<T: 'static>(pub &'static T);

impl<T> Deref for Static<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<T> Copy for Static<T> {}

impl<T> Clone for Static<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for Static<T> {}

impl<T> PartialEq for Static<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<T> Hash for Static<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(std::ptr::from_ref(self.0) as _);
    }
}

#[cfg(test)]
mod tests {
    use super::Static;

    static A: u8 = 1;
    static B: u8 = 1;

    #[test]
    fn static_compares_by_address() {
        assert_eq!(Static(&A), Static(&A));
        assert_ne!(Static(&A), Static(&B));
    }
}
