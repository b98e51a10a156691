//! The function model: values, arguments, callables and the wrappers
//! decorators build around them.

mod adapter;
mod args;
mod builtins;
mod capture;
mod cast;
mod decorators;
mod func;
mod meta;
mod scope;
mod stack;
mod value;
mod wrap;

pub use adapter::*;
pub use args::*;
pub use builtins::*;
pub use capture::*;
pub use cast::*;
pub use decorators::*;
pub use func::*;
pub use meta::*;
pub use scope::*;
pub use stack::*;
pub use value::*;
pub use wrap::*;
