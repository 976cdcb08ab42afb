//! Makes classes decorated through `__decorate`-style helpers tree-shakable.
//!
//! Compilers lower legacy decorators to helper calls that run right after the
//! class is defined. Those calls are side effects as far as a minifier can
//! tell, so an unused decorated class is never dropped. This crate moves the
//! calls of every decorated binding into a single arrow function whose result
//! is annotated as pure.
//!
//! The work is split into two hooks, see [`Plugin::transform`] and
//! [`Plugin::generate_bundle`].

pub mod aliases;
pub mod ast;
pub mod edit;
pub mod equality;
pub mod finalize;
pub mod parse;
pub mod plugin;
pub mod transforms;

pub use plugin::{Config, Plugin};
