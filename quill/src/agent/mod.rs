//! Agent loops built from graph nodes.
//!
//! - [`reflection`]: generate/critique loop ([`ReflectionRunner`](reflection::ReflectionRunner)).

pub mod reflection;
