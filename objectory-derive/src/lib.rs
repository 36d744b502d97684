//! Derive macro for the objectory test-object factory
//!
//! This crate provides the procedural macro behind `#[derive(Fabricate)]`,
//! the compile-time substitute for runtime constructor discovery.

use proc_macro::TokenStream;

mod derive;

/// Derive macro for automatically implementing the `Fabricate` trait
///
/// The macro enumerates the type's shape and generates a fabrication
/// function resolving every field through the factory, so registrations
/// and customizations intercept nested types too.
///
/// # Basic Usage
///
/// ```rust
/// use objectory::Fabricate;
///
/// #[derive(Fabricate)]
/// struct User {
///     id: u32,
///     name: String,
///     active: bool,
/// }
/// ```
///
/// # Enums
///
/// An enum has one fabrication constructor per variant; the macro picks
/// the simplest one - the variant with the fewest fields, ties broken by
/// declaration order - which keeps generated graphs shallow and avoids
/// needless recursion:
///
/// ```rust
/// use objectory::Fabricate;
///
/// #[derive(Fabricate)]
/// enum Status {
///     Active,                    // zero fields: always selected
///     Inactive(String),
///     Pending { reason: String },
/// }
/// ```
///
/// An enum with no variants cannot be fabricated and is a compile error.
///
/// # Field Customization
///
/// A field can bypass factory resolution with a custom function of
/// signature `fn(&mut ObjectFactory) -> FactoryResult<FieldTy>`:
///
/// ```rust
/// use objectory::{Fabricate, FactoryResult, ObjectFactory};
///
/// fn small_id(factory: &mut ObjectFactory) -> FactoryResult<u32> {
///     factory.any_int(1, 1000)
/// }
///
/// #[derive(Fabricate)]
/// struct Order {
///     #[fabricate(with = small_id)]
///     id: u32,
///     note: String,
/// }
/// ```
///
/// # Generic Types
///
/// Type parameters receive `Fabricate + 'static` bounds:
///
/// ```rust
/// use objectory::Fabricate;
///
/// #[derive(Fabricate)]
/// struct Pair<T, U> {
///     first: T,
///     second: U,
/// }
/// ```
#[proc_macro_derive(Fabricate, attributes(fabricate))]
pub fn derive_fabricate(input: TokenStream) -> TokenStream {
    derive::derive_fabricate_impl(input)
}
