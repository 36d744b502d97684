//! Customizations: interceptors that can override default synthesis.
//!
//! Customizations form a per-factory stack iterated newest-first by the
//! facade. Each one inspects the [`TypeRequest`] and either produces a
//! value ([`Resolution::Handled`]) or declines ([`Resolution::NotHandled`]),
//! in which case the next customization down the stack is tried. A
//! customization may recurse into the factory to resolve sub-parts, so
//! interception applies to nested types as well.

use std::any::{Any, TypeId};
use std::marker::PhantomData;

use crate::error::FactoryResult;
use crate::factory::ObjectFactory;
use crate::registry::TypeRequest;

/// Outcome of one customization attempt
pub enum Resolution {
    /// The customization produced a value for the requested type
    Handled(Box<dyn Any>),
    /// The customization declines; try the next one down the stack
    NotHandled,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Handled(_) => f.write_str("Handled(..)"),
            Resolution::NotHandled => f.write_str("NotHandled"),
        }
    }
}

/// Interceptor in the resolution pipeline
pub trait Customization: Send + Sync {
    /// Try to produce a value for the requested type, or decline
    fn try_resolve(
        &self,
        request: &TypeRequest,
        factory: &mut ObjectFactory,
    ) -> FactoryResult<Resolution>;
}

/// Customization claiming exactly one type, backed by a closure
///
/// ```
/// use objectory::{ForType, ObjectFactory};
///
/// let mut factory = ObjectFactory::new();
/// factory.customize(ForType::new(|_factory| Ok(9000u32)));
/// assert_eq!(factory.any::<u32>().unwrap(), 9000);
/// ```
pub struct ForType<T, F> {
    produce: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> ForType<T, F>
where
    T: Any + 'static,
    F: Fn(&mut ObjectFactory) -> FactoryResult<T> + Send + Sync,
{
    /// Create a customization producing values of `T` from a closure
    pub fn new(produce: F) -> Self {
        Self {
            produce,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Customization for ForType<T, F>
where
    T: Any + 'static,
    F: Fn(&mut ObjectFactory) -> FactoryResult<T> + Send + Sync,
{
    fn try_resolve(
        &self,
        request: &TypeRequest,
        factory: &mut ObjectFactory,
    ) -> FactoryResult<Resolution> {
        if request.type_id != TypeId::of::<T>() {
            return Ok(Resolution::NotHandled);
        }
        let value = (self.produce)(factory)?;
        Ok(Resolution::Handled(Box::new(value)))
    }
}
