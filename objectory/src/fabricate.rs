//! Default synthesis for types the factory knows how to build.
//!
//! [`Fabricate`] is the generation function a concrete type carries for
//! itself: how to build one pseudo-random instance, resolving every part
//! through the factory so registrations and customizations intercept
//! nested types too. Primitive impls all funnel through the factory's
//! canonical double generator, keeping a single source of randomness and
//! a single distribution-shaping mechanism for the whole library.
//!
//! Collection-shaped types are the deliberate exception: they have no
//! default synthesis and always fail with
//! [`FactoryError::UnsupportedCollection`] unless a registration or
//! customization claims them first.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::time::{Duration, SystemTime};

use crate::error::{FactoryError, FactoryResult};
use crate::factory::ObjectFactory;

/// Types the factory can synthesize without an explicit registration
pub trait Fabricate: Sized + 'static {
    /// Build one pseudo-random instance, resolving parts through the factory
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self>;
}

macro_rules! impl_fabricate_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Fabricate for $t {
                fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
                    factory.any_int(<$t>::MIN, <$t>::MAX)
                }
            }
        )*
    };
}

impl_fabricate_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floats over their full native range break the linear rescale (the
/// span overflows), so default synthesis uses a bounded working range.
const FLOAT_SPAN: f64 = 1_000_000.0;

macro_rules! impl_fabricate_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Fabricate for $t {
                fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
                    factory.any_float(-FLOAT_SPAN as $t, FLOAT_SPAN as $t)
                }
            }
        )*
    };
}

impl_fabricate_float!(f32, f64);

impl Fabricate for bool {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        factory.any_bool()
    }
}

impl Fabricate for char {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        factory.any_char()
    }
}

impl Fabricate for String {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        let (min, max) = factory.config().string_length;
        factory.any_string(min, max)
    }
}

impl Fabricate for Duration {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        factory.any_duration(Duration::from_secs(ObjectFactory::DEFAULT_TIME_HORIZON_SECS))
    }
}

impl Fabricate for SystemTime {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        factory.any_system_time()
    }
}

impl<T: Fabricate> Fabricate for Option<T> {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        if factory.any_bool()? {
            Ok(Some(factory.any::<T>()?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Fabricate> Fabricate for Box<T> {
    fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
        factory.any::<T>().map(Box::new)
    }
}

macro_rules! impl_fabricate_tuple {
    ($($name:ident),+) => {
        impl<$($name: Fabricate),+> Fabricate for ($($name,)+) {
            fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
                Ok(($(factory.any::<$name>()?,)+))
            }
        }
    };
}

impl_fabricate_tuple!(A);
impl_fabricate_tuple!(A, B);
impl_fabricate_tuple!(A, B, C);
impl_fabricate_tuple!(A, B, C, D);

macro_rules! impl_fabricate_unsupported_collection {
    ($($t:ident<$($p:ident),+>),* $(,)?) => {
        $(
            impl<$($p: 'static),+> Fabricate for $t<$($p),+> {
                fn fabricate(_factory: &mut ObjectFactory) -> FactoryResult<Self> {
                    Err(FactoryError::unsupported_collection(
                        std::any::type_name::<Self>(),
                    ))
                }
            }
        )*
    };
}

impl_fabricate_unsupported_collection!(
    Vec<T>,
    VecDeque<T>,
    HashSet<T>,
    BTreeSet<T>,
    HashMap<K, V>,
    BTreeMap<K, V>,
);

/// Mark types as having no default synthesis.
///
/// The generated [`Fabricate`] impl always fails with
/// [`FactoryError::Unconstructible`], so a request only succeeds if a
/// registration or customization claims the type first. This is the
/// natural shape for trait objects and other types the factory cannot
/// construct on its own:
///
/// ```
/// use objectory::{ObjectFactory, unconstructible};
///
/// trait Clock: Send + Sync {}
/// struct FixedClock;
/// impl Clock for FixedClock {}
///
/// unconstructible!(Box<dyn Clock>);
///
/// let mut factory = ObjectFactory::new();
/// assert!(factory.any::<Box<dyn Clock>>().is_err());
///
/// factory.register(|_| Ok(Box::new(FixedClock) as Box<dyn Clock>));
/// assert!(factory.any::<Box<dyn Clock>>().is_ok());
/// ```
#[macro_export]
macro_rules! unconstructible {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::Fabricate for $t {
                fn fabricate(
                    _factory: &mut $crate::ObjectFactory,
                ) -> $crate::FactoryResult<Self> {
                    Err($crate::FactoryError::unconstructible(
                        std::any::type_name::<Self>(),
                    ))
                }
            }
        )*
    };
}
