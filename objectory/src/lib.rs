//! # Objectory - Pseudo-Random Test Objects for Rust
//!
//! Objectory synthesizes deterministic "arbitrary" values and object
//! graphs on demand, so tests can obtain data they don't care about
//! without hand-authoring it. A factory resolves each requested type
//! through a strict chain - explicit registrations, then customizations,
//! then default synthesis - and every bounded primitive is derived from
//! one canonical double generator shaped by a pluggable distribution.
//!
//! ## Quick Start
//!
//! ```rust
//! use objectory::{Fabricate, ObjectFactory};
//!
//! #[derive(Fabricate)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let mut factory = ObjectFactory::with_seed(42);
//!
//! // Values the test does not care about
//! let user: User = factory.any().unwrap();
//! assert!(user.name.len() < 16);
//!
//! // Bounded primitives
//! let score = factory.any_int(0, 100).unwrap();
//! assert!((0..100).contains(&score));
//!
//! // Pin a value for the rest of this factory's lifetime
//! factory.freeze(7u8);
//! assert_eq!(factory.any::<u8>().unwrap(), 7);
//! ```

// Public modules
pub mod config;
pub mod customize;
pub mod distribution;
pub mod error;
pub mod fabricate;
pub mod factory;
pub mod registry;

// Re-export the main public API
pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_SEED, FactoryConfig};
pub use customize::{Customization, ForType, Resolution};
pub use distribution::{Distribution, Gaussian, SkewHigh, SkewLow, Uniform};
pub use error::{FactoryError, FactoryResult};
pub use fabricate::Fabricate;
pub use factory::ObjectFactory;
pub use registry::{
    Producer, ProducerRegistry, Registrar, TypeRequest, install_registrar, reset_shared_registry,
};

// Re-export derive macro from separate crate when derive feature is enabled
#[cfg(feature = "derive")]
pub use objectory_derive::Fabricate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_integration() {
        #[derive(Debug, Clone, PartialEq)]
        struct Subject {
            id: u8,
            label: String,
        }

        impl fabricate::Fabricate for Subject {
            fn fabricate(factory: &mut ObjectFactory) -> FactoryResult<Self> {
                Ok(Subject {
                    id: factory.any()?,
                    label: factory.any()?,
                })
            }
        }

        let mut factory = ObjectFactory::with_seed(1);
        let subject: Subject = factory.any().unwrap();
        assert!(subject.label.len() < 16);

        // Hold the subject constant while dependent values vary
        factory.freeze(subject.clone());
        let again: Subject = factory.any().unwrap();
        assert_eq!(again, subject);
        let other = factory.any_int(0, 1000).unwrap();
        assert!((0..1000).contains(&other));
    }

    #[test]
    fn test_registrar_seeds_new_factories() {
        #[derive(Debug, PartialEq)]
        struct Stub(&'static str);
        crate::unconstructible!(Stub);

        fn wire_stub(registry: &mut ProducerRegistry) {
            registry.register::<Stub, _>(|_| Ok(Stub("from registrar")));
        }

        install_registrar(wire_stub);

        let mut factory = ObjectFactory::new();
        assert_eq!(factory.any::<Stub>().unwrap(), Stub("from registrar"));
    }

    #[test]
    fn test_error_display_is_stable() {
        let error = FactoryError::invalid_range(1.0, 1.0);
        assert_eq!(
            format!("{}", error),
            "Invalid range: min 1 must be less than max 1"
        );
    }
}
