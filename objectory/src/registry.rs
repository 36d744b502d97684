//! Producer registries and the process-wide shared registry.
//!
//! A producer is the cached generation function for one concrete type:
//! always shaped `(factory) -> value` so that each invocation yields a
//! fresh pseudo-random instance, never a frozen singleton. Two registries
//! exist: a mutex-guarded shared registry seeded once per process from
//! installed registrars, and a per-factory instance registry that starts
//! as a snapshot of the shared one and is then mutated locally by
//! `register`/`freeze`. Instance entries always win within one factory.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::error::FactoryResult;
use crate::factory::ObjectFactory;

/// Runtime descriptor for a requested type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRequest {
    /// Identity of the requested type
    pub type_id: TypeId,
    /// Diagnostic name of the requested type
    pub type_name: &'static str,
}

impl TypeRequest {
    /// Create a request descriptor for `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// A reusable generation function for one concrete type
pub type Producer =
    Arc<dyn Fn(&mut ObjectFactory) -> FactoryResult<Box<dyn Any>> + Send + Sync>;

/// A callback run once per process to seed the shared registry
pub type Registrar = fn(&mut ProducerRegistry);

/// Mapping from type identity to generation function
#[derive(Clone, Default)]
pub struct ProducerRegistry {
    producers: HashMap<TypeId, Producer>,
}

impl ProducerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            producers: HashMap::new(),
        }
    }

    /// Register a typed generation function for `T`
    pub fn register<T, F>(&mut self, produce: F)
    where
        T: Any + 'static,
        F: Fn(&mut ObjectFactory) -> FactoryResult<T> + Send + Sync + 'static,
    {
        let producer: Producer =
            Arc::new(move |factory| produce(factory).map(|value| Box::new(value) as Box<dyn Any>));
        self.producers.insert(TypeId::of::<T>(), producer);
    }

    /// Register a type-erased producer under an explicit type identity
    pub fn register_producer(&mut self, type_id: TypeId, producer: Producer) {
        self.producers.insert(type_id, producer);
    }

    /// Insert a producer only if the type has none yet; returns the
    /// producer now associated with the type
    pub fn register_producer_if_absent(&mut self, type_id: TypeId, producer: Producer) -> Producer {
        self.producers.entry(type_id).or_insert(producer).clone()
    }

    /// Get the producer for a type, if one is registered
    pub fn get(&self, type_id: TypeId) -> Option<Producer> {
        self.producers.get(&type_id).cloned()
    }

    /// Check if a producer is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.producers.contains_key(&TypeId::of::<T>())
    }

    /// Remove the producer for `T`
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.producers.remove(&TypeId::of::<T>()).is_some()
    }

    /// Get the number of registered producers
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}

impl std::fmt::Debug for ProducerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerRegistry")
            .field("len", &self.producers.len())
            .finish()
    }
}

/// Process-wide registry state behind an explicit lock
struct SharedState {
    /// `None` until the registrars have been run
    registry: Option<ProducerRegistry>,
    registrars: Vec<Registrar>,
}

static SHARED: OnceLock<Mutex<SharedState>> = OnceLock::new();

fn shared_state() -> MutexGuard<'static, SharedState> {
    let mutex = SHARED.get_or_init(|| {
        Mutex::new(SharedState {
            registry: None,
            registrars: Vec::new(),
        })
    });
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn seeded_registry(state: &mut SharedState) -> &mut ProducerRegistry {
    match state.registry {
        Some(ref mut registry) => registry,
        None => {
            let mut registry = ProducerRegistry::new();
            for registrar in &state.registrars {
                registrar(&mut registry);
            }
            state.registry.insert(registry)
        }
    }
}

/// Install a registrar callback seeding the shared registry.
///
/// Registrars installed before the first factory is constructed all run
/// exactly once, when the shared registry is first seeded. A registrar
/// installed after seeding is applied to the shared registry
/// immediately; factories constructed earlier keep their snapshot.
pub fn install_registrar(registrar: Registrar) {
    let mut state = shared_state();
    state.registrars.push(registrar);
    if let Some(registry) = state.registry.as_mut() {
        registrar(registry);
    }
}

/// Snapshot the shared registry into a fresh instance registry,
/// seeding it first if this is the first use in the process
pub(crate) fn snapshot() -> ProducerRegistry {
    let mut state = shared_state();
    seeded_registry(&mut state).clone()
}

/// Write a newly derived generation function back into the shared
/// registry so later factory instances skip re-derivation. The first
/// producer cached for a type wins; the winner is returned.
pub(crate) fn cache_shared(type_id: TypeId, producer: Producer) -> Producer {
    let mut state = shared_state();
    seeded_registry(&mut state).register_producer_if_absent(type_id, producer)
}

/// Discard all shared producers and force registrars to re-run on next
/// use. Intended for tests that need a clean process-wide slate;
/// factories constructed before the reset keep their snapshots.
pub fn reset_shared_registry() {
    let mut state = shared_state();
    state.registry = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_basic_operations() {
        let mut registry = ProducerRegistry::new();

        // Initially empty
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains::<i32>());

        registry.register::<i32, _>(|_| Ok(42));

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains::<i32>());
        assert!(!registry.contains::<String>());

        assert!(registry.remove::<i32>());
        assert!(!registry.remove::<i32>()); // Second removal should return false
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_type_safety() {
        let mut registry = ProducerRegistry::new();

        registry.register::<i32, _>(|_| Ok(42));
        registry.register::<String, _>(|_| Ok("hello".to_string()));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains::<i32>());
        assert!(registry.contains::<String>());
        assert!(!registry.contains::<f64>());
    }

    #[test]
    fn test_registered_producer_yields_value() {
        let mut registry = ProducerRegistry::new();
        registry.register::<i32, _>(|_| Ok(42));

        let mut factory = ObjectFactory::new();
        let producer = registry.get(TypeId::of::<i32>()).unwrap();
        let value = (*producer)(&mut factory).unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn test_register_producer_if_absent_keeps_first() {
        let mut registry = ProducerRegistry::new();
        let first: Producer = Arc::new(|_| Ok(Box::new(1i32) as Box<dyn Any>));
        let second: Producer = Arc::new(|_| Ok(Box::new(2i32) as Box<dyn Any>));

        registry.register_producer_if_absent(TypeId::of::<i32>(), first);
        let winner = registry.register_producer_if_absent(TypeId::of::<i32>(), second);

        let mut factory = ObjectFactory::new();
        let value = (*winner)(&mut factory).unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 1);
    }

    #[test]
    fn test_type_request_descriptor() {
        let request = TypeRequest::of::<String>();
        assert_eq!(request.type_id, TypeId::of::<String>());
        assert!(request.type_name.contains("String"));
    }

    #[test]
    fn test_producer_invocations_are_fresh() {
        // A producer must defer value generation to invocation time.
        let mut registry = ProducerRegistry::new();
        registry.register::<u32, _>(|factory| factory.any_int(0, 1_000_000));

        let mut factory = ObjectFactory::with_seed(11);
        let producer = registry.get(TypeId::of::<u32>()).unwrap();
        let first = *(*producer)(&mut factory).unwrap().downcast::<u32>().unwrap();
        let second = *(*producer)(&mut factory).unwrap().downcast::<u32>().unwrap();
        // With a million-wide range two consecutive draws colliding would
        // point at a frozen value rather than bad luck.
        assert_ne!(first, second);
    }
}
