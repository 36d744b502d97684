//! The `ObjectFactory` facade: the single entry point for producing
//! pseudo-random values and object graphs.
//!
//! Resolution follows a strict precedence chain per request:
//!
//! 1. the instance registry, by exact type identity;
//! 2. the customization stack, most recently registered first;
//! 3. default synthesis through [`Fabricate`], which resolves every
//!    nested part through the same chain.
//!
//! A generation function derived in step 3 is written back into both the
//! process-wide shared registry and this instance's registry before it is
//! invoked, so later requests (and later factory instances) skip
//! re-derivation. The flip side is that registrations and customizations
//! must be in place *before* a type is first requested; once the derived
//! producer is cached it short-circuits the chain.
//!
//! One factory owns one seeded random source and is meant to be owned by
//! one test execution context; it is not a shared-across-threads object.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_traits::{Float, NumCast, PrimInt};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::FactoryConfig;
use crate::customize::{Customization, Resolution};
use crate::distribution::{Distribution, Uniform};
use crate::error::{FactoryError, FactoryResult};
use crate::fabricate::Fabricate;
use crate::registry::{self, Producer, ProducerRegistry, TypeRequest};

/// Deterministic pseudo-random value factory
pub struct ObjectFactory {
    rng: StdRng,
    config: FactoryConfig,
    registry: ProducerRegistry,
    customizations: Vec<Arc<dyn Customization>>,
    depth: usize,
}

impl ObjectFactory {
    /// Horizon for default-synthesized [`Duration`] and [`SystemTime`]
    /// values: one hundred years of seconds past the epoch.
    pub const DEFAULT_TIME_HORIZON_SECS: u64 = 100 * 365 * 24 * 60 * 60;

    /// Create a factory with the default configuration and seed
    pub fn new() -> Self {
        Self::from_config(FactoryConfig::default())
    }

    /// Create a factory with the default configuration and a caller seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(FactoryConfig::default().with_seed(seed))
    }

    /// Create a factory from a validated configuration
    pub fn with_config(config: FactoryConfig) -> FactoryResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: FactoryConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            registry: registry::snapshot(),
            customizations: Vec::new(),
            depth: 0,
            config,
        }
    }

    /// This factory's configuration
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// This factory's instance registry
    pub fn registry(&self) -> &ProducerRegistry {
        &self.registry
    }

    /// Mutable access to this factory's instance registry
    pub fn registry_mut(&mut self) -> &mut ProducerRegistry {
        &mut self.registry
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Produce a value of `T` through the full resolution chain
    pub fn any<T: Fabricate>(&mut self) -> FactoryResult<T> {
        let request = TypeRequest::of::<T>();
        self.enter(&request)?;
        let result = self.resolve_typed::<T>(&request);
        self.depth -= 1;
        result
    }

    /// Produce a type-erased value for a runtime type descriptor.
    ///
    /// Only the registry and the customization stack can satisfy an
    /// erased request; a type nothing claims fails with
    /// [`FactoryError::Unconstructible`].
    pub fn any_by_request(&mut self, request: &TypeRequest) -> FactoryResult<Box<dyn Any>> {
        self.enter(request)?;
        let result = self.resolve_erased(request);
        self.depth -= 1;
        result
    }

    fn enter(&mut self, request: &TypeRequest) -> FactoryResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(FactoryError::recursion_limit(
                request.type_name,
                self.config.max_depth,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn resolve_typed<T: Fabricate>(&mut self, request: &TypeRequest) -> FactoryResult<T> {
        if let Some(producer) = self.registry.get(request.type_id) {
            return downcast::<T>((*producer)(self)?, request);
        }
        if let Some(value) = self.run_customizations(request)? {
            return downcast::<T>(value, request);
        }
        // Derive the generation function, publish it to the shared and
        // instance registries, then invoke it for this request.
        let derived: Producer = Arc::new(|factory: &mut ObjectFactory| {
            T::fabricate(factory).map(|value| Box::new(value) as Box<dyn Any>)
        });
        let producer = registry::cache_shared(request.type_id, derived);
        self.registry
            .register_producer(request.type_id, producer.clone());
        downcast::<T>((*producer)(self)?, request)
    }

    fn resolve_erased(&mut self, request: &TypeRequest) -> FactoryResult<Box<dyn Any>> {
        if let Some(producer) = self.registry.get(request.type_id) {
            return (*producer)(self);
        }
        if let Some(value) = self.run_customizations(request)? {
            return Ok(value);
        }
        Err(FactoryError::unconstructible(request.type_name))
    }

    fn run_customizations(&mut self, request: &TypeRequest) -> FactoryResult<Option<Box<dyn Any>>> {
        // Snapshot the stack so a customization can recurse into self.
        let stack = self.customizations.clone();
        for customization in stack.iter().rev() {
            match customization.try_resolve(request, self)? {
                Resolution::Handled(value) => return Ok(Some(value)),
                Resolution::NotHandled => {}
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Overrides
    // ------------------------------------------------------------------

    /// Install an instance-scoped producer for `T`, overriding every
    /// other resolution mechanism for this factory
    pub fn register<T, F>(&mut self, produce: F)
    where
        T: Any + 'static,
        F: Fn(&mut ObjectFactory) -> FactoryResult<T> + Send + Sync + 'static,
    {
        self.registry.register::<T, F>(produce);
    }

    /// Pin `T` to clones of one fixed value for this factory's
    /// remaining lifetime.
    ///
    /// The value is held inside a [`Producer`], and producers share one
    /// type-erased `Send + Sync` shape with the process-wide registry,
    /// so a non-`Send` value cannot be frozen. Such a value can still be
    /// supplied by a `register` closure that constructs it per request.
    pub fn freeze<T>(&mut self, value: T)
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.register(move |_| Ok(value.clone()));
    }

    /// Push a customization onto this factory's interception stack;
    /// the most recently pushed customization is consulted first
    pub fn customize<C: Customization + 'static>(&mut self, customization: C) {
        self.customizations.push(Arc::new(customization));
    }

    // ------------------------------------------------------------------
    // Bounded primitives
    // ------------------------------------------------------------------

    /// Produce a uniform double in `[min, max)`
    pub fn any_double(&mut self, min: f64, max: f64) -> FactoryResult<f64> {
        self.any_double_with(min, max, &Uniform)
    }

    /// Produce a double in `[min, max)` shaped by the given distribution.
    ///
    /// This is the canonical bounded generator: every other primitive
    /// helper derives its value from it.
    pub fn any_double_with(
        &mut self,
        min: f64,
        max: f64,
        distribution: &dyn Distribution,
    ) -> FactoryResult<f64> {
        if !(min < max) {
            return Err(FactoryError::invalid_range(min, max));
        }
        let sample = distribution.sample(&mut self.rng);
        let value = min + sample * (max - min);
        // When the span is tiny relative to the magnitude of the bounds
        // the rescale can round up onto max; pull such draws back inside
        // the half-open range.
        if value >= max {
            return Ok(max.next_down());
        }
        Ok(value)
    }

    /// Produce an integer in `[min, max)` by narrowing a double draw
    pub fn any_int<T>(&mut self, min: T, max: T) -> FactoryResult<T>
    where
        T: PrimInt + NumCast,
    {
        let lo = to_f64(min)?;
        let hi = to_f64(max)?;
        let value = self.any_double(lo, hi)?;
        // The cast only fails at the extreme edge of the representable
        // range; land on the lower bound rather than wrapping.
        Ok(num_traits::cast::<f64, T>(value.floor()).unwrap_or(min))
    }

    /// Produce a float in `[min, max)` by rescaling a double draw
    pub fn any_float<T>(&mut self, min: T, max: T) -> FactoryResult<T>
    where
        T: Float + NumCast,
    {
        let lo = to_f64(min)?;
        let hi = to_f64(max)?;
        let value = self.any_double(lo, hi)?;
        Ok(num_traits::cast::<f64, T>(value).unwrap_or(min))
    }

    /// Produce a boolean
    pub fn any_bool(&mut self) -> FactoryResult<bool> {
        Ok(self.any_double(0.0, 1.0)? < 0.5)
    }

    /// Produce a printable ASCII character
    pub fn any_char(&mut self) -> FactoryResult<char> {
        let code = self.any_int(0x20u32, 0x7f)?;
        Ok(char::from_u32(code).unwrap_or('a'))
    }

    /// Produce an ASCII letter, either case
    pub fn any_letter(&mut self) -> FactoryResult<char> {
        let index = self.any_int(0u32, 52)?;
        let code = if index < 26 {
            b'a' + index as u8
        } else {
            b'A' + (index - 26) as u8
        };
        Ok(code as char)
    }

    /// Produce an ASCII digit
    pub fn any_digit(&mut self) -> FactoryResult<char> {
        let index = self.any_int(0u32, 10)?;
        Ok((b'0' + index as u8) as char)
    }

    /// Produce a printable ASCII string with length in `[min_len, max_len)`
    pub fn any_string(&mut self, min_len: usize, max_len: usize) -> FactoryResult<String> {
        let len = self.any_int(min_len, max_len)?;
        let mut out = String::with_capacity(len);
        for _ in 0..len {
            out.push(self.any_char()?);
        }
        Ok(out)
    }

    /// Produce a duration below the given horizon
    pub fn any_duration(&mut self, horizon: Duration) -> FactoryResult<Duration> {
        let secs = self.any_double(0.0, horizon.as_secs_f64())?;
        Ok(Duration::from_secs_f64(secs))
    }

    /// Produce a time within [`Self::DEFAULT_TIME_HORIZON_SECS`] of the epoch
    pub fn any_system_time(&mut self) -> FactoryResult<SystemTime> {
        let offset = self.any_duration(Duration::from_secs(Self::DEFAULT_TIME_HORIZON_SECS))?;
        Ok(UNIX_EPOCH + offset)
    }
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFactory")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("customizations", &self.customizations.len())
            .field("depth", &self.depth)
            .finish()
    }
}

fn downcast<T: 'static>(value: Box<dyn Any>, request: &TypeRequest) -> FactoryResult<T> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| FactoryError::producer_type_mismatch(request.type_name))
}

fn to_f64<T: NumCast>(value: T) -> FactoryResult<f64> {
    num_traits::cast::<T, f64>(value).ok_or_else(|| {
        FactoryError::config_error("numeric bound is not representable as f64", Some("bound"))
    })
}
