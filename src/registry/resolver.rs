//! Ordered type name resolution with instance-scoped memoization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::binding::TypeBinding;
use super::errors::{ResolveError, ResolveResult};

/// A named registry of type bindings.
///
/// The conversion-side analogue of a code namespace: resolution searches
/// spaces in the order they were handed to the resolver.
#[derive(Debug, Clone, Default)]
pub struct TypeSpace {
    name: String,
    bindings: HashMap<String, Arc<TypeBinding>>,
}

impl TypeSpace {
    /// Creates an empty space with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
        }
    }

    /// Returns the space's name, used in resolution failures.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a binding, replacing any previous one with the same name.
    pub fn register(mut self, binding: TypeBinding) -> Self {
        self.bindings
            .insert(binding.type_name().to_string(), Arc::new(binding));
        self
    }

    fn get(&self, type_name: &str) -> Option<&Arc<TypeBinding>> {
        self.bindings.get(type_name)
    }
}

/// Resolves short type names against an ordered list of spaces.
///
/// The first space declaring the name wins. Successful resolutions are
/// memoized for the life of this resolver instance.
#[derive(Debug)]
pub struct TypeResolver {
    spaces: Vec<TypeSpace>,
    cache: Mutex<HashMap<String, Arc<TypeBinding>>>,
}

impl TypeResolver {
    /// Creates a resolver over the given spaces, searched in order.
    pub fn new(spaces: Vec<TypeSpace>) -> Self {
        Self {
            spaces,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a type name to its binding.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TypeNotFound`] naming every searched space
    /// when no space declares the name.
    pub fn resolve(&self, type_name: &str) -> ResolveResult<Arc<TypeBinding>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(type_name) {
            return Ok(Arc::clone(hit));
        }

        for space in &self.spaces {
            if let Some(binding) = space.get(type_name) {
                debug!(type_name, space = space.name(), "resolved domain type");
                cache.insert(type_name.to_string(), Arc::clone(binding));
                return Ok(Arc::clone(binding));
            }
        }

        Err(ResolveError::TypeNotFound {
            type_name: type_name.to_string(),
            searched: self.spaces.iter().map(|s| s.name().to_string()).collect(),
        })
    }
}
