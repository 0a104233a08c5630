//! The read-only metadata oracle consumed by the inspection engine.
//!
//! [`MetadataSource`] is the seam between the engine and whatever reads the binaries. The
//! crate ships one implementation, [`MetadataStore`], a concurrent arena of [`TypeDef`]s that
//! can be filled eagerly through [`MetadataStore::insert`] or lazily, one assembly at a time,
//! through registered [`AssemblyLoader`]s.
//!
//! # Thread Safety
//!
//! The store is `Send + Sync`. Definitions live in an append-only `boxcar::Vec` and are indexed
//! through `DashMap`s, so lookups never block each other. Every registered assembly is loaded at
//! most once: concurrent requests for the same assembly wait on a shared `OnceLock` while the
//! first caller runs the loader.
//!
//! # Examples
//!
//! ```rust
//! use docscope::metadata::{
//!     builder::TypeDefBuilder,
//!     source::{MetadataSource, MetadataStore},
//! };
//!
//! let store = MetadataStore::new();
//! store.register_assembly("Game", |_: &str| {
//!     Ok(vec![TypeDefBuilder::class("Game", "Player").build()?])
//! });
//!
//! // The loader runs on first use
//! assert!(store.find("Game.Player").is_some());
//! # Ok::<(), docscope::Error>(())
//! ```

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::{
    metadata::{definitions::TypeDef, signature::TypeName},
    Error, Result,
};

/// Provider of parsed type definitions
pub trait MetadataSource: Send + Sync {
    /// Looks up a type by its metadata-style full name (`Namespace.Outer/Inner`).
    ///
    /// Implementations should also accept the dotted form of nested names
    /// (`Namespace.Outer.Inner`).
    fn find(&self, full_name: &str) -> Option<Arc<TypeDef>>;

    /// Resolves a type reference, honouring its resolution scope when the source knows it
    fn resolve(&self, name: &TypeName) -> Option<Arc<TypeDef>> {
        self.find(&name.full_name())
    }

    /// Checks whether a referenced type is visible outside its assembly.
    ///
    /// Returns `None` if the reference cannot be resolved; callers treat that as public.
    fn is_type_public(&self, name: &TypeName) -> Option<bool> {
        self.resolve(name).map(|def| def.is_public())
    }

    /// Full names of all types the source currently knows
    fn type_names(&self) -> Vec<String>;
}

/// Produces the definitions of one assembly on demand
pub trait AssemblyLoader: Send + Sync {
    /// Parse `assembly` and return every type it defines
    ///
    /// # Errors
    /// Returns an error if the assembly could not be read
    fn load(&self, assembly: &str) -> Result<Vec<TypeDef>>;
}

impl<F> AssemblyLoader for F
where
    F: Fn(&str) -> Result<Vec<TypeDef>> + Send + Sync,
{
    fn load(&self, assembly: &str) -> Result<Vec<TypeDef>> {
        self(assembly)
    }
}

type LoadOutcome = std::result::Result<usize, String>;

/// Concurrent arena of type definitions with lazily loaded assemblies
pub struct MetadataStore {
    /// Append-only storage, indices never move
    types: boxcar::Vec<Arc<TypeDef>>,
    /// Metadata full name (`Ns.Outer/Inner`) to index
    by_full_name: DashMap<String, usize>,
    /// Dotted full name (`Ns.Outer.Inner`) to index
    by_dotted_name: DashMap<String, usize>,
    /// Registered loaders per assembly name
    loaders: DashMap<String, Arc<dyn AssemblyLoader>>,
    /// Load outcome per assembly, initialized exactly once
    loaded: DashMap<String, Arc<OnceLock<LoadOutcome>>>,
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        MetadataStore {
            types: boxcar::Vec::new(),
            by_full_name: DashMap::new(),
            by_dotted_name: DashMap::new(),
            loaders: DashMap::new(),
            loaded: DashMap::new(),
        }
    }

    /// Creates a store from already parsed definitions
    #[must_use]
    pub fn from_definitions(definitions: impl IntoIterator<Item = TypeDef>) -> Self {
        let store = Self::new();
        for definition in definitions {
            store.insert(definition);
        }
        store
    }

    /// Adds a definition and returns the shared handle to it.
    ///
    /// A later definition with the same full name shadows the earlier one in lookups.
    pub fn insert(&self, definition: TypeDef) -> Arc<TypeDef> {
        let full_name = definition.full_name();
        let dotted = full_name.replace('/', ".");
        let definition = Arc::new(definition);

        let index = self.types.push(Arc::clone(&definition));
        self.by_full_name.insert(full_name, index);
        self.by_dotted_name.insert(dotted, index);

        definition
    }

    /// Registers a loader function for `assembly`; it runs the first time the assembly is needed
    pub fn register_assembly<F>(&self, assembly: impl Into<String>, loader: F)
    where
        F: Fn(&str) -> Result<Vec<TypeDef>> + Send + Sync + 'static,
    {
        self.register_loader(assembly, Arc::new(loader));
    }

    /// Registers a shared [`AssemblyLoader`] for `assembly`
    pub fn register_loader(&self, assembly: impl Into<String>, loader: Arc<dyn AssemblyLoader>) {
        self.loaders.insert(assembly.into(), loader);
    }

    /// Makes sure `assembly` has been loaded, running its loader if this is the first request.
    ///
    /// Returns the number of definitions the assembly contributed.
    ///
    /// # Errors
    /// Returns [`Error::AssemblyLoad`] if no loader is registered for the assembly or the loader
    /// failed. A failed load is remembered and not retried.
    pub fn ensure_loaded(&self, assembly: &str) -> Result<usize> {
        let cell = Arc::clone(
            self.loaded
                .entry(assembly.to_string())
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .value(),
        );

        let outcome = cell.get_or_init(|| {
            let loader = self
                .loaders
                .get(assembly)
                .map(|entry| Arc::clone(entry.value()));

            match loader {
                Some(loader) => {
                    log::debug!("loading assembly '{assembly}'");
                    match loader.load(assembly) {
                        Ok(definitions) => {
                            let count = definitions.len();
                            for definition in definitions {
                                self.insert(definition);
                            }
                            Ok(count)
                        }
                        Err(error) => Err(error.to_string()),
                    }
                }
                None => Err("no loader registered".to_string()),
            }
        });

        outcome.clone().map_err(|message| Error::AssemblyLoad {
            assembly: assembly.to_string(),
            message,
        })
    }

    /// Loads every registered assembly that has not been loaded yet
    ///
    /// # Errors
    /// Returns the first loader failure; the remaining assemblies are still attempted
    pub fn load_all(&self) -> Result<()> {
        let assemblies: Vec<String> = self.loaders.iter().map(|entry| entry.key().clone()).collect();

        let mut first_error = None;
        for assembly in assemblies {
            if let Err(error) = self.ensure_loaded(&assembly) {
                log::warn!("{error}");
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Names of the assemblies whose loader has completed successfully
    #[must_use]
    pub fn loaded_assemblies(&self) -> Vec<String> {
        self.loaded
            .iter()
            .filter(|entry| matches!(entry.value().get(), Some(Ok(_))))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of definitions in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.count()
    }

    /// Returns true if no definition has been added yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.count() == 0
    }

    /// Iterate over all definitions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDef>> {
        self.types.iter().map(|(_, definition)| definition)
    }

    fn lookup(&self, full_name: &str) -> Option<Arc<TypeDef>> {
        let index = self
            .by_full_name
            .get(full_name)
            .or_else(|| self.by_dotted_name.get(full_name))
            .map(|entry| *entry.value())?;

        self.types.get(index).cloned()
    }

    fn load_pending(&self) {
        let pending: Vec<String> = self
            .loaders
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|assembly| {
                self.loaded
                    .get(assembly)
                    .map_or(true, |cell| cell.value().get().is_none())
            })
            .collect();

        for assembly in pending {
            if let Err(error) = self.ensure_loaded(&assembly) {
                log::warn!("{error}");
            }
        }
    }
}

impl MetadataSource for MetadataStore {
    fn find(&self, full_name: &str) -> Option<Arc<TypeDef>> {
        if let Some(definition) = self.lookup(full_name) {
            return Some(definition);
        }

        self.load_pending();
        self.lookup(full_name)
    }

    fn resolve(&self, name: &TypeName) -> Option<Arc<TypeDef>> {
        let full_name = name.full_name();
        if let Some(definition) = self.lookup(&full_name) {
            return Some(definition);
        }

        if let Some(scope) = &name.scope {
            if self.loaders.contains_key(scope) {
                if let Err(error) = self.ensure_loaded(scope) {
                    log::warn!("{error}");
                }
                return self.lookup(&full_name);
            }
        }

        self.find(&full_name)
    }

    fn type_names(&self) -> Vec<String> {
        self.iter().map(|definition| definition.full_name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rayon::prelude::*;

    use super::*;
    use crate::metadata::builder::TypeDefBuilder;

    #[test]
    fn test_insert_and_find() {
        let store = MetadataStore::new();
        store.insert(TypeDefBuilder::class("Game", "Player").build().unwrap());
        store.insert(
            TypeDefBuilder::class("", "Slot")
                .nested_in(TypeName::new("Game", "Player"))
                .build()
                .unwrap(),
        );

        assert_eq!(store.len(), 2);
        assert!(store.find("Game.Player").is_some());
        assert!(store.find("Game.Player/Slot").is_some());
        assert!(store.find("Game.Player.Slot").is_some());
        assert!(store.find("Game.Missing").is_none());
        assert_eq!(store.type_names(), vec!["Game.Player", "Game.Player/Slot"]);
    }

    #[test]
    fn test_unresolvable_visibility() {
        let store = MetadataStore::new();
        store.insert(TypeDefBuilder::class("Game", "Hidden").internal().build().unwrap());

        assert_eq!(store.is_type_public(&TypeName::new("Game", "Hidden")), Some(false));
        assert_eq!(store.is_type_public(&TypeName::new("Other", "Unknown")), None);
    }

    #[test]
    fn test_assembly_loaded_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = MetadataStore::new();

        let counter = Arc::clone(&calls);
        store.register_assembly("Game", move |assembly: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![TypeDefBuilder::class("Game", "Player")
                .assembly(assembly)
                .build()?])
        });

        let found: Vec<bool> = (0..64)
            .into_par_iter()
            .map(|_| store.resolve(&TypeName::new("Game", "Player").with_scope("Game")).is_some())
            .collect();

        assert!(found.iter().all(|found| *found));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.loaded_assemblies(), vec!["Game".to_string()]);
    }

    #[test]
    fn test_failed_load_is_remembered() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = MetadataStore::new();

        let counter = Arc::clone(&calls);
        store.register_assembly("Broken", move |assembly: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::AssemblyLoad {
                assembly: assembly.to_string(),
                message: "truncated".to_string(),
            })
        });

        assert!(matches!(
            store.ensure_loaded("Broken"),
            Err(Error::AssemblyLoad { .. })
        ));
        assert!(store.ensure_loaded("Broken").is_err());
        assert!(store.load_all().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            store.ensure_loaded("Unregistered"),
            Err(Error::AssemblyLoad { .. })
        ));
    }
}
