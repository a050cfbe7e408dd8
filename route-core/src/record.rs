//! Route records and their components
//!
//! Records are created and owned by the external matcher. The guard pipeline
//! reads them and may only write through [`ComponentCache`], replacing a
//! lazy slot with the component it resolved to.

use crate::error::ComponentLoadError;
use crate::guards::{GuardKind, NavigationGuard};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

/// Live instance of a mounted component, bound to its guards.
pub type ComponentInstance = Arc<dyn Any + Send + Sync>;

/// A route component and the navigation guards it declares.
#[derive(Clone)]
pub struct Component {
    name: String,
    guards: HashMap<GuardKind, NavigationGuard>,
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.guards.keys().map(GuardKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("guards", &kinds)
            .finish()
    }
}

impl Component {
    /// Create a component without guards.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guards: HashMap::new(),
        }
    }

    /// Declare a guard of the given kind, replacing any previous one.
    pub fn with_guard(mut self, kind: GuardKind, guard: NavigationGuard) -> Self {
        self.guards.insert(kind, guard);
        self
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the guard declared for `kind`.
    pub fn guard(&self, kind: GuardKind) -> Option<&NavigationGuard> {
        self.guards.get(&kind)
    }
}

/// Value produced by a component loader.
#[derive(Debug, Clone)]
pub enum LoadedModule {
    /// The component itself
    Component(Arc<Component>),
    /// A module whose default export is the component
    Module {
        /// The default export
        default: Arc<Component>,
    },
}

impl LoadedModule {
    /// Unwrap the component, looking through a module wrapper.
    pub fn into_component(self) -> Arc<Component> {
        match self {
            Self::Component(component) => component,
            Self::Module { default } => default,
        }
    }
}

/// Future returned by a component loader.
pub type LoaderFuture =
    Pin<Box<dyn Future<Output = Result<LoadedModule, ComponentLoadError>> + Send>>;

/// Deferred factory for a component.
pub type ComponentLoader = Arc<dyn Fn() -> LoaderFuture + Send + Sync>;

/// Create a loader from an async function.
///
/// # Example
/// ```rust,ignore
/// let loader = lazy(|| async {
///     Ok(LoadedModule::Module { default: Arc::new(Component::new("Settings")) })
/// });
/// ```
pub fn lazy<F, Fut>(f: F) -> ComponentLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<LoadedModule, ComponentLoadError>> + Send + 'static,
{
    Arc::new(move || -> LoaderFuture { Box::pin(f()) })
}

/// What a record's view slot currently holds.
#[derive(Clone)]
pub enum RawRouteComponent {
    /// Already available component
    Resolved(Arc<Component>),
    /// Component that still has to be loaded
    Lazy(ComponentLoader),
}

impl RawRouteComponent {
    /// Returns true if the slot still holds a loader.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl std::fmt::Debug for RawRouteComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(component) => f.debug_tuple("Resolved").field(component).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<Component> for RawRouteComponent {
    fn from(component: Component) -> Self {
        Self::Resolved(Arc::new(component))
    }
}

impl From<Arc<Component>> for RawRouteComponent {
    fn from(component: Arc<Component>) -> Self {
        Self::Resolved(component)
    }
}

impl From<ComponentLoader> for RawRouteComponent {
    fn from(loader: ComponentLoader) -> Self {
        Self::Lazy(loader)
    }
}

/// Write access the guard pipeline has to a record.
pub trait ComponentCache {
    /// Replace the loader in `slot` with the component it resolved to.
    ///
    /// Writing to a slot that already holds a resolved component, or to an
    /// unknown slot, leaves the record unchanged.
    fn cache_resolved_component(&self, slot: &str, component: Arc<Component>);
}

/// One matched route record.
///
/// Components live in named view slots (`default` for the unnamed view).
/// Slot order is the order of registration and drives guard order.
pub struct RouteRecord {
    path: String,
    name: Option<String>,
    components: IndexMap<String, RwLock<RawRouteComponent>>,
    instances: RwLock<HashMap<String, ComponentInstance>>,
    alias_of: Option<Arc<RouteRecord>>,
}

impl std::fmt::Debug for RouteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRecord")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("slots", &self.components.keys().collect::<Vec<_>>())
            .field("alias_of", &self.alias_of.as_ref().map(|r| r.path.as_str()))
            .finish()
    }
}

impl RouteRecord {
    /// Create a record for `path` with no components.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            components: IndexMap::new(),
            instances: RwLock::new(HashMap::new()),
            alias_of: None,
        }
    }

    /// Set the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a component to the `default` slot.
    pub fn with_component(self, component: impl Into<RawRouteComponent>) -> Self {
        self.with_named_component("default", component)
    }

    /// Add a component to a named view slot.
    pub fn with_named_component(
        mut self,
        slot: impl Into<String>,
        component: impl Into<RawRouteComponent>,
    ) -> Self {
        self.components
            .insert(slot.into(), RwLock::new(component.into()));
        self
    }

    /// Mark this record as an alias of `original`.
    pub fn alias_of(mut self, original: Arc<RouteRecord>) -> Self {
        self.alias_of = Some(original);
        self
    }

    /// Record path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Route name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The record this one aliases.
    pub fn original(&self) -> Option<&Arc<RouteRecord>> {
        self.alias_of.as_ref()
    }

    /// View slot names in registration order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Snapshot of what `slot` currently holds.
    pub fn component(&self, slot: &str) -> Option<RawRouteComponent> {
        self.components.get(slot).map(|cell| {
            cell.read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }

    /// Live instance mounted in `slot`.
    pub fn instance(&self, slot: &str) -> Option<ComponentInstance> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slot)
            .cloned()
    }

    /// Register or clear the instance mounted in `slot`.
    pub fn set_instance(&self, slot: impl Into<String>, instance: Option<ComponentInstance>) {
        let mut instances = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = slot.into();
        match instance {
            Some(instance) => {
                instances.insert(slot, instance);
            }
            None => {
                instances.remove(&slot);
            }
        }
    }
}

impl ComponentCache for RouteRecord {
    fn cache_resolved_component(&self, slot: &str, component: Arc<Component>) {
        let Some(cell) = self.components.get(slot) else {
            tracing::debug!(record = %self.path, slot = %slot, "Ignoring component for unknown slot");
            return;
        };
        let mut current = cell.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_lazy() {
            tracing::trace!(
                record = %self.path,
                slot = %slot,
                component = %component.name(),
                "Caching resolved component"
            );
            *current = RawRouteComponent::Resolved(component);
        }
    }
}
