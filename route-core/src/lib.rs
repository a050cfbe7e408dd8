#![warn(missing_docs)]
//! # Route Core
//!
//! Location parsing and navigation guard resolution for client-side routers.
//!
//! ## Overview
//!
//! This crate sits between a history backend and a router's navigation
//! controller:
//! - **Query codec** maps query strings to ordered [`LocationQuery`] values
//! - **Location codec** parses and serializes `path?query#hash` strings and
//!   strips a configured base
//! - **Normalizer** turns strings or partial objects into a location with a
//!   `full_path`
//! - **Equality helpers** detect navigations that change nothing
//! - **Guard pipeline** turns matched records into ordered async guard
//!   thunks, loading lazy components on the way
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   raw string   ┌───────────────────┐
//! │ History backend  │ ─────────────► │ LocationCodec     │
//! └──────────────────┘                │  strip_base       │
//!                                     │  parse_url        │──► ParsedLocation
//!                                     └───────────────────┘
//!                                               │
//!                                               ▼
//! ┌──────────────────┐  matched records ┌────────────────────────────┐
//! │ Matcher (extern) │ ───────────────► │ extract_components_guards  │
//! └──────────────────┘                  └─────────────┬──────────────┘
//!                                                     │ Vec<GuardThunk>
//!                                                     ▼
//!                                       ┌────────────────────────────┐
//!                                       │ run_guard_queue            │
//!                                       │  in order, first Err wins  │
//!                                       └────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ### 1. Parse locations
//!
//! ```rust,ignore
//! use route_core::prelude::*;
//!
//! let codec = LocationCodec::new(LocationConfig::new().with_base("/app"))?;
//! let location = codec.parse_history("/app/users?tab=posts&tab=likes#top");
//!
//! assert_eq!(location.path, "/users");
//! assert_eq!(location.query.get("tab"), Some(&QueryValue::list(["posts", "likes"])));
//! assert_eq!(location.hash, "#top");
//! ```
//!
//! ### 2. Declare components and records
//!
//! ```rust,ignore
//! let dashboard = Component::new("Dashboard").with_guard(
//!     GuardKind::BeforeRouteEnter,
//!     sync_guard(|to, _from, _instance| to.query.get("token").is_some()),
//! );
//!
//! let settings = lazy(|| async {
//!     Ok(LoadedModule::Module { default: Arc::new(Component::new("Settings")) })
//! });
//!
//! let root = Arc::new(RouteRecord::new("/").with_component(dashboard));
//! let child = Arc::new(RouteRecord::new("/settings").with_component(settings));
//! ```
//!
//! ### 3. Run the guards
//!
//! ```rust,ignore
//! let to = Arc::new(RouteLocationNormalized::from_path("/settings").with_matched(vec![root, child]));
//! let from = Arc::new(RouteLocationNormalized::from_path("/"));
//!
//! let guards = extract_components_guards(&to.matched, GuardKind::BeforeRouteEnter, &to, &from);
//! match run_guard_queue(guards).await {
//!     Ok(()) => { /* commit */ }
//!     Err(err) if err.kind == NavigationFailureKind::ComponentFetch => { /* show error page */ }
//!     Err(err) => { /* aborted or redirected */ }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Codec functions never fail on malformed input; they degrade to the raw
//! text. Guard thunks fail with a [`NavigationError`] whose
//! [`NavigationFailureKind`] separates component fetch failures from guard
//! decisions.

pub mod config;
pub mod equality;
pub mod error;
pub mod guards;
pub mod history;
pub mod location;
pub mod params;
pub mod query;
pub mod record;
pub mod types;

#[cfg(test)]
mod tests;

// Public API
pub use config::{ConfigValidationError, LocationConfig, normalize_base};
pub use equality::{
    LocationObject, LocationObjectValue, is_same_location_object, is_same_route_location,
    is_same_route_record,
};
pub use error::{ComponentLoadError, NavigationError, NavigationFailureKind, NavigationResult};
pub use guards::{
    ChangingRecords, GuardFuture, GuardKind, GuardOutcome, GuardThunk, NavigationFuture,
    NavigationGuard, chain_guards, extract_changing_records, extract_components_guards,
    guard_fn, guard_to_thunk, load_route_location, run_guard_queue, sync_guard,
};
pub use history::{PartialLocation, RawLocation, normalize_location};
pub use location::{
    LocationCodec, LocationParts, ParsedLocation, parse_url, resolve_relative_path, strip_base,
    stringify_url,
};
pub use params::{ParamValue, RouteParams, apply_to_params};
pub use query::{
    DefaultQueryCodec, LocationQuery, QueryCodec, QueryValue, parse_query, stringify_query,
};
pub use record::{
    Component, ComponentCache, ComponentInstance, ComponentLoader, LoadedModule, LoaderFuture,
    RawRouteComponent, RouteRecord, lazy,
};
pub use types::RouteLocationNormalized;

/// Prelude for convenient imports
///
/// ```rust,ignore
/// use route_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Records
        Component,
        ComponentCache,
        ComponentInstance,
        ComponentLoadError,
        ComponentLoader,
        // Configuration
        ConfigValidationError,
        DefaultQueryCodec,
        // Guards
        GuardKind,
        GuardOutcome,
        GuardThunk,
        LoadedModule,
        // Locations
        LocationCodec,
        LocationConfig,
        LocationParts,
        LocationQuery,
        // Error handling
        NavigationError,
        NavigationFailureKind,
        NavigationGuard,
        NavigationResult,
        ParamValue,
        ParsedLocation,
        PartialLocation,
        QueryCodec,
        QueryValue,
        RawLocation,
        RawRouteComponent,
        RouteLocationNormalized,
        RouteParams,
        RouteRecord,
        // Functions
        apply_to_params,
        extract_changing_records,
        extract_components_guards,
        guard_fn,
        is_same_location_object,
        is_same_route_location,
        is_same_route_record,
        lazy,
        load_route_location,
        normalize_base,
        normalize_location,
        parse_query,
        parse_url,
        run_guard_queue,
        strip_base,
        stringify_query,
        stringify_url,
        sync_guard,
    };
}
