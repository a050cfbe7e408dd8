//! Guard extraction from matched records

use super::adapter::{GuardThunk, NavigationFuture, guard_to_thunk};
use super::GuardKind;
use crate::error::{NavigationError, NavigationResult};
use crate::record::{ComponentCache, RawRouteComponent, RouteRecord};
use crate::types::RouteLocationNormalized;
use std::sync::Arc;

/// Build the guard thunks of kind `kind` for `matched`.
///
/// Records are visited in the given order and, within a record, view slots
/// in registration order. The returned thunks follow that same order.
///
/// - A resolved slot contributes a thunk only if its component declares
///   the guard; the instance is read now.
/// - A lazy slot always contributes a thunk. Its loader is invoked during
///   extraction so every load is issued before any thunk runs. The thunk
///   awaits the load, caches the component on the record, then runs the
///   guard if declared (reading the instance at that point).
///
/// A failed load makes the thunk return a `COMPONENT_FETCH` error carrying
/// the loader's message as its cause.
pub fn extract_components_guards(
    matched: &[Arc<RouteRecord>],
    kind: GuardKind,
    to: &Arc<RouteLocationNormalized>,
    from: &Arc<RouteLocationNormalized>,
) -> Vec<GuardThunk> {
    let mut guards: Vec<GuardThunk> = Vec::new();

    for record in matched {
        for slot in record.slots() {
            let Some(raw) = record.component(slot) else {
                continue;
            };

            match raw {
                RawRouteComponent::Resolved(component) => {
                    if let Some(guard) = component.guard(kind) {
                        tracing::trace!(
                            record = %record.path(),
                            slot = %slot,
                            guard = %kind,
                            "Extracted guard"
                        );
                        guards.push(guard_to_thunk(
                            Arc::clone(guard),
                            Arc::clone(to),
                            Arc::clone(from),
                            record.instance(slot),
                        ));
                    }
                }
                RawRouteComponent::Lazy(loader) => {
                    tracing::trace!(
                        record = %record.path(),
                        slot = %slot,
                        guard = %kind,
                        "Loading lazy component"
                    );
                    let pending = loader();
                    let record = Arc::clone(record);
                    let slot = slot.to_string();
                    let to = Arc::clone(to);
                    let from = Arc::clone(from);

                    guards.push(Box::new(move || -> NavigationFuture {
                        Box::pin(async move {
                            let module = pending.await.map_err(|err| {
                                tracing::warn!(
                                    record = %record.path(),
                                    slot = %slot,
                                    error = %err,
                                    "Failed to load route component"
                                );
                                NavigationError::component_fetch(record.path(), &slot)
                                    .with_cause(err.message)
                            })?;

                            let component = module.into_component();
                            record.cache_resolved_component(&slot, Arc::clone(&component));

                            match component.guard(kind) {
                                Some(guard) => {
                                    let thunk = guard_to_thunk(
                                        Arc::clone(guard),
                                        to,
                                        from,
                                        record.instance(&slot),
                                    );
                                    thunk().await
                                }
                                None => Ok(()),
                            }
                        })
                    }));
                }
            }
        }
    }

    tracing::debug!(guard = %kind, records = matched.len(), count = guards.len(), "Extracted component guards");
    guards
}

/// Resolve every lazy component of `route` without running any guard.
///
/// All loaders are started together and awaited with
/// [`futures::future::try_join_all`]; each resolved component is cached on
/// its record. The first failing loader aborts the whole load with a
/// `COMPONENT_FETCH` error. Components cached before the failure stay
/// cached.
pub async fn load_route_location(route: &RouteLocationNormalized) -> NavigationResult<()> {
    let mut pending = Vec::new();

    for record in &route.matched {
        for slot in record.slots() {
            if let Some(RawRouteComponent::Lazy(loader)) = record.component(slot) {
                let load = loader();
                let record = Arc::clone(record);
                let slot = slot.to_string();
                pending.push(async move {
                    let module = load.await.map_err(|err| {
                        NavigationError::component_fetch(record.path(), &slot)
                            .with_cause(err.message)
                    })?;
                    record.cache_resolved_component(&slot, module.into_component());
                    Ok::<(), NavigationError>(())
                });
            }
        }
    }

    let count = pending.len();
    futures::future::try_join_all(pending).await?;
    tracing::debug!(path = %route.full_path, count, "Loaded route components");
    Ok(())
}
