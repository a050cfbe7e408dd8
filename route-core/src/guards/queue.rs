//! Guard queue execution
//!
//! Guards run strictly one after another. The first failure stops the
//! queue and is returned unchanged.

use super::adapter::{GuardThunk, NavigationFuture};
use crate::error::NavigationResult;

/// Compose a list of thunks into a single thunk.
///
/// Thunks are folded in reverse so the first one in the list runs first;
/// each one only starts after the previous one resolved successfully.
///
/// # Example
/// ```rust,ignore
/// // Given thunks [G1, G2, G3]:
/// // Execution order: G1 → G2 → G3, stopping at the first Err
/// let chain = chain_guards(vec![g1, g2, g3]);
/// chain().await?;
/// ```
pub fn chain_guards(guards: Vec<GuardThunk>) -> GuardThunk {
    let done: GuardThunk = Box::new(|| -> NavigationFuture { Box::pin(async { Ok(()) }) });

    guards.into_iter().rev().fold(done, |next, guard| -> GuardThunk {
        Box::new(move || -> NavigationFuture {
            Box::pin(async move {
                guard().await?;
                next().await
            })
        })
    })
}

/// Run `guards` in order, stopping at the first error.
pub async fn run_guard_queue(guards: Vec<GuardThunk>) -> NavigationResult<()> {
    let total = guards.len();
    for (index, guard) in guards.into_iter().enumerate() {
        if let Err(err) = guard().await {
            tracing::debug!(
                index,
                total,
                kind = %err.kind,
                "Guard queue stopped"
            );
            return Err(err);
        }
    }
    tracing::trace!(total, "Guard queue completed");
    Ok(())
}
