//! Cancellation token shared between the facade and a running solver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag raised by the caller to ask a running solver to stop.
///
/// Tree search solvers poll it every 65536 nodes and the DP
/// solver once per item layer, so the per-node work stays check-free.
pub type CancelToken = Arc<AtomicBool>;

/// Number of search nodes between two token polls. Power of two.
pub(crate) const POLL_INTERVAL: u64 = 1 << 16;

pub(crate) fn is_raised(cancel: &Option<CancelToken>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Whether node number `nodes` is a polling point and the token is raised.
#[inline]
pub(crate) fn should_stop(cancel: &Option<CancelToken>, nodes: u64) -> bool {
    nodes & (POLL_INTERVAL - 1) == 0 && is_raised(cancel)
}
