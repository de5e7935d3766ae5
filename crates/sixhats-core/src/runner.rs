//! Background execution of a full analysis cycle.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

use crate::domain::error::Result;
use crate::domain::session::SessionId;
use crate::obs;
use crate::orchestrator::Orchestrator;
use crate::store::SessionStore;

/// Claim session `id` and run its full cycle on a detached task.
///
/// The claim is atomic: only an `initialized` session can be started, so a
/// second trigger fails with a conflict instead of running twice. The task
/// owns the context for the cycle's duration and writes the terminal state
/// back through [`SessionStore::update`].
///
/// A panic inside the task skips that write-back and leaves the session in
/// `processing` until TTL eviction.
pub fn start_analysis(
    orchestrator: Arc<Orchestrator>,
    store: Arc<SessionStore>,
    id: &SessionId,
) -> Result<JoinHandle<()>> {
    let mut context = store.claim_for_analysis(id)?;
    let span = obs::session_span(id.as_str());

    let handle = tokio::spawn(
        async move {
            info!("analysis started");
            match orchestrator.execute_full_cycle(&mut context).await {
                Ok(()) => info!("analysis completed"),
                Err(e) => error!(error = %e, "analysis failed"),
            }
            let id = context.id.clone();
            store.update(&id, context);
        }
        .instrument(span),
    );
    Ok(handle)
}
