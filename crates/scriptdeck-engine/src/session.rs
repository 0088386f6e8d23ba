//! The serialized interpreter session
//!
//! One session owns one execution context for the process lifetime. All
//! requests — definition loads, invocations, shutdown — travel over a
//! single queue to one dedicated worker thread that holds the host
//! exclusively, so no two operations ever run against the context at
//! the same time. Callers await a completion instead of blocking their
//! own thread.
//!
//! A failed load or invocation is fatal to that request only; the
//! session stays usable until `close()`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::host::CommandHost;
use crate::request::InvocationRequest;
use scriptdeck_core::errors::{Result, SessionError};
use scriptdeck_core::record::RawOutput;
use scriptdeck_core_types::RequestId;

enum SessionMsg {
    Load {
        request_id: RequestId,
        source: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Invoke {
        request_id: RequestId,
        request: InvocationRequest,
        reply: oneshot::Sender<Result<RawOutput>>,
    },
    Shutdown,
}

/// Handle to the single execution context.
///
/// Cloneable; all clones share the same serialized lane and the same
/// closed state.
#[derive(Clone)]
pub struct Session {
    tx: mpsc::UnboundedSender<SessionMsg>,
    closed: Arc<AtomicBool>,
}

impl Session {
    /// Allocate the session around an already-started host.
    ///
    /// Host constructors report their own `SessionOpenFailure`; this
    /// only fails when the worker thread cannot be spawned.
    ///
    /// # Errors
    ///
    /// `SessionOpenFailure` when the execution lane cannot be started.
    pub fn open(host: Box<dyn CommandHost>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("scriptdeck-session".to_string())
            .spawn(move || worker(host, rx))
            .map_err(|e| SessionError::SessionOpenFailure {
                message: format!("session worker thread could not be spawned: {}", e),
            })?;

        tracing::info!("session opened");
        Ok(Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Parse and register all function definitions in `source_text`.
    ///
    /// Re-callable: a later call re-registers definitions. Waits in line
    /// behind any in-flight request.
    ///
    /// # Errors
    ///
    /// `LoadError` with the host's diagnostics, or `SessionClosed`.
    pub async fn load_definitions(&self, source_text: impl Into<String>) -> Result<()> {
        if self.is_closed() {
            return Err(SessionError::SessionClosed);
        }
        let (reply, rx) = oneshot::channel();
        let msg = SessionMsg::Load {
            request_id: RequestId::new(),
            source: source_text.into(),
            reply,
        };
        self.tx.send(msg).map_err(|_| SessionError::SessionClosed)?;
        rx.await.map_err(|_| SessionError::SessionClosed)?
    }

    /// Invoke a registered function with named parameters.
    ///
    /// Suspends until this specific invocation completes; invocations
    /// submitted concurrently execute one at a time, in queue order.
    ///
    /// # Errors
    ///
    /// `InvocationError` with the host's diagnostics (no partial output),
    /// or `SessionClosed`.
    pub async fn invoke(&self, request: InvocationRequest) -> Result<RawOutput> {
        if self.is_closed() {
            return Err(SessionError::SessionClosed);
        }
        let (reply, rx) = oneshot::channel();
        let msg = SessionMsg::Invoke {
            request_id: RequestId::new(),
            request,
            reply,
        };
        self.tx.send(msg).map_err(|_| SessionError::SessionClosed)?;
        rx.await.map_err(|_| SessionError::SessionClosed)?
    }

    /// Release the execution context.
    ///
    /// Idempotent. The shutdown queues behind any in-flight request, so
    /// a running invocation finishes first; callers should still drain
    /// their own outstanding awaits before closing.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            // Worker may already be gone; nothing to do then.
            let _ = self.tx.send(SessionMsg::Shutdown);
            tracing::info!("session closed");
        }
    }

    /// Whether `close()` has been called on any clone of this handle.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Last handle out releases the context.
        if Arc::strong_count(&self.closed) == 1 {
            self.close();
        }
    }
}

/// Worker loop: the only code that ever touches the host.
fn worker(mut host: Box<dyn CommandHost>, mut rx: mpsc::UnboundedReceiver<SessionMsg>) {
    while let Some(msg) = rx.blocking_recv() {
        match msg {
            SessionMsg::Load {
                request_id,
                source,
                reply,
            } => {
                tracing::info!(%request_id, bytes = source.len(), "loading definitions");
                let result = host
                    .load_definitions(&source)
                    .map_err(|diags| SessionError::load(&diags));
                if let Err(e) = &result {
                    tracing::error!(%request_id, error = %e, "definition load failed");
                }
                let _ = reply.send(result);
            }
            SessionMsg::Invoke {
                request_id,
                request,
                reply,
            } => {
                let function = request.function_name().to_string();
                tracing::info!(%request_id, %function, "invoking function");
                let result = host
                    .invoke(&function, request.parameters())
                    .map(RawOutput::from_records)
                    .map_err(|diags| SessionError::invocation(&function, &diags));
                match &result {
                    Ok(raw) => {
                        tracing::info!(%request_id, records = raw.len(), "invocation completed")
                    }
                    Err(e) => tracing::error!(%request_id, error = %e, "invocation failed"),
                }
                let _ = reply.send(result);
            }
            SessionMsg::Shutdown => break,
        }
    }
    host.shutdown();
}
