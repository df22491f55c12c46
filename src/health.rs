//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the database be reached? Failure → pulled from load-balancer. |

use std::sync::Arc;

use tracing::warn;

use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::CatalogStore;

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// Readiness probe: `200 "ready"` when the store answers a ping, otherwise
/// `503`.
pub async fn readiness<S: CatalogStore>(_req: Request, store: Arc<S>) -> Response {
    match store.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            Response::builder()
                .status(Status::ServiceUnavailable)
                .text("unavailable")
        }
    }
}
