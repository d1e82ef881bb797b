//! Interceptor stages around the transport.
//!
//! ARCHITECTURE
//! ============
//! A send walks two ordered stage lists. Outbound stages rewrite the
//! request before it leaves (bearer injection). Inbound stages inspect or
//! replace the outcome after it lands (logging, refresh-and-retry, error
//! reporting). Inbound stages run in list order and each receives the
//! outcome produced by the previous one, so a retry performed by an early
//! stage is what later stages observe.

use futures::future::LocalBoxFuture;

use crate::net::error::Error;
use crate::net::request::{PendingRequest, Response};

/// The result of a send, paired with the request that produced it so an
/// inbound stage can reissue the request unchanged.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub request: PendingRequest,
    pub result: Result<Response, Error>,
}

/// Runs before the transport. May rewrite the outgoing request.
pub trait OutboundStage {
    fn apply(&self, request: &mut PendingRequest);
}

/// Runs after the transport. May pass the outcome through or replace it,
/// including by performing follow-up requests of its own.
pub trait InboundStage {
    fn process(&self, outcome: Outcome) -> LocalBoxFuture<'static, Outcome>;
}
