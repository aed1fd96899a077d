//! Test utilities for routing providers.
//!
//! [`StubRoutingProvider`] replays scripted replies without making HTTP
//! requests, and records every request it receives.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::duration::TravelDuration;
use super::error::RoutingError;
use super::request::RouteRequest;
use super::response::{Route, RouteResponse};
use super::service::RoutingProvider;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// A successful response with one route per duration.
    Routes(Vec<TravelDuration>),
    /// A raw body run through the real decoder.
    Body(String),
    /// A non-success HTTP status with an unparseable body.
    HttpFailure { status: u16, body: String },
}

/// Stub `RoutingProvider` for testing.
///
/// Replies are consumed in order; once the script runs out, the last reply
/// repeats.
#[derive(Debug)]
pub struct StubRoutingProvider {
    script: RefCell<VecDeque<StubReply>>,
    fallback: StubReply,
    requests: RefCell<Vec<RouteRequest>>,
}

impl StubRoutingProvider {
    #[must_use]
    pub fn repeating(reply: StubReply) -> Self {
        Self::scripted(vec![reply])
    }

    /// An empty script behaves like an API answering `{}`.
    #[must_use]
    pub fn scripted(replies: Vec<StubReply>) -> Self {
        let fallback = replies
            .last()
            .cloned()
            .unwrap_or_else(|| StubReply::Body("{}".to_string()));
        Self {
            script: RefCell::new(replies.into()),
            fallback,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.borrow().clone()
    }
}

impl RoutingProvider for StubRoutingProvider {
    fn compute_routes(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        self.requests.borrow_mut().push(request.clone());
        let reply = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            StubReply::Routes(durations) => {
                let response = RouteResponse {
                    routes: durations.into_iter().map(Route::new).collect(),
                };
                let body = serde_json::to_string(&response).map_err(RoutingError::Encode)?;
                RouteResponse::decode(&body)
            }
            StubReply::Body(body) => RouteResponse::decode(&body),
            StubReply::HttpFailure { status, body } => {
                Err(RoutingError::RawApiError { status, body })
            }
        }
    }
}
