//! Test doubles shared by the use case tests.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use arena_domain::{ConverseRequest, ProviderKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Gateway that records every call and answers from a script.
///
/// Scripted responses are consumed in order; once exhausted, calls succeed
/// with `"reply {n}"`.
pub(crate) struct MockGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Mutex<Vec<(ProviderKind, ConverseRequest, tokio::time::Instant)>>,
    gate: Option<Notify>,
    released: AtomicBool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
            released: AtomicBool::new(false),
        }
    }

    pub fn with_responses(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::new()
        }
    }

    /// Hold every call until [`MockGateway::release`] is invoked
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new()
        }
    }

    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notify_waiters();
        }
    }

    pub fn calls(&self) -> Vec<(ProviderKind, ConverseRequest)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(provider, request, _)| (*provider, request.clone()))
            .collect()
    }

    pub fn call_times(&self) -> Vec<tokio::time::Instant> {
        self.calls.lock().unwrap().iter().map(|(_, _, at)| *at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn converse(
        &self,
        provider: ProviderKind,
        request: &ConverseRequest,
    ) -> Result<String, GatewayError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((provider, request.clone(), tokio::time::Instant::now()));
            calls.len()
        };

        if let Some(gate) = &self.gate {
            let notified = gate.notified();
            if !self.released.load(Ordering::SeqCst) {
                notified.await;
            }
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("reply {}", n)))
    }

    fn model_name(&self, provider: ProviderKind) -> Option<String> {
        Some(format!("mock-{}", provider))
    }
}
