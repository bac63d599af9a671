use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fetch_retry::{Backoff, Error, Result, Transport};
use reqwest::header::RETRY_AFTER;
use reqwest::{Method, Request, Response, Url};

/// What the scripted transport does for one attempt.
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this status.
    Status(u16),
    /// Answer with this status and a `Retry-After` of the given seconds.
    RetryAfter(u16, u64),
    /// Fail without a response.
    Fail(&'static str),
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub url: Url,
    pub body: Vec<u8>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<Step>,
    last: Option<Step>,
    seen: Vec<SeenRequest>,
}

/// In-memory [`Transport`] playing a fixed script of outcomes; the last step
/// repeats once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport(Arc<Mutex<Script>>);

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self(Arc::new(Mutex::new(Script {
            steps: steps.into_iter().collect(),
            ..Script::default()
        })))
    }

    pub fn calls(&self) -> usize {
        self.0.lock().unwrap().seen.len()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.0.lock().unwrap().seen.clone()
    }

    fn record(&self, req: &Request) -> Step {
        let mut script = self.0.lock().unwrap();
        script.seen.push(SeenRequest {
            method: req.method().clone(),
            url: req.url().clone(),
            body: req
                .body()
                .and_then(|body| body.as_bytes())
                .map(<[u8]>::to_vec)
                .unwrap_or_default(),
            timeout: req.timeout().copied(),
        });
        if let Some(step) = script.steps.pop_front() {
            script.last = Some(step);
        }
        script.last.clone().expect("empty script")
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, req: Request) -> Result<Response> {
        match self.record(&req) {
            Step::Status(code) => Ok(http::Response::builder()
                .status(code)
                .body(format!("status {code}"))
                .unwrap()
                .into()),
            Step::RetryAfter(code, seconds) => Ok(http::Response::builder()
                .status(code)
                .header(RETRY_AFTER, seconds.to_string())
                .body(String::new())
                .unwrap()
                .into()),
            Step::Fail(message) => Err(Error::transport(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                message,
            ))),
        }
    }
}

/// Wraps a [`Backoff`] and remembers every delay it hands out; the engine
/// sleeps exactly once per recorded delay.
#[derive(Debug, Clone, Default)]
pub struct Recorded<B> {
    inner: B,
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl<B: Backoff> Recorded<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            delays: Arc::default(),
        }
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl<B: Backoff> Backoff for Recorded<B> {
    fn delay(
        &self,
        min: Duration,
        max: Duration,
        attempt: u32,
        last_response: Option<&Response>,
    ) -> Duration {
        let delay = self.inner.delay(min, max, attempt, last_response);
        self.delays.lock().unwrap().push(delay);
        delay
    }
}
