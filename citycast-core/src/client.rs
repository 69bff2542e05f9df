//! The user-facing lookup flow: validate, fetch once, update the view.
//!
//! Several submits may be in flight at once. They are neither queued nor
//! deduplicated nor cancelled, and each writes the view when it resolves, so
//! the view shows whichever request finished last, not whichever was issued
//! last.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    FetchError, Query, Settings, WeatherReading,
    provider::{WeatherProvider, provider_from_settings},
};

/// The two display regions. At most one is populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    reading: Option<WeatherReading>,
    error: Option<String>,
}

impl View {
    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        self.reading.is_none() && self.error.is_none()
    }

    pub fn show_reading(&mut self, reading: WeatherReading) {
        self.error = None;
        self.reading = Some(reading);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.reading = None;
        self.error = Some(message.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Idle,
    Pending,
}

#[derive(Debug)]
struct Inner {
    provider: Box<dyn WeatherProvider>,
    view: Mutex<View>,
    in_flight: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    inner: Arc<Inner>,
}

impl WeatherClient {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                view: Mutex::new(View::default()),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(provider_from_settings(settings))
    }

    /// Validate `input` and make exactly one provider call. Leaves the view alone.
    pub async fn fetch_weather(&self, input: &str) -> Result<WeatherReading, FetchError> {
        let query = Query::parse(input)?;
        self.inner.provider.current_weather(&query).await
    }

    /// Handle one user action: fetch, then show the reading or the error.
    pub async fn submit(&self, input: &str) -> Result<WeatherReading, FetchError> {
        let _pending = PendingGuard::enter(&self.inner.in_flight);

        let outcome = self.fetch_weather(input).await;

        let mut view = self.inner.view.lock();
        match &outcome {
            Ok(reading) => view.show_reading(reading.clone()),
            Err(err) => view.show_error(err.to_string()),
        }

        outcome
    }

    pub fn view(&self) -> View {
        self.inner.view.lock().clone()
    }

    pub fn state(&self) -> ClientState {
        if self.inner.in_flight.load(Ordering::SeqCst) > 0 {
            ClientState::Pending
        } else {
            ClientState::Idle
        }
    }
}

/// Counts a submit as in flight until dropped, including when its future is dropped.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
