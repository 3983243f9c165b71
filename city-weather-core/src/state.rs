//! Per-screen state holders.
//!
//! Each screen owns one watch cell with the latest [`ScreenState`]. The holder is the
//! only writer; any number of views can subscribe. Fetches are not serialized: if two
//! are in flight, whichever finishes last decides the final state.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    gateway::DataGateway,
    index::GroupedIndex,
    model::{CitySelection, Weather},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    Loading,
    Success(T),
    /// Carries the fixed user-facing message, never the underlying cause.
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ScreenState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// `None` while loading, otherwise the outcome.
    pub fn into_result(self) -> Option<Result<T, String>> {
        match self {
            ScreenState::Loading => None,
            ScreenState::Success(value) => Some(Ok(value)),
            ScreenState::Error(message) => Some(Err(message)),
        }
    }
}

/// Observable cell holding the current state of one screen.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<ScreenState<T>>,
}

impl<T> StateCell<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ScreenState::Loading);
        Self { tx }
    }

    fn set(&self, state: ScreenState<T>) {
        // send_replace stores the value even with no live receivers
        self.tx.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ScreenState<T>
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }
}

/// State holder for the alphabetical city list.
#[derive(Debug, Clone)]
pub struct CitiesScreen {
    gateway: DataGateway,
    error_message: Arc<str>,
    state: Arc<StateCell<GroupedIndex>>,
}

impl CitiesScreen {
    pub fn new(gateway: DataGateway, error_message: impl Into<String>) -> Self {
        Self {
            gateway,
            error_message: Arc::from(error_message.into()),
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<GroupedIndex>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ScreenState<GroupedIndex> {
        self.state.current()
    }

    /// Fetch the catalog and rebuild the index, resolving once the state is final.
    pub async fn refresh(&self) {
        self.state.set(ScreenState::Loading);
        self.complete().await;
    }

    /// Fire-and-forget variant of [`refresh`](Self::refresh).
    ///
    /// The cell is `Loading` by the time this returns.
    pub fn launch(&self) -> JoinHandle<()> {
        self.state.set(ScreenState::Loading);
        let this = self.clone();
        tokio::spawn(async move { this.complete().await })
    }

    async fn complete(&self) {
        let next = match self.gateway.get_cities().await {
            Ok(cities) => {
                let index = GroupedIndex::build(cities);
                tracing::debug!(
                    cities = index.len(),
                    groups = index.group_count(),
                    "city index rebuilt"
                );
                ScreenState::Success(index)
            }
            Err(_) => ScreenState::Error(self.error_message.to_string()),
        };

        self.state.set(next);
    }
}

/// State holder for the weather of one selected city.
#[derive(Debug, Clone)]
pub struct WeatherScreen {
    gateway: DataGateway,
    selection: CitySelection,
    error_message: Arc<str>,
    state: Arc<StateCell<Weather>>,
}

impl WeatherScreen {
    pub fn new(
        gateway: DataGateway,
        selection: CitySelection,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            selection,
            error_message: Arc::from(error_message.into()),
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn selection(&self) -> &CitySelection {
        &self.selection
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Weather>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ScreenState<Weather> {
        self.state.current()
    }

    pub async fn refresh(&self) {
        self.state.set(ScreenState::Loading);
        self.complete().await;
    }

    pub fn launch(&self) -> JoinHandle<()> {
        self.state.set(ScreenState::Loading);
        let this = self.clone();
        tokio::spawn(async move { this.complete().await })
    }

    async fn complete(&self) {
        let CitySelection {
            latitude,
            longitude,
            ..
        } = &self.selection;

        let next = match self.gateway.get_weather(latitude, longitude).await {
            Ok(weather) => ScreenState::Success(weather),
            Err(_) => ScreenState::Error(self.error_message.to_string()),
        };

        self.state.set(next);
    }
}
