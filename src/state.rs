//! View state holders
//!
//! A screen keeps a [`DataHandle`] per collection it shows. The handle
//! tracks `{data, loading, error}` and refetches after every successful
//! write, so the screen always renders what the store holds.

use crate::error::HoaResult;
use crate::models::{CommunicationConfig, CommunicationPatch};
use crate::services::{ConfigService, Facade};

/// Snapshot of a collection as a screen sees it
#[derive(Debug, Clone, PartialEq)]
pub struct DataState<T> {
    /// `None` until the first successful load
    pub data: Option<T>,
    pub loading: bool,
    /// Message of the last failure, cleared by the next success
    pub error: Option<String>,
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Loading/error bookkeeping around a [`Facade`]
pub struct DataHandle<F: Facade> {
    facade: F,
    state: DataState<Vec<F::Record>>,
}

impl<F: Facade> DataHandle<F> {
    /// Wrap `facade` and load it once
    pub fn new(facade: F) -> Self {
        let mut handle = Self {
            facade,
            state: DataState::default(),
        };
        handle.refetch();
        handle
    }

    pub fn state(&self) -> &DataState<Vec<F::Record>> {
        &self.state
    }

    /// Loaded records, empty before the first successful load
    pub fn data(&self) -> &[F::Record] {
        self.state.data.as_deref().unwrap_or(&[])
    }

    pub fn facade(&self) -> &F {
        &self.facade
    }

    /// Reload from the facade; a failure is kept in state, not returned
    pub fn refetch(&mut self) {
        self.state.loading = true;
        match self.facade.get_all() {
            Ok(records) => {
                self.state.data = Some(records);
                self.state.error = None;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
        self.state.loading = false;
    }

    pub fn create(&mut self, draft: F::Draft) -> HoaResult<F::Record> {
        let result = self.facade.create(draft);
        self.settle(result)
    }

    pub fn update(&mut self, id: &str, patch: &F::Patch) -> HoaResult<F::Record> {
        let result = self.facade.update(id, patch);
        self.settle(result)
    }

    pub fn delete(&mut self, id: &str) -> HoaResult<bool> {
        let result = self.facade.delete(id);
        self.settle(result)
    }

    /// Refetch after a successful write; record and return a failure
    fn settle<T>(&mut self, result: HoaResult<T>) -> HoaResult<T> {
        match result {
            Ok(value) => {
                self.refetch();
                Ok(value)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

/// The same bookkeeping for the communication settings
pub struct ConfigHandle<'a> {
    service: ConfigService<'a>,
    state: DataState<CommunicationConfig>,
}

impl<'a> ConfigHandle<'a> {
    pub fn new(service: ConfigService<'a>) -> Self {
        let mut handle = Self {
            service,
            state: DataState::default(),
        };
        handle.refetch();
        handle
    }

    pub fn state(&self) -> &DataState<CommunicationConfig> {
        &self.state
    }

    pub fn refetch(&mut self) {
        self.state.loading = true;
        match self.service.communication() {
            Ok(config) => {
                self.state.data = Some(config);
                self.state.error = None;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
        self.state.loading = false;
    }

    pub fn update(&mut self, patch: &CommunicationPatch) -> HoaResult<CommunicationConfig> {
        match self.service.update_communication(patch) {
            Ok(config) => {
                self.state.data = Some(config.clone());
                self.state.error = None;
                Ok(config)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
