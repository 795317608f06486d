use crate::models::StateDocument;
use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};
use tokio::sync::Mutex;

pub type MidnightCallback = Arc<dyn Fn(&StateDocument) + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<StateDocument>>,
    callbacks: Arc<RwLock<Vec<MidnightCallback>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: StateDocument) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            callbacks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Hooks run after each live rollover, with the document still locked.
    pub fn register_midnight_callback<F>(&self, callback: F)
    where
        F: Fn(&StateDocument) + Send + Sync + 'static,
    {
        let mut callbacks = self
            .callbacks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        callbacks.push(Arc::new(callback));
    }

    pub fn midnight_callbacks(&self) -> Vec<MidnightCallback> {
        self.callbacks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
