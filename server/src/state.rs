//! Application state

use std::{ops::Deref, sync::Arc};

use crate::{config::AppConfig, service::SteamappService, source::SteamappSource};

/// App state stored in the Axum router
#[derive(Clone)]
pub struct AppState(Arc<AppStateInner>);

pub struct AppStateInner {
    pub config: AppConfig,
    pub service: SteamappService,
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(config: AppConfig, source: impl SteamappSource + 'static) -> Self {
        let service = SteamappService::new(&config, Box::new(source));
        Self(Arc::new(AppStateInner { config, service }))
    }
}
