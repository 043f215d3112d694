use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ChangeSource, LineCounter};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub change_source: Arc<dyn ChangeSource>,
    pub line_counter: Arc<dyn LineCounter>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        change_source: Arc<dyn ChangeSource>,
        line_counter: Arc<dyn LineCounter>,
    ) -> Self {
        Self {
            config,
            change_source,
            line_counter,
        }
    }
}
