use std::sync::Arc;

use services::{Clock, QuizStore};

pub trait UiApp: Send + Sync {
    fn quiz_store(&self) -> Arc<QuizStore>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_store: Arc<QuizStore>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_store: app.quiz_store(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn quiz_store(&self) -> Arc<QuizStore> {
        Arc::clone(&self.quiz_store)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
