use std::sync::Arc;

use crate::{authorization::Authorizer, config::Config, platform::Platform, views::Renderer};

/// Collaborators shared by the admin routes, injected once at startup.
pub struct AdminManager {
    pub platform: Arc<dyn Platform>,
    pub authorizer: Arc<dyn Authorizer>,
    pub renderer: Arc<dyn Renderer>,
    pub config: Config,
}

impl AdminManager {
    pub fn new(
        platform: Arc<dyn Platform>,
        authorizer: Arc<dyn Authorizer>,
        renderer: Arc<dyn Renderer>,
        config: Config,
    ) -> Self {
        Self {
            platform,
            authorizer,
            renderer,
            config,
        }
    }
}
