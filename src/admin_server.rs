use core::fmt;
use std::{net::SocketAddr, sync::Arc};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Extension, Router,
};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    admin_manager::AdminManager,
    authorization::{Authorizer, PlatformAuthorizer},
    config::Config,
    error::{AdminServerBuildError, Error},
    platform::Platform,
    routes::{
        admin::{assign_user_route, new_users_route},
        ASSIGN_USER_PATH, NEW_USERS_PATH,
    },
    views::{HtmlRenderer, Renderer},
};

pub const PUBLIC_PATH: &str = "/new_users";

#[derive(Default)]
pub struct Signals {
    stop_notify: Notify,
}

impl Signals {
    /// Stores a permit, so a stop issued before the server task starts waiting is not lost.
    pub fn stop(&self) {
        self.stop_notify.notify_one();
    }

    pub async fn stopped(&self) {
        self.stop_notify.notified().await;
    }
}

#[derive(Debug)]
pub enum RequiredProperties {
    Platform,
}

impl fmt::Display for RequiredProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Platform => "Platform",
            }
        )
    }
}

/// Both admin routes, the optional public asset directory and the shared layers.
pub fn router(admin_manager: Arc<AdminManager>) -> Result<Router, Error> {
    let allowed_origins = admin_manager.config.get_allowed_origins()?;
    let mut app = Router::new()
        .route(NEW_USERS_PATH, get(new_users_route))
        .route(ASSIGN_USER_PATH, post(assign_user_route));
    if let Some(public_directory) = admin_manager.config.get_public_directory() {
        app = app.nest_service(PUBLIC_PATH, ServeDir::new(public_directory));
    }
    app = app
        .layer(TraceLayer::new_for_http())
        .layer(Extension(admin_manager));
    if !allowed_origins.is_empty() {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(vec![CONTENT_TYPE])
            .allow_origin(AllowOrigin::list(allowed_origins))
            .allow_credentials(true);
        app = app.layer(cors);
    }
    Ok(app)
}

async fn start_server(admin_server: Arc<AdminServer>, listener: TcpListener, app: Router) {
    info!("Admin endpoint listening on {}", admin_server.local_addr);

    tokio::select! {
        result = async { axum::serve(listener, app).await } => {
            if let Err(err) = result {
                error!("{}", err);
            }
        }
        _ = admin_server.signals.stopped() => {
            info!("Admin endpoint stopped");
        },
    }
}

#[derive(Default)]
pub struct Builder {
    //required
    platform: Option<Arc<dyn Platform>>,

    //optional
    authorizer: Option<Arc<dyn Authorizer>>,
    renderer: Option<Arc<dyn Renderer>>,
    config: Option<Config>,
}

impl Builder {
    pub fn platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Wires the collaborators together without binding a socket.
    pub fn build_manager(self) -> Result<(AdminManager, Signals), Error> {
        let platform = match self.platform {
            Some(platform) => platform,
            None => {
                return Err(AdminServerBuildError::MissingProperties(format!(
                    "{:?}",
                    vec![RequiredProperties::Platform]
                ))
                .into())
            }
        };
        let authorizer: Arc<dyn Authorizer> = match self.authorizer {
            Some(authorizer) => authorizer,
            None => Arc::new(PlatformAuthorizer::new(platform.to_owned())),
        };
        let renderer: Arc<dyn Renderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(HtmlRenderer),
        };
        let admin_manager = AdminManager::new(
            platform,
            authorizer,
            renderer,
            self.config.unwrap_or_default(),
        );
        Ok((admin_manager, Signals::default()))
    }

    pub async fn start_server(self) -> Result<Arc<AdminServer>, Error> {
        let (admin_manager, signals) = self.build_manager()?;
        let admin_manager = Arc::new(admin_manager);
        let app = router(admin_manager.to_owned())?;
        let addr = admin_manager.config.get_socket_addr()?;
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(err) => return Err(AdminServerBuildError::Bind(err).into()),
        };
        let local_addr = match listener.local_addr() {
            Ok(local_addr) => local_addr,
            Err(err) => return Err(AdminServerBuildError::Bind(err).into()),
        };

        let admin_server: Arc<AdminServer> = Arc::new(AdminServer {
            admin_manager,
            signals,
            local_addr,
        });

        let admin_server_ = admin_server.to_owned();
        tokio::spawn(async move { start_server(admin_server_, listener, app).await });

        Ok(admin_server)
    }
}

pub struct AdminServer {
    pub admin_manager: Arc<AdminManager>,
    pub signals: Signals,
    pub local_addr: SocketAddr,
}

impl AdminServer {
    pub fn builder() -> Builder {
        Builder::default()
    }
}
