//! HTTP server core implementation

use crate::clients::{RedisCache, SeaOrmPool};
use crate::config::{Config, ServerConfig};
use crate::health::probes::{
    CacheProbe, DatabaseProbe, FilesystemProbe, HttpEndpointProbe, MemoryProbe, Probe,
    SysinfoSampler,
};
use crate::health::{Orchestrator, Scheduler};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{HealthError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
    /// Background check-cycle scheduler
    scheduler: Arc<Scheduler>,
}

impl HttpServer {
    /// Create a new HTTP server, wiring probes from the configuration
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let orchestrator = Arc::new(Orchestrator::new(build_probes(config).await?));
        let scheduler = Arc::new(Scheduler::new(
            orchestrator.clone(),
            Duration::from_secs(config.scheduler.interval_secs),
        ));
        let state = AppState::new(config.clone(), orchestrator);

        Ok(Self {
            config: config.server.clone(),
            state,
            scheduler,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "Pulsecheck")))
            .configure(routes::health::configure_routes)
    }

    /// Start the scheduler and the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        if self.state.config.scheduler.enabled {
            self.scheduler.start();
        } else {
            debug!("Background scheduler disabled by configuration");
        }

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let scheduler = self.scheduler;

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| {
                HealthError::Internal(format!("Failed to bind to {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let outcome = server
            .await
            .map_err(|e| HealthError::Internal(format!("Server error: {}", e)));

        scheduler.stop();
        info!("HTTP server stopped");
        outcome
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Build the enabled probes in snapshot order
///
/// Disabled sections are skipped entirely; they are never run and never
/// reported.
pub async fn build_probes(config: &Config) -> Result<Vec<Arc<dyn Probe>>> {
    let mut probes: Vec<Arc<dyn Probe>> = Vec::new();

    if config.database.enabled {
        let pool = SeaOrmPool::connect(&config.database).await?;
        probes.push(Arc::new(DatabaseProbe::new(
            Arc::new(pool),
            &config.database,
        )));
    } else {
        debug!("Database probe disabled, skipping");
    }

    if config.cache.enabled {
        let client = RedisCache::new(&config.cache)?;
        probes.push(Arc::new(CacheProbe::new(Arc::new(client), &config.cache)));
    } else {
        debug!("Cache probe disabled, skipping");
    }

    if !config.external_apis.is_empty() {
        // one shared client; each probe applies its own per-request timeout
        let client = reqwest::Client::new();
        for api in &config.external_apis {
            probes.push(Arc::new(HttpEndpointProbe::new(client.clone(), api)));
        }
    }

    if config.filesystem.enabled {
        probes.push(Arc::new(FilesystemProbe::new(&config.filesystem)));
    } else {
        debug!("Filesystem probe disabled, skipping");
    }

    if config.memory.enabled {
        probes.push(Arc::new(MemoryProbe::new(
            Arc::new(SysinfoSampler),
            &config.memory,
        )));
    } else {
        debug!("Memory probe disabled, skipping");
    }

    info!("Registered {} probes", probes.len());
    Ok(probes)
}
