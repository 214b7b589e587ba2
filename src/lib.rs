//! # Mano Abiertas
//!
//! Directorio comunitario de recursos de ayuda: lugares que ofrecen comida,
//! alojamiento, ropa o acompañamiento en trámites, y fichas informativas de
//! trámites frecuentes. Expone listados públicos con filtros y un ABM de
//! administración con sesión, sobre un almacén SQLite.
//!
//! La lógica de dominio (validación de formularios, filtro en cascada
//! provincia → barrio, armado de predicados de igualdad y ciclo
//! activo/inactivo) vive en `validate`, `constants`, `filters` y `db`; las
//! rutas HTTP son una capa fina sobre eso.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod validate;

use routes::{
    activar_lugar, activar_tramite, actualizar_lugar, actualizar_tramite, crear_lugar,
    crear_tramite, desactivar_lugar, desactivar_tramite, eliminar_lugar, listar_lugares,
    listar_tramites, login, logout, obtener_lugar, obtener_tramite, session,
};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/lugares", get(listar_lugares).post(crear_lugar))
        .route(
            "/lugares/:id",
            get(obtener_lugar)
                .put(actualizar_lugar)
                .delete(eliminar_lugar),
        )
        .route("/lugares/:id/desactivar", post(desactivar_lugar))
        .route("/lugares/:id/activar", post(activar_lugar))
        .route("/tramites", get(listar_tramites).post(crear_tramite))
        .route("/tramites/:id", get(obtener_tramite).put(actualizar_tramite))
        .route("/tramites/:id/desactivar", post(desactivar_tramite))
        .route("/tramites/:id/activar", post(activar_tramite))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
