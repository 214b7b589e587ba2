//! Handlers HTTP: listados públicos, ABM de administración y sesión.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::db::{LugarRepository, TramiteRepository};
use crate::error::AppError;
use crate::filters::{ordenar_por_actualizacion, FiltrosLugares, FiltrosTramites};
use crate::models::{DatosLugar, DatosTramite, Lugar, Tramite};
use crate::session::{Sesion, Usuario};
use crate::state::State as AppState;
use crate::validate::{validar_lugar, validar_tramite};

/// Token de sesión en `Authorization: Bearer <token>`.
fn requiere_sesion(state: &AppState, headers: &HeaderMap) -> Result<Usuario, AppError> {
    let token = token_de(headers).ok_or(AppError::NoAutorizado)?;
    state
        .sesiones
        .usuario_por_token(token)
        .ok_or(AppError::NoAutorizado)
}

fn token_de(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .and_then(|valor| valor.strip_prefix("Bearer "))
}

// ---- lugares ----

pub async fn listar_lugares(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filtros): Query<FiltrosLugares>,
) -> Result<Json<Vec<Lugar>>, AppError> {
    // Los registros inactivos sólo se muestran en la vista de administración
    if filtros.include_inactive {
        requiere_sesion(&state, &headers)?;
    }

    let conn = state.db.lock().await;
    let mut lugares = LugarRepository::new(&conn).buscar(&filtros)?;
    drop(conn);

    if filtros.include_inactive {
        ordenar_por_actualizacion(&mut lugares);
    }

    Ok(Json(lugares))
}

pub async fn obtener_lugar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Lugar>, AppError> {
    let conn = state.db.lock().await;
    let lugar = LugarRepository::new(&conn)
        .obtener(&id)?
        .ok_or(AppError::NoEncontrado)?;
    Ok(Json(lugar))
}

pub async fn crear_lugar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(datos): Json<DatosLugar>,
) -> Result<impl IntoResponse, AppError> {
    requiere_sesion(&state, &headers)?;

    let errores = validar_lugar(&datos);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let conn = state.db.lock().await;
    let lugar = LugarRepository::new(&conn).crear(&datos)?;
    info!("Lugar creado: {} ({})", lugar.datos.nombre_lugar, lugar.id);

    Ok((StatusCode::CREATED, Json(lugar)))
}

pub async fn actualizar_lugar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(datos): Json<DatosLugar>,
) -> Result<Json<Lugar>, AppError> {
    requiere_sesion(&state, &headers)?;

    let errores = validar_lugar(&datos);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let conn = state.db.lock().await;
    let lugar = LugarRepository::new(&conn)
        .actualizar(&id, &datos)?
        .ok_or(AppError::NoEncontrado)?;

    Ok(Json(lugar))
}

pub async fn desactivar_lugar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    requiere_sesion(&state, &headers)?;

    let conn = state.db.lock().await;
    if !LugarRepository::new(&conn).desactivar(&id)? {
        return Err(AppError::NoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn activar_lugar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    requiere_sesion(&state, &headers)?;

    let conn = state.db.lock().await;
    if !LugarRepository::new(&conn).activar(&id)? {
        return Err(AppError::NoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Baja física, sólo para lugares. La baja normal es la desactivación.
pub async fn eliminar_lugar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    requiere_sesion(&state, &headers)?;

    let conn = state.db.lock().await;
    if !LugarRepository::new(&conn).eliminar(&id)? {
        return Err(AppError::NoEncontrado);
    }
    info!("Lugar eliminado físicamente: {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ---- trámites ----

pub async fn listar_tramites(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filtros): Query<FiltrosTramites>,
) -> Result<Json<Vec<Tramite>>, AppError> {
    if filtros.include_inactive {
        requiere_sesion(&state, &headers)?;
    }

    let conn = state.db.lock().await;
    let mut tramites = TramiteRepository::new(&conn).buscar(&filtros)?;
    drop(conn);

    if filtros.include_inactive {
        ordenar_por_actualizacion(&mut tramites);
    }

    Ok(Json(tramites))
}

pub async fn obtener_tramite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Tramite>, AppError> {
    let conn = state.db.lock().await;
    let tramite = TramiteRepository::new(&conn)
        .obtener(&id)?
        .ok_or(AppError::NoEncontrado)?;
    Ok(Json(tramite))
}

pub async fn crear_tramite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(datos): Json<DatosTramite>,
) -> Result<impl IntoResponse, AppError> {
    requiere_sesion(&state, &headers)?;

    let errores = validar_tramite(&datos);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let conn = state.db.lock().await;
    let tramite = TramiteRepository::new(&conn).crear(&datos)?;
    info!("Trámite creado: {} ({})", tramite.datos.titulo, tramite.id);

    Ok((StatusCode::CREATED, Json(tramite)))
}

pub async fn actualizar_tramite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(datos): Json<DatosTramite>,
) -> Result<Json<Tramite>, AppError> {
    requiere_sesion(&state, &headers)?;

    let errores = validar_tramite(&datos);
    if !errores.is_empty() {
        return Err(AppError::Validacion(errores));
    }

    let conn = state.db.lock().await;
    let tramite = TramiteRepository::new(&conn)
        .actualizar(&id, &datos)?
        .ok_or(AppError::NoEncontrado)?;

    Ok(Json(tramite))
}

pub async fn desactivar_tramite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    requiere_sesion(&state, &headers)?;

    let conn = state.db.lock().await;
    if !TramiteRepository::new(&conn).desactivar(&id)? {
        return Err(AppError::NoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn activar_tramite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    requiere_sesion(&state, &headers)?;

    let conn = state.db.lock().await;
    if !TramiteRepository::new(&conn).activar(&id)? {
        return Err(AppError::NoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- sesión ----

#[derive(Deserialize)]
pub struct Credenciales {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credenciales): Json<Credenciales>,
) -> Result<Json<Sesion>, AppError> {
    let sesion = state
        .sesiones
        .iniciar_sesion(&credenciales.email, &credenciales.password)?;
    info!("Sesión iniciada: {}", sesion.email);
    Ok(Json(sesion))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> StatusCode {
    if let Some(token) = token_de(&headers) {
        state.sesiones.cerrar_sesion(token);
    }
    StatusCode::NO_CONTENT
}

pub async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Option<Usuario>> {
    let usuario = token_de(&headers).and_then(|token| state.sesiones.usuario_por_token(token));
    Json(usuario)
}
