use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::session::AuthError;
use crate::validate::Errores;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Registro no encontrado")]
    NoEncontrado,

    #[error("Datos inválidos")]
    Validacion(Errores),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Sesión requerida")]
    NoAutorizado,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // todo error responde JSON: `errores` para la validación de campos,
        // `mensaje` para el resto
        let (status, mensaje) = match self {
            AppError::Validacion(errores) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "errores": errores })),
                )
                    .into_response()
            }
            AppError::NoEncontrado => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Auth(e) => {
                let status = match e {
                    AuthError::DemasiadosIntentos => StatusCode::TOO_MANY_REQUESTS,
                    _ => StatusCode::UNAUTHORIZED,
                };
                (status, e.to_string())
            }
            AppError::NoAutorizado => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Db(e) => {
                // El detalle queda en el log, nunca en la respuesta
                error!("Error de base de datos: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error interno".to_string())
            }
        };

        (status, Json(json!({ "mensaje": mensaje }))).into_response()
    }
}
