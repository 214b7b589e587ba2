//! Validación de formularios de lugares y trámites.
//!
//! Cada validador devuelve un mapa campo → mensaje por cada regla violada;
//! un mapa vacío significa que el registro es válido. No hay efectos
//! secundarios: quien llama decide si continúa.

use std::collections::BTreeMap;

use url::Url;

use crate::constants::{
    barrios_para_provincia, BUENOS_AIRES, CABA, CATEGORIAS_TRAMITE, PROVINCIAS_ARGENTINAS,
    TIPOS_RECURSO,
};
use crate::models::{DatosLugar, DatosTramite};

/// Errores de validación, con claves camelCase iguales a las del cable.
pub type Errores = BTreeMap<&'static str, String>;

pub fn validar_lugar(datos: &DatosLugar) -> Errores {
    let mut errores = Errores::new();

    if datos.tipo_recurso.trim().is_empty() {
        errores.insert("tipoRecurso", "El tipo de recurso es obligatorio".into());
    } else if !TIPOS_RECURSO.contains(&datos.tipo_recurso.trim()) {
        errores.insert("tipoRecurso", "El tipo de recurso no es válido".into());
    }

    if datos.nombre_lugar.trim().is_empty() {
        errores.insert("nombreLugar", "El nombre del lugar es obligatorio".into());
    }

    if datos.direccion_lugar.trim().is_empty() {
        errores.insert("direccionLugar", "La dirección es obligatoria".into());
    }

    let provincia = datos.provincia.trim();
    if provincia.is_empty() {
        errores.insert("provincia", "La provincia es obligatoria".into());
    } else if !PROVINCIAS_ARGENTINAS.contains(&provincia) {
        errores.insert("provincia", "La provincia no es válida".into());
    }

    let disponibles = barrios_para_provincia(provincia);
    let barrio = datos.barrio.trim();
    if (provincia == CABA || provincia == BUENOS_AIRES) && !disponibles.is_empty() {
        if barrio.is_empty() {
            errores.insert(
                "barrio",
                "El barrio/partido es obligatorio para esta provincia".into(),
            );
        } else if !disponibles.contains(&barrio) {
            errores.insert(
                "barrio",
                "El barrio/partido no corresponde a la provincia seleccionada".into(),
            );
        }
    }

    if datos.horarios.trim().is_empty() {
        errores.insert("horarios", "Los horarios son obligatorios".into());
    }

    if !datos.google_maps_link.trim().is_empty() && url_invalida(&datos.google_maps_link) {
        errores.insert(
            "googleMapsLink",
            "El link de Google Maps no es una URL válida".into(),
        );
    }

    if !datos.mail.trim().is_empty() && !email_valido(&datos.mail) {
        errores.insert("mail", "El email no es válido".into());
    }

    if !datos.sitio_web.trim().is_empty() && url_invalida(&datos.sitio_web) {
        errores.insert("sitioWeb", "El sitio web no es una URL válida".into());
    }

    if datos.fuente.trim().is_empty() {
        errores.insert("fuente", "La fuente de información es obligatoria".into());
    }

    if datos.fecha_verificacion.is_none() {
        errores.insert(
            "fechaVerificacion",
            "La fecha de verificación es obligatoria".into(),
        );
    }

    if !datos.a_quien_ayuda.alguna_seleccionada() {
        errores.insert(
            "aQuienAyuda",
            "Debe seleccionar al menos una opción para \"A quién ayuda\"".into(),
        );
    }

    errores
}

pub fn validar_tramite(datos: &DatosTramite) -> Errores {
    let mut errores = Errores::new();

    if datos.titulo.trim().is_empty() {
        errores.insert("titulo", "El título es obligatorio".into());
    }

    if datos.descripcion.trim().is_empty() {
        errores.insert("descripcion", "La descripción es obligatoria".into());
    }

    let categoria = datos.categoria.trim();
    if categoria.is_empty() {
        errores.insert("categoria", "La categoría es obligatoria".into());
    } else if !CATEGORIAS_TRAMITE.contains(&categoria) {
        errores.insert("categoria", "La categoría no es válida".into());
    }

    if datos.fuente.trim().is_empty() {
        errores.insert("fuente", "La fuente es obligatoria".into());
    }

    if !datos.enlace.trim().is_empty() && url_invalida(&datos.enlace) {
        errores.insert("enlace", "El enlace no es una URL válida".into());
    }

    errores
}

/// Normaliza una URL ingresada a mano: a los dominios pelados se les antepone
/// `https://`. Sólo se aceptan esquemas http/https.
pub fn normalizar_url(valor: &str) -> Option<Url> {
    let valor = valor.trim();

    match Url::parse(valor) {
        Ok(url) => matches!(url.scheme(), "http" | "https").then_some(url),
        // Sin esquema ("example.com"): reintentar anteponiendo https
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = Url::parse(&format!("https://{valor}")).ok()?;
            url.host_str().is_some().then_some(url)
        }
        Err(_) => None,
    }
}

fn url_invalida(valor: &str) -> bool {
    normalizar_url(valor).is_none()
}

/// Forma permisiva de email, equivalente al patrón `\S+@\S+\.\S+` del
/// formulario original.
fn email_valido(valor: &str) -> bool {
    let valor = valor.trim();
    if valor.contains(char::is_whitespace) {
        return false;
    }

    match valor.split_once('@') {
        Some((local, dominio)) => {
            !local.is_empty()
                && dominio
                    .rsplit_once('.')
                    .is_some_and(|(antes, despues)| !antes.is_empty() && !despues.is_empty())
        }
        None => false,
    }
}
