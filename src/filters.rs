//! Filtros de listado: construcción de predicados de igualdad sobre las
//! colecciones y orden por actualización para la vista de administración.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Valores comodín de los selectores ("Todos"/"Todas"): no agregan predicado.
fn es_comodin(valor: &str) -> bool {
    valor.is_empty() || valor == "Todos" || valor == "Todas"
}

/// Un predicado de igualdad `columna = valor` sobre la colección.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicado {
    pub columna: &'static str,
    pub valor: Valor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Valor {
    Texto(String),
    Logico(bool),
}

fn igual(columna: &'static str, valor: &str) -> Predicado {
    Predicado {
        columna,
        valor: Valor::Texto(valor.to_string()),
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiltrosLugares {
    pub tipo_recurso: Option<String>,
    pub provincia: Option<String>,
    pub barrio: Option<String>,
    pub include_inactive: bool,
}

impl FiltrosLugares {
    /// Predicados de igualdad resultantes del filtro disperso. Por defecto se
    /// exige `activo = true`; el filtro de barrio sólo aplica cuando también
    /// hay una provincia concreta seleccionada.
    pub fn predicados(&self) -> Vec<Predicado> {
        let mut predicados = Vec::new();

        if !self.include_inactive {
            predicados.push(Predicado {
                columna: "activo",
                valor: Valor::Logico(true),
            });
        }

        if let Some(tipo) = self.tipo_recurso.as_deref().filter(|v| !es_comodin(v)) {
            predicados.push(igual("tipo_recurso", tipo));
        }

        let provincia = self.provincia.as_deref().filter(|v| !es_comodin(v));
        if let Some(provincia) = provincia {
            predicados.push(igual("provincia", provincia));

            if let Some(barrio) = self.barrio.as_deref().filter(|v| !es_comodin(v)) {
                predicados.push(igual("barrio", barrio));
            }
        }

        predicados
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiltrosTramites {
    pub categoria: Option<String>,
    pub include_inactive: bool,
}

impl FiltrosTramites {
    pub fn predicados(&self) -> Vec<Predicado> {
        let mut predicados = Vec::new();

        if !self.include_inactive {
            predicados.push(Predicado {
                columna: "activo",
                valor: Valor::Logico(true),
            });
        }

        if let Some(categoria) = self.categoria.as_deref().filter(|v| !es_comodin(v)) {
            predicados.push(igual("categoria", categoria));
        }

        predicados
    }
}

/// Registro con campos de auditoría, para ordenar listados de administración.
pub trait Auditado {
    fn fecha_creacion(&self) -> Option<DateTime<Utc>>;
    fn fecha_actualizacion(&self) -> Option<DateTime<Utc>>;
}

impl Auditado for crate::models::Lugar {
    fn fecha_creacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_creacion
    }
    fn fecha_actualizacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_actualizacion
    }
}

impl Auditado for crate::models::Tramite {
    fn fecha_creacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_creacion
    }
    fn fecha_actualizacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_actualizacion
    }
}

/// Orden del listado de administración: última actualización descendente,
/// con la fecha de creación como respaldo y cero para registros sin fechas.
pub fn ordenar_por_actualizacion<T: Auditado>(registros: &mut [T]) {
    registros.sort_by_key(|r| {
        std::cmp::Reverse(
            r.fecha_actualizacion()
                .or_else(|| r.fecha_creacion())
                .map(|f| f.timestamp_millis())
                .unwrap_or(0),
        )
    });
}
