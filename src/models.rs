//! Entidades del directorio: lugares de ayuda y trámites informativos.
//!
//! Los nombres de campo en el cable son camelCase, el mismo formato de los
//! documentos originales de la colección (`tipoRecurso`, `fechaCreacion`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::A_QUIEN_AYUDA_OPCIONES;

/// Registro de forma fija sobre el conjunto conocido de opciones.
/// `todos` es mutuamente excluyente con el resto: marcar uno limpia el otro.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AQuienAyuda {
    pub todos: bool,
    pub hombres: bool,
    pub mujeres: bool,
    pub menores18: bool,
    pub entre18y45: bool,
    pub entre45y65: bool,
    pub mayores65: bool,
}

impl AQuienAyuda {
    pub fn alguna_seleccionada(&self) -> bool {
        self.todos
            || self.hombres
            || self.mujeres
            || self.menores18
            || self.entre18y45
            || self.entre45y65
            || self.mayores65
    }

    /// Marca o desmarca una opción por su identificador, aplicando la
    /// exclusión mutua entre `todos` y las demás. Identificadores fuera de
    /// [`A_QUIEN_AYUDA_OPCIONES`] se rechazan.
    pub fn marcar(&mut self, opcion: &str, valor: bool) -> Result<(), OpcionDesconocida> {
        if !A_QUIEN_AYUDA_OPCIONES.contains(&opcion) {
            return Err(OpcionDesconocida(opcion.to_string()));
        }

        match opcion {
            "todos" => {
                self.todos = valor;
                if valor {
                    *self = AQuienAyuda {
                        todos: true,
                        ..AQuienAyuda::default()
                    };
                }
            }
            otro => {
                let campo = match otro {
                    "hombres" => &mut self.hombres,
                    "mujeres" => &mut self.mujeres,
                    "menores18" => &mut self.menores18,
                    "entre18y45" => &mut self.entre18y45,
                    "entre45y65" => &mut self.entre45y65,
                    _ => &mut self.mayores65,
                };
                *campo = valor;
                if valor {
                    self.todos = false;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Opción desconocida de aQuienAyuda: {0}")]
pub struct OpcionDesconocida(pub String);

/// Campos editables de un lugar, tal como los envía el formulario.
/// La validación vive en [`crate::validate::validar_lugar`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatosLugar {
    pub tipo_recurso: String,
    pub nombre_lugar: String,
    pub direccion_lugar: String,
    pub google_maps_link: String,
    pub provincia: String,
    pub barrio: String,
    pub horarios: String,
    pub a_quien_ayuda: AQuienAyuda,
    pub telefono: String,
    pub mail: String,
    pub sitio_web: String,
    pub informacion_adicional: String,
    pub fuente: String,
    pub fecha_verificacion: Option<NaiveDate>,
}

/// Documento persistido de la colección `lugares`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lugar {
    pub id: String,
    #[serde(flatten)]
    pub datos: DatosLugar,
    pub activo: bool,
    pub fecha_creacion: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}

/// Campos editables de un trámite.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatosTramite {
    pub titulo: String,
    pub categoria: String,
    pub descripcion: String,
    pub requisitos: String,
    pub enlace: String,
    pub fuente: String,
}

/// Documento persistido de la colección `tramites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tramite {
    pub id: String,
    #[serde(flatten)]
    pub datos: DatosTramite,
    pub activo: bool,
    pub fecha_creacion: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}
