//! Repositorio de la colección `lugares`.

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, Result, Row};
use uuid::Uuid;

use crate::filters::FiltrosLugares;
use crate::models::{DatosLugar, Lugar};

const COLUMNAS: &str = "id, tipo_recurso, nombre_lugar, direccion_lugar, google_maps_link, \
     provincia, barrio, horarios, a_quien_ayuda, telefono, mail, sitio_web, \
     informacion_adicional, fuente, fecha_verificacion, activo, fecha_creacion, \
     fecha_actualizacion";

pub struct LugarRepository<'c> {
    conn: &'c Connection,
}

impl<'c> LugarRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        LugarRepository { conn }
    }

    /// Alta de un lugar: id generado, `activo` en verdadero y marcas de
    /// tiempo asignadas por el servidor.
    pub fn crear(&self, datos: &DatosLugar) -> Result<Lugar> {
        let id = Uuid::new_v4().to_string();
        let ahora = Utc::now();

        self.conn.execute(
            "INSERT INTO lugares (id, tipo_recurso, nombre_lugar, direccion_lugar, \
             google_maps_link, provincia, barrio, horarios, a_quien_ayuda, telefono, mail, \
             sitio_web, informacion_adicional, fuente, fecha_verificacion, activo, \
             fecha_creacion, fecha_actualizacion) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, 1, ?16, ?16)",
            params![
                id,
                datos.tipo_recurso,
                datos.nombre_lugar,
                datos.direccion_lugar,
                datos.google_maps_link,
                datos.provincia,
                datos.barrio,
                datos.horarios,
                serde_json::to_string(&datos.a_quien_ayuda).unwrap_or_else(|_| "{}".into()),
                datos.telefono,
                datos.mail,
                datos.sitio_web,
                datos.informacion_adicional,
                datos.fuente,
                datos.fecha_verificacion,
                ahora,
            ],
        )?;

        Ok(Lugar {
            id,
            datos: datos.clone(),
            activo: true,
            fecha_creacion: Some(ahora),
            fecha_actualizacion: Some(ahora),
        })
    }

    /// Reemplaza los campos editables y refresca `fecha_actualizacion`.
    /// `activo` no se toca. Devuelve `None` si el id no existe.
    pub fn actualizar(&self, id: &str, datos: &DatosLugar) -> Result<Option<Lugar>> {
        let cambiadas = self.conn.execute(
            "UPDATE lugares SET tipo_recurso = ?1, nombre_lugar = ?2, direccion_lugar = ?3, \
             google_maps_link = ?4, provincia = ?5, barrio = ?6, horarios = ?7, \
             a_quien_ayuda = ?8, telefono = ?9, mail = ?10, sitio_web = ?11, \
             informacion_adicional = ?12, fuente = ?13, fecha_verificacion = ?14, \
             fecha_actualizacion = ?15 WHERE id = ?16",
            params![
                datos.tipo_recurso,
                datos.nombre_lugar,
                datos.direccion_lugar,
                datos.google_maps_link,
                datos.provincia,
                datos.barrio,
                datos.horarios,
                serde_json::to_string(&datos.a_quien_ayuda).unwrap_or_else(|_| "{}".into()),
                datos.telefono,
                datos.mail,
                datos.sitio_web,
                datos.informacion_adicional,
                datos.fuente,
                datos.fecha_verificacion,
                Utc::now(),
                id,
            ],
        )?;

        if cambiadas == 0 {
            return Ok(None);
        }
        self.obtener(id)
    }

    pub fn obtener(&self, id: &str) -> Result<Option<Lugar>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNAS} FROM lugares WHERE id = ?1"))?;

        stmt.query_row(params![id], mapear_lugar)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                otro => Err(otro),
            })
    }

    /// Listado con predicados de igualdad. El orden del resultado no está
    /// garantizado; la vista de administración ordena aparte.
    pub fn buscar(&self, filtros: &FiltrosLugares) -> Result<Vec<Lugar>> {
        let predicados = filtros.predicados();
        let sql = format!(
            "SELECT {COLUMNAS} FROM lugares{}",
            super::clausula_where(&predicados)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let filas = stmt.query_map(
            params_from_iter(predicados.iter().map(|p| &p.valor)),
            mapear_lugar,
        )?;

        filas.collect()
    }

    pub fn desactivar(&self, id: &str) -> Result<bool> {
        self.cambiar_activo(id, false)
    }

    pub fn activar(&self, id: &str) -> Result<bool> {
        self.cambiar_activo(id, true)
    }

    fn cambiar_activo(&self, id: &str, activo: bool) -> Result<bool> {
        let cambiadas = self.conn.execute(
            "UPDATE lugares SET activo = ?1, fecha_actualizacion = ?2 WHERE id = ?3",
            params![activo, Utc::now(), id],
        )?;
        Ok(cambiadas > 0)
    }

    /// Baja física, irreversible. La baja normal es [`Self::desactivar`].
    pub fn eliminar(&self, id: &str) -> Result<bool> {
        let cambiadas = self
            .conn
            .execute("DELETE FROM lugares WHERE id = ?1", params![id])?;
        Ok(cambiadas > 0)
    }
}

fn mapear_lugar(fila: &Row) -> Result<Lugar> {
    let ayuda: String = fila.get(8)?;

    Ok(Lugar {
        id: fila.get(0)?,
        datos: DatosLugar {
            tipo_recurso: fila.get(1)?,
            nombre_lugar: fila.get(2)?,
            direccion_lugar: fila.get(3)?,
            google_maps_link: fila.get(4)?,
            provincia: fila.get(5)?,
            barrio: fila.get(6)?,
            horarios: fila.get(7)?,
            a_quien_ayuda: serde_json::from_str(&ayuda).unwrap_or_default(),
            telefono: fila.get(9)?,
            mail: fila.get(10)?,
            sitio_web: fila.get(11)?,
            informacion_adicional: fila.get(12)?,
            fuente: fila.get(13)?,
            fecha_verificacion: fila.get(14)?,
        },
        activo: fila.get(15)?,
        fecha_creacion: fila.get(16)?,
        fecha_actualizacion: fila.get(17)?,
    })
}
