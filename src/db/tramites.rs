//! Repositorio de la colección `tramites`.

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, Result, Row};
use uuid::Uuid;

use crate::filters::FiltrosTramites;
use crate::models::{DatosTramite, Tramite};

const COLUMNAS: &str = "id, titulo, categoria, descripcion, requisitos, enlace, fuente, \
     activo, fecha_creacion, fecha_actualizacion";

pub struct TramiteRepository<'c> {
    conn: &'c Connection,
}

impl<'c> TramiteRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        TramiteRepository { conn }
    }

    pub fn crear(&self, datos: &DatosTramite) -> Result<Tramite> {
        let id = Uuid::new_v4().to_string();
        let ahora = Utc::now();

        self.conn.execute(
            "INSERT INTO tramites (id, titulo, categoria, descripcion, requisitos, enlace, \
             fuente, activo, fecha_creacion, fecha_actualizacion) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
            params![
                id,
                datos.titulo,
                datos.categoria,
                datos.descripcion,
                datos.requisitos,
                datos.enlace,
                datos.fuente,
                ahora,
            ],
        )?;

        Ok(Tramite {
            id,
            datos: datos.clone(),
            activo: true,
            fecha_creacion: Some(ahora),
            fecha_actualizacion: Some(ahora),
        })
    }

    pub fn actualizar(&self, id: &str, datos: &DatosTramite) -> Result<Option<Tramite>> {
        let cambiadas = self.conn.execute(
            "UPDATE tramites SET titulo = ?1, categoria = ?2, descripcion = ?3, \
             requisitos = ?4, enlace = ?5, fuente = ?6, fecha_actualizacion = ?7 \
             WHERE id = ?8",
            params![
                datos.titulo,
                datos.categoria,
                datos.descripcion,
                datos.requisitos,
                datos.enlace,
                datos.fuente,
                Utc::now(),
                id,
            ],
        )?;

        if cambiadas == 0 {
            return Ok(None);
        }
        self.obtener(id)
    }

    pub fn obtener(&self, id: &str) -> Result<Option<Tramite>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNAS} FROM tramites WHERE id = ?1"))?;

        stmt.query_row(params![id], mapear_tramite)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                otro => Err(otro),
            })
    }

    pub fn buscar(&self, filtros: &FiltrosTramites) -> Result<Vec<Tramite>> {
        let predicados = filtros.predicados();
        let sql = format!(
            "SELECT {COLUMNAS} FROM tramites{}",
            super::clausula_where(&predicados)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let filas = stmt.query_map(
            params_from_iter(predicados.iter().map(|p| &p.valor)),
            mapear_tramite,
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
            "UPDATE tramites SET activo = ?1, fecha_actualizacion = ?2 WHERE id = ?3",
            params![activo, Utc::now(), id],
        )?;
        Ok(cambiadas > 0)
    }
}

fn mapear_tramite(fila: &Row) -> Result<Tramite> {
    Ok(Tramite {
        id: fila.get(0)?,
        datos: DatosTramite {
            titulo: fila.get(1)?,
            categoria: fila.get(2)?,
            descripcion: fila.get(3)?,
            requisitos: fila.get(4)?,
            enlace: fila.get(5)?,
            fuente: fila.get(6)?,
        },
        activo: fila.get(7)?,
        fecha_creacion: fila.get(8)?,
        fecha_actualizacion: fila.get(9)?,
    })
}
