//! Almacén SQLite: apertura de la base y esquema de las colecciones.

use rusqlite::types::ToSqlOutput;
use rusqlite::{Connection, Result, ToSql};
use tracing::info;

use crate::filters::Valor;

pub mod lugares;
pub mod tramites;

pub use lugares::LugarRepository;
pub use tramites::TramiteRepository;

pub fn abrir(ruta: &str) -> Result<Connection> {
    info!("Abriendo base de datos en {ruta}");
    let conn = Connection::open(ruta)?;
    configurar(&conn)?;
    Ok(conn)
}

/// Base efímera para pruebas.
pub fn abrir_en_memoria() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configurar(&conn)?;
    Ok(conn)
}

fn configurar(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    aplicar_esquema(conn)
}

fn aplicar_esquema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS lugares (
            id TEXT PRIMARY KEY,
            tipo_recurso TEXT NOT NULL,
            nombre_lugar TEXT NOT NULL,
            direccion_lugar TEXT NOT NULL,
            google_maps_link TEXT NOT NULL DEFAULT '',
            provincia TEXT NOT NULL,
            barrio TEXT NOT NULL DEFAULT '',
            horarios TEXT NOT NULL,
            a_quien_ayuda TEXT NOT NULL,
            telefono TEXT NOT NULL DEFAULT '',
            mail TEXT NOT NULL DEFAULT '',
            sitio_web TEXT NOT NULL DEFAULT '',
            informacion_adicional TEXT NOT NULL DEFAULT '',
            fuente TEXT NOT NULL,
            fecha_verificacion TEXT,
            activo INTEGER NOT NULL DEFAULT 1,
            fecha_creacion TEXT,
            fecha_actualizacion TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tramites (
            id TEXT PRIMARY KEY,
            titulo TEXT NOT NULL,
            categoria TEXT NOT NULL,
            descripcion TEXT NOT NULL,
            requisitos TEXT NOT NULL DEFAULT '',
            enlace TEXT NOT NULL DEFAULT '',
            fuente TEXT NOT NULL,
            activo INTEGER NOT NULL DEFAULT 1,
            fecha_creacion TEXT,
            fecha_actualizacion TEXT
        )",
        [],
    )?;

    Ok(())
}

impl ToSql for Valor {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        match self {
            Valor::Texto(texto) => texto.to_sql(),
            Valor::Logico(logico) => logico.to_sql(),
        }
    }
}

/// Cláusula `WHERE c1 = ?1 AND c2 = ?2 ...` para una lista de predicados de
/// igualdad; vacía cuando no hay predicados.
pub(crate) fn clausula_where(predicados: &[crate::filters::Predicado]) -> String {
    if predicados.is_empty() {
        return String::new();
    }

    let condiciones: Vec<String> = predicados
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} = ?{}", p.columna, i + 1))
        .collect();

    format!(" WHERE {}", condiciones.join(" AND "))
}
