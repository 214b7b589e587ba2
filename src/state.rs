use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::{config::Config, db, session::SessionService};

pub struct State {
    pub config: Config,
    pub db: Mutex<Connection>,
    pub sesiones: SessionService,
}

impl State {
    pub fn new() -> Arc<Self> {
        let config = Config::load();
        let conn = db::abrir(&config.db_path).expect("No se pudo abrir la base de datos");
        Self::con_conexion(config, conn)
    }

    pub fn con_conexion(config: Config, conn: Connection) -> Arc<Self> {
        let sesiones = SessionService::new(config.admin_email.clone(), &config.admin_password);

        Arc::new(Self {
            config,
            db: Mutex::new(conn),
            sesiones,
        })
    }
}
