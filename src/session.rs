//! Sesiones de administración.
//!
//! Reemplaza al proveedor de autenticación externo del sistema original:
//! inicio de sesión con email y contraseña (verificación PBKDF2), tokens de
//! sesión, y un canal de estado con suscripción explícita en lugar del
//! estado global `onAuthStateChanged`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const RONDAS_PBKDF2: u32 = 100_000;

// Límite de intentos fallidos antes de responder "demasiados intentos"
const MAX_INTENTOS: u32 = 5;
const VENTANA_INTENTOS: Duration = Duration::from_secs(300);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Credenciales inválidas. Verifica tu email y contraseña.")]
    CredencialInvalida,
    #[error("No existe una cuenta con este email.")]
    UsuarioNoEncontrado,
    #[error("Contraseña incorrecta.")]
    ContrasenaIncorrecta,
    #[error("Demasiados intentos fallidos. Intenta más tarde.")]
    DemasiadosIntentos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usuario {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sesion {
    pub token: String,
    pub email: String,
}

struct Intentos {
    fallidos: u32,
    desde: Instant,
}

pub struct SessionService {
    admin_email: String,
    salt: [u8; SALT_LEN],
    hash: [u8; KEY_LEN],
    tokens: Mutex<HashMap<String, Usuario>>,
    intentos: Mutex<HashMap<String, Intentos>>,
    ventana: Duration,
    estado: watch::Sender<Option<Usuario>>,
}

impl SessionService {
    /// Única cuenta de administración: la sal se genera al arrancar y la
    /// contraseña nunca se retiene en claro.
    pub fn new(admin_email: String, admin_password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = derivar_clave(admin_password, &salt);

        let (estado, _) = watch::channel(None);

        SessionService {
            admin_email,
            salt,
            hash,
            tokens: Mutex::new(HashMap::new()),
            intentos: Mutex::new(HashMap::new()),
            ventana: VENTANA_INTENTOS,
            estado,
        }
    }

    #[cfg(test)]
    fn con_ventana(mut self, ventana: Duration) -> Self {
        self.ventana = ventana;
        self
    }

    pub fn iniciar_sesion(&self, email: &str, password: &str) -> Result<Sesion, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::CredencialInvalida);
        }

        self.verificar_intentos(email)?;

        if email != self.admin_email {
            self.registrar_fallo(email);
            return Err(AuthError::UsuarioNoEncontrado);
        }

        if derivar_clave(password, &self.salt) != self.hash {
            self.registrar_fallo(email);
            return Err(AuthError::ContrasenaIncorrecta);
        }

        self.intentos.lock().unwrap().remove(email);

        let usuario = Usuario {
            email: email.to_string(),
        };
        let token = Uuid::new_v4().to_string();
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), usuario.clone());
        self.estado.send_replace(Some(usuario.clone()));

        Ok(Sesion {
            token,
            email: usuario.email,
        })
    }

    pub fn cerrar_sesion(&self, token: &str) {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.remove(token);
        // otras sesiones pueden seguir vivas; recién sin tokens no hay usuario
        if tokens.is_empty() {
            self.estado.send_replace(None);
        }
    }

    pub fn usuario_por_token(&self, token: &str) -> Option<Usuario> {
        self.tokens.lock().unwrap().get(token).cloned()
    }

    /// Suscripción al estado de sesión. Soltar el receptor cancela la
    /// suscripción, sin registro global.
    pub fn suscribir(&self) -> watch::Receiver<Option<Usuario>> {
        self.estado.subscribe()
    }

    fn verificar_intentos(&self, email: &str) -> Result<(), AuthError> {
        let mut intentos = self.intentos.lock().unwrap();
        if let Some(registro) = intentos.get(email) {
            if registro.desde.elapsed() > self.ventana {
                intentos.remove(email);
            } else if registro.fallidos >= MAX_INTENTOS {
                return Err(AuthError::DemasiadosIntentos);
            }
        }
        Ok(())
    }

    fn registrar_fallo(&self, email: &str) {
        let mut intentos = self.intentos.lock().unwrap();
        // la petición de login no exige sesión: sin esta poda, un aluvión de
        // emails distintos haría crecer el mapa sin límite
        let ventana = self.ventana;
        intentos.retain(|_, registro| registro.desde.elapsed() <= ventana);

        let registro = intentos.entry(email.to_string()).or_insert(Intentos {
            fallidos: 0,
            desde: Instant::now(),
        });
        registro.fallidos += 1;
    }
}

fn derivar_clave(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut clave = [0u8; KEY_LEN];
    let _ = pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, RONDAS_PBKDF2, &mut clave);
    clave
}
