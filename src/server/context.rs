//! # Contexto Compartido del Servidor
//! src/server/context.rs
//!
//! Estado que comparten todas las conexiones de una instancia del
//! servidor: la identidad, el token X-Custom-ID precomputado, el
//! contador de requests y el gauge de workers activos. Se comparte por
//! `Arc`, nunca como variable global.

use crate::auth::CustomId;
use crate::config::Config;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Variante del servidor; determina el header `Server`, los endpoints
/// registrados y los defaults de timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    /// Un accept-loop que atiende cada conexión completa antes de la siguiente
    Secuencial,

    /// Un hilo por conexión, limitado por semáforo
    Concurrente,
}

impl ServerMode {
    /// Valor del header `Server` de cada respuesta
    pub fn server_name(&self) -> &'static str {
        match self {
            ServerMode::Secuencial => "Secuencial-Socket/Redes-II",
            ServerMode::Concurrente => "Concurrente-Socket/Redes-II",
        }
    }

    /// Identificador para los cuerpos JSON (/info)
    pub fn servidor_id(&self) -> &'static str {
        match self {
            ServerMode::Secuencial => "secuencial_socket",
            ServerMode::Concurrente => "concurrente_socket",
        }
    }

    /// Tipo de servidor para los cuerpos JSON (/status)
    pub fn server_type(&self) -> &'static str {
        match self {
            ServerMode::Secuencial => "sequential",
            ServerMode::Concurrente => "concurrent",
        }
    }

    /// Timeout de lectura cuando la configuración no indica uno
    pub fn default_timeout(&self) -> Duration {
        match self {
            ServerMode::Secuencial => Duration::from_secs(5),
            ServerMode::Concurrente => Duration::from_secs(10),
        }
    }
}

/// Contador de requests del proceso, compartido entre conexiones
///
/// Se incrementa exactamente una vez por request autenticado y ruteado
/// (los 404 autenticados cuentan; los 400 de autenticación no). El
/// mutex hace atómico cada incremento-y-lectura frente a los demás
/// workers de la variante concurrente.
#[derive(Debug, Default)]
pub struct RequestCounter {
    count: Mutex<u64>,
}

impl RequestCounter {
    /// Crea un contador en cero
    pub fn new() -> Self {
        Self::default()
    }

    /// Incrementa el contador y retorna el valor resultante
    pub fn increment(&self) -> u64 {
        let mut count = self.count.lock().unwrap();
        *count += 1;
        *count
    }

    /// Lee el valor actual sin incrementar
    pub fn current(&self) -> u64 {
        *self.count.lock().unwrap()
    }
}

/// Estado compartido de una instancia del servidor
///
/// Se construye una vez al arrancar (el token nunca cambia después) y
/// se clona por `Arc` hacia cada conexión.
#[derive(Debug)]
pub struct ServerContext {
    mode: ServerMode,
    matricula: String,
    nombre: String,
    custom_id: CustomId,
    counter: RequestCounter,
    active_workers: AtomicUsize,
}

impl ServerContext {
    /// Construye el contexto derivando el token de la identidad configurada
    pub fn new(config: &Config, mode: ServerMode) -> Self {
        Self {
            mode,
            matricula: config.matricula.clone(),
            nombre: config.nombre.clone(),
            custom_id: CustomId::derive(&config.matricula, &config.nombre),
            counter: RequestCounter::new(),
            active_workers: AtomicUsize::new(0),
        }
    }

    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    pub fn matricula(&self) -> &str {
        &self.matricula
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    /// Token X-Custom-ID precomputado del servidor
    pub fn custom_id(&self) -> &CustomId {
        &self.custom_id
    }

    /// Contador de requests compartido
    pub fn counter(&self) -> &RequestCounter {
        &self.counter
    }

    /// Marca el inicio de un worker (variante concurrente)
    pub fn worker_started(&self) {
        self.active_workers.fetch_add(1, Ordering::SeqCst);
    }

    /// Marca el fin de un worker
    pub fn worker_finished(&self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
    }

    /// Workers procesando conexiones en este instante
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }
}
