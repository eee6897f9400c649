//! # Módulo Server
//! src/server/mod.rs
//!
//! Ciclo de vida de las conexiones TCP y los dos accept-loops:
//!
//! - `context`: estado compartido (token, contador, gauge de workers)
//! - `connection`: leer → parsear → rutear → responder → cerrar
//! - `semaphore`: semáforo contador para limitar la concurrencia
//! - `sequential`: una conexión completa antes de aceptar la siguiente
//! - `concurrent`: un hilo por conexión, limitado por el semáforo

pub mod concurrent;
pub mod connection;
pub mod context;
pub mod semaphore;
pub mod sequential;

pub use concurrent::ConcurrentServer;
pub use context::{RequestCounter, ServerContext, ServerMode};
pub use semaphore::Semaphore;
pub use sequential::SequentialServer;
