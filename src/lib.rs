//! # Socket Server
//! src/lib.rs
//!
//! Servidores web HTTP/1.1 implementados desde cero sobre sockets TCP
//! brutos, en dos variantes para comparar sus propiedades bajo carga:
//!
//! - **Secuencial**: un solo hilo; una conexión se atiende completa antes
//!   de aceptar la siguiente.
//! - **Concurrente**: un hilo por conexión, con un semáforo contador que
//!   limita cuántas conexiones se procesan a la vez.
//!
//! ## Arquitectura
//!
//! - `http`: parsing de requests y construcción de responses HTTP/1.1
//! - `auth`: cálculo y validación del token X-Custom-ID
//! - `router`: enrutamiento de peticiones a handlers
//! - `handlers`: implementación de los endpoints GET/POST/HEAD
//! - `server`: ciclo de vida de conexiones y los dos accept-loops
//! - `config`: configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use socket_server::config::Config;
//! use socket_server::server::SequentialServer;
//!
//! let config = Config::default();
//! let server = SequentialServer::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal del servidor");
//! ```

pub mod auth;
pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
