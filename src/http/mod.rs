//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que necesita el
//! proyecto, desde cero y sin librerías de alto nivel. Incluye:
//!
//! - Parsing manual de requests (request line, headers, body)
//! - Construcción de responses con el set fijo de headers en orden
//! - Manejo de status codes
//!
//! ## Subconjunto soportado
//!
//! Deliberadamente NO se soportan: conexiones persistentes (toda
//! respuesta lleva `Connection: close`), pipelining, chunked transfer
//! encoding, TLS ni folding de headers. El objetivo del proyecto es el
//! manejo manual del protocolo, no cumplir el RFC 7230 completo.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /info HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! X-Custom-ID: <token>\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json; charset=utf-8\r\n
//! X-Custom-ID: <token>\r\n
//! Server: Secuencial-Socket/Redes-II\r\n
//! Date: Tue, 01 Jan 2026 00:00:00 GMT\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
