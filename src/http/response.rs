//! # Construcción de Responses HTTP
//! src/http/response.rs
//!
//! API para construir respuestas HTTP/1.1 y serializarlas a bytes.
//!
//! Toda respuesta lleva el mismo set fijo de headers, en este orden:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json; charset=utf-8\r\n
//! X-Custom-ID: <token del servidor>\r\n
//! Server: Secuencial-Socket/Redes-II\r\n
//! Date: Tue, 01 Jan 2026 00:00:00 GMT\r\n
//! Content-Length: 12\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! Los headers adicionales del llamador van después del set fijo, en el
//! orden en que se agregaron (se permiten duplicados). El orden forma
//! parte del contrato de wire, por eso se usa un `Vec` y no un mapa.

use super::StatusCode;
use crate::auth::CUSTOM_ID_HEADER;
use std::time::SystemTime;

/// Representa una respuesta HTTP/1.1 completa
///
/// Se construye fresca para cada request y nunca se reutiliza. Los
/// headers fijos (token, Server, Date, Content-Length) se agregan al
/// serializar, no al construir, porque dependen del contexto del
/// servidor y del instante de envío.
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Content-Type base; al serializar se le agrega "; charset=utf-8"
    content_type: String,

    /// Headers adicionales en orden de inserción, duplicados permitidos
    extra_headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: String,
}

impl Response {
    /// Crea una respuesta con el código indicado, body vacío y
    /// Content-Type `text/html`
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/html".to_string(),
            extra_headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Crea una respuesta HTML
    ///
    /// # Ejemplo
    /// ```
    /// use socket_server::http::{Response, StatusCode};
    ///
    /// let response = Response::html(StatusCode::Ok, "<h1>Hola</h1>");
    /// ```
    pub fn html(status: StatusCode, body: &str) -> Self {
        Self::new(status).with_body(body)
    }

    /// Crea una respuesta JSON
    pub fn json(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_content_type("application/json")
            .with_body(body)
    }

    /// Crea una respuesta de error con cuerpo HTML
    ///
    /// # Ejemplo
    /// ```
    /// use socket_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "Recurso Não Encontrado");
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = format!("<h1>{} - {}</h1>", status.as_u16(), message);
        Self::new(status).with_body(&body)
    }

    /// Cambia el Content-Type base (sin el sufijo charset)
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Establece el cuerpo de la respuesta
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Agrega un header adicional después del set fijo
    ///
    /// Se permiten claves repetidas; cada llamada agrega una línea más.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.extra_headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Serializa la respuesta al formato de wire HTTP/1.1
    ///
    /// `custom_id` y `server_name` vienen del contexto del servidor: el
    /// token se ecoa en toda respuesta y el header `Server` identifica
    /// la variante (secuencial o concurrente).
    pub fn to_bytes(&self, custom_id: &str, server_name: &str) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Set fijo de headers, en orden
        // Content-Length es la longitud del body en BYTES UTF-8, no en
        // caracteres: los cuerpos pueden llevar secuencias multi-byte.
        let fixed = [
            (
                "Content-Type",
                format!("{}; charset=utf-8", self.content_type),
            ),
            (CUSTOM_ID_HEADER, custom_id.to_string()),
            ("Server", server_name.to_string()),
            ("Date", httpdate::fmt_http_date(SystemTime::now())),
            ("Content-Length", self.body.len().to_string()),
            ("Connection", "close".to_string()),
        ];
        for (name, value) in &fixed {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Headers adicionales del llamador
        for (name, value) in &self.extra_headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 4. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 5. Body (si existe)
        result.extend_from_slice(self.body.as_bytes());

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el Content-Type base
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &str {
        &self.body
    }
}
