//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser HTTP manual implementado como una pequeña máquina de estados
//! sobre las líneas del request: request line → headers → body.
//!
//! ## Formato esperado
//!
//! ```text
//! POST /api/echo HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! X-Custom-ID: <token>\r\n
//! \r\n
//! cuerpo del request
//! ```
//!
//! ## Decisiones de parsing
//!
//! - La request line debe tener al menos 3 tokens (método, path,
//!   versión); la versión se acepta sin validar.
//! - Métodos desconocidos NO son error de parsing: se conservan como
//!   [`Method::Other`] para que el router responda 405.
//! - Las líneas de header sin `:` antes de la línea vacía se ignoran.
//! - En claves duplicadas gana la última aparición.
//! - El body son las líneas posteriores a la línea vacía, re-unidas con
//!   CRLF y con el whitespace de los extremos recortado.

use std::collections::HashMap;

/// Métodos HTTP que distingue el servidor
///
/// Cualquier verbo fuera de GET/POST/HEAD se conserva textual en
/// `Other` y el router lo rechaza con 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    Get,

    /// POST - Enviar datos a un recurso
    Post,

    /// HEAD - Como GET pero la respuesta no lleva body
    Head,

    /// Cualquier otro verbo (PUT, DELETE, ...) - no soportado
    Other(String),
}

impl Method {
    /// Clasifica un token de método; nunca falla
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "HEAD" => Method::Head,
            otro => Method::Other(otro.to_string()),
        }
    }

    /// Representación textual del método
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Other(verbo) => verbo,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// El tipo es explícito para que el llamador distinga "request vacío"
/// (el peer cerró sin enviar nada) de "request malformado".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío o solo whitespace
    EmptyRequest,

    /// La request line no tiene método, path y versión
    InvalidRequestLine,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Estados de la máquina de parsing
enum ParseState {
    Headers,
    Body,
}

/// Representa un request HTTP parseado
///
/// Inmutable después de su creación; vive lo que dura la conexión.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path literal de la petición (ej: "/api/echo"); no se parsea query string
    path: String,

    /// Headers HTTP, claves con mayúsculas/minúsculas preservadas
    headers: HashMap<String, String>,

    /// Versión HTTP declarada por el cliente (se acepta sin validar)
    version: String,

    /// Body del request, posiblemente vacío
    body: String,
}

impl Request {
    /// Parsea un request HTTP desde los bytes acumulados del socket
    ///
    /// El llamador es responsable de haber leído hasta la línea vacía
    /// que termina los headers; este parser solo interpreta el buffer.
    /// Bytes no-UTF-8 se reemplazan de forma lossy, como hace un
    /// decodificador tolerante.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use socket_server::http::{Method, Request};
    ///
    /// let raw = b"GET /info HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::Get);
    /// assert_eq!(request.path(), "/info");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = String::from_utf8_lossy(buffer);

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = request_str.split("\r\n");

        // Estado 1: request line
        let request_line = lines.next().ok_or(ParseError::EmptyRequest)?;
        let (method, path, version) = Self::parse_request_line(request_line)?;

        // Estado 2: headers hasta la línea vacía
        // Estado 3: body = resto de líneas re-unidas con CRLF
        let mut state = ParseState::Headers;
        let mut headers = HashMap::new();
        let mut body_lines: Vec<&str> = Vec::new();

        for line in lines {
            match state {
                ParseState::Headers => {
                    if line.is_empty() {
                        state = ParseState::Body;
                    } else if let Some(colon_pos) = line.find(':') {
                        let name = line[..colon_pos].trim().to_string();
                        let value = line[colon_pos + 1..].trim().to_string();
                        // última aparición gana en claves duplicadas
                        headers.insert(name, value);
                    }
                    // línea sin ':' antes de la línea vacía: se ignora
                }
                ParseState::Body => {
                    body_lines.push(line);
                }
            }
        }

        let body = body_lines.join("\r\n").trim().to_string();

        Ok(Request {
            method,
            path,
            headers,
            version,
            body,
        })
    }

    /// Parsea la request line: `METHOD /path VERSION`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_token(parts[0]);
        let path = parts[1].to_string();
        let version = parts[2].to_string();

        Ok((method, path, version))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (la clave es case-sensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP declarada
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &str {
        &self.body
    }
}
