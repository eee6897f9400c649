//! # Códigos de Estado HTTP
//!
//! Los seis códigos que realmente emite el servidor. La tabla de reason
//! phrases es fija; cualquier código fuera de ella se presenta como
//! `"Unknown"`.

/// Representa los códigos de estado HTTP que usa el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 400 Bad Request - X-Custom-ID inválido o ausente
    BadRequest = 400,

    /// 404 Not Found - Ruta no registrada
    NotFound = 404,

    /// 405 Method Not Allowed - Método distinto de GET/POST/HEAD
    MethodNotAllowed = 405,

    /// 408 Request Timeout - La lectura del request excedió el timeout
    RequestTimeout = 408,

    /// 500 Internal Server Error - Fallo inesperado durante el manejo
    InternalServerError = 500,
}

/// Resuelve la reason phrase para un código numérico arbitrario
///
/// # Ejemplo
/// ```
/// use socket_server::http::status::reason_for;
/// assert_eq!(reason_for(200), "OK");
/// assert_eq!(reason_for(418), "Unknown");
/// ```
pub fn reason_for(code: u16) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use socket_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    pub fn reason_phrase(&self) -> &'static str {
        reason_for(self.as_u16())
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
