//! # Token X-Custom-ID
//! src/auth.rs
//!
//! El servidor exige que cada request GET/POST lleve el header
//! `X-Custom-ID` con el digest MD5 en hexadecimal de la cadena
//! `"<matricula> <nombre>"`. No es autenticación real: es un secreto
//! compartido fijo que los clientes de prueba calculan igual.
//!
//! El token se calcula una sola vez al arrancar el servidor y no cambia
//! durante toda su vida.

use md5::{Digest, Md5};

/// Nombre del header de autenticación, en requests y responses
pub const CUSTOM_ID_HEADER: &str = "X-Custom-ID";

/// Token de autenticación precomputado del servidor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomId {
    token: String,
}

impl CustomId {
    /// Deriva el token a partir de la identidad configurada
    ///
    /// # Ejemplo
    /// ```
    /// use socket_server::auth::CustomId;
    ///
    /// let id = CustomId::derive("20229043792", "Victor Rodrigues Luz");
    /// assert_eq!(id.token().len(), 32); // MD5 en hex
    /// ```
    pub fn derive(matricula: &str, nombre: &str) -> Self {
        let datos = format!("{} {}", matricula, nombre);
        let digest = Md5::digest(datos.as_bytes());
        let token = digest
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();
        Self { token }
    }

    /// Obtiene el token en hexadecimal
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Valida el valor del header `X-Custom-ID` de un request
    ///
    /// Retorna `false` si el header está ausente o no coincide.
    pub fn validate(&self, header_value: Option<&str>) -> bool {
        header_value == Some(self.token.as_str())
    }
}
