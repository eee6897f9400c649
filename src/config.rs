//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración compartida por ambas variantes del
//! servidor (secuencial y concurrente), con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./servidor_concurrente --port 8080 --max-workers 50 --timeout-lectura 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=80 HTTP_HOST=0.0.0.0 ./servidor_secuencial
//! ```

use clap::Parser;

/// Configuración de los servidores HTTP/1.1 sobre sockets brutos
#[derive(Debug, Clone, Parser)]
#[command(name = "socket_server")]
#[command(about = "Servidor HTTP/1.1 sobre sockets TCP brutos para Redes II")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    // === Identidad ===
    //
    // El token X-Custom-ID se deriva de estos dos campos; los clientes de
    // prueba deben calcular el mismo MD5 para autenticarse.

    /// Matrícula usada para derivar el X-Custom-ID
    #[arg(long, default_value = "20229043792", env = "MATRICULA")]
    pub matricula: String,

    /// Nombre completo usado para derivar el X-Custom-ID
    #[arg(long, default_value = "Victor Rodrigues Luz", env = "NOMBRE")]
    pub nombre: String,

    // === Conexiones ===

    /// Timeout de lectura por conexión en segundos (expira en 408).
    /// Si no se indica, cada variante usa su valor por defecto:
    /// 5 s la secuencial, 10 s la concurrente.
    #[arg(long = "timeout-lectura", env = "TIMEOUT_LECTURA")]
    pub timeout_lectura_secs: Option<u64>,

    /// Máximo de conexiones procesándose a la vez (solo variante concurrente)
    #[arg(long = "max-workers", default_value = "50", env = "MAX_WORKERS")]
    pub max_workers: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use socket_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.matricula.trim().is_empty() {
            return Err("Matricula must not be empty".to_string());
        }
        if self.nombre.trim().is_empty() {
            return Err("Nombre must not be empty".to_string());
        }
        if self.timeout_lectura_secs == Some(0) {
            return Err("Read timeout must be > 0".to_string());
        }
        if self.max_workers == 0 {
            return Err("Max workers must be >= 1".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración al arrancar
    pub fn print_summary(&self, modo: &str) {
        println!("======================================================================");
        println!("  SERVIDOR {} - SOCKETS BRUTOS", modo.to_uppercase());
        println!("======================================================================");
        println!("  Dirección:       {}", self.address());
        println!("  Matrícula:       {}", self.matricula);
        println!("  Nombre:          {}", self.nombre);
        match self.timeout_lectura_secs {
            Some(secs) => println!("  Timeout lectura: {} s", secs),
            None => println!("  Timeout lectura: por defecto de la variante"),
        }
        println!("  Max workers:     {}", self.max_workers);
        println!("======================================================================");
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            matricula: "20229043792".to_string(),
            nombre: "Victor Rodrigues Luz".to_string(),
            timeout_lectura_secs: None,
            max_workers: 50,
        }
    }
}
