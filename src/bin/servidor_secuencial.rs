//! # Servidor Secuencial - Entry Point
//! src/bin/servidor_secuencial.rs
//!
//! Arranca la variante secuencial: un accept-loop que atiende cada
//! conexión completa antes de aceptar la siguiente.

use socket_server::config::Config;
use socket_server::server::SequentialServer;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary("secuencial");
    println!("  Endpoints: GET /, /index.html, /info, /status");
    println!("  Endpoints: POST /api/data, /api/echo");
    println!("  Presione Ctrl+C para terminar");
    println!();

    let server = match SequentialServer::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Error al iniciar servidor: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        eprintln!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
