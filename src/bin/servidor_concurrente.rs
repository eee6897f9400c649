//! # Servidor Concurrente - Entry Point
//! src/bin/servidor_concurrente.rs
//!
//! Arranca la variante concurrente: un hilo por conexión, con un
//! semáforo que limita cuántas se procesan a la vez.

use socket_server::config::Config;
use socket_server::server::ConcurrentServer;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary("concurrente");
    println!("  Endpoints: GET /, /index.html, /info, /status, /heavy");
    println!("  Endpoints: POST /api/data, /api/echo, /api/batch");
    println!("  Presione Ctrl+C para terminar");
    println!();

    let server = match ConcurrentServer::bind(config) {
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
