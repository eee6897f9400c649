//! # Servidor Secuencial
//! src/server/sequential.rs
//!
//! Un solo hilo de control: cada conexión se atiende completa (leer,
//! parsear, rutear, responder, cerrar) antes de aceptar la siguiente.
//! Toda la latencia se serializa; el throughput queda acotado por
//! `1 / tiempo_medio_de_manejo`.

use crate::config::Config;
use crate::router::Router;
use crate::server::connection::handle_connection;
use crate::server::{ServerContext, ServerMode};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

/// Servidor HTTP/1.1 secuencial sobre sockets brutos
#[derive(Debug)]
pub struct SequentialServer {
    listener: TcpListener,
    router: Router,
    ctx: Arc<ServerContext>,
    read_timeout: Duration,
}

impl SequentialServer {
    /// Valida la configuración y liga el socket de escucha
    ///
    /// Con puerto 0 el sistema asigna uno efímero; `local_addr` lo
    /// expone (así lo usan los tests de integración).
    pub fn bind(config: Config) -> std::io::Result<Self> {
        config
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(config.address())?;
        let ctx = Arc::new(ServerContext::new(&config, ServerMode::Secuencial));
        let read_timeout = config
            .timeout_lectura_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| ServerMode::Secuencial.default_timeout());

        Ok(Self {
            listener,
            router: Router::for_mode(ServerMode::Secuencial),
            ctx,
            read_timeout,
        })
    }

    /// Dirección real de escucha
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Contexto compartido (token, contador)
    pub fn context(&self) -> &Arc<ServerContext> {
        &self.ctx
    }

    /// Accept-loop secuencial; bloquea el hilo llamador para siempre
    ///
    /// Ningún fallo de una conexión individual termina el loop.
    pub fn run(&self) -> std::io::Result<()> {
        println!(
            "[secuencial] escuchando en {} (X-Custom-ID: {})",
            self.listener.local_addr()?,
            self.ctx.custom_id().token()
        );

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "desconocido".to_string());
                    println!("[secuencial] conexión aceptada: {}", peer);

                    if let Err(e) =
                        handle_connection(stream, &self.router, &self.ctx, self.read_timeout)
                    {
                        eprintln!("[secuencial] error en conexión {}: {}", peer, e);
                    }
                    println!("[secuencial] requisición concluida: {}", peer);
                }
                Err(e) => {
                    eprintln!("[secuencial] error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }
}
