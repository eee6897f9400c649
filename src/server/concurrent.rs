//! # Servidor Concurrente
//! src/server/concurrent.rs
//!
//! Un hilo por conexión: el accept-loop despacha cada socket a un
//! worker nuevo y vuelve a aceptar de inmediato, sin esperar a que el
//! worker termine. Los workers son de un solo uso (no hay pool de
//! reutilización) y un semáforo contador limita cuántos procesan a la
//! vez; el accept en sí no se gatea, de modo que el exceso queda en el
//! backlog del sistema operativo.

use crate::config::Config;
use crate::router::Router;
use crate::server::connection::handle_connection;
use crate::server::{Semaphore, ServerContext, ServerMode};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Servidor HTTP/1.1 concurrente sobre sockets brutos
#[derive(Debug)]
pub struct ConcurrentServer {
    listener: TcpListener,
    router: Arc<Router>,
    ctx: Arc<ServerContext>,
    semaphore: Arc<Semaphore>,
    read_timeout: Duration,
}

impl ConcurrentServer {
    /// Valida la configuración y liga el socket de escucha
    pub fn bind(config: Config) -> std::io::Result<Self> {
        config
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(config.address())?;
        let ctx = Arc::new(ServerContext::new(&config, ServerMode::Concurrente));
        let semaphore = Arc::new(Semaphore::new(config.max_workers));
        let read_timeout = config
            .timeout_lectura_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| ServerMode::Concurrente.default_timeout());

        Ok(Self {
            listener,
            router: Arc::new(Router::for_mode(ServerMode::Concurrente)),
            ctx,
            semaphore,
            read_timeout,
        })
    }

    /// Dirección real de escucha
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Contexto compartido (token, contador, gauge de workers)
    pub fn context(&self) -> &Arc<ServerContext> {
        &self.ctx
    }

    /// Accept-loop concurrente; bloquea el hilo llamador para siempre
    ///
    /// Cada conexión corre en su propio hilo; un pánico o error dentro
    /// de un worker nunca alcanza este loop.
    pub fn run(&self) -> std::io::Result<()> {
        println!(
            "[concurrente] escuchando en {} (X-Custom-ID: {}, max workers: {})",
            self.listener.local_addr()?,
            self.ctx.custom_id().token(),
            self.semaphore.available()
        );

        let mut worker_seq: u64 = 0;

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    worker_seq += 1;
                    let router = Arc::clone(&self.router);
                    let ctx = Arc::clone(&self.ctx);
                    let semaphore = Arc::clone(&self.semaphore);
                    let read_timeout = self.read_timeout;

                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "desconocido".to_string());
                    println!("[concurrente] conexión aceptada: {}", peer);

                    let spawned = thread::Builder::new()
                        .name(format!("worker-{}", worker_seq))
                        .spawn(move || {
                            // el permiso se adquiere en el worker, no en el
                            // accept-loop: aceptar nunca se bloquea
                            let _permit = semaphore.acquire();
                            ctx.worker_started();

                            if let Err(e) =
                                handle_connection(stream, &router, &ctx, read_timeout)
                            {
                                eprintln!("[{}] error en conexión {}: {}", thread_label(), peer, e);
                            }

                            ctx.worker_finished();
                            println!("[{}] conexión cerrada: {}", thread_label(), peer);
                        });

                    if let Err(e) = spawned {
                        eprintln!("[concurrente] no se pudo crear el worker: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("[concurrente] error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Nombre del hilo actual para los logs de los workers
fn thread_label() -> String {
    thread::current().name().unwrap_or("worker").to_string()
}
