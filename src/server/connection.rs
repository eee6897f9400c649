//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Ciclo de vida completo de un socket aceptado:
//! leer → parsear → rutear → responder → cerrar.
//!
//! ## Semántica de fallos
//!
//! - Timeout de lectura → 408 y cerrar.
//! - Peer cerró sin enviar nada → descartar sin responder.
//! - Request malformado → 500 con el mensaje del error en el body.
//! - Cualquier otro fallo de I/O durante la lectura → 500 con el mensaje.
//!
//! En todos los caminos el socket se cierra exactamente una vez: la
//! conexión es dueña del `TcpStream` y este se cierra al salir de scope.
//! Ningún fallo de una conexión se propaga al accept-loop.

use crate::http::{ParseError, Request, Response, StatusCode};
use crate::router::Router;
use crate::server::ServerContext;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

/// Tamaño de cada lectura del socket
const READ_CHUNK: usize = 1024;

/// Atiende una conexión completa
///
/// El error retornado es solo de escritura (no se pudo enviar la
/// respuesta); los fallos de lectura y parsing ya fueron convertidos en
/// una respuesta HTTP dentro de la función.
pub fn handle_connection(
    mut stream: TcpStream,
    router: &Router,
    ctx: &ServerContext,
    read_timeout: Duration,
) -> std::io::Result<()> {
    stream.set_read_timeout(Some(read_timeout))?;

    let response = match read_request(&mut stream) {
        ReadOutcome::Data(buffer) => dispatch(&buffer, router, ctx),
        ReadOutcome::Empty => {
            // el peer cerró sin enviar nada: no hay a quién responder
            return Ok(());
        }
        ReadOutcome::TimedOut => Some(Response::error(StatusCode::RequestTimeout, "Timeout")),
        ReadOutcome::Failed(error) => Some(internal_error(&error.to_string())),
    };

    if let Some(response) = response {
        let bytes = response.to_bytes(ctx.custom_id().token(), ctx.mode().server_name());
        stream.write_all(&bytes)?;
        stream.flush()?;
    }

    Ok(())
    // el stream se cierra aquí, en todos los caminos
}

/// Resultado de acumular bytes del socket
enum ReadOutcome {
    /// Hay al menos un byte; el bloque de headers puede estar completo o
    /// el peer cerró a mitad de camino
    Data(Vec<u8>),

    /// El peer cerró sin enviar nada
    Empty,

    /// Expiró el timeout de lectura
    TimedOut,

    /// Otro error de I/O
    Failed(std::io::Error),
}

/// Acumula bytes hasta ver la línea vacía que termina los headers o
/// hasta que el peer cierre (lectura de longitud cero)
///
/// Tolera lecturas parciales: cada `read` puede traer cualquier
/// fracción del request.
fn read_request(stream: &mut TcpStream) -> ReadOutcome {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                if headers_complete(&buffer) {
                    break;
                }
            }
            Err(error) if matches!(error.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return ReadOutcome::TimedOut;
            }
            Err(error) => return ReadOutcome::Failed(error),
        }
    }

    if buffer.is_empty() {
        ReadOutcome::Empty
    } else {
        ReadOutcome::Data(buffer)
    }
}

/// Busca el terminador `\r\n\r\n` del bloque de headers
fn headers_complete(buffer: &[u8]) -> bool {
    buffer.windows(4).any(|window| window == b"\r\n\r\n")
}

/// Parsea y rutea el buffer acumulado
fn dispatch(buffer: &[u8], router: &Router, ctx: &ServerContext) -> Option<Response> {
    match Request::parse(buffer) {
        Ok(request) => {
            println!(
                "[{}] {} {}",
                ctx.mode().server_type(),
                request.method(),
                request.path()
            );
            Some(router.route(&request, ctx))
        }
        // buffer con solo whitespace: mismo tratamiento que malformado
        Err(error @ ParseError::EmptyRequest) | Err(error @ ParseError::InvalidRequestLine) => {
            println!("[{}] request malformado: {}", ctx.mode().server_type(), error);
            Some(internal_error(&error.to_string()))
        }
    }
}

/// 500 con el mensaje del fallo interpolado en el body
fn internal_error(message: &str) -> Response {
    let body = format!("<h1>500 - Error Interno</h1><p>{}</p>", message);
    Response::html(StatusCode::InternalServerError, &body)
}
