//! # Handlers de Endpoints
//! src/handlers/mod.rs
//!
//! Implementación de los endpoints de ambas variantes:
//!
//! - GET `/` y `/index.html`: página HTML de estado
//! - GET `/info`: identidad del servidor en JSON
//! - GET `/status`: estado operacional en JSON
//! - GET `/heavy`: operación lenta simulada (solo concurrente)
//! - POST `/api/data`: recepción de datos con latencia simulada
//! - POST `/api/echo`: eco del body recibido
//! - POST `/api/batch`: conteo de ítems separados por coma (solo concurrente)
//!
//! Cada handler recibe el request, el contexto compartido y el número
//! de request ya incrementado por el router. Las latencias simuladas
//! (`/heavy`, `/api/data`, `/api/batch`) existen para que los clientes
//! de carga puedan medir la diferencia entre las dos variantes.

use crate::http::{Request, Response, StatusCode};
use crate::server::{ServerContext, ServerMode};
use serde::Serialize;
use serde_json::json;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Duración del bloqueo artificial de GET /heavy
const HEAVY_DELAY: Duration = Duration::from_secs(2);

/// Latencia simulada de POST /api/data por variante
const DATA_DELAY_SECUENCIAL: Duration = Duration::from_millis(10);
const DATA_DELAY_CONCURRENTE: Duration = Duration::from_millis(100);

/// Latencia simulada de POST /api/batch
const BATCH_DELAY: Duration = Duration::from_millis(500);

/// Segundos desde el epoch Unix, para los campos `timestamp`
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Nombre del hilo que atiende la conexión
fn thread_name() -> String {
    thread::current()
        .name()
        .unwrap_or("main")
        .to_string()
}

/// Serializa con indentación, como esperan los clientes de prueba
fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Cuerpo de GET /info
#[derive(Debug, Serialize)]
struct InfoBody<'a> {
    servidor: &'a str,
    matricula: &'a str,
    nombre: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<String>,
    custom_id: &'a str,
    timestamp: u64,
    request_count: u64,
    protocol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    concurrency: Option<&'a str>,
}

/// Cuerpo de GET /status
#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    server_type: &'a str,
    requests_processed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_name: Option<String>,
    custom_id_valid: bool,
}

/// GET / y /index.html: página HTML con el estado del servidor
pub fn index(_req: &Request, ctx: &ServerContext, request_num: u64) -> Response {
    let concurrente = ctx.mode() == ServerMode::Concurrente;
    let titulo = match ctx.mode() {
        ServerMode::Secuencial => "Servidor Web Secuencial con Sockets Brutos",
        ServerMode::Concurrente => "Servidor Web Concurrente con Sockets Brutos",
    };
    let tipo = match ctx.mode() {
        ServerMode::Secuencial => "Secuencial (Socket TCP Bruto)",
        ServerMode::Concurrente => "Concurrente (Socket TCP + Threads)",
    };
    let linea_thread = if concurrente {
        format!("    <p><strong>Thread:</strong> {}</p>\n", thread_name())
    } else {
        String::new()
    };

    let content = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{titulo}</title>
    <meta charset="utf-8">
</head>
<body>
    <h1>{titulo}</h1>
    <p><strong>Matrícula:</strong> {matricula}</p>
    <p><strong>Nombre:</strong> {nombre}</p>
{linea_thread}    <p><strong>Requisición nº:</strong> {request_num}</p>
    <p><strong>Timestamp:</strong> {timestamp}</p>
    <p><strong>X-Custom-ID:</strong> {token}</p>
    <p><strong>Tipo:</strong> {tipo}</p>
</body>
</html>
"#,
        titulo = titulo,
        matricula = ctx.matricula(),
        nombre = ctx.nombre(),
        linea_thread = linea_thread,
        request_num = request_num,
        timestamp = httpdate::fmt_http_date(SystemTime::now()),
        token = ctx.custom_id().token(),
        tipo = tipo,
    );

    Response::html(StatusCode::Ok, &content)
}

/// GET /info: identidad y contadores en JSON
pub fn info(_req: &Request, ctx: &ServerContext, request_num: u64) -> Response {
    let concurrente = ctx.mode() == ServerMode::Concurrente;
    let body = InfoBody {
        servidor: ctx.mode().servidor_id(),
        matricula: ctx.matricula(),
        nombre: ctx.nombre(),
        thread: concurrente.then(thread_name),
        custom_id: ctx.custom_id().token(),
        timestamp: now_secs(),
        request_count: request_num,
        protocol: "TCP/Socket",
        concurrency: concurrente.then_some("thread-based"),
    };
    let json = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string());
    Response::json(StatusCode::Ok, &json)
}

/// GET /status: estado operacional en JSON
pub fn status(_req: &Request, ctx: &ServerContext, request_num: u64) -> Response {
    let concurrente = ctx.mode() == ServerMode::Concurrente;
    let body = StatusBody {
        status: "online",
        server_type: ctx.mode().server_type(),
        requests_processed: request_num,
        active_threads: concurrente.then(|| ctx.active_workers()),
        thread_name: concurrente.then(thread_name),
        custom_id_valid: true,
    };
    let json = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string());
    Response::json(StatusCode::Ok, &json)
}

/// GET /heavy: bloquea el hilo 2 segundos antes de responder
///
/// Solo lo registra la variante concurrente: demuestra que un handler
/// lento no bloquea a las demás conexiones en vuelo.
pub fn heavy(_req: &Request, _ctx: &ServerContext, _request_num: u64) -> Response {
    thread::sleep(HEAVY_DELAY);

    let body = json!({
        "operation": "heavy_processing",
        "duration": "2 seconds",
        "thread": thread_name(),
        "timestamp": now_secs(),
    });
    Response::json(StatusCode::Ok, &pretty(&body))
}

/// POST /api/data: acusa recibo del body con latencia simulada
///
/// Las dos variantes difieren en algo más que la latencia: la
/// concurrente devuelve además el body recibido, el tiempo de
/// procesamiento y el hilo que atendió.
pub fn api_data(req: &Request, ctx: &ServerContext, request_num: u64) -> Response {
    let body = match ctx.mode() {
        ServerMode::Secuencial => {
            thread::sleep(DATA_DELAY_SECUENCIAL);
            json!({
                "status": "received",
                "data_length": req.body().len(),
                "processed_at": now_secs(),
                "request_id": request_num,
                "custom_id": ctx.custom_id().token(),
            })
        }
        ServerMode::Concurrente => {
            thread::sleep(DATA_DELAY_CONCURRENTE);
            json!({
                "status": "processed",
                "data_received": req.body(),
                "data_length": req.body().len(),
                "processing_time": format!("{}s", DATA_DELAY_CONCURRENTE.as_secs_f64()),
                "processed_at": now_secs(),
                "request_id": request_num,
                "thread": thread_name(),
                "custom_id": ctx.custom_id().token(),
            })
        }
    };
    Response::json(StatusCode::Ok, &pretty(&body))
}

/// POST /api/echo: devuelve el body recibido byte a byte
pub fn api_echo(req: &Request, ctx: &ServerContext, _request_num: u64) -> Response {
    let mut body = json!({
        "echo": req.body(),
        "timestamp": now_secs(),
        "received_bytes": req.body().len(),
    });
    if ctx.mode() == ServerMode::Concurrente {
        body["thread"] = json!(thread_name());
    }
    Response::json(StatusCode::Ok, &pretty(&body))
}

/// POST /api/batch: cuenta ítems separados por coma, con latencia fija
pub fn api_batch(req: &Request, _ctx: &ServerContext, _request_num: u64) -> Response {
    thread::sleep(BATCH_DELAY);

    let items = req.body().split(',').count();
    let body = json!({
        "operation": "batch_processing",
        "items_processed": items,
        "processing_time": "0.5s",
        "thread": thread_name(),
        "timestamp": now_secs(),
    });
    Response::json(StatusCode::Ok, &pretty(&body))
}
