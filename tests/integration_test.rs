//! Tests de integración de ambas variantes del servidor
//! tests/integration_test.rs
//!
//! Cada test arranca su propia instancia en un puerto efímero y le
//! dispara requests reales por `TcpStream`, verificando las propiedades
//! observables del sistema: gate de autenticación, monotonía del
//! contador, eco byte a byte, Content-Length, 404/405, timeout 408 y el
//! solapamiento de handlers lentos en la variante concurrente.

use socket_server::auth::CustomId;
use socket_server::config::Config;
use socket_server::server::{ConcurrentServer, SequentialServer, ServerContext};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Token que esperan los servidores arrancados con `Config::default()`
fn token() -> String {
    CustomId::derive("20229043792", "Victor Rodrigues Luz")
        .token()
        .to_string()
}

fn config_efimera(timeout_secs: Option<u64>) -> Config {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.timeout_lectura_secs = timeout_secs;
    config
}

/// Arranca un servidor secuencial en background y retorna su dirección
fn start_sequential(timeout_secs: Option<u64>) -> (SocketAddr, Arc<ServerContext>) {
    let server = SequentialServer::bind(config_efimera(timeout_secs)).expect("bind");
    let addr = server.local_addr().expect("local_addr");
    let ctx = Arc::clone(server.context());
    thread::spawn(move || {
        let _ = server.run();
    });
    (addr, ctx)
}

/// Arranca un servidor concurrente en background y retorna su dirección
fn start_concurrent(timeout_secs: Option<u64>) -> (SocketAddr, Arc<ServerContext>) {
    let server = ConcurrentServer::bind(config_efimera(timeout_secs)).expect("bind");
    let addr = server.local_addr().expect("local_addr");
    let ctx = Arc::clone(server.context());
    thread::spawn(move || {
        let _ = server.run();
    });
    (addr, ctx)
}

/// Envía bytes crudos y retorna la respuesta completa como texto
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .expect("set_read_timeout");
    stream.write_all(raw).expect("write");
    stream.flush().expect("flush");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    String::from_utf8_lossy(&response).into_owned()
}

fn send_get(addr: SocketAddr, path: &str, custom_id: Option<&str>) -> String {
    let header = match custom_id {
        Some(valor) => format!("X-Custom-ID: {}\r\n", valor),
        None => String::new(),
    };
    let raw = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n{}\r\n", path, header);
    send_raw(addr, raw.as_bytes())
}

fn send_post(addr: SocketAddr, path: &str, custom_id: &str, body: &str) -> String {
    let raw = format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\nX-Custom-ID: {}\r\nContent-Length: {}\r\n\r\n{}",
        path,
        custom_id,
        body.len(),
        body
    );
    send_raw(addr, raw.as_bytes())
}

/// Extrae el body de una respuesta HTTP (lo que sigue a la línea vacía)
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

/// Extrae el valor de un header de la respuesta
fn extract_header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{}: ", name);
    response
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}

fn json_body(response: &str) -> serde_json::Value {
    serde_json::from_str(extract_body(response)).expect("body JSON")
}

// ==================== Gate de autenticación ====================

#[test]
fn test_request_sin_token_es_400() {
    let (addr, ctx) = start_sequential(None);

    let response = send_get(addr, "/", None);

    assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
    assert!(extract_body(&response).contains("X-Custom-ID inválido o ausente"));
    // el fallo de autenticación no incrementa el contador
    assert_eq!(ctx.counter().current(), 0);
}

#[test]
fn test_request_con_token_incorrecto_es_400() {
    let (addr, ctx) = start_sequential(None);

    let response = send_get(addr, "/info", Some("token-falso"));

    assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
    assert_eq!(ctx.counter().current(), 0);
}

#[test]
fn test_response_ecoa_el_token_siempre() {
    let (addr, _ctx) = start_sequential(None);

    // incluso en un 400, la respuesta lleva el token del servidor
    let response = send_get(addr, "/", None);
    assert_eq!(extract_header(&response, "X-Custom-ID"), Some(token().as_str()));

    let response = send_get(addr, "/", Some(token().as_str()));
    assert_eq!(extract_header(&response, "X-Custom-ID"), Some(token().as_str()));
}

// ==================== Headers fijos ====================

#[test]
fn test_headers_fijos_en_toda_respuesta() {
    let (addr, _ctx) = start_sequential(None);
    let response = send_get(addr, "/status", Some(token().as_str()));

    assert_eq!(
        extract_header(&response, "Content-Type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(
        extract_header(&response, "Server"),
        Some("Secuencial-Socket/Redes-II")
    );
    assert_eq!(extract_header(&response, "Connection"), Some("close"));
    assert!(extract_header(&response, "Date").unwrap().ends_with(" GMT"));
}

#[test]
fn test_content_length_es_longitud_en_bytes() {
    let (addr, _ctx) = start_sequential(None);

    // body con caracteres multi-byte
    let payload = "ação não café";
    let response = send_post(addr, "/api/echo", &token(), payload);

    let length: usize = extract_header(&response, "Content-Length")
        .expect("Content-Length")
        .parse()
        .expect("numérico");
    assert_eq!(length, extract_body(&response).len());
    assert!(extract_body(&response).len() > extract_body(&response).chars().count());
}

// ==================== Contador de requests ====================

#[test]
fn test_contador_monotonico_secuencial() {
    let (addr, ctx) = start_sequential(None);
    let token = token();

    for esperado in 1..=5u64 {
        let response = send_get(addr, "/status", Some(&token));
        let body = json_body(&response);
        assert_eq!(body["requests_processed"], esperado);
    }
    assert_eq!(ctx.counter().current(), 5);
}

#[test]
fn test_contador_exacto_bajo_concurrencia() {
    // 5 workers x 10 requests: taxa de éxito 100% y contador exacto
    let (addr, ctx) = start_concurrent(None);
    let token = token();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let token = token.clone();
        handles.push(thread::spawn(move || {
            let mut exitosos = 0;
            for _ in 0..10 {
                let response = send_get(addr, "/status", Some(&token));
                if response.starts_with("HTTP/1.1 200 OK") {
                    exitosos += 1;
                }
            }
            exitosos
        }));
    }

    let exitosos: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(exitosos, 50);
    assert_eq!(ctx.counter().current(), 50);
}

// ==================== Routing ====================

#[test]
fn test_ruta_desconocida_es_404() {
    let (addr, ctx) = start_sequential(None);

    let response = send_get(addr, "/does-not-exist", Some(token().as_str()));

    assert!(response.starts_with("HTTP/1.1 404 Not Found"));
    // el 404 autenticado sí cuenta
    assert_eq!(ctx.counter().current(), 1);
}

#[test]
fn test_metodo_put_es_405() {
    let (addr, _ctx) = start_sequential(None);

    let raw = format!(
        "PUT /info HTTP/1.1\r\nHost: localhost\r\nX-Custom-ID: {}\r\n\r\n",
        token()
    );
    let response = send_raw(addr, raw.as_bytes());

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed"));
}

#[test]
fn test_head_raiz_200_sin_body() {
    let (addr, _ctx) = start_sequential(None);

    let response = send_raw(addr, b"HEAD / HTTP/1.1\r\nHost: localhost\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("0"));
    assert!(extract_body(&response).is_empty());
}

#[test]
fn test_head_otra_ruta_404() {
    let (addr, _ctx) = start_sequential(None);

    let response = send_raw(addr, b"HEAD /info HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 404 Not Found"));
}

#[test]
fn test_pagina_index_html() {
    let (addr, _ctx) = start_sequential(None);
    let token = token();

    for path in ["/", "/index.html"] {
        let response = send_get(addr, path, Some(&token));
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert_eq!(
            extract_header(&response, "Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert!(extract_body(&response).contains("Servidor Web Secuencial"));
        assert!(extract_body(&response).contains(&token));
    }
}

// ==================== Eco ====================

#[test]
fn test_eco_byte_a_byte() {
    let (addr, _ctx) = start_concurrent(None);

    let payload = r#"línea con "comillas" & símbolos: ç, ñ, 日本語, \backslash"#;
    let response = send_post(addr, "/api/echo", &token(), payload);

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    let body = json_body(&response);
    assert_eq!(body["echo"], payload);
    assert_eq!(body["received_bytes"], payload.len());
}

// ==================== Timeout ====================

#[test]
fn test_cliente_mudo_recibe_408() {
    let (addr, _ctx) = start_sequential(Some(1));

    let inicio = Instant::now();
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .expect("set_read_timeout");
    // headers incompletos y silencio
    stream.write_all(b"GET / HTTP/1.1\r\n").expect("write");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    let text = String::from_utf8_lossy(&response);

    assert!(text.starts_with("HTTP/1.1 408 Request Timeout"));
    assert!(inicio.elapsed() >= Duration::from_secs(1));

    // el servidor no quedó colgado: el siguiente request funciona
    let response = send_get(addr, "/status", Some(token().as_str()));
    assert!(response.starts_with("HTTP/1.1 200 OK"));
}

// ==================== Concurrencia real ====================

#[test]
fn test_handlers_lentos_se_solapan() {
    // 4 POST /api/batch en paralelo (0.5 s de latencia simulada cada
    // uno): si se solapan, el tiempo total queda muy por debajo de los
    // 2 s que costarían en serie
    let (addr, _ctx) = start_concurrent(None);
    let token = token();

    let inicio = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let token = token.clone();
        handles.push(thread::spawn(move || {
            send_post(addr, "/api/batch", &token, "a,b,c")
        }));
    }
    for handle in handles {
        let response = handle.join().unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
    }
    let total = inicio.elapsed();

    assert!(total >= Duration::from_millis(500));
    assert!(
        total < Duration::from_millis(1500),
        "los 4 batch tardaron {:?}, no se solaparon",
        total
    );
}

#[test]
fn test_secuencial_serializa_la_latencia() {
    // el mismo par de requests con latencia simulada, contra la
    // variante secuencial, se atiende en serie
    let (addr, _ctx) = start_sequential(None);
    let token = token();

    // /api/data secuencial duerme 10 ms; en serie, 2 requests >= 20 ms
    let inicio = Instant::now();
    let t1 = {
        let token = token.clone();
        thread::spawn(move || send_post(addr, "/api/data", &token, "x"))
    };
    let t2 = {
        let token = token.clone();
        thread::spawn(move || send_post(addr, "/api/data", &token, "y"))
    };
    assert!(t1.join().unwrap().starts_with("HTTP/1.1 200 OK"));
    assert!(t2.join().unwrap().starts_with("HTTP/1.1 200 OK"));

    assert!(inicio.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_heavy_no_bloquea_otros_requests() {
    let (addr, _ctx) = start_concurrent(None);
    let token = token();

    // lanzar /heavy (2 s) y de inmediato un /status: el /status debe
    // responder mucho antes de que /heavy termine
    let heavy = {
        let token = token.clone();
        thread::spawn(move || send_get(addr, "/heavy", Some(&token)))
    };
    thread::sleep(Duration::from_millis(100));

    let inicio = Instant::now();
    let response = send_get(addr, "/status", Some(&token));
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(inicio.elapsed() < Duration::from_secs(1));

    let heavy_response = heavy.join().unwrap();
    assert!(heavy_response.starts_with("HTTP/1.1 200 OK"));
    assert!(extract_body(&heavy_response).contains("heavy_processing"));
}
