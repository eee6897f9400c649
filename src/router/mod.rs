//! # Sistema de Routing
//! src/router/mod.rs
//!
//! El router mapea (método, path) a su handler y aplica las dos reglas
//! transversales del servidor:
//!
//! 1. **Gate de autenticación**: todo GET y POST debe traer el header
//!    `X-Custom-ID` con el token del servidor; si falta o no coincide se
//!    responde 400 sin tocar el contador.
//! 2. **Contador de requests**: se incrementa exactamente una vez por
//!    request autenticado, antes del dispatch — los 404 autenticados
//!    también cuentan.
//!
//! HEAD y los métodos no soportados se resuelven antes del gate, como
//! en el comportamiento observado: HEAD `/` responde 200 sin body, HEAD
//! en cualquier otra ruta 404, y cualquier otro verbo 405.

use crate::handlers;
use crate::http::{Method, Request, Response, StatusCode};
use crate::server::{ServerContext, ServerMode};

/// Tipo de función handler
///
/// Recibe el request, el contexto compartido y el número de request ya
/// asignado por el router.
pub type Handler = fn(&Request, &ServerContext, u64) -> Response;

/// Router con tablas de rutas separadas por método
#[derive(Debug)]
pub struct Router {
    get_routes: Vec<(String, Handler)>,
    post_routes: Vec<(String, Handler)>,
}

impl Router {
    /// Crea un router vacío
    pub fn new() -> Self {
        Self {
            get_routes: Vec::new(),
            post_routes: Vec::new(),
        }
    }

    /// Crea el router con la tabla de rutas de la variante indicada
    ///
    /// `/heavy` y `/api/batch` solo existen en la variante concurrente.
    pub fn for_mode(mode: ServerMode) -> Self {
        let mut router = Router::new();

        router.register_get("/", handlers::index);
        router.register_get("/index.html", handlers::index);
        router.register_get("/info", handlers::info);
        router.register_get("/status", handlers::status);

        router.register_post("/api/data", handlers::api_data);
        router.register_post("/api/echo", handlers::api_echo);

        if mode == ServerMode::Concurrente {
            router.register_get("/heavy", handlers::heavy);
            router.register_post("/api/batch", handlers::api_batch);
        }

        router
    }

    /// Registra una ruta GET
    pub fn register_get(&mut self, path: &str, handler: Handler) {
        self.get_routes.push((path.to_string(), handler));
    }

    /// Registra una ruta POST
    pub fn register_post(&mut self, path: &str, handler: Handler) {
        self.post_routes.push((path.to_string(), handler));
    }

    /// Resuelve un request completo a su respuesta
    pub fn route(&self, request: &Request, ctx: &ServerContext) -> Response {
        match request.method() {
            Method::Get => self.route_authenticated(request, ctx, &self.get_routes),
            Method::Post => self.route_authenticated(request, ctx, &self.post_routes),
            Method::Head => Self::route_head(request),
            Method::Other(_) => Response::error(StatusCode::MethodNotAllowed, "Método No Permitido"),
        }
    }

    /// Gate de autenticación + contador + dispatch por path
    fn route_authenticated(
        &self,
        request: &Request,
        ctx: &ServerContext,
        routes: &[(String, Handler)],
    ) -> Response {
        let header = request.header(crate::auth::CUSTOM_ID_HEADER);
        if !ctx.custom_id().validate(header) {
            // sin incremento del contador en fallo de autenticación
            return Response::error(StatusCode::BadRequest, "X-Custom-ID inválido o ausente");
        }

        let request_num = ctx.counter().increment();

        for (route_path, handler) in routes {
            if route_path == request.path() {
                return handler(request, ctx, request_num);
            }
        }

        let disponibles = routes
            .iter()
            .map(|(path, _)| path.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let body = format!(
            "<h1>404 - Recurso No Encontrado</h1><p>Use: {}</p>",
            disponibles
        );
        Response::html(StatusCode::NotFound, &body)
    }

    /// HEAD: 200 sin body en `/`, 404 en el resto; sin gate ni contador
    fn route_head(request: &Request) -> Response {
        if request.path() == "/" {
            Response::new(StatusCode::Ok)
        } else {
            Response::new(StatusCode::NotFound)
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
