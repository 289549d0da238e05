use super::handler::{BoxedHandler, Handler};
use super::matcher::matches;
use crate::error::AppError;
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RouteKey {
    method: Method,
    pattern: String,
}

/// Route table keyed by (method, pattern).
///
/// Built once at startup and shared read-only afterwards. Lookup tries the
/// exact pattern string first, then scans the registered patterns in
/// registration order and takes the first wildcard match.
#[derive(Default)]
pub struct Router {
    routes: HashMap<RouteKey, BoxedHandler>,
    // registration order, used by the wildcard scan
    order: Vec<RouteKey>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` + `pattern`. Registering the same
    /// key again replaces the handler but keeps its first scan position.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: impl Handler) -> &mut Self {
        let key = RouteKey {
            method,
            pattern: pattern.to_string(),
        };
        if self.routes.insert(key.clone(), Arc::new(handler)).is_none() {
            self.order.push(key);
        }
        self
    }

    pub fn get(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.add_route(Method::GET, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.add_route(Method::POST, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.add_route(Method::PUT, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.add_route(Method::DELETE, pattern, handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the handler for a request, or `None` for not-found.
    ///
    /// A path that only matches under a different method is reported as
    /// not-found as well.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<BoxedHandler> {
        let exact = RouteKey {
            method: method.clone(),
            pattern: path.to_string(),
        };
        if let Some(handler) = self.routes.get(&exact) {
            return Some(handler.clone());
        }

        self.order
            .iter()
            .filter(|key| key.method == *method)
            .find(|key| matches(&key.pattern, path))
            .and_then(|key| self.routes.get(key))
            .cloned()
    }
}

impl Handler for Router {
    fn handle(
        &self,
        req: HttpRequest,
        payload: web::Payload,
    ) -> LocalBoxFuture<'static, HttpResponse> {
        match self.resolve(req.method(), req.path()) {
            Some(handler) => handler.handle(req, payload),
            None => {
                let error = AppError::NotFound(format!(
                    "No route for {} {}",
                    req.method(),
                    req.path()
                ));
                Box::pin(async move { error.error_response() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::serve;
    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;

    fn label(name: &'static str) -> impl Handler {
        move |_req: HttpRequest, _payload: web::Payload| async move {
            HttpResponse::Ok().body(name)
        }
    }

    async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let entry: BoxedHandler = Arc::new(router);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(entry))
                .default_service(web::to(serve)),
        )
        .await;
        let req = actix_test::TestRequest::default()
            .method(method)
            .uri(uri)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[test]
    fn test_empty_router_resolves_nothing() {
        let router = Router::new();
        assert!(router.is_empty());
        assert!(router.resolve(&Method::GET, "/").is_none());
        assert!(router.resolve(&Method::GET, "/brands").is_none());
        assert!(router.resolve(&Method::POST, "/brands/1").is_none());
    }

    #[test]
    fn test_reregistration_keeps_single_entry() {
        let mut router = Router::new();
        router.get("/brands", label("first"));
        router.get("/brands", label("second"));
        assert_eq!(router.len(), 1);
        assert_eq!(router.order.len(), 1);
    }

    #[actix_web::test]
    async fn test_exact_route_dispatch() {
        let mut router = Router::new();
        router.get("/brands", label("list")).post("/brands", label("create"));

        let (status, body) = send(router, Method::POST, "/brands").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "create");
    }

    #[actix_web::test]
    async fn test_last_registration_wins() {
        let mut router = Router::new();
        router.get("/brands", label("first"));
        router.get("/brands", label("second"));

        let (_, body) = send(router, Method::GET, "/brands").await;
        assert_eq!(body, "second");
    }

    #[actix_web::test]
    async fn test_wildcard_dispatch() {
        let mut router = Router::new();
        router.put("/brands/:id", label("update"));

        let (status, body) = send(router, Method::PUT, "/brands/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "update");
    }

    #[actix_web::test]
    async fn test_exact_beats_wildcard() {
        let mut router = Router::new();
        router.get("/products/:id", label("one"));
        router.get("/products/filter", label("filter"));

        let (_, body) = send(router, Method::GET, "/products/filter").await;
        assert_eq!(body, "filter");
    }

    #[actix_web::test]
    async fn test_wildcard_scan_follows_registration_order() {
        let mut router = Router::new();
        router.get("/a/:x", label("first"));
        router.get("/:y/b", label("second"));

        let (_, body) = send(router, Method::GET, "/a/b").await;
        assert_eq!(body, "first");
    }

    #[actix_web::test]
    async fn test_other_method_is_not_found() {
        let mut router = Router::new();
        router.get("/brands/:id", label("one"));

        let (status, body) = send(router, Method::DELETE, "/brands/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_segment_count_mismatch_is_not_found() {
        let mut router = Router::new();
        router.get("/brands/:id", label("one"));

        let (status, _) = send(router, Method::GET, "/brands/1/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_empty_router_is_not_found() {
        let (status, _) = send(Router::new(), Method::GET, "/anything").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
