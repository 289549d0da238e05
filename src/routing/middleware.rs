use super::handler::BoxedHandler;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpMessage, HttpRequest, web};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A handler decorator.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self)(next)
    }
}

/// Wraps `terminal` with `middlewares`. The first entry ends up outermost,
/// so it runs first on the way in and last on the way out. A middleware
/// that never calls its inner handler ends the chain there.
pub fn chain(terminal: BoxedHandler, middlewares: &[&dyn Middleware]) -> BoxedHandler {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |inner, middleware| middleware.wrap(inner))
}

/// Request id stored in the request extensions by [`request_id`].
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Propagates `x-request-id` (or mints a UUID v4) and echoes it on the response.
pub fn request_id(next: BoxedHandler) -> BoxedHandler {
    Arc::new(move |req: HttpRequest, payload: web::Payload| {
        let id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(id.clone()));

        let fut = next.handle(req, payload);
        async move {
            let mut res = fut.await;
            if let Ok(value) = HeaderValue::from_str(&id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            res
        }
    })
}

/// One log line per request with status and latency.
pub fn access_log(next: BoxedHandler) -> BoxedHandler {
    Arc::new(move |req: HttpRequest, payload: web::Payload| {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let rid = req
            .extensions()
            .get::<RequestId>()
            .map(|r| r.0.clone())
            .unwrap_or_else(|| "-".to_string());
        let started = Instant::now();

        let fut = next.handle(req, payload);
        async move {
            let res = fut.await;
            let status = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis();
            if res.status().is_server_error() {
                log::warn!("{method} {path} -> {status} ({elapsed_ms} ms) request_id={rid}");
            } else {
                log::info!("{method} {path} -> {status} ({elapsed_ms} ms) request_id={rid}");
            }
            res
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::serve;
    use actix_web::{App, HttpResponse, test};
    use std::sync::Mutex;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn tracer(name: &'static str, trace: Trace) -> impl Middleware {
        move |next: BoxedHandler| -> BoxedHandler {
            let trace = trace.clone();
            Arc::new(move |req: HttpRequest, payload: web::Payload| {
                trace.lock().unwrap().push(format!("{name}:pre"));
                let fut = next.handle(req, payload);
                let trace = trace.clone();
                async move {
                    let res = fut.await;
                    trace.lock().unwrap().push(format!("{name}:post"));
                    res
                }
            })
        }
    }

    fn terminal(trace: Trace) -> BoxedHandler {
        Arc::new(move |_req: HttpRequest, _payload: web::Payload| {
            trace.lock().unwrap().push("T".to_string());
            async { HttpResponse::Ok().body("done") }
        })
    }

    async fn call(entry: BoxedHandler, req: test::TestRequest) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(entry))
                .default_service(web::to(serve)),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn test_first_middleware_is_outermost() {
        let trace: Trace = Arc::default();
        let a = tracer("A", trace.clone());
        let b = tracer("B", trace.clone());
        let entry = chain(terminal(trace.clone()), &[&a, &b]);

        let res = call(entry, test::TestRequest::get().uri("/")).await;
        assert!(res.status().is_success());
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["A:pre", "B:pre", "T", "B:post", "A:post"]
        );
    }

    #[actix_web::test]
    async fn test_empty_chain_is_terminal() {
        let trace: Trace = Arc::default();
        let entry = chain(terminal(trace.clone()), &[]);

        let res = call(entry, test::TestRequest::get().uri("/")).await;
        assert!(res.status().is_success());
        assert_eq!(*trace.lock().unwrap(), vec!["T"]);
    }

    #[actix_web::test]
    async fn test_non_delegating_middleware_stops_chain() {
        let trace: Trace = Arc::default();
        let gate = |_next: BoxedHandler| -> BoxedHandler {
            Arc::new(|_req: HttpRequest, _payload: web::Payload| async {
                HttpResponse::Forbidden().finish()
            })
        };
        let inner = tracer("inner", trace.clone());
        let entry = chain(terminal(trace.clone()), &[&gate, &inner]);

        let res = call(entry, test::TestRequest::get().uri("/")).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);
        assert!(trace.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_request_id_is_generated() {
        let trace: Trace = Arc::default();
        let entry = chain(terminal(trace), &[&request_id, &access_log]);

        let res = call(entry, test::TestRequest::get().uri("/")).await;
        let id = res.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[actix_web::test]
    async fn test_request_id_is_propagated() {
        let trace: Trace = Arc::default();
        let entry = chain(terminal(trace), &[&request_id]);

        let res = call(
            entry,
            test::TestRequest::get()
                .uri("/")
                .insert_header((REQUEST_ID_HEADER, "abc-123")),
        )
        .await;
        assert_eq!(res.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    }
}
