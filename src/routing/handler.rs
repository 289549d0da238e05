use crate::error::AppResult;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Anything that can answer a request.
///
/// Implemented for plain closures `Fn(HttpRequest, web::Payload) -> impl Future<Output = HttpResponse>`
/// and by [`Router`](super::Router), so a router can sit at the bottom of a
/// middleware chain like any other handler.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: HttpRequest, payload: web::Payload)
    -> LocalBoxFuture<'static, HttpResponse>;
}

pub type BoxedHandler = Arc<dyn Handler>;

impl<F, Fut> Handler for F
where
    F: Fn(HttpRequest, web::Payload) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HttpResponse> + 'static,
{
    fn handle(
        &self,
        req: HttpRequest,
        payload: web::Payload,
    ) -> LocalBoxFuture<'static, HttpResponse> {
        Box::pin((self)(req, payload))
    }
}

/// Binds an endpoint fn to the service it needs.
///
/// The service is cloned per request; errors are rendered through
/// [`ResponseError`].
pub fn bind<S, F, Fut>(service: S, endpoint: F) -> impl Handler
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S, HttpRequest, web::Payload) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<HttpResponse>> + 'static,
{
    move |req: HttpRequest, payload: web::Payload| {
        let fut = endpoint(service.clone(), req, payload);
        async move { fut.await.unwrap_or_else(|e| e.error_response()) }
    }
}

/// actix `default_service` entry point: forwards every request to the
/// composed application handler.
pub async fn serve(
    entry: web::Data<BoxedHandler>,
    req: HttpRequest,
    payload: web::Payload,
) -> HttpResponse {
    entry.handle(req, payload).await
}
