//! Request ID middleware.
//!
//! Every request is stamped with an ID that shows up in the tracing span,
//! the `X-Request-ID` response header, and error bodies. An ID supplied
//! by a client or load balancer is reused when it looks sane; anything
//! else is replaced with a fresh UUID.

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The ID assigned to the current request.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Reuse an incoming ID only if it is short and plain ASCII, so a hostile
/// header cannot pollute logs or response headers.
fn incoming_id(req: &ServiceRequest) -> Option<RequestId> {
    let raw = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let acceptable = (1..=64).contains(&raw.len())
        && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    acceptable.then(|| RequestId(raw.to_string()))
}

pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = incoming_id(&req).unwrap_or_else(RequestId::fresh);
        req.extensions_mut().insert(id.clone());

        // Instrument the whole request future so every log line emitted
        // while handling it carries the ID, including across awaits.
        let span = tracing::info_span!(
            "request",
            request_id = %id.as_str(),
            method = %req.method(),
            path = %req.path(),
        );

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;

                if let Ok(value) = HeaderValue::from_str(id.as_str()) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}

impl actix_web::FromRequest for RequestId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::fresh);

        ready(Ok(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn sane_incoming_id_is_reused() {
        let req = TestRequest::default()
            .insert_header(("X-Request-ID", "lb-1234-abcd"))
            .to_srv_request();

        let id = incoming_id(&req).unwrap();
        assert_eq!(id.as_str(), "lb-1234-abcd");
    }

    #[test]
    fn oversized_or_odd_incoming_ids_are_rejected() {
        let req = TestRequest::default()
            .insert_header(("X-Request-ID", "a".repeat(65)))
            .to_srv_request();
        assert!(incoming_id(&req).is_none());

        let req = TestRequest::default()
            .insert_header(("X-Request-ID", "has spaces!"))
            .to_srv_request();
        assert!(incoming_id(&req).is_none());

        let req = TestRequest::default().to_srv_request();
        assert!(incoming_id(&req).is_none());
    }
}
