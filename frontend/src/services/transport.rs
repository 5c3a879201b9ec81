use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use shared::http::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// `fetch`-backed transport used in the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

struct GlooResponse(Response);

#[async_trait(?Send)]
impl HttpResponse for GlooResponse {
    fn status(&self) -> u16 {
        self.0.status()
    }

    fn status_text(&self) -> String {
        self.0.status_text()
    }

    async fn text(&self) -> Result<String, TransportError> {
        self.0
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<Box<dyn HttpResponse>, TransportError> {
        let mut builder = builder(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Box::new(GlooResponse(response)))
    }
}
