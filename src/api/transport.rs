use crate::api::error::ApiError;
use crate::storage::document_cookie_value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub(crate) enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn is_mutating(self) -> bool {
        !matches!(self, Method::Get)
    }
}

/// Fully built request, independent of the HTTP stack that sends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between `ApiClient` and the network.
///
/// The browser implementation is [`FetchTransport`]; tests substitute a
/// recording fake.
#[allow(async_fn_in_trait)]
pub(crate) trait Transport {
    /// Raw value of a cookie visible to the page, if set.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Send a request. `Err` only when no response arrived at all.
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `fetch`-backed transport (reqwest's wasm client) with `credentials: include`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FetchTransport;

impl Transport for FetchTransport {
    fn cookie(&self, name: &str) -> Option<String> {
        document_cookie_value(name)
    }

    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let client = reqwest::Client::new();
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = client.request(method, &req.url);
        for (name, value) in &req.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        // Session and CSRF cookies live on the API origin.
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        let res = builder.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        // An unreadable body is treated like an empty one.
        let body = res.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Records every request and answers from a queue of canned responses.
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        pub cookies: Rc<RefCell<Vec<(String, String)>>>,
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
        pub responses: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    }

    impl FakeTransport {
        pub fn with_cookie(self, name: &str, value: &str) -> Self {
            self.cookies
                .borrow_mut()
                .push((name.to_string(), value.to_string()));
            self
        }

        pub fn respond(&self, status: u16, body: impl Into<String>) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.into(),
            }));
        }

        pub fn respond_json(&self, status: u16, body: serde_json::Value) {
            self.respond(status, body.to_string());
        }

        pub fn fail(&self, message: &str) {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Network(message.to_string())));
        }

        pub fn sent(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn cookie(&self, name: &str) -> Option<String> {
            self.cookies
                .borrow()
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }

        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_string())))
        }
    }
}
