mod error;
pub(crate) mod transport;
mod validate;

pub(crate) use error::{ApiError, ApiResult, REQUEST_FAILED};
pub(crate) use transport::{FetchTransport, HttpRequest, Method, Transport};
pub(crate) use validate::{collect_valid, parse_note_or_err, validate_category, validate_note};

use crate::models::{CreateNotePayload, Credentials, NoteCategory, NoteItem, UpdateNotePayload};
use crate::storage::{CSRF_COOKIE, CSRF_HEADER};
use serde_json::Value;

pub(crate) const CSRF_PATH: &str = "/api/auth/csrf/";
pub(crate) const LOGIN_PATH: &str = "/api/auth/login/";
pub(crate) const SIGNUP_PATH: &str = "/api/auth/signup/";
pub(crate) const CATEGORIES_PATH: &str = "/api/categories/";
pub(crate) const NOTES_PATH: &str = "/api/notes/";

pub(crate) fn note_path(note_id: i64) -> String {
    format!("{NOTES_PATH}{note_id}/")
}

/// Form-encode `fields` as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a response body, substituting `{}` for anything that is not a
/// JSON object (empty body, HTML error page, bare array...).
pub(crate) fn decode_body(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(v) if v.is_object() => v,
        _ => Value::Object(Default::default()),
    }
}

/// REST client for the notes backend.
///
/// The base URL is injected at construction; a missing one only fails when a
/// request is attempted, before anything is sent.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient<T = FetchTransport> {
    pub(crate) base_url: Option<String>,
    transport: T,
}

impl ApiClient<FetchTransport> {
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_transport(base_url, FetchTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: Option<String>, transport: T) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    fn require_base_url(&self) -> ApiResult<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/'))
            .ok_or(ApiError::Config)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&'static str>,
        body: Option<String>,
    ) -> ApiResult<HttpRequest> {
        let url = format!("{}{}", self.require_base_url()?, path);

        let mut headers = Vec::new();
        if let Some(ct) = content_type {
            headers.push(("Content-Type", ct.to_string()));
        }
        if method.is_mutating() {
            // No pre-check: a missing cookie sends "" and the server rejects it.
            let token = self.transport.cookie(CSRF_COOKIE).unwrap_or_default();
            headers.push((CSRF_HEADER, token));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    async fn execute(&self, req: HttpRequest) -> ApiResult<Value> {
        let (method, url) = (req.method, req.url.clone());
        tracing::debug!(%method, %url, "api request");

        let res = self.transport.send(req).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request did not complete");
            e
        })?;

        let data = decode_body(&res.body);
        if !res.is_success() {
            let e = ApiError::from_body(&data);
            tracing::warn!(%method, %url, status = res.status, error = %e, "api request failed");
            return Err(e);
        }

        Ok(data)
    }

    pub async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let req = self.build(Method::Get, path, None, None)?;
        self.execute(req).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> ApiResult<Value> {
        let req = self.build(
            Method::Post,
            path,
            Some("application/x-www-form-urlencoded"),
            Some(encode_form(fields)),
        )?;
        self.execute(req).await
    }

    pub async fn patch_json(&self, path: &str, payload: &impl serde::Serialize) -> ApiResult<Value> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        let req = self.build(Method::Patch, path, Some("application/json"), Some(body))?;
        self.execute(req).await
    }

    /// Prime the `csrftoken` cookie.
    ///
    /// Every failure, a missing base URL included, maps to [`ApiError::Csrf`].
    pub async fn ensure_csrf_cookie(&self) -> ApiResult<()> {
        let req = self.build(Method::Get, CSRF_PATH, None, None).map_err(|e| {
            tracing::warn!(error = %e, "csrf priming not attempted");
            ApiError::Csrf
        })?;
        match self.transport.send(req).await {
            Ok(res) if res.is_success() => Ok(()),
            Ok(res) => {
                tracing::warn!(status = res.status, "csrf priming rejected");
                Err(ApiError::Csrf)
            }
            Err(e) => {
                tracing::warn!(error = %e, "csrf priming did not complete");
                Err(ApiError::Csrf)
            }
        }
    }

    pub async fn login_user(&self, credentials: &Credentials) -> ApiResult<Value> {
        self.post_form(
            LOGIN_PATH,
            &[
                ("username", credentials.username.clone()),
                ("password", credentials.password.clone()),
            ],
        )
        .await
    }

    pub async fn signup_user(&self, credentials: &Credentials) -> ApiResult<Value> {
        self.post_form(
            SIGNUP_PATH,
            &[
                ("username", credentials.username.clone()),
                ("password1", credentials.password.clone()),
                ("password2", credentials.password.clone()),
            ],
        )
        .await
    }

    pub async fn get_notes(&self) -> ApiResult<Vec<NoteItem>> {
        let data = self.get_json(NOTES_PATH).await?;
        Ok(collect_valid(&data, "notes", validate_note))
    }

    pub async fn get_categories(&self) -> ApiResult<Vec<NoteCategory>> {
        let data = self.get_json(CATEGORIES_PATH).await?;
        Ok(collect_valid(&data, "categories", validate_category))
    }

    pub async fn create_note(&self, payload: &CreateNotePayload) -> ApiResult<NoteItem> {
        let data = self.post_form(NOTES_PATH, &payload.form_fields()).await?;
        parse_note_or_err(&data)
    }

    pub async fn get_note(&self, note_id: i64) -> ApiResult<NoteItem> {
        let data = self.get_json(&note_path(note_id)).await?;
        parse_note_or_err(&data)
    }

    pub async fn update_note(
        &self,
        note_id: i64,
        payload: &UpdateNotePayload,
    ) -> ApiResult<NoteItem> {
        let data = self.patch_json(&note_path(note_id), payload).await?;
        parse_note_or_err(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::transport::fake::FakeTransport;
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn client(fake: &FakeTransport) -> ApiClient<FakeTransport> {
        ApiClient::with_transport(Some(BASE.to_string()), fake.clone())
    }

    fn note_json(id: i64) -> Value {
        json!({
            "id": id,
            "title": "Title",
            "content": "Content",
            "created_at": "2026-01-01T00:00:00Z",
            "edited_at": "2026-01-01T00:00:00Z",
            "category": { "id": 1, "name": "Random Thoughts", "color": "#EF9C66" },
            "user_id": 2
        })
    }

    #[test]
    fn test_encode_form_escapes_reserved_characters() {
        let body = encode_form(&[
            ("username", "a b&c".to_string()),
            ("password", "p=w".to_string()),
        ]);
        assert_eq!(body, "username=a%20b%26c&password=p%3Dw");
    }

    #[test]
    fn test_decode_body_substitutes_empty_object() {
        assert_eq!(decode_body("not json"), json!({}));
        assert_eq!(decode_body(""), json!({}));
        assert_eq!(decode_body("[1,2]"), json!({}));
        assert_eq!(decode_body(r#"{"a":1}"#), json!({ "a": 1 }));
    }

    #[test]
    fn test_missing_base_url_fails_before_sending() {
        for base in [None, Some(String::new()), Some("   ".to_string())] {
            let fake = FakeTransport::default();
            let api = ApiClient::with_transport(base, fake.clone());

            assert_eq!(block_on(api.get_notes()), Err(ApiError::Config));
            assert_eq!(block_on(api.ensure_csrf_cookie()), Err(ApiError::Csrf));
            assert!(fake.sent().is_empty());
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let fake = FakeTransport::default();
        fake.respond_json(200, json!({ "notes": [] }));
        let api = ApiClient::with_transport(Some(format!("{BASE}/")), fake.clone());

        block_on(api.get_notes()).expect("should load");
        assert_eq!(fake.sent()[0].url, "http://api.test/api/notes/");
    }

    #[test]
    fn test_get_notes_returns_valid_items_only() {
        let fake = FakeTransport::default();
        fake.respond_json(
            200,
            json!({ "notes": [note_json(1), { "id": 2 }, note_json(3), "junk"] }),
        );

        let notes = block_on(client(&fake).get_notes()).expect("should load");
        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let req = &fake.sent()[0];
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url, "http://api.test/api/notes/");
        // Reads carry no CSRF header.
        assert!(req.header(CSRF_HEADER).is_none());
    }

    #[test]
    fn test_collections_degrade_to_empty() {
        let fake = FakeTransport::default();
        fake.respond_json(200, json!({ "notes": { "not": "a list" } }));
        fake.respond_json(200, json!({ "categories": null }));
        fake.respond(200, "<html>oops</html>");

        let api = client(&fake);
        assert_eq!(block_on(api.get_notes()), Ok(vec![]));
        assert_eq!(block_on(api.get_categories()), Ok(vec![]));
        assert_eq!(block_on(api.get_categories()), Ok(vec![]));
    }

    #[test]
    fn test_get_categories_filters_invalid() {
        let fake = FakeTransport::default();
        fake.respond_json(
            200,
            json!({ "categories": [
                { "id": 1, "name": "Random Thoughts", "color": "#EF9C66" },
                { "id": 2, "name": "School" },
                { "id": 3, "name": "Personal", "color": "#78ABA8" }
            ] }),
        );

        let cats = block_on(client(&fake).get_categories()).expect("should load");
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Random Thoughts", "Personal"]);
    }

    #[test]
    fn test_error_detail_and_fallback() {
        let fake = FakeTransport::default();
        fake.respond_json(404, json!({ "detail": "Not found." }));
        fake.respond_json(500, json!({ "error": "boom" }));
        fake.respond(502, "Bad Gateway");

        let api = client(&fake);
        assert_eq!(
            block_on(api.get_note(9)),
            Err(ApiError::Server("Not found.".to_string()))
        );
        assert_eq!(
            block_on(api.get_note(9)).map_err(|e| e.to_string()),
            Err(REQUEST_FAILED.to_string())
        );
        assert_eq!(
            block_on(api.get_note(9)).map_err(|e| e.to_string()),
            Err(REQUEST_FAILED.to_string())
        );
    }

    #[test]
    fn test_network_failure_is_reported() {
        let fake = FakeTransport::default();
        fake.fail("Failed to fetch");
        assert_eq!(
            block_on(client(&fake).get_notes()),
            Err(ApiError::Network("Failed to fetch".to_string()))
        );
    }

    #[test]
    fn test_login_sends_form_body_and_csrf_header() {
        let fake = FakeTransport::default().with_cookie(CSRF_COOKIE, "tok");
        fake.respond_json(200, json!({ "id": 1, "username": "ana" }));

        let creds = Credentials {
            username: "ana".to_string(),
            password: "s3cret".to_string(),
        };
        let body = block_on(client(&fake).login_user(&creds)).expect("should log in");
        assert_eq!(body["username"], "ana");

        let req = &fake.sent()[0];
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "http://api.test/api/auth/login/");
        assert_eq!(req.header(CSRF_HEADER), Some("tok"));
        assert_eq!(
            req.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(req.body.as_deref(), Some("username=ana&password=s3cret"));
    }

    #[test]
    fn test_missing_cookie_sends_empty_csrf_token() {
        let fake = FakeTransport::default();
        fake.respond_json(403, json!({ "detail": "CSRF Failed: CSRF token missing." }));

        let creds = Credentials {
            username: "ana".to_string(),
            password: "pw".to_string(),
        };
        let err = block_on(client(&fake).login_user(&creds)).expect_err("should fail");
        assert_eq!(err.to_string(), "CSRF Failed: CSRF token missing.");
        assert_eq!(fake.sent()[0].header(CSRF_HEADER), Some(""));
    }

    #[test]
    fn test_signup_sends_password_twice() {
        let fake = FakeTransport::default().with_cookie(CSRF_COOKIE, "tok");
        fake.respond_json(201, json!({ "detail": "Account created." }));

        let creds = Credentials {
            username: "ana".to_string(),
            password: "pw".to_string(),
        };
        block_on(client(&fake).signup_user(&creds)).expect("should sign up");

        let req = &fake.sent()[0];
        assert_eq!(req.url, "http://api.test/api/auth/signup/");
        assert_eq!(
            req.body.as_deref(),
            Some("username=ana&password1=pw&password2=pw")
        );
    }

    #[test]
    fn test_ensure_csrf_cookie_without_base_url_reports_csrf_message() {
        let fake = FakeTransport::default();
        let api = ApiClient::with_transport(None, fake.clone());

        let err = block_on(api.ensure_csrf_cookie()).expect_err("no base URL");
        assert_eq!(err.to_string(), "Could not initialize CSRF cookie.");
        assert!(fake.sent().is_empty());
    }

    #[test]
    fn test_ensure_csrf_cookie_fixed_message() {
        let fake = FakeTransport::default();
        fake.respond(200, "");
        fake.respond_json(500, json!({ "detail": "server exploded" }));
        fake.fail("Failed to fetch");

        let api = client(&fake);
        assert_eq!(block_on(api.ensure_csrf_cookie()), Ok(()));
        assert_eq!(block_on(api.ensure_csrf_cookie()), Err(ApiError::Csrf));
        assert_eq!(
            block_on(api.ensure_csrf_cookie()).map_err(|e| e.to_string()),
            Err("Could not initialize CSRF cookie.".to_string())
        );
        assert_eq!(fake.sent()[0].url, "http://api.test/api/auth/csrf/");
    }

    #[test]
    fn test_create_note_posts_form_and_validates() {
        let fake = FakeTransport::default().with_cookie(CSRF_COOKIE, "tok");
        fake.respond_json(201, note_json(55));
        fake.respond_json(201, json!({ "id": 56 }));

        let api = client(&fake);
        let note = block_on(api.create_note(&CreateNotePayload::blank(1))).expect("created");
        assert_eq!(note.id, 55);
        assert_eq!(
            fake.sent()[0].body.as_deref(),
            Some("title=&content=&category_id=1")
        );

        assert_eq!(
            block_on(api.create_note(&CreateNotePayload::blank(1))),
            Err(ApiError::UnexpectedPayload)
        );
    }

    #[test]
    fn test_get_note_hits_entity_path() {
        let fake = FakeTransport::default();
        fake.respond_json(200, note_json(12));

        let note = block_on(client(&fake).get_note(12)).expect("loaded");
        assert_eq!(note.title, "Title");
        assert_eq!(fake.sent()[0].url, "http://api.test/api/notes/12/");
    }

    #[test]
    fn test_update_note_sends_partial_json() {
        let fake = FakeTransport::default().with_cookie(CSRF_COOKIE, "tok");
        let mut updated = note_json(12);
        updated["edited_at"] = json!("2026-01-01T00:01:00Z");
        fake.respond_json(200, updated);

        let payload = UpdateNotePayload {
            title: Some("Updated".to_string()),
            ..Default::default()
        };
        let note = block_on(client(&fake).update_note(12, &payload)).expect("updated");
        assert_eq!(note.edited_at, "2026-01-01T00:01:00Z");

        let req = &fake.sent()[0];
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.url, "http://api.test/api/notes/12/");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header(CSRF_HEADER), Some("tok"));
        let sent: Value = serde_json::from_str(req.body.as_deref().unwrap_or_default())
            .expect("json body");
        assert_eq!(sent, json!({ "title": "Updated" }));
    }

    #[test]
    fn test_update_note_rejects_payload_missing_edited_at() {
        let fake = FakeTransport::default();
        let mut broken = note_json(12);
        broken.as_object_mut().expect("object").remove("edited_at");
        fake.respond_json(200, broken);

        assert_eq!(
            block_on(client(&fake).update_note(12, &UpdateNotePayload::default())),
            Err(ApiError::UnexpectedPayload)
        );
    }

    #[test]
    fn test_server_error_wins_over_shape_error() {
        let fake = FakeTransport::default();
        fake.respond_json(400, json!({ "detail": "Title too long." }));

        assert_eq!(
            block_on(client(&fake).update_note(12, &UpdateNotePayload::default())),
            Err(ApiError::Server("Title too long.".to_string()))
        );
    }
}
