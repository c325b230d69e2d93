use wasm_bindgen::JsCast;

/// Cookie the backend sets from `GET /api/auth/csrf/`.
pub(crate) const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend expects the CSRF cookie value echoed in.
pub(crate) const CSRF_HEADER: &str = "X-CSRFToken";

/// Look up `name` in a `document.cookie` style string (`a=1; b=2`).
///
/// Values are percent-decoded; an undecodable value is returned raw.
pub(crate) fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    let key = format!("{name}=");
    let raw = cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|part| part.strip_prefix(&key))?;

    Some(
        urlencoding::decode(raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_string()),
    )
}

fn document_cookies() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    html.cookie().ok()
}

pub(crate) fn document_cookie_value(name: &str) -> Option<String> {
    // Outside a browser (native tests) there is no document.
    if !cfg!(target_arch = "wasm32") {
        return None;
    }
    read_cookie(&document_cookies()?, name)
}
