//! Page operations: view, edit, save.
//!
//! Each handler receives its title through the [`Title`] extractor and talks
//! to the page store directly; there is no caching between requests.

use std::sync::Arc;

use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Response};
use gowiki_storage::Page;
use percent_encoding::percent_decode;

use crate::dispatch::{EditOp, SaveOp, Title, ViewOp};
use crate::error::ServerError;
use crate::handlers::found;
use crate::routing::Operation;
use crate::state::AppState;
use crate::templates::{EDIT, VIEW};

/// Editor form field carrying the page body.
const BODY_FIELD: &[u8] = b"body";

/// Decode the first `name` field of an urlencoded form as raw bytes.
///
/// Bodies are byte sequences, so nothing here assumes UTF-8. A missing field
/// yields an empty body.
fn form_value(form: &[u8], name: &[u8]) -> Vec<u8> {
    form.split(|&b| b == b'&')
        .find_map(|pair| {
            let mut parts = pair.splitn(2, |&b| b == b'=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or_default();
            (decode_component(key) == name).then(|| decode_component(value))
        })
        .unwrap_or_default()
}

/// `+` is a space; `%XX` is a byte. Malformed escapes pass through.
fn decode_component(component: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = component
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

/// Load `title`, mapping "does not exist yet" to `None`.
fn load_page(state: &AppState, title: &str) -> Result<Option<Page>, ServerError> {
    tracing::info!(title, "Loading page");
    match state.storage.load(title) {
        Ok(page) => Ok(Some(page)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Handle GET /view/{title}.
///
/// Missing pages redirect to the editor so they can be created.
pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    title: Title<ViewOp>,
) -> Result<Response, ServerError> {
    let title = title.into_inner();
    tracing::info!(operation = "view", title = %title, "Handling request");

    let Some(page) = load_page(&state, &title)? else {
        let location = Operation::Edit.path(&title);
        tracing::info!(title = %title, location = %location, "Page missing, redirecting");
        return Ok(found(&location));
    };

    Ok(Html(state.templates.render(VIEW, &page)?).into_response())
}

/// Handle GET /edit/{title}.
///
/// Missing pages open an empty editor.
pub(crate) async fn edit(
    State(state): State<Arc<AppState>>,
    title: Title<EditOp>,
) -> Result<Response, ServerError> {
    let title = title.into_inner();
    tracing::info!(operation = "edit", title = %title, "Handling request");

    let page = load_page(&state, &title)?.unwrap_or_else(|| Page::empty(title));

    Ok(Html(state.templates.render(EDIT, &page)?).into_response())
}

/// Handle POST /save/{title}.
pub(crate) async fn save(
    State(state): State<Arc<AppState>>,
    title: Title<SaveOp>,
    RawForm(form): RawForm,
) -> Result<Response, ServerError> {
    let title = title.into_inner();
    let body = form_value(&form, BODY_FIELD);
    tracing::info!(operation = "save", title = %title, bytes = body.len(), "Handling request");

    let page = Page::new(title, body);
    state.storage.save(&page)?;

    Ok(found(&Operation::View.path(&page.title)))
}

/// Handle GET /: redirect to the front page.
pub(crate) async fn front_page(State(state): State<Arc<AppState>>) -> Response {
    found(&Operation::View.path(&state.front_page))
}
