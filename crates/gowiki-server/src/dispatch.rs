//! Title extraction for page operations.
//!
//! Handlers never look at the request path. They take a [`Title`] extractor
//! parameterised by their operation; extraction runs the path classifier and
//! answers 404 before the handler body is reached when the path does not fit.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ServerError;
use crate::routing::{Operation, title_for};

/// Type-level tag naming the operation a handler serves.
pub(crate) trait OperationKind: Send + Sync + 'static {
    const OPERATION: Operation;
}

/// `/view/<title>`.
pub(crate) struct ViewOp;

/// `/edit/<title>`.
pub(crate) struct EditOp;

/// `/save/<title>`.
pub(crate) struct SaveOp;

impl OperationKind for ViewOp {
    const OPERATION: Operation = Operation::View;
}

impl OperationKind for EditOp {
    const OPERATION: Operation = Operation::Edit;
}

impl OperationKind for SaveOp {
    const OPERATION: Operation = Operation::Save;
}

/// A page title validated against the request path for operation `O`.
pub(crate) struct Title<O> {
    title: String,
    _operation: PhantomData<O>,
}

impl<O> Title<O> {
    pub(crate) fn into_inner(self) -> String {
        self.title
    }
}

impl<S, O> FromRequestParts<S> for Title<O>
where
    S: Send + Sync,
    O: OperationKind,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        match title_for(O::OPERATION, path) {
            Some(title) => Ok(Self {
                title: title.to_owned(),
                _operation: PhantomData,
            }),
            None => {
                tracing::debug!(path, operation = O::OPERATION.prefix(), "Rejected page path");
                Err(ServerError::RouteNotFound(path.to_owned()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn extract<O: OperationKind>(uri: &str) -> Result<String, ServerError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Title::<O>::from_request_parts(&mut parts, &())
            .await
            .map(Title::into_inner)
    }

    #[tokio::test]
    async fn test_extracts_title() {
        assert_eq!(extract::<ViewOp>("/view/Alpha").await.unwrap(), "Alpha");
        assert_eq!(extract::<EditOp>("/edit/Alpha").await.unwrap(), "Alpha");
        assert_eq!(extract::<SaveOp>("/save/Alpha").await.unwrap(), "Alpha");
    }

    #[tokio::test]
    async fn test_ignores_query_string() {
        assert_eq!(extract::<ViewOp>("/view/Alpha?x=1").await.unwrap(), "Alpha");
    }

    #[tokio::test]
    async fn test_rejects_invalid_title() {
        let err = extract::<ViewOp>("/view/bad%20title!").await.unwrap_err();

        assert!(matches!(err, ServerError::RouteNotFound(ref p) if p == "/view/bad%20title!"));
    }

    #[tokio::test]
    async fn test_rejects_mismatched_operation() {
        assert!(extract::<ViewOp>("/edit/Alpha").await.is_err());
        assert!(extract::<SaveOp>("/view/Alpha").await.is_err());
    }
}
