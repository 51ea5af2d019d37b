use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, Redirect},
};

use crate::application::PurchaseForm;
use crate::domain::PurchaseId;

use super::{WebError, WebState, page};

pub async fn index(State(state): State<WebState>) -> Result<Html<String>, WebError> {
    let overview = state.ledger.overview().await?;
    Ok(Html(page::render_index(&overview)))
}

/// Redirects to the listing whether the purchase was recorded or rejected.
///
/// A body that is not a url-encoded form is ignored like any other invalid
/// submission. Repeated keys keep their first value.
pub async fn submit(
    State(state): State<WebState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Redirect, WebError> {
    match form {
        Ok(Form(pairs)) => {
            state.ledger.submit(&PurchaseForm::from_pairs(pairs)).await?;
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable submission ignored");
        }
    }
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<WebState>,
    Path(id): Path<PurchaseId>,
) -> Result<Redirect, WebError> {
    state.ledger.delete_purchase(id).await?;
    Ok(Redirect::to("/"))
}

pub async fn clear(State(state): State<WebState>) -> Result<Redirect, WebError> {
    state.ledger.clear().await?;
    Ok(Redirect::to("/"))
}
