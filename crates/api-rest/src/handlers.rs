//! REST handlers.
//!
//! Each request builds its own form instance, optionally submits validation errors to it, and
//! returns the rendered view. The form instance never outlives the handler.

use crate::AppState;
use admin_forms_core::constants::BLOCK_PREFIX;
use admin_forms_core::{FormError, FormOptions, FormResult, FormSubmission, FormView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Rendered form: fields in order, plus `tabs` and `groups` render variables.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormRes {
    #[schema(value_type = Object)]
    pub form: FormView,
}

/// Validation errors of a submission, keyed by field name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubmitReq {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub errors: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    /// Form type identifier; defaults to the current admin form type.
    #[serde(rename = "type")]
    pub form_type: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "admin forms REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/forms/{entity}/{view}",
    params(
        ("entity" = String, Path, description = "Configured entity name"),
        ("view" = String, Path, description = "Entity view, e.g. new or edit"),
        ("type" = Option<String>, Query, description = "Form type identifier")
    ),
    responses(
        (status = 200, description = "Rendered form", body = FormRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Unknown entity or form type"),
        (status = 500, description = "Internal server error")
    )
)]
/// Build the form of an entity view.
///
/// # Errors
/// Returns `404 Not Found` for an unknown entity or form type, `400 Bad Request` for invalid
/// input and `500 Internal Server Error` for configurator failures.
#[axum::debug_handler]
pub async fn show_form(
    State(state): State<AppState>,
    Path((entity, view)): Path<(String, String)>,
    Query(query): Query<FormQuery>,
) -> Result<Json<FormRes>, (StatusCode, &'static str)> {
    match render_form(&state, entity, view, query.form_type.as_deref(), None) {
        Ok(form) => Ok(Json(FormRes { form })),
        Err(e) => Err(error_response("Render form", &e)),
    }
}

#[utoipa::path(
    post,
    path = "/forms/{entity}/{view}/submit",
    params(
        ("entity" = String, Path, description = "Configured entity name"),
        ("view" = String, Path, description = "Entity view, e.g. new or edit"),
        ("type" = Option<String>, Query, description = "Form type identifier")
    ),
    request_body = SubmitReq,
    responses(
        (status = 200, description = "Rendered form after error routing", body = FormRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Unknown entity or form type"),
        (status = 500, description = "Internal server error")
    )
)]
/// Build the form of an entity view and route the submitted validation errors to its tabs.
///
/// The response marks the tab holding the first erroneous field as active and carries the
/// error count of every tab.
#[axum::debug_handler]
pub async fn submit_form(
    State(state): State<AppState>,
    Path((entity, view)): Path<(String, String)>,
    Query(query): Query<FormQuery>,
    Json(req): Json<SubmitReq>,
) -> Result<Json<FormRes>, (StatusCode, &'static str)> {
    let submission = FormSubmission { errors: req.errors };
    match render_form(
        &state,
        entity,
        view,
        query.form_type.as_deref(),
        Some(&submission),
    ) {
        Ok(form) => Ok(Json(FormRes { form })),
        Err(e) => Err(error_response("Submit form", &e)),
    }
}

fn render_form(
    state: &AppState,
    entity: String,
    view: String,
    form_type: Option<&str>,
    submission: Option<&FormSubmission>,
) -> FormResult<FormView> {
    let assembler = state.registry.get(form_type.unwrap_or(BLOCK_PREFIX))?;
    let mut form = assembler.build_form(&state.config, FormOptions::new(entity, view))?;
    if let Some(submission) = submission {
        form.submit(submission)?;
    }
    Ok(FormView::from_form(&form))
}

fn error_response(context: &str, error: &FormError) -> (StatusCode, &'static str) {
    match error {
        FormError::EntityNotFound(_) => (StatusCode::NOT_FOUND, "Entity not found"),
        FormError::UnknownFormType(_) => (StatusCode::NOT_FOUND, "Form type not found"),
        FormError::MissingOption(_) | FormError::InvalidInput(_) => {
            (StatusCode::BAD_REQUEST, "Bad request")
        }
        _ => {
            tracing::error!("{} error: {:?}", context, error);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{router, AppState};
    use admin_forms_core::ConfigManager;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    const CONFIG_YAML: &str = r#"entities:
  Product:
    class: App\Entity\Product
    views:
      edit:
        fields:
          general: { type: tab, label: General }
          name: { type: text }
          pricing: { type: tab, label: Pricing }
          price: { type: money }
          stock: { type: tab, label: Stock }
          quantity: { type: integer }
"#;

    fn app() -> axum::Router {
        let config = ConfigManager::from_yaml_str(CONFIG_YAML).expect("parse config");
        router(AppState::new(config))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.expect("send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .expect("build request")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, json) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn show_form_renders_fields_and_tabs() {
        let (status, json) = send(get("/forms/Product/edit")).await;
        assert_eq!(status, StatusCode::OK);

        let form = &json["form"];
        assert_eq!(form["id"], "edit-product-form");
        assert_eq!(form["fields"].as_array().map(Vec::len), Some(3));
        assert_eq!(form["fields"][1]["name"], "price");
        assert_eq!(form["fields"][1]["tab"], "pricing");
        assert_eq!(form["tabs"]["general"]["active"], true);
        assert_eq!(form["tabs"]["pricing"]["active"], false);
    }

    #[tokio::test]
    async fn submit_form_activates_tab_with_errors() {
        let (status, json) = send(post_json(
            "/forms/Product/edit/submit",
            r#"{"errors": {"quantity": ["must be positive", "must be an integer"]}}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);

        let tabs = &json["form"]["tabs"];
        assert_eq!(tabs["stock"]["errors"], 2);
        assert_eq!(tabs["stock"]["active"], true);
        assert_eq!(tabs["general"]["active"], false);
        assert_eq!(tabs["pricing"]["errors"], 0);
        assert_eq!(json["form"]["submitted"], true);
    }

    #[tokio::test]
    async fn legacy_form_type_is_accepted() {
        let (status, json) = send(get("/forms/Product/edit?type=legacy_admin_form")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["form"]["entity"], "Product");
    }

    #[tokio::test]
    async fn unknown_entity_is_not_found() {
        let (status, _) = send(get("/forms/Invoice/edit")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_form_type_is_not_found() {
        let (status, _) = send(get("/forms/Product/edit?type=nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
