use actix_web::{http::StatusCode, post, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::{DraftResponse, OutreachForm};

/// Run the pipeline and return the result as JSON
#[post("/api/draft")]
pub async fn create_draft(
    req: web::Json<OutreachForm>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let form = req.into_inner();
    let outcome = state.workflow.run(&form).await;

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        outcome
            .error
            .as_ref()
            .and_then(|e| StatusCode::from_u16(e.status_code()).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };

    Ok(HttpResponse::build(status).json(DraftResponse::from_outcome(form.category, outcome)))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure;
    use crate::test_support::{test_state, ScriptedGenerator};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn payload() -> Value {
        json!({
            "category": "grant",
            "description": "NSF grant to build open online physics labs",
            "key_message": "We can turn your labs into interactive courses",
            "contact_name": "Dr. Lee",
            "contact_title": "Principal Investigator"
        })
    }

    #[actix_web::test]
    async fn test_draft_success() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("Physics labs grant."), Ok("Dear Dr. Lee,")]));
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(generator.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/draft").set_json(payload()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["category"], "grant");
        assert_eq!(body["shortened"], "Physics labs grant.");
        assert_eq!(body["email"], "Dear Dr. Lee,");
        assert!(body["error"].is_null());
        assert!(body["draft_id"].is_string());
    }

    #[actix_web::test]
    async fn test_draft_without_key_is_503() {
        let app = test::init_service(App::new().app_data(test_state(None)).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/draft").set_json(payload()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "configuration");
        assert!(body["shortened"].is_null());
    }

    #[actix_web::test]
    async fn test_draft_compose_failure_is_502() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("summary"), Err("Completion API error (500)")]));
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(generator.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/draft").set_json(payload()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["stage"], "composing");
        assert_eq!(body["shortened"], "summary");
        assert!(body["email"].is_null());
    }
}
