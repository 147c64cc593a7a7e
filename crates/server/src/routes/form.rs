use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::page::{render_page, PageView};
use crate::state::AppState;
use crate::types::OutreachForm;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Empty form page
#[get("/")]
pub async fn index(state: web::Data<Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    let form = OutreachForm::default();
    Ok(html(render_page(&PageView {
        form: &form,
        outcome: None,
        generation_enabled: state.workflow.generation_enabled(),
    })))
}

/// Submit the form and show the drafted email
#[post("/")]
pub async fn submit(
    form: web::Form<OutreachForm>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let form = form.into_inner();
    info!("Form submitted - Category: {}", form.category);

    let outcome = state.workflow.run(&form).await;

    Ok(html(render_page(&PageView {
        form: &form,
        outcome: Some(&outcome),
        generation_enabled: state.workflow.generation_enabled(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure;
    use crate::test_support::{test_state, ScriptedGenerator};
    use crate::types::OutreachForm;
    use actix_web::{http::StatusCode, test, App};
    use outreach_llm::Category;
    use std::sync::Arc;

    fn jane_form() -> OutreachForm {
        OutreachForm {
            category: Category::Job,
            description: "Seeking an online course designer for a 3-month contract".to_string(),
            key_message: "I can build interactive courses fast".to_string(),
            contact_name: "Jane Doe".to_string(),
            contact_title: "Director of Learning".to_string(),
            include_style_sample: false,
        }
    }

    async fn body_string(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_index_renders_form() {
        let app = test::init_service(App::new().app_data(test_state(None)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = body_string(resp).await;
        assert!(body.contains("Email Outreach Builder"));
        assert!(body.contains("generation-disabled"));
    }

    #[actix_web::test]
    async fn test_submit_shows_outputs() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("A 3-month course design contract."),
            Ok("Hi Jane,\nI build courses <fast>."),
        ]));
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(generator.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/").set_form(jane_form()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_string(resp).await;
        assert!(body.contains("<pre id=\"shortened\">A 3-month course design contract.</pre>"));
        assert!(body.contains("<pre id=\"email\">Hi Jane,\nI build courses &lt;fast&gt;.</pre>"));
        assert!(body.contains(">\nJane Doe</textarea>"));
        assert_eq!(generator.calls().len(), 2);
    }

    #[actix_web::test]
    async fn test_submit_without_key_reports_configuration_error() {
        let app = test::init_service(App::new().app_data(test_state(None)).configure(configure)).await;

        let req = test::TestRequest::post().uri("/").set_form(jane_form()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_string(resp).await;
        assert!(body.contains("Email generation is unavailable"));
        assert!(!body.contains("<pre"));
    }

    #[actix_web::test]
    async fn test_submit_shorten_failure_shows_error() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err("Request timed out after 60s")]));
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(generator.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/").set_form(jane_form()).to_request();
        let body = body_string(test::call_service(&app, req).await).await;

        assert!(body.contains("Could not shorten the description"));
        assert!(!body.contains("Your email"));
        assert_eq!(generator.calls().len(), 1);
    }

    #[actix_web::test]
    async fn test_submit_accepts_partial_form() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("T"), Ok("email")]));
        let app = test::init_service(
            App::new()
                .app_data(test_state(Some(generator.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload("category=grant&contact_name=Sam&include_style_sample=on")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let calls = generator.calls();
        assert!(calls[1].0.contains("LEAD RESEARCHER NAME: Sam"));
        assert!(calls[1].0.contains("starter template"));
    }
}
