//! End-to-end submission behavior against in-memory and HTTP backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use landing_core::{FormKind, LandingConfig};
use landing_data::{FetchClient, FetchError, HttpTransport, RequestBuilder, Response};
use landing_forms::testing::{FakeForm, StubTransport};
use landing_forms::{
    Field, FormScope, FormSubmissionController, MessageKind, SubmissionOutcome, TokioTimer, ValidationError,
    NETWORK_ERROR_MESSAGE,
};
use tokio::sync::Notify;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "https://project.supabase.co";

fn controller_with(transport: impl HttpTransport + 'static) -> FormSubmissionController {
    FormSubmissionController::new(
        &LandingConfig::with_base_url(BASE),
        FetchClient::with_transport(transport),
        TokioTimer,
    )
}

fn waitlist(email: &str) -> FakeForm {
    FakeForm::new(FormKind::Waitlist)
        .with_value(Field::WaitlistEmail, email)
        .with_value(Field::WaitlistName, "Ada")
        .with_value(Field::WaitlistProfession, "engineer")
        .with_checked(Field::InterestedAndroid, true)
}

fn contact(name: &str, email: &str, message: &str) -> FakeForm {
    FakeForm::new(FormKind::Contact)
        .with_value(Field::ContactName, name)
        .with_value(Field::ContactEmail, email)
        .with_value(Field::ContactMessage, message)
}

#[tokio::test]
async fn test_empty_waitlist_email_never_posts() {
    let transport = StubTransport::new();
    let form = waitlist("");

    let outcome = controller_with(transport.clone()).submit_waitlist(&form).await;

    assert_eq!(transport.request_count(), 0);
    assert_eq!(
        form.status(),
        Some((
            "Please enter your email address.".to_string(),
            MessageKind::Error
        ))
    );
    assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
}

#[tokio::test]
async fn test_invalid_waitlist_email_never_posts() {
    let transport = StubTransport::new();
    let form = waitlist("ada@example");

    let outcome = controller_with(transport.clone()).submit_waitlist(&form).await;

    assert_eq!(transport.request_count(), 0);
    assert_eq!(outcome.message(), Some("Please enter a valid email address."));
}

#[tokio::test]
async fn test_short_contact_name_never_posts() {
    let transport = StubTransport::new();
    let form = contact("A", "not-an-email", "short");

    let outcome = controller_with(transport.clone()).submit_contact(&form).await;

    assert_eq!(transport.request_count(), 0);
    assert_eq!(
        outcome,
        SubmissionOutcome::Rejected {
            reason: ValidationError::NameTooShort,
            message: "Please enter your name (minimum 2 characters).".to_string()
        }
    );
    assert_eq!(form.status().unwrap().0, "Please enter your name (minimum 2 characters).");
}

#[tokio::test]
async fn test_waitlist_success_shows_message_and_clears_form() {
    let transport = StubTransport::new().reply(200, r#"{"message": "Welcome!"}"#);
    let form = waitlist("ada@example.com");

    controller_with(transport.clone()).submit_waitlist(&form).await;

    assert_eq!(form.status(), Some(("Welcome!".to_string(), MessageKind::Success)));
    assert_eq!(form.reset_count(), 1);
    assert_eq!(form.value(Field::WaitlistEmail), "");
    assert!(!form.loading());

    let sent = &transport.requests()[0];
    assert_eq!(sent.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        sent.body,
        serde_json::json!({
            "email": "ada@example.com",
            "name": "Ada",
            "profession": "engineer",
            "notify_ios": false,
            "interested_android": true
        })
    );
}

#[tokio::test]
async fn test_waitlist_refusal_shows_error_and_keeps_form() {
    let transport = StubTransport::new().reply(409, r#"{"error": "Email already registered"}"#);
    let form = waitlist("ada@example.com");

    let outcome = controller_with(transport).submit_waitlist(&form).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            status: 409,
            message: "Email already registered".to_string()
        }
    );
    assert_eq!(
        form.status(),
        Some(("Email already registered".to_string(), MessageKind::Error))
    );
    assert_eq!(form.reset_count(), 0);
    assert_eq!(form.value(Field::WaitlistEmail), "ada@example.com");
    assert_eq!(form.loading_history(), vec![true, false]);
}

#[tokio::test]
async fn test_transport_failure_shows_network_error_and_releases_button() {
    let transport = StubTransport::new().fail("connection reset");
    let form = contact("Ada", "ada@example.com", "I would like a demo please");

    let outcome = controller_with(transport).submit_contact(&form).await;

    assert!(matches!(outcome, SubmissionOutcome::NetworkError { .. }));
    assert_eq!(
        form.status(),
        Some((NETWORK_ERROR_MESSAGE.to_string(), MessageKind::Error))
    );
    assert!(!form.loading());
    assert_eq!(form.loading_history(), vec![true, false]);
}

#[tokio::test]
async fn test_non_json_success_is_a_network_error() {
    let transport = StubTransport::new().reply(200, "<html>OK</html>");
    let form = waitlist("ada@example.com");

    let outcome = controller_with(transport).submit_waitlist(&form).await;

    assert_eq!(outcome.message(), Some(NETWORK_ERROR_MESSAGE));
    assert_eq!(form.reset_count(), 0);
}

#[tokio::test]
async fn test_null_success_body_is_a_network_error() {
    let transport = StubTransport::new().reply(200, "null");
    let form = waitlist("ada@example.com");

    let outcome = controller_with(transport).submit_waitlist(&form).await;

    assert!(matches!(outcome, SubmissionOutcome::NetworkError { .. }));
    assert_eq!(form.status(), Some((NETWORK_ERROR_MESSAGE.to_string(), MessageKind::Error)));
    assert_eq!(form.reset_count(), 0);
    assert!(!form.loading());
}

#[tokio::test]
async fn test_contact_success_uses_default_copy() {
    let transport = StubTransport::new().reply(200, r#"{"message": ""}"#);
    let form = contact("  Ada  ", " ada@example.com ", "  I would like a demo please ");

    let outcome = controller_with(transport.clone()).submit_contact(&form).await;

    assert_eq!(
        outcome.message(),
        Some("Message sent successfully! We'll get back to you soon. 📧")
    );
    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{}/functions/v1/submit-contact", BASE));
    assert_eq!(
        sent.body,
        serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "I would like a demo please"
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_success_auto_hides_but_error_stays() {
    let transport = StubTransport::new()
        .reply(200, r#"{"message": "Welcome!"}"#)
        .reply(500, "{}");
    let controller = controller_with(transport);
    let ok = waitlist("ada@example.com");
    let failed = contact("Grace", "grace@example.com", "The download link is broken");

    controller.submit_waitlist(&ok).await;
    controller.submit_contact(&failed).await;

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert!(ok.status_visible());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!ok.status_visible());
    assert!(failed.status_visible());
}

/// Holds every request until released.
struct GatedTransport {
    gate: Arc<Notify>,
    inner: StubTransport,
}

#[async_trait]
impl HttpTransport for GatedTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.gate.notified().await;
        self.inner.send(request).await
    }
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_busy() {
    let gate = Arc::new(Notify::new());
    let inner = StubTransport::new().reply(200, r#"{"message": "Welcome!"}"#);
    let controller = controller_with(GatedTransport {
        gate: Arc::clone(&gate),
        inner: inner.clone(),
    });
    let form = waitlist("ada@example.com");

    let (first, (second, status_during)) = tokio::join!(controller.submit_waitlist(&form), async {
        while !controller.is_in_flight(FormKind::Waitlist) {
            tokio::task::yield_now().await;
        }
        assert!(!controller.is_in_flight(FormKind::Contact));
        let second = controller.submit_waitlist(&form).await;
        let status_during = form.status();
        gate.notify_one();
        (second, status_during)
    });

    assert_eq!(second, SubmissionOutcome::Busy);
    assert_eq!(status_during, None);
    assert!(first.is_success());
    assert_eq!(inner.request_count(), 1);
    assert!(!controller.is_in_flight(FormKind::Waitlist));
}

#[tokio::test]
async fn test_posts_to_edge_function_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/join-waitlist"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "email": "ada@example.com",
            "name": null,
            "profession": null,
            "notify_ios": true,
            "interested_android": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Welcome!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = FormSubmissionController::new(
        &LandingConfig::with_base_url(server.uri()),
        FetchClient::new(),
        TokioTimer,
    );
    let form = FakeForm::new(FormKind::Waitlist)
        .with_value(Field::WaitlistEmail, "ada@example.com")
        .with_checked(Field::NotifyIos, true);

    let outcome = controller.submit_waitlist(&form).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Succeeded {
            message: "Welcome!".to_string()
        }
    );
}

#[tokio::test]
async fn test_http_refusal_without_body_fields_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/submit-contact"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let controller = FormSubmissionController::new(
        &LandingConfig::with_base_url(server.uri()),
        FetchClient::new(),
        TokioTimer,
    );
    let form = contact("Ada", "ada@example.com", "Please call me back soon");

    let outcome = controller.submit_contact(&form).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Failed {
            status: 500,
            message: "Failed to send message. Please try again.".to_string()
        }
    );
}
