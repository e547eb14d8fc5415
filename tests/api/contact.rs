use crate::helpers::{OPERATOR_ADDRESS, envelope, spawn_app};
use reqwest::Method;
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Jane",
        "email": "jane@x.com",
        "subject": "Hi",
        "message": "Hello"
    })
}

#[tokio::test]
async fn contact_returns_a_200_for_a_valid_submission() {
    // Arrange
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    // Act
    let response = app.post_contact(&valid_body()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = envelope(response).await;
    assert!(body.success);
    assert_eq!(body.message, "Your message has been sent successfully!");
}

#[tokio::test]
async fn contact_notifies_the_operator_on_behalf_of_the_submitter() {
    // Arrange
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    // Act
    app.post_contact(&valid_body()).await;

    // Assert
    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email["to"][0]["email"], OPERATOR_ADDRESS);
    assert_eq!(email["from"]["email"], "jane@x.com");
    assert_eq!(email["reply_to"]["email"], "jane@x.com");
    assert_eq!(email["subject"], "Contact Form: Hi");
    let html = email["html"].as_str().unwrap();
    assert!(html.contains("<strong>Name:</strong> Jane"));
    assert!(html.contains("<strong>Subject:</strong> Hi"));
    assert!(html.contains("<p>Hello</p>"));
}

#[tokio::test]
async fn contact_returns_a_400_when_data_is_missing() {
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    let test_cases = vec![
        (
            json!({"email": "jane@x.com", "subject": "Hi", "message": "Hello"}),
            "missing the name",
        ),
        (
            json!({"name": "Jane", "subject": "Hi", "message": "Hello"}),
            "missing the email",
        ),
        (
            json!({"name": "Jane", "email": "jane@x.com", "message": "Hello"}),
            "missing the subject",
        ),
        (
            json!({"name": "Jane", "email": "jane@x.com", "subject": "Hi"}),
            "missing the message",
        ),
        (
            json!({"name": null, "email": "jane@x.com", "subject": "Hi", "message": "Hello"}),
            "a null name",
        ),
        (json!({}), "missing every field"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}",
            error_message
        );
        let body = envelope(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "Missing required fields");
    }
    assert!(app.sent_emails().await.is_empty());
}

#[tokio::test]
async fn contact_returns_a_400_when_the_body_is_not_json() {
    let app = spawn_app().await;

    for body in ["", "name=Jane", "{\"name\": "] {
        let response = app.post_raw("contact", body).await;

        assert_eq!(400, response.status().as_u16());
        let body = envelope(response).await;
        assert_eq!(body.message, "Missing required fields");
    }
}

#[tokio::test]
async fn contact_returns_a_400_when_the_email_is_invalid() {
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    for invalid_email in ["not-an-email", "a@b", "@b.com"] {
        let mut body = valid_body();
        body["email"] = json!(invalid_email);

        let response = app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not reject the email {}",
            invalid_email
        );
        let body = envelope(response).await;
        assert_eq!(body.message, "Invalid email format");
    }
    assert!(app.sent_emails().await.is_empty());
}

#[tokio::test]
async fn contact_accepts_markup_and_escapes_it_in_the_notification() {
    // Arrange
    let app = spawn_app().await;
    app.mock_email_api(200).await;
    let mut body = valid_body();
    body["message"] = json!("<script>alert('hi')</script>");

    // Act
    let response = app.post_contact(&body).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let emails = app.sent_emails().await;
    let html = emails[0]["html"].as_str().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn contact_returns_a_500_when_the_email_cannot_be_sent() {
    // Arrange
    let app = spawn_app().await;
    app.mock_email_api(500).await;

    // Act
    let response = app.post_contact(&valid_body()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body = envelope(response).await;
    assert!(!body.success);
    assert_eq!(
        body.message,
        "Failed to send your message. Please try again later."
    );
}

#[tokio::test]
async fn contact_does_not_touch_the_interest_log() {
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    app.post_contact(&valid_body()).await;

    assert!(app.log_rows().is_empty());
}

#[tokio::test]
async fn contact_rejects_methods_other_than_post_with_a_405() {
    let app = spawn_app().await;

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS] {
        let response = app.request(method.clone(), "contact").await;

        assert_eq!(
            405,
            response.status().as_u16(),
            "The API did not reject a {} request",
            method
        );
        let body = envelope(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "Method not allowed");
    }
}

#[tokio::test]
async fn contact_responses_allow_cross_origin_requests() {
    let app = spawn_app().await;
    app.mock_email_api(200).await;

    let ok = app.post_contact(&valid_body()).await;
    let rejected = app.request(Method::GET, "contact").await;

    for response in [ok, rejected] {
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}
