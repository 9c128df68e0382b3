use crate::helpers::spawn_app;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn submit_contact_returns_200_and_defaults_the_message() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.store_server)
        .await;

    // Act
    let response = app
        .post_contact(&json!({"name": "Jane", "email": "jane@x.com", "role": "caregiver"}))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": true, "message": "Form submitted successfully"})
    );

    let rows = app.stored_rows("contact_submissions").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Jane");
    assert_eq!(rows[0]["email"], "jane@x.com");
    assert_eq!(rows[0]["role"], "caregiver");
    assert_eq!(rows[0]["message"], "");
    assert!(rows[0]["created_at"].is_string());
}

#[tokio::test]
async fn submit_contact_persists_the_message_when_present() {
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&app.store_server)
        .await;

    app.post_contact(&json!({
        "name": "Jane",
        "email": "jane@x.com",
        "role": "clinician",
        "message": "Do you integrate with EHRs?"
    }))
    .await;

    let rows = app.stored_rows("contact_submissions").await;
    assert_eq!(rows[0]["message"], "Do you integrate with EHRs?");
}

#[tokio::test]
async fn submit_contact_returns_400_when_required_fields_are_missing() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;
    let test_cases = vec![
        (json!({"email": "jane@x.com", "role": "caregiver"}), "missing name"),
        (json!({"name": "Jane", "role": "caregiver"}), "missing email"),
        (json!({"name": "Jane", "email": "jane@x.com"}), "missing role"),
        (json!({"name": "", "email": "jane@x.com", "role": "caregiver"}), "empty name"),
        (json!({"name": "Jane", "email": null, "role": "caregiver"}), "null email"),
        (json!({"name": 0, "email": "jane@x.com", "role": "caregiver"}), "zero name"),
        (json!({"name": "Jane", "email": "jane@x.com", "role": false}), "false role"),
        (json!({"message": "hello"}), "only a message"),
    ];

    for (body, description) in test_cases {
        let response = app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Missing required fields"}));
    }
}

#[tokio::test]
async fn submit_contact_reads_non_string_values_as_text() {
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app
        .post_contact(&json!({
            "name": "Jane",
            "email": "jane@x.com",
            "role": "caregiver",
            "message": 123
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let rows = app.stored_rows("contact_submissions").await;
    assert_eq!(rows[0]["message"], "123");
}

#[tokio::test]
async fn submit_contact_returns_400_for_an_invalid_email() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let response = app
        .post_contact(&json!({"name": "Jane", "email": "not-an-email", "role": "caregiver"}))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Please enter a valid email address"}));
}

#[tokio::test]
async fn repeated_submissions_from_one_address_are_all_accepted() {
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&app.store_server)
        .await;
    let body = json!({"name": "Jane", "email": "jane@x.com", "role": "caregiver"});

    let first = app.post_contact(&body).await;
    let second = app.post_contact(&body).await;

    assert_eq!(200, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
}

#[tokio::test]
async fn submit_contact_returns_500_when_the_store_rejects_the_insert() {
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "PGRST301",
            "message": "JWT expired"
        })))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app
        .post_contact(&json!({"name": "Jane", "email": "jane@x.com", "role": "caregiver"}))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Failed to store your submission. Please try again."})
    );
}

#[tokio::test]
async fn submit_contact_returns_500_when_the_store_does_not_answer_in_time() {
    let app = spawn_app().await;
    Mock::given(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(201).set_delay(std::time::Duration::from_secs(30)))
        .mount(&app.store_server)
        .await;

    let response = app
        .post_contact(&json!({"name": "Jane", "email": "jane@x.com", "role": "caregiver"}))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "An unexpected error occurred"}));
}

#[tokio::test]
async fn submit_contact_returns_500_for_a_malformed_body() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let response = app.post_raw("/api/contact", "name=Jane&role=caregiver").await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "An unexpected error occurred"}));
}
