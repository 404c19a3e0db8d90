mod common;

use actix_web::{http::StatusCode, test};
use common::{client::TestClient, test_data, TestContext};

/// Register a student and log in, returning the access token.
async fn student_access<S, B>(app: &S, varsity_id: &str, email: &str, phone: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let payload = test_data::student_payload(varsity_id, email, phone, "abc123");
    let req = test::TestRequest::post()
        .uri("/register/student")
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/login/student")
        .set_json(serde_json::json!({"varsity_id": varsity_id, "password": "abc123"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: serde_json::Value = test::read_body_json(resp).await;
    tokens["access"].as_str().unwrap().to_string()
}

async fn teacher_access<S, B>(app: &S, email: &str, phone: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let payload = test_data::teacher_payload(email, phone, "teach12");
    let req = test::TestRequest::post()
        .uri("/register/teacher")
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/login/teacher")
        .set_json(serde_json::json!({"email": email, "password": "teach12"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: serde_json::Value = test::read_body_json(resp).await;
    tokens["access"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_get_before_registration() {
    println!("\n\n[+] Running test: test_get_before_registration");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "10101010", "fresh@student.com", "01010101010").await;

    let req = test::TestRequest::get()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registered"], false);
    assert!(body.get("registration").is_none());
    assert_eq!(body["user"]["varsity_id"], "10101010");
    assert_eq!(body["user"]["full_name"], "ALICE SMITH");
    println!("[/] Test passed: unregistered GET returns the snapshot and no body.");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    println!("\n\n[+] Running test: test_create_then_get_round_trip");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "20202020", "round@student.com", "02020202020").await;

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(test_data::registration_payload(Some("SLIP1001")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registered"], true);
    assert_eq!(body["registration"]["payment_slip"], "SLIP1001");

    let req = test::TestRequest::get()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registered"], true);
    assert_eq!(body["registration"]["payment_slip"], "SLIP1001");
    assert_eq!(body["registration"]["varsity_id"], "20202020");
    assert_eq!(body["registration"]["courses"][0], "CSE-401");
    println!("[/] Test passed: POST then GET round-trips the registration.");
}

#[tokio::test]
async fn test_second_submission_rejected() {
    println!("\n\n[+] Running test: test_second_submission_rejected");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "30303030", "once@student.com", "03030303030").await;

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(test_data::registration_payload(None))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(test_data::registration_payload(Some("SLIP2002")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Still exactly one row for this user
    let user = ctx.db.get_user_by_email("once@student.com").await.unwrap();
    assert!(ctx.db.get_registration_for_user(user.id).await.unwrap().is_some());
    assert_eq!(ctx.db.list_registrations().await.unwrap().len(), 1);
    println!("[/] Test passed: a second POST never creates a second record.");
}

#[tokio::test]
async fn test_put_without_registration_is_not_found() {
    println!("\n\n[+] Running test: test_put_without_registration_is_not_found");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "40404040", "never@student.com", "04040404040").await;

    let req = test::TestRequest::put()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(serde_json::json!({"payment_status": "No"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    println!("[/] Test passed: PUT with no registration is a 404.");
}

#[tokio::test]
async fn test_put_updates_and_refreshes_snapshot() {
    println!("\n\n[+] Running test: test_put_updates_and_refreshes_snapshot");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "50505050", "stale@student.com", "05050505050").await;

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(test_data::registration_payload(Some("SLIP3003")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // Change the account's phone number; the stored snapshot is now stale
    let req = test::TestRequest::put()
        .uri("/user")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(serde_json::json!({"phone_number": "09876543219"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Any registration write re-derives the snapshot
    let req = test::TestRequest::put()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(serde_json::json!({"hall_name": "Pritilata Hall"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registration"]["hall_name"], "Pritilata Hall");
    assert_eq!(body["registration"]["phone_number"], "09876543219");
    assert_eq!(body["registration"]["payment_slip"], "SLIP3003");
    println!("[/] Test passed: PUT updates fields and refreshes the snapshot.");
}

#[tokio::test]
async fn test_snapshot_ignores_caller_supplied_fields() {
    println!("\n\n[+] Running test: test_snapshot_ignores_caller_supplied_fields");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let access = student_access(&app, "60606060", "honest@student.com", "06060606060").await;

    // Smuggle snapshot fields into the payload; they are not part of the
    // accepted body and must not land
    let mut payload = test_data::registration_payload(None);
    payload["full_name"] = "FORGED NAME".into();
    payload["varsity_id"] = "99999999".into();
    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registration"]["full_name"], "ALICE SMITH");
    assert_eq!(body["registration"]["varsity_id"], "60606060");
    println!("[/] Test passed: snapshot fields come only from the account.");
}

#[tokio::test]
async fn test_duplicate_payment_slip_rejected() {
    println!("\n\n[+] Running test: test_duplicate_payment_slip_rejected");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let first = student_access(&app, "70707070", "one@student.com", "07070707070").await;
    let second = student_access(&app, "80808080", "two@student.com", "08080808080").await;

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", first)))
        .set_json(test_data::registration_payload(Some("SLIP4004")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", second)))
        .set_json(test_data::registration_payload(Some("SLIP4004")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("payment_slip").is_some());
    println!("[/] Test passed: payment slips are globally unique.");
}

#[tokio::test]
async fn test_summary_is_teacher_only() {
    println!("\n\n[+] Running test: test_summary_is_teacher_only");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let student = student_access(&app, "90909090", "s@student.com", "09090909090").await;
    let teacher = teacher_access(&app, "jane@cu.ac.bd", "01212121212").await;

    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", student)))
        .set_json(test_data::registration_payload(Some("SLIP5005")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // Students cannot see the aggregate
    let req = test::TestRequest::get()
        .uri("/exam-registration-summary")
        .insert_header(("Authorization", format!("Bearer {}", student)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Teachers can, with the owning account joined in
    let req = test::TestRequest::get()
        .uri("/exam-registration-summary")
        .insert_header(("Authorization", format!("Bearer {}", teacher)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows: serde_json::Value = test::read_body_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["registration"]["payment_slip"], "SLIP5005");
    assert_eq!(rows[0]["user"]["email"], "s@student.com");
    println!("[/] Test passed: summary is gated on the teacher role.");
}

#[tokio::test]
async fn test_teacher_registration_has_null_student_fields() {
    println!("\n\n[+] Running test: test_teacher_registration_has_null_student_fields");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let teacher = teacher_access(&app, "john@cu.ac.bd", "01313131313").await;

    // Teachers may register for themselves; the snapshot simply has no
    // student fields to copy
    let req = test::TestRequest::post()
        .uri("/exam-registration/my")
        .insert_header(("Authorization", format!("Bearer {}", teacher)))
        .set_json(test_data::registration_payload(Some("SLIP6006")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["registered"], true);
    assert_eq!(body["registration"]["full_name"], "DR. JANE TEACHER");
    assert!(body["registration"]["varsity_id"].is_null());
    assert!(body["registration"]["session"].is_null());
    assert_eq!(body["registration"]["phone_number"], "01313131313");
    println!("[/] Test passed: a teacher-owned registration carries null student fields.");
}
