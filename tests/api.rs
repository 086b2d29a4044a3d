//! End-to-end tests driving the full HTTP app over an in-memory SQLite pool.

use actix_web::{
    App,
    http::{Method, StatusCode},
    test, web,
};
use hr_records::{auth::jwt, config::Config, db, error::ApiError, routes};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const TEST_SECRET: &str = "integration-test-secret";

/// One in-memory database per test. A single pooled connection keeps every
/// statement on the same database instance.
async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    db::init_schema(&pool).await.unwrap();
    pool
}

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        access_token_ttl: 3600,
        // 0 disables rate limiting so tests never trip the governor
        rate_login_per_min: 0,
        rate_register_per_min: 0,
        rate_protected_per_min: 0,
    }
}

macro_rules! test_app {
    ($pool:expr, $cfg:expr) => {
        test::init_service(
            App::new()
                .app_data(
                    web::JsonConfig::default()
                        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
                )
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($cfg.clone()))
                .configure(|c| routes::configure(c, $cfg.clone())),
        )
        .await
    };
}

/// Register an employee with fixed profile fields and the given email.
macro_rules! register {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "name": "John Doe",
                "email": $email,
                "job_title": "Engineer",
                "department": "Engineering",
                "salary": 5000.0,
                "password": "hunter2"
            }))
            .to_request();
        test::call_service($app, req).await
    }};
}

/// Log in and return the bearer token.
macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": $email, "password": $password }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "login should succeed");
        let body: Value = test::read_body_json(resp).await;
        body["access_token"].as_str().unwrap().to_string()
    }};
}

fn authed(method: Method, path: &str, token: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(path)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

macro_rules! send_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service($app, $req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

async fn employee_id_by_email(pool: &SqlitePool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Auth gateway
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn register_stores_a_hash_and_login_round_trips() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    let resp = register!(&app, "hash-check@test.com");
    assert_eq!(resp.status(), StatusCode::OK);

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM employees WHERE email = ?")
            .bind("hash-check@test.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_ne!(stored, "hunter2");
    assert!(stored.starts_with("$argon2"));

    // correct plaintext succeeds
    let _token = login!(&app, "hash-check@test.com", "hunter2");

    // any other plaintext fails, with the same undifferentiated message as
    // an unknown email
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "hash-check@test.com", "password": "wrong" }))
        .to_request();
    let (status, wrong_pw) = send_json!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "nobody@test.com", "password": "hunter2" }))
        .to_request();
    let (status, unknown) = send_json!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw["error"], unknown["error"]);
}

#[actix_web::test]
async fn duplicate_email_registration_conflicts() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    let resp = register!(&app, "dupe@test.com");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = register!(&app, "dupe@test.com");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn register_with_missing_or_empty_fields_is_rejected() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    // missing required field
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "email": "incomplete@test.com", "password": "x" }))
        .to_request();
    let (status, body) = send_json!(&app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // present but empty
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "name": "",
            "email": "empty-name@test.com",
            "job_title": "Engineer",
            "department": "Engineering",
            "salary": 5000.0,
            "password": "hunter2"
        }))
        .to_request();
    let (status, _) = send_json!(&app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    let req = test::TestRequest::get().uri("/employees").to_request();
    let (status, body) = send_json!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("Authorization", "Basic abc"))
        .to_request();
    let (status, _) = send_json!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let (status, _) = send_json!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn issued_token_carries_the_real_employee_id() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "identity@test.com");
    let token = login!(&app, "identity@test.com", "hunter2");

    let claims = jwt::verify_token(&token, TEST_SECRET).unwrap();
    let id = employee_id_by_email(&pool, "identity@test.com").await;
    assert_eq!(claims.employee_id, id);
    assert_eq!(claims.sub, "identity@test.com");
}

#[actix_web::test]
async fn malformed_json_body_yields_a_json_validation_error() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not valid json")
        .to_request();
    let (status, body) = send_json!(&app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn employee_crud_and_partial_update() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "emp-crud@test.com");
    let token = login!(&app, "emp-crud@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "emp-crud@test.com").await;

    // list contains the registered employee, without the password hash
    let (status, list) = send_json!(&app, authed(Method::GET, "/employees", &token).to_request());
    assert_eq!(status, StatusCode::OK);
    let row = &list.as_array().unwrap()[0];
    assert_eq!(row["email"], "emp-crud@test.com");
    assert!(row.get("password_hash").is_none());

    // get by id
    let (status, emp) = send_json!(
        &app,
        authed(Method::GET, &format!("/employees/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emp["name"], "John Doe");

    // partial update: only salary changes, everything else is untouched
    let (status, updated) = send_json!(
        &app,
        authed(Method::PUT, &format!("/employees/{id}"), &token)
            .set_json(json!({ "salary": 6000.0 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    let after = &updated["updated_employee"];
    assert_eq!(after["salary"], 6000.0);
    assert_eq!(after["name"], "John Doe");
    assert_eq!(after["email"], "emp-crud@test.com");
    assert_eq!(after["job_title"], "Engineer");
    assert_eq!(after["department"], "Engineering");

    // empty update body is a validation error
    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/employees/{id}"), &token)
            .set_json(json!({}))
            .to_request()
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // delete, then the id is gone
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/employees/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/employees/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_employee_ids_yield_not_found() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "emp-404@test.com");
    let token = login!(&app, "emp-404@test.com", "hunter2");

    let (status, _) = send_json!(
        &app,
        authed(Method::GET, "/employees/9999", &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, "/employees/9999", &token)
            .set_json(json!({ "salary": 1.0 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_an_employee_frees_the_email_for_registration() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "reusable@test.com");
    let token = login!(&app, "reusable@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "reusable@test.com").await;

    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/employees/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let resp = register!(&app, "reusable@test.com");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Leave requests
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn leave_request_lifecycle() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "leave@test.com");
    let token = login!(&app, "leave@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "leave@test.com").await;

    // create defaults the status to Pending
    let (status, created) = send_json!(
        &app,
        authed(Method::POST, "/leave-request", &token)
            .set_json(json!({
                "employee_id": id,
                "leave_type": "Sick",
                "start_date": "2024-01-05",
                "end_date": "2024-01-07"
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "Pending");
    let leave_id = created["id"].as_i64().unwrap();

    // listing, global and per employee
    let (status, all) = send_json!(
        &app,
        authed(Method::GET, "/leave-requests", &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["start_date"], "2024-01-05");

    let (status, mine) = send_json!(
        &app,
        authed(Method::GET, &format!("/leave-requests/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, none) = send_json!(
        &app,
        authed(Method::GET, "/leave-requests/9999", &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert!(none.as_array().unwrap().is_empty());

    // partial update: approve, dates untouched
    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/leave-request/{leave_id}"), &token)
            .set_json(json!({ "status": "Approved" }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (_, all) = send_json!(
        &app,
        authed(Method::GET, "/leave-requests", &token).to_request()
    );
    assert_eq!(all[0]["status"], "Approved");
    assert_eq!(all[0]["end_date"], "2024-01-07");

    // delete twice: second time is a 404
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/leave-request/{leave_id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/leave-request/{leave_id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn leave_request_validation_rules() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "leave-valid@test.com");
    let token = login!(&app, "leave-valid@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "leave-valid@test.com").await;

    // non-ISO date format
    let (status, body) = send_json!(
        &app,
        authed(Method::POST, "/leave-request", &token)
            .set_json(json!({
                "employee_id": id,
                "leave_type": "Sick",
                "start_date": "01/05/2024",
                "end_date": "2024-01-07"
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));

    // inverted range
    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/leave-request", &token)
            .set_json(json!({
                "employee_id": id,
                "leave_type": "Sick",
                "start_date": "2024-01-07",
                "end_date": "2024-01-05"
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown employee
    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/leave-request", &token)
            .set_json(json!({
                "employee_id": 9999,
                "leave_type": "Sick",
                "start_date": "2024-01-05",
                "end_date": "2024-01-07"
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // invalid status on update
    let (_, created) = send_json!(
        &app,
        authed(Method::POST, "/leave-request", &token)
            .set_json(json!({
                "employee_id": id,
                "leave_type": "Vacation",
                "start_date": "2024-02-01",
                "end_date": "2024-02-03"
            }))
            .to_request()
    );
    let leave_id = created["id"].as_i64().unwrap();

    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/leave-request/{leave_id}"), &token)
            .set_json(json!({ "status": "Cancelled" }))
            .to_request()
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // updating a missing row is a 404
    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, "/leave-request/9999", &token)
            .set_json(json!({ "status": "Approved" }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn net_salary_is_always_gross_minus_deductions() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "payroll@test.com");
    let token = login!(&app, "payroll@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "payroll@test.com").await;

    let (status, created) = send_json!(
        &app,
        authed(Method::POST, "/payroll", &token)
            .set_json(json!({
                "employee_id": id,
                "gross_salary": 5000.0,
                "tax_deductions": 750.0
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["net_salary"], 4250.0);

    let (status, row) = send_json!(
        &app,
        authed(Method::GET, &format!("/payroll/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["net_salary"], 4250.0);

    // partial update recomputes from the effective values
    let (status, updated) = send_json!(
        &app,
        authed(Method::PUT, &format!("/payroll/{id}"), &token)
            .set_json(json!({ "tax_deductions": 1000.0 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["net_salary"], 4000.0);

    let (_, row) = send_json!(
        &app,
        authed(Method::GET, &format!("/payroll/{id}"), &token).to_request()
    );
    assert_eq!(row["gross_salary"], 5000.0);
    assert_eq!(row["net_salary"], 4000.0);

    // process-payroll recomputes in place
    let (status, processed) = send_json!(
        &app,
        authed(Method::POST, "/process-payroll", &token)
            .set_json(json!({ "employee_id": id }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(processed["net_salary"], 4000.0);

    // delete twice: second time is a 404
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/payroll/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/payroll/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn payroll_operations_on_absent_records_yield_not_found() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "payroll-404@test.com");
    let token = login!(&app, "payroll-404@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "payroll-404@test.com").await;

    let (status, _) = send_json!(
        &app,
        authed(Method::GET, &format!("/payroll/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/process-payroll", &token)
            .set_json(json!({ "employee_id": id }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // creating payroll for an unknown employee fails the existence check
    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/payroll", &token)
            .set_json(json!({
                "employee_id": 9999,
                "gross_salary": 1000.0,
                "tax_deductions": 100.0
            }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Time tracking
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn clock_out_increments_instead_of_overwriting() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "time@test.com");
    let token = login!(&app, "time@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "time@test.com").await;

    let (status, entry) = send_json!(
        &app,
        authed(Method::POST, "/time-tracking/clock-in", &token)
            .set_json(json!({ "employee_id": id }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);
    let entry_id = entry["id"].as_i64().unwrap();

    // fresh entry starts at zero
    let (_, list) = send_json!(
        &app,
        authed(Method::GET, "/time-tracking", &token).to_request()
    );
    assert_eq!(list[0]["hours_worked"], 0.0);
    assert_eq!(list[0]["overtime_hours"], 0.0);

    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/time-tracking/clock-out/{entry_id}"), &token)
            .set_json(json!({ "hours_worked": 8.0, "overtime_hours": 1.5 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/time-tracking/clock-out/{entry_id}"), &token)
            .set_json(json!({ "hours_worked": 4.0 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send_json!(
        &app,
        authed(Method::GET, "/time-tracking", &token).to_request()
    );
    assert_eq!(list[0]["hours_worked"], 12.0);
    assert_eq!(list[0]["overtime_hours"], 1.5);

    // unknown entry and unknown employee
    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, "/time-tracking/clock-out/9999", &token)
            .set_json(json!({ "hours_worked": 1.0 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/time-tracking/clock-in", &token)
            .set_json(json!({ "employee_id": 9999 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn concurrent_clock_outs_lose_no_increment() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "race@test.com");
    let token = login!(&app, "race@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "race@test.com").await;

    let (_, entry) = send_json!(
        &app,
        authed(Method::POST, "/time-tracking/clock-in", &token)
            .set_json(json!({ "employee_id": id }))
            .to_request()
    );
    let entry_id = entry["id"].as_i64().unwrap();

    let first = authed(Method::PUT, &format!("/time-tracking/clock-out/{entry_id}"), &token)
        .set_json(json!({ "hours_worked": 2.0 }))
        .to_request();
    let second = authed(Method::PUT, &format!("/time-tracking/clock-out/{entry_id}"), &token)
        .set_json(json!({ "hours_worked": 3.0 }))
        .to_request();

    let (r1, r2) = futures::join!(
        test::call_service(&app, first),
        test::call_service(&app, second)
    );
    assert_eq!(r1.status(), StatusCode::OK);
    assert_eq!(r2.status(), StatusCode::OK);

    let (_, list) = send_json!(
        &app,
        authed(Method::GET, "/time-tracking", &token).to_request()
    );
    assert_eq!(list[0]["hours_worked"], 5.0);
}

// ---------------------------------------------------------------------------
// Benefits
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn benefits_enrollment_defaults_and_partial_update() {
    let pool = test_pool().await;
    let cfg = test_config();
    let app = test_app!(pool, cfg);

    register!(&app, "benefits@test.com");
    let token = login!(&app, "benefits@test.com", "hunter2");
    let id = employee_id_by_email(&pool, "benefits@test.com").await;

    // enrollment with no flags takes the defaults
    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/benefits", &token)
            .set_json(json!({ "employee_id": id }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (status, row) = send_json!(
        &app,
        authed(Method::GET, &format!("/benefits/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["health_insurance"], false);
    assert_eq!(row["retirement_plan"], false);
    assert_eq!(row["vacation_days"], 0);

    // partial update: only vacation days change
    let (status, _) = send_json!(
        &app,
        authed(Method::PUT, &format!("/benefits/{id}"), &token)
            .set_json(json!({ "vacation_days": 25 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::OK);

    let (_, row) = send_json!(
        &app,
        authed(Method::GET, &format!("/benefits/{id}"), &token).to_request()
    );
    assert_eq!(row["vacation_days"], 25);
    assert_eq!(row["health_insurance"], false);

    // delete twice: second time is a 404
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/benefits/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_json!(
        &app,
        authed(Method::DELETE, &format!("/benefits/{id}"), &token).to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // enrolling an unknown employee fails the existence check
    let (status, _) = send_json!(
        &app,
        authed(Method::POST, "/benefits", &token)
            .set_json(json!({ "employee_id": 9999 }))
            .to_request()
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}
