// Integration tests for the auth callback route
use actix_web::cookie::SameSite;
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use jobportal::testing::constants::TEST_TOKEN;
use jobportal::testing::requests::callback_request;
use jobportal::testing::TestFixtures;
use jobportal::AppComponents;
use std::sync::Arc;

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("callback responses always redirect")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn test_token_is_stored_before_landing() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let resp = test::call_service(&app, callback_request(Some(TEST_TOKEN)).to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/dashboard");

    let cookies: Vec<_> = resp.response().cookies().collect();
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), TEST_TOKEN);
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert!(cookie.max_age().is_none());
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[actix_web::test]
async fn test_missing_or_empty_token_goes_to_login_without_cookie() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    for req in [
        callback_request(None),
        callback_request(Some("")),
        test::TestRequest::get().uri("/auth/callback?error=access_denied"),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/login");
        assert_eq!(resp.response().cookies().count(), 0);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }
}

#[actix_web::test]
async fn test_repeated_callback_sets_one_cookie_per_request() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    for _ in 0..2 {
        let resp = test::call_service(&app, callback_request(Some("same-token")).to_request()).await;
        assert_eq!(resp.headers().get_all(header::SET_COOKIE).count(), 1);
        let cookie = resp.response().cookies().next().unwrap();
        assert_eq!(cookie.value(), "same-token");
    }
}

#[actix_web::test]
async fn test_google_callback_alias() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?token=abc%2Fdef")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/dashboard");
    let cookie = resp.response().cookies().next().unwrap();
    assert_eq!(cookie.value(), "abc/def");
}

#[actix_web::test]
async fn test_token_unfit_for_a_cookie_goes_to_login() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    for encoded in [
        "abc%3B%20Domain%3Devil.example%3B%20Max-Age%3D999999999",
        "abc%0Adef",
        "abc%0D%0ASet-Cookie%3A%20session%3Dx",
    ] {
        let resp = test::call_service(&app, callback_request(Some(encoded)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{encoded}");
        assert_eq!(location(&resp), "/login", "{encoded}");
        assert_eq!(resp.headers().get_all(header::SET_COOKIE).count(), 0);
    }
}

#[actix_web::test]
async fn test_locale_routed_frontend_gets_prefixed_routes() {
    let components = AppComponents::with_sink(
        TestFixtures::localized_settings(),
        Arc::new(jobportal::testing::RecordingSink::default()),
    )
    .unwrap();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let req = callback_request(Some("t"))
        .insert_header((header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/fr/dashboard");

    let req = callback_request(None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/en/login");
}

#[actix_web::test]
async fn test_health() {
    let components = TestFixtures::components();
    let app = test::init_service(App::new().configure(|cfg| components.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/ping").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
