mod common;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{assert_close, seed_basic, test_service};
use halves::web::router;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_with(content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn location(res: &axum::response::Response) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

fn empty_post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn get_body(app: &Router, uri: &str) -> Result<(StatusCode, String)> {
    let res = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = res.status();
    let bytes = res.into_body().collect().await?.to_bytes();
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

fn assert_redirects_home(status: StatusCode, location: Option<&str>) {
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some("/"));
}

#[tokio::test]
async fn test_index_renders_empty_ledger() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service);

    let (status, body) = get_body(&app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No purchases yet."));
    assert!(body.contains("name=\"description\""));

    Ok(())
}

#[tokio::test]
async fn test_post_records_and_redirects() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    let res = app
        .clone()
        .oneshot(form_post("/", "description=coffee&amount=4.50&who=joe"))
        .await?;
    assert_redirects_home(res.status(), location(&res));

    let purchases = service.list_purchases().await?;
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].description, "coffee");
    assert_eq!(purchases[0].who, "joe");

    let (_, body) = get_body(&app, "/").await?;
    assert!(body.contains("coffee"));
    assert!(body.contains("4.50"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_post_redirects_without_recording() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    for body in [
        "description=&amount=5",
        "description=lunch&amount=",
        "description=lunch&amount=five",
        "amount=5",
        "",
    ] {
        let res = app.clone().oneshot(form_post("/", body)).await?;
        assert_redirects_home(res.status(), location(&res));
    }

    assert_eq!(service.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_non_form_bodies_redirect_without_recording() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    let requests = [
        post_with(None, "description=lunch&amount=5"),
        post_with(
            Some("application/json"),
            r#"{"description":"lunch","amount":"5"}"#,
        ),
        post_with(Some("text/plain"), "description=lunch&amount=5"),
    ];
    for request in requests {
        let res = app.clone().oneshot(request).await?;
        assert_redirects_home(res.status(), location(&res));
    }

    assert_eq!(service.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_repeated_keys_keep_first_value() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    let res = app
        .clone()
        .oneshot(form_post(
            "/",
            "description=a&description=b&amount=1&amount=2&who=kath&who=joe",
        ))
        .await?;
    assert_redirects_home(res.status(), location(&res));

    let purchases = service.list_purchases().await?;
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].description, "a");
    assert_close(purchases[0].amount, 1.0);
    assert_eq!(purchases[0].who, "kath");

    Ok(())
}

#[tokio::test]
async fn test_missing_amount_records_zero() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    let res = app
        .clone()
        .oneshot(form_post("/", "description=lunch&who=joe"))
        .await?;
    assert_redirects_home(res.status(), location(&res));

    let purchases = service.list_purchases().await?;
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].description, "lunch");
    assert_close(purchases[0].amount, 0.0);
    assert_eq!(purchases[0].who, "joe");

    Ok(())
}

#[tokio::test]
async fn test_missing_who_defaults_to_joint() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    app.clone()
        .oneshot(form_post("/", "description=rent&amount=1000"))
        .await?;

    let purchases = service.list_purchases().await?;
    assert_eq!(purchases[0].who, "joint");

    Ok(())
}

#[tokio::test]
async fn test_delete_route() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;
    let app = router(service.clone());
    let newest = service.list_purchases().await?[0].id;

    let res = app
        .clone()
        .oneshot(empty_post(&format!("/delete/{newest}")))
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(service.count().await?, 2);

    // Unknown id is not an error
    let res = app.clone().oneshot(empty_post("/delete/424242")).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(service.count().await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_delete_route_rejects_non_numeric_id() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;
    let app = router(service.clone());

    let res = app.clone().oneshot(empty_post("/delete/rent")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.count().await?, 3);

    Ok(())
}

#[tokio::test]
async fn test_clear_route() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;
    let app = router(service.clone());

    for _ in 0..2 {
        let res = app.clone().oneshot(empty_post("/clear")).await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(service.count().await?, 0);
    }

    let (_, body) = get_body(&app, "/").await?;
    assert!(body.contains("No purchases yet."));

    Ok(())
}

#[tokio::test]
async fn test_index_shows_balance() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_basic(&service).await?;
    let app = router(service.clone());

    let (status, body) = get_body(&app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("504.50"));
    assert!(body.contains("530.00"));
    assert!(body.contains("1000.00"));
    assert_close(service.balance().await?.joe_owes, 504.5);

    Ok(())
}

#[tokio::test]
async fn test_user_text_is_escaped() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let app = router(service.clone());

    app.clone()
        .oneshot(form_post(
            "/",
            "description=%3Cscript%3Ealert(1)%3C%2Fscript%3E&amount=1&who=%3Cb%3E",
        ))
        .await?;

    let (_, body) = get_body(&app, "/").await?;
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(body.contains("&lt;b&gt;"));
    assert!(!body.contains("<script>"));

    Ok(())
}
