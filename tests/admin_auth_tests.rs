mod common;

use axum::body::to_bytes;
use axum::http::{StatusCode, header};
use common::*;
use vitrine::db::ProductForm;

#[tokio::test]
async fn anonymous_admin_requests_redirect_to_login_and_never_mutate() {
    let site = spawn_site("anon-admin").await;

    let id = site
        .storage
        .create_product(&ProductForm {
            name: "Kept".to_string(),
            description: "must survive".to_string(),
            price: "9.99".to_string(),
            ..Default::default()
        })
        .await
        .expect("seed product failed");

    let edit_uri = format!("/admin/product/edit/{id}");
    for uri in ["/admin/dashboard", "/admin/product/new", edit_uri.as_str()] {
        let resp = send(&site.app, get_request(uri, None)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location_of(&resp), "/admin");
    }

    // POST-only management endpoints redirect too, and touch nothing.
    let resp = send(
        &site.app,
        multipart_request(
            &format!("/admin/product/delete/{id}"),
            multipart_body(&[], None),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/admin");

    let resp = send(
        &site.app,
        multipart_request(
            "/admin/cover_photo",
            multipart_body(&[], Some(("cover_photo", "new.png", b"png-bytes"))),
            None,
        ),
    )
    .await;
    assert_eq!(location_of(&resp), "/admin");

    let kept = site.storage.get_product(id).await.expect("query failed");
    assert!(kept.is_some(), "product deleted by anonymous request");
    let cover = site.storage.cover_photo().await.expect("query failed");
    assert_eq!(cover, "img/default_cover.jpg");

    site.cleanup();
}

#[tokio::test]
async fn valid_login_opens_session_and_logout_returns_to_anonymous() {
    let site = spawn_site("login-logout").await;

    let cookies = login(&site.app).await;

    let resp = send(&site.app, get_request("/admin/dashboard", Some(&cookies))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("Logged in successfully."));

    let resp = send(&site.app, get_request("/admin/logout", Some(&cookies))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/");
    let after_logout = cookies_from(&resp);

    // The cleared session cookie no longer opens the dashboard.
    let resp = send(&site.app, get_request("/admin/dashboard", Some(&after_logout))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/admin");

    // And so does a request carrying no cookies at all.
    let resp = send(&site.app, get_request("/admin/dashboard", None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    site.cleanup();
}

#[tokio::test]
async fn session_cookie_is_scoped_and_expires() {
    let site = spawn_site("session-cookie").await;

    let resp = send(
        &site.app,
        form_request(
            "/admin",
            &format!("username={TEST_USERNAME}&password={TEST_PASSWORD}"),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let session_cookie = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin_session="))
        .expect("login set no session cookie");
    // 12-hour lifetime, scoped to the whole site, unreadable from scripts.
    assert!(session_cookie.contains("Max-Age=43200"), "{session_cookie}");
    assert!(session_cookie.contains("Path=/"));
    assert!(session_cookie.contains("HttpOnly"));
    assert!(session_cookie.contains("SameSite=Lax"));

    site.cleanup();
}

#[tokio::test]
async fn invalid_credentials_bounce_back_with_a_message() {
    let site = spawn_site("bad-login").await;

    let resp = send(
        &site.app,
        form_request("/admin", "username=admin&password=wrong", None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/admin");
    let cookies = cookies_from(&resp);

    // The flash shows on the login page the browser is sent back to.
    let resp = send(&site.app, get_request("/admin", Some(&cookies))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body.contains("Invalid credentials."));

    // No session was opened.
    let resp = send(&site.app, get_request("/admin/dashboard", Some(&cookies))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    site.cleanup();
}
