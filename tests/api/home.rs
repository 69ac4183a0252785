use crate::helpers::TestApp;

#[tokio::test]
async fn home_page_shows_the_subscribe_form() {
    // given
    let app = TestApp::spawn().await;

    // when
    let response = app.get_home(&[]).await;

    // then
    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response body");
    assert!(html.contains(r#"action="/api/mailing-list""#));
    assert!(html.contains(r#"name="action" value="save""#));
    assert!(html.contains(r#"name="email""#));
}

#[tokio::test]
async fn home_page_shows_the_redirect_message() {
    // given
    let app = TestApp::spawn().await;
    let message = "The submitted email address has successfully been added to the mailing list.";

    // when
    let response = app.get_home(&[("user", message)]).await;

    // then
    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response body");
    assert!(html.contains(message));
}

#[tokio::test]
async fn home_page_shows_the_configured_social_links() {
    // given
    let app = TestApp::spawn().await;

    // when
    let response = app.get_home(&[]).await;

    // then
    let html = response.text().await.expect("Failed to read response body");
    assert!(html.contains("Facebook"));
    assert!(html.contains("Twitter"));
}
