use shelf::api::{ApiError, BookRecord, HighlightRecord, HighlightSource, ReadwiseClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ReadwiseClient {
    ReadwiseClient::new("test-token".to_string(), Some(server.uri())).with_page_size(50)
}

// ============================================================================
// Books
// ============================================================================

#[tokio::test]
async fn test_fetch_books_success() {
    let mock_server = MockServer::start().await;

    let body = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {"id": 1, "title": "Dune", "author": "Frank Herbert", "category": "books", "num_highlights": 3},
            {"id": 2, "title": "Emma", "author": null, "category": "books", "num_highlights": 1}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/books/"))
        .and(header("Authorization", "Token test-token"))
        .and(query_param("page_size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let books = client_for(&mock_server).fetch_books().await.unwrap();

    assert_eq!(
        books,
        vec![
            BookRecord {
                id: 1,
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
            },
            BookRecord {
                id: 2,
                title: "Emma".to_string(),
                author: String::new(),
            },
        ]
    );
}

#[tokio::test]
async fn test_fetch_books_does_not_follow_next() {
    let mock_server = MockServer::start().await;

    let body = format!(
        r#"{{"count": 3, "next": "{}/books/?page=2", "previous": null,
            "results": [{{"id": 1, "title": "Dune", "author": "Herbert"}}]}}"#,
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let books = client_for(&mock_server).fetch_books().await.unwrap();
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn test_fetch_books_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"detail":"Invalid token."}"#),
        )
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_books().await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid token."));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_books_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_books().await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_books_network_error() {
    // Nothing listens on the discard port.
    let client = ReadwiseClient::new("t".to_string(), Some("http://127.0.0.1:9".to_string()));
    let result = client.fetch_books().await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

// ============================================================================
// Highlights
// ============================================================================

#[tokio::test]
async fn test_fetch_highlights_for_book() {
    let mock_server = MockServer::start().await;

    let body = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {"id": 10, "text": "Fear is the mind-killer", "highlighted_at": "2021-01-01T00:00:00Z", "book_id": 1},
            {"id": 11, "text": "The spice must flow", "highlighted_at": null, "book_id": 1}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/highlights/"))
        .and(query_param("book_id", "1"))
        .and(header("Authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let highlights = client_for(&mock_server).fetch_highlights(1).await.unwrap();

    assert_eq!(
        highlights,
        vec![
            HighlightRecord {
                text: "Fear is the mind-killer".to_string(),
                highlighted_at: "2021-01-01T00:00:00Z".to_string(),
            },
            HighlightRecord {
                text: "The spice must flow".to_string(),
                highlighted_at: String::new(),
            },
        ]
    );
}

#[tokio::test]
async fn test_fetch_highlights_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/highlights/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).fetch_highlights(99).await;

    match result {
        Err(ApiError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/highlights/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReadwiseClient::new("t".to_string(), Some(format!("{}/", mock_server.uri())));
    assert!(client.fetch_highlights(5).await.unwrap().is_empty());
}
