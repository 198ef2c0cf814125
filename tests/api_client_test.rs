mod common;

use college_picker::api_client::{DirectoryClient, LogoClient};
use common::spawn_mock_server;

#[tokio::test]
async fn test_search_returns_institutions_in_server_order() {
    let server = spawn_mock_server().await;
    let client = DirectoryClient::new(&server.base_url);

    let results = client.search("university").await.unwrap();
    let names: Vec<&str> = results.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Harvard University", "Texas A&M University"]);
    assert_eq!(results[0].domains, vec!["harvard.edu", "hbs.edu"]);
}

#[tokio::test]
async fn test_search_term_is_sent_as_query_parameter() {
    let server = spawn_mock_server().await;
    let client = DirectoryClient::new(&server.base_url);

    let results = client.search("Texas A&M").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(server.searches(), vec!["Texas A&M".to_string()]);
}

#[tokio::test]
async fn test_search_server_error_is_err() {
    let server = spawn_mock_server().await;
    let client = DirectoryClient::new(&server.base_url);

    let err = client.search("boom").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_search_unreachable_host_is_err() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DirectoryClient::new(&format!("http://{}", addr));
    assert!(client.search("MIT").await.is_err());
}

#[tokio::test]
async fn test_logo_probe_success_returns_url() {
    let server = spawn_mock_server().await;
    let client = LogoClient::new(&server.base_url);

    let url = client.probe("mit.edu").await.unwrap();
    assert_eq!(url, format!("{}/mit.edu", server.base_url));
}

#[tokio::test]
async fn test_logo_probe_missing_logo_is_err() {
    let server = spawn_mock_server().await;
    let client = LogoClient::new(&server.base_url);

    let err = client.probe("nologo.example").await.unwrap_err();
    assert!(err.to_string().contains("404"));
}
