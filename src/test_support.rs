use axum::Router;

use crate::config::ProviderConfig;

// Serve a router on an ephemeral port, returns its base url
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_config(gemini_url: &str, vercel_url: &str) -> ProviderConfig {
    ProviderConfig {
        gemini_api_key: Some("gemini-key".to_string()),
        gemini_url: gemini_url.to_string(),
        gemini_model: "gemini-test".to_string(),
        vercel_token: Some("vercel-token".to_string()),
        vercel_url: vercel_url.to_string(),
        name_prefix: "test-site-".to_string(),
        target: "production".to_string(),
    }
}
