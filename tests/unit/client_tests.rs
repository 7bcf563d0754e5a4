/*!
 * Tests for the lyrics database API client
 */

use lrcpress::client::{DEFAULT_ENDPOINT, LyricsDbClient, PublishRequest};
use lrcpress::errors::ApiError;

/// Endpoint normalization
#[test]
fn test_new_endpointHandling_shouldNormalize() {
    assert_eq!(LyricsDbClient::new("").endpoint(), DEFAULT_ENDPOINT);
    assert_eq!(
        LyricsDbClient::new("http://localhost:3300/api/").endpoint(),
        "http://localhost:3300/api"
    );
}

/// The wire body is exactly the camelCase shape the API expects
#[test]
fn test_publishRequest_wireFormat_shouldMatchApi() {
    let request = PublishRequest {
        track_name: "Night Drive".to_string(),
        artist_name: "The Examples".to_string(),
        album_name: None,
        duration: Some(187),
        plain_lyrics: "line one\nline two".to_string(),
        synced_lyrics: "[00:05.00]line one\n[00:09.00]line two".to_string(),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("\"trackName\":\"Night Drive\""));
    assert!(json.contains("\"artistName\":\"The Examples\""));
    assert!(json.contains("\"duration\":187"));
    assert!(!json.contains("albumName"));
}

/// API errors render the status code and the server's message
#[test]
fn test_apiError_display_shouldIncludeServerMessage() {
    let err = ApiError::ApiError {
        status_code: 400,
        message: "The provided publish token is invalid".to_string(),
    };

    let text = err.to_string();
    assert!(text.contains("400"));
    assert!(text.contains("The provided publish token is invalid"));
}

/// Challenge responses deserialize from the documented JSON shape
#[test]
fn test_challenge_shouldDeserializeFromJson() {
    let json = r#"{"prefix": "abc123", "target": "00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"}"#;
    let challenge: lrcpress::Challenge = serde_json::from_str(json).unwrap();

    assert_eq!(challenge.prefix, "abc123");
    assert!(challenge.target.starts_with("00ff"));
}
