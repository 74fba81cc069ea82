use receipt_mail::*;

const ATTACHMENT_PATH: &str = "/gmail/v1/users/me/messages/m1/attachments/a1";

fn token() -> AccessToken {
    AccessToken::new("ya29.token")
}

#[test]
fn test_attachment_url() {
    let client = GmailClient::new("https://gmail.example/");
    assert_eq!(
        client.attachment_url("m1", "a1"),
        "https://gmail.example/gmail/v1/users/me/messages/m1/attachments/a1"
    );

    let from_config = GmailClient::from_config(&ExtractorConfig::default());
    assert!(
        from_config
            .attachment_url("m", "a")
            .starts_with("https://www.googleapis.com/gmail/v1/")
    );
}

#[test]
fn test_fetch_attachment_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", ATTACHMENT_PATH)
        .match_header("authorization", "Bearer ya29.token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"attachmentId": "a1", "size": 8, "data": "JVBERi0xLjQ"}"#)
        .create();

    let client = GmailClient::new(server.url());
    let body = client.fetch("m1", "a1", &token()).unwrap().unwrap();

    mock.assert();
    assert_eq!(body.attachment_id.as_deref(), Some("a1"));
    assert_eq!(body.size, Some(8));
    assert_eq!(body.data(), Some("JVBERi0xLjQ"));
}

#[test]
fn test_fetch_not_found_is_none() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", ATTACHMENT_PATH)
        .with_status(404)
        .with_body(r#"{"error": {"code": 404, "message": "Requested entity was not found."}}"#)
        .create();

    let client = GmailClient::new(server.url());
    let body = client.fetch("m1", "a1", &token()).unwrap();

    mock.assert();
    assert!(body.is_none());
}

#[test]
fn test_fetch_server_error_is_err() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", ATTACHMENT_PATH)
        .with_status(500)
        .with_body("backend error")
        .create();

    let client = GmailClient::new(server.url());
    let result = client.fetch("m1", "a1", &token());

    mock.assert();
    assert!(result.is_err());
}

#[test]
fn test_fetch_unauthorized_is_err() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", ATTACHMENT_PATH)
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_body(r#"{"error": {"code": 401}}"#)
        .create();

    let client = GmailClient::new(server.url());
    let result = client.fetch("m1", "a1", &AccessToken::new("expired"));

    mock.assert();
    assert!(result.is_err());
}

#[test]
fn test_extractor_with_gmail_client() {
    let mut server = mockito::Server::new();
    let pdf = server
        .mock("GET", "/gmail/v1/users/me/messages/msg-9/attachments/att-pdf")
        .match_header("authorization", "Bearer ya29.token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"size": 8, "data": "JVBERi0xLjQ"}"#)
        .create();
    let gone = server
        .mock("GET", "/gmail/v1/users/me/messages/msg-9/attachments/att-gone")
        .with_status(404)
        .create();

    let config = ExtractorConfig {
        api_base_url: server.url(),
        ..ExtractorConfig::default()
    };
    let client = GmailClient::from_config(&config);
    let ocr = |filename: &str, _data: &str| -> std::result::Result<String, CollaboratorError> {
        Ok(format!("ocr:{filename}"))
    };
    let extractor = MessageExtractor::new(config, client, ocr);

    let msg = MessageResource::from_json_str(
        r#"{
            "id": "msg-9",
            "snippet": "receipt",
            "payload": {
                "parts": [
                    {"mimeType": "application/pdf", "filename": "invoice.pdf", "body": {"attachmentId": "att-pdf"}},
                    {"mimeType": "application/pdf", "filename": "old.pdf", "body": {"attachmentId": "att-gone"}}
                ]
            }
        }"#,
    )
    .unwrap();

    let attachments = extractor
        .extract_attachments(&msg, &MessageId::new("msg-9"), &token())
        .unwrap();

    pdf.assert();
    gone.assert();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].filename, "invoice.pdf");
    assert_eq!(attachments[0].raw_text, "ocr:invoice.pdf");
}
