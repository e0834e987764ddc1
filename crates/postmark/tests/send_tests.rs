use postmark::{ClientConfig, Message, PostmarkClient, PostmarkError, ValidationError};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn message() -> Message {
    let mut message = Message::new("integration-token");
    message.sender = "Sender <sender@example.com>".to_string();
    message.to = "one@example.com, two@example.com".to_string();
    message.subject = "Quarterly report".to_string();
    message.html_body = "<strong>Report attached</strong>".to_string();
    message.text_body = "Report attached".to_string();
    message
}

#[tokio::test]
async fn test_full_message_round_trip() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email"))
        .and(header("X-Postmark-Server-Token", "integration-token"))
        .and(header("X-Priority", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ErrorCode": 0,
            "Message": "OK",
            "MessageID": "0a129aee-e1cd-480d-b08d-4f48548ff48d",
            "SubmittedAt": "2024-03-01T10:00:00.0000000-05:00",
            "To": "one@example.com, two@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir()?;
    let report = dir.path().join("report.txt");
    std::fs::write(&report, "q1: up")?;

    let mut message = message();
    message.reply_to = "replies@example.com".to_string();
    message.cc = "cc@example.com".to_string();
    message.bcc = "audit@example.com".to_string();
    message.tag = "reports".to_string();
    message.add_custom_header("X-Priority", "1");
    message.add_attachment(&report)?;

    let client = PostmarkClient::with_config(
        ClientConfig::default().with_endpoint(format!("{}/email", mock_server.uri())),
    )?;
    let reply = client.send(&message).await?;

    assert_eq!(reply.message_id, "0a129aee-e1cd-480d-b08d-4f48548ff48d");
    assert_eq!(reply.to, "one@example.com, two@example.com");

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body, serde_json::from_slice::<Value>(&message.build_payload()?)?);
    assert_eq!(body["To"], "one@example.com, two@example.com");
    assert_eq!(body["ReplyTo"], "replies@example.com");
    assert_eq!(body["Tag"], "reports");
    assert_eq!(body["Attachments"][0]["Name"], "report.txt");
    assert_eq!(body["Attachments"][0]["Content"], "cTE6IHVw");
    assert_eq!(body["Headers"], json!([{"Name": "X-Priority", "Value": "1"}]));

    Ok(())
}

#[tokio::test]
async fn test_each_missing_field_blocks_send() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = PostmarkClient::with_config(
        ClientConfig::default().with_endpoint(format!("{}/email", mock_server.uri())),
    )?;

    let cases: [(fn(&mut Message), ValidationError); 4] = [
        (|m| m.sender.clear(), ValidationError::MissingSender),
        (|m| m.to.clear(), ValidationError::MissingRecipient),
        (|m| m.subject.clear(), ValidationError::MissingSubject),
        (
            |m| {
                m.html_body.clear();
                m.text_body.clear();
            },
            ValidationError::MissingBody,
        ),
    ];

    for (clear, expected) in cases {
        let mut message = message();
        clear(&mut message);

        match client.send(&message).await {
            Err(PostmarkError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("Expected {:?}, got {:?}", expected, other),
        }
        match message.build_payload() {
            Err(PostmarkError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("Expected {:?}, got {:?}", expected, other),
        }
    }

    Ok(())
}
