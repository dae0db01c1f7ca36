//! Execution tests for the message endpoints.
//!
//! Uses wiremock to mock the Evolution API and inspect JSON and multipart
//! request bodies.

use evoapi::{
    Attachment, AudioMessage, Button, ButtonMessage, Contact, ContactMessage, EvolutionClient,
    EvolutionError, ListMessage, ListRow, ListSection, LocationMessage, MediaMessage, MediaType,
    MessageKey, PollMessage, PtvMessage, QuotedMessage, ReactionMessage, StatusMessage,
    StatusType, StickerMessage, TextMessage,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EvolutionClient {
    EvolutionClient::new(&server.uri(), "global-key").unwrap()
}

fn sent_response(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(serde_json::json!({
        "key": {
            "remoteJid": "5511999999999@s.whatsapp.net",
            "fromMe": true,
            "id": id
        },
        "status": "PENDING",
        "messageType": "conversation",
        "messageTimestamp": 1717689097
    }))
}

async fn mount_ok(server: &MockServer, endpoint: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(sent_response("3EB0"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_text_posts_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/Sales"))
        .and(header("apikey", "global-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "number": "5511999999999",
            "text": "Hello",
            "delay": 1200
        })))
        .respond_with(sent_response("3EB0C767D26A1D0B"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let message = TextMessage {
        delay: Some(1200),
        ..TextMessage::new("5511999999999", "Hello")
    };
    let sent = client.messages().send_text("Sales", &message).await.unwrap();

    assert_eq!(sent.id(), Some("3EB0C767D26A1D0B"));
    assert_eq!(sent.status.as_deref(), Some("PENDING"));
}

#[tokio::test]
async fn test_send_media_file_uploads_multipart() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "/message/sendMedia/Sales").await;

    let client = client_for(&mock_server);
    let file = Attachment::new("photo.jpg", b"\xFF\xD8\xFFfake-jpeg".to_vec())
        .with_content_type("image/jpeg");
    let message = MediaMessage {
        caption: Some("Our new store".to_string()),
        ..MediaMessage::for_upload("5511999999999", MediaType::Image)
    };
    client
        .messages()
        .send_media_file("Sales", &message, file)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="file"; filename="photo.jpg""#));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("fake-jpeg"));
    assert!(body.contains(r#"name="number""#));
    assert!(body.contains("5511999999999"));
    assert!(body.contains(r#"name="mediatype""#));
    assert!(body.contains(r#"name="caption""#));
    assert!(!body.contains(r#"name="media""#));
}

#[tokio::test]
async fn test_multipart_send_skips_nested_fields() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "/message/sendMedia/Sales").await;

    let client = client_for(&mock_server);
    let file = Attachment::new("photo.jpg", b"\xFF\xD8\xFFfake-jpeg".to_vec())
        .with_content_type("image/jpeg");
    let message = MediaMessage {
        caption: Some("Reply with photo".to_string()),
        delay: Some(800),
        mentions_every_one: Some(false),
        mentioned: Some(vec!["5511888888888".to_string()]),
        quoted: Some(QuotedMessage {
            key: MessageKey::new("5511999999999@s.whatsapp.net", false, "3EB0"),
            message: Some(serde_json::json!({"conversation": "send the photo"})),
        }),
        ..MediaMessage::for_upload("5511999999999", MediaType::Image)
    };
    let sent = client
        .messages()
        .send_media_file("Sales", &message, file)
        .await
        .unwrap();
    assert_eq!(sent.id(), Some("3EB0"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);

    assert!(body.contains(r#"name="file"; filename="photo.jpg""#));
    assert!(body.contains(r#"name="number""#));
    assert!(body.contains(r#"name="caption""#));
    assert!(body.contains("Reply with photo"));
    assert!(body.contains(r#"name="delay""#));
    assert!(body.contains("800"));
    assert!(body.contains(r#"name="mentionsEveryOne""#));
    assert!(!body.contains(r#"name="quoted""#));
    assert!(!body.contains(r#"name="mentioned""#));
    assert!(!body.contains("send the photo"));
}

#[tokio::test]
async fn test_send_media_by_url_posts_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendMedia/Sales"))
        .and(body_json(serde_json::json!({
            "number": "5511999999999",
            "mediatype": "document",
            "media": "https://example.com/invoice.pdf",
            "fileName": "invoice.pdf"
        })))
        .respond_with(sent_response("3EB1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let message = MediaMessage {
        file_name: Some("invoice.pdf".to_string()),
        ..MediaMessage::new(
            "5511999999999",
            MediaType::Document,
            "https://example.com/invoice.pdf",
        )
    };
    let sent = client.messages().send_media("Sales", &message).await.unwrap();

    assert_eq!(sent.id(), Some("3EB1"));
}

#[tokio::test]
async fn test_send_audio_file_uses_whatsapp_audio_endpoint() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "/message/sendWhatsAppAudio/Sales").await;

    let client = client_for(&mock_server);
    let file = Attachment::new("note.ogg", vec![0u8; 16]).with_content_type("audio/ogg");
    client
        .messages()
        .send_audio_file("Sales", &AudioMessage::new("5511999999999"), file)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_ptv_file_uploads_video() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "/message/sendPtv/Sales").await;

    let client = client_for(&mock_server);
    let file = Attachment::new("clip.mp4", vec![1u8; 16]).with_content_type("video/mp4");
    client
        .messages()
        .send_ptv_file("Sales", &PtvMessage::new("5511999999999"), file)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"filename="clip.mp4""#));
    assert!(body.contains("Content-Type: video/mp4"));
}

#[tokio::test]
async fn test_each_kind_hits_its_endpoint() {
    let mock_server = MockServer::start().await;
    for kind in [
        "sendStatus",
        "sendSticker",
        "sendLocation",
        "sendContact",
        "sendReaction",
        "sendPoll",
        "sendList",
        "sendButtons",
        "sendPtv",
        "sendWhatsAppAudio",
    ] {
        mount_ok(&mock_server, &format!("/message/{kind}/Sales")).await;
    }

    let client = client_for(&mock_server);
    let messages = client.messages();
    let number = "5511999999999";

    messages
        .send_status(
            "Sales",
            &StatusMessage {
                all_contacts: true,
                ..StatusMessage::new(StatusType::Text, "Open today")
            },
        )
        .await
        .unwrap();
    messages
        .send_sticker(
            "Sales",
            &StickerMessage::new(number, "https://example.com/s.webp"),
        )
        .await
        .unwrap();
    messages
        .send_location(
            "Sales",
            &LocationMessage::new(number, "Store", "Av. Paulista, 1000", -23.5614, -46.6559),
        )
        .await
        .unwrap();
    messages
        .send_contact(
            "Sales",
            &ContactMessage::new(
                number,
                vec![Contact::new("Ana", "5511888888888", "+55 11 88888-8888")],
            ),
        )
        .await
        .unwrap();
    messages
        .send_reaction(
            "Sales",
            &ReactionMessage::new(
                MessageKey::new("5511999999999@s.whatsapp.net", true, "3EB0"),
                "👍",
            ),
        )
        .await
        .unwrap();
    messages
        .send_poll(
            "Sales",
            &PollMessage::new(number, "Lunch?", 1, vec!["Yes".into(), "No".into()]),
        )
        .await
        .unwrap();
    messages
        .send_list(
            "Sales",
            &ListMessage {
                number: number.to_string(),
                title: "Menu".to_string(),
                description: "Pick one".to_string(),
                button_text: "Open".to_string(),
                footer_text: "Thanks".to_string(),
                sections: vec![ListSection::new(
                    "Drinks",
                    vec![ListRow::new("Coffee", "Hot", "coffee")],
                )],
                delay: None,
                quoted: None,
            },
        )
        .await
        .unwrap();
    messages
        .send_buttons(
            "Sales",
            &ButtonMessage {
                number: number.to_string(),
                title: "Support".to_string(),
                description: "How can we help?".to_string(),
                footer: "Evolution".to_string(),
                buttons: vec![
                    Button::reply("Talk to us", "talk"),
                    Button::url("Docs", "https://example.com"),
                ],
                delay: None,
                quoted: None,
            },
        )
        .await
        .unwrap();
    messages
        .send_ptv(
            "Sales",
            &PtvMessage {
                video: Some("https://example.com/v.mp4".to_string()),
                ..PtvMessage::new(number)
            },
        )
        .await
        .unwrap();
    messages
        .send_audio(
            "Sales",
            &AudioMessage {
                audio: Some("https://example.com/a.mp3".to_string()),
                encoding: Some(true),
                ..AudioMessage::new(number)
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_status_message_wire_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendStatus/Sales"))
        .and(body_json(serde_json::json!({
            "type": "text",
            "content": "Open today",
            "backgroundColor": "#008000",
            "allContacts": true
        })))
        .respond_with(sent_response("3EB2"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let message = StatusMessage {
        background_color: Some("#008000".to_string()),
        all_contacts: true,
        ..StatusMessage::new(StatusType::Text, "Open today")
    };
    client.messages().send_status("Sales", &message).await.unwrap();
}

#[tokio::test]
async fn test_blank_instance_rejected_before_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(sent_response("never"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .messages()
        .send_text("", &TextMessage::new("5511999999999", "Hello"))
        .await;

    assert!(matches!(
        result,
        Err(EvolutionError::InvalidArgument { name: "instance_name", .. })
    ));
}

#[tokio::test]
async fn test_instance_token_override_for_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/Support"))
        .and(header("apikey", "support-token"))
        .respond_with(sent_response("3EB3"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .messages()
        .with_token("support-token")
        .send_text("Support", &TextMessage::new("5511999999999", "Hi"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_bad_request_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/message/sendText/Sales"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"response":{"message":[{"exists":false}]}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .messages()
        .send_text("Sales", &TextMessage::new("0000", "Hello"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert!(err.to_string().contains(r#""exists":false"#));
}
