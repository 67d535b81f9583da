// tests/providers_http.rs
//
// Each provider's normalization strategy, exercised end-to-end over HTTP
// against httpmock servers standing in for the real sources.

use std::time::Duration;

use encoding_rs::WINDOWS_1251;
use httpmock::prelude::*;

use joke_service::jokes::providers::{
    AnekdotRuProvider, BaneksProvider, DadJokeProvider, JokeApiProvider, RzhunemoguProvider,
};
use joke_service::jokes::{FetchError, JokeProvider, JokeService, ProviderRegistry};

#[tokio::test]
async fn dadjoke_parses_json_with_accept_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/").header("accept", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"abc","joke":"Why did the scarecrow win an award? He was outstanding in his field.","status":200}"#);
        })
        .await;

    let provider = DadJokeProvider::with_url(server.base_url());
    let joke = provider.fetch().await.unwrap();

    mock.assert_async().await;
    assert_eq!(joke.source, "icanhazdadjoke.com");
    assert!(!joke.is_russian);
    assert!(joke.text.starts_with("Why did the scarecrow"));
}

#[tokio::test]
async fn dadjoke_rejects_non_json_content_type() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html>not json</html>");
        })
        .await;

    let provider = DadJokeProvider::with_url(server.base_url());
    let err = provider.fetch().await.unwrap_err();
    match err {
        FetchError::UnexpectedContentType { content_type, .. } => {
            assert_eq!(content_type, "text/html; charset=utf-8");
        }
        other => panic!("expected content-type error, got {other:?}"),
    }
}

#[tokio::test]
async fn rzhunemogu_transcodes_windows_1251_with_crlf() {
    let source = "{\"content\":\"Штирлиц шёл по улице.\r\nНавстречу ему шёл Мюллер.\"}";
    let (raw, _, _) = WINDOWS_1251.encode(source);

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/RandJSON.aspx");
            then.status(200)
                .header("content-type", "text/html; charset=windows-1251")
                .body(raw.to_vec());
        })
        .await;

    let provider = RzhunemoguProvider::with_url(server.url("/RandJSON.aspx"));
    let joke = provider.fetch().await.unwrap();

    assert_eq!(
        joke.text,
        "Штирлиц шёл по улице.\nНавстречу ему шёл Мюллер."
    );
    assert!(joke.is_russian);
    assert!(!joke.text.contains("\\n"));
}

#[tokio::test]
async fn rzhunemogu_empty_content_is_a_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/RandJSON.aspx");
            then.status(200).body(r#"{"content":""}"#);
        })
        .await;

    let provider = RzhunemoguProvider::with_url(server.url("/RandJSON.aspx"));
    let err = provider.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Extraction { .. }));
}

#[tokio::test]
async fn anekdot_picks_one_embedded_entry() {
    let page = r#"<html><script>
        window.jokes = JSON.parse('[\"Первый анекдот\",\"Второй анекдот\",\"Третий анекдот\"]');
    </script></html>"#;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rss/randomu.html");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(page);
        })
        .await;

    let provider = AnekdotRuProvider::with_url(server.url("/rss/randomu.html"));
    for _ in 0..10 {
        let joke = provider.fetch().await.unwrap();
        assert!(
            ["Первый анекдот", "Второй анекдот", "Третий анекдот"]
                .contains(&joke.text.as_str()),
            "unexpected entry: {}",
            joke.text
        );
        assert!(joke.is_russian);
    }
}

#[tokio::test]
async fn anekdot_unescapes_entities_and_breaks() {
    let page = r#"JSON.parse('[\"Он сказал: &quot;привет&quot;<br>и ушёл\"]')"#;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(page);
        })
        .await;

    let provider = AnekdotRuProvider::with_url(server.base_url());
    let joke = provider.fetch().await.unwrap();
    assert_eq!(joke.text, "Он сказал: \"привет\"\nи ушёл");
}

#[tokio::test]
async fn anekdot_without_marker_is_a_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<html><body>no script here</body></html>");
        })
        .await;

    let provider = AnekdotRuProvider::with_url(server.base_url());
    let err = provider.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Extraction { .. }));
}

#[tokio::test]
async fn baneks_scrapes_meta_description() {
    let page = "<html><head><meta name=\"description\" content=\"Вовочка спросил: \\\"почему?\\\"\\nНикто не ответил.\"></head></html>";

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/random");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(page);
        })
        .await;

    let provider = BaneksProvider::with_url(server.url("/random"));
    let joke = provider.fetch().await.unwrap();
    assert_eq!(joke.text, "Вовочка спросил: \"почему?\"\nНикто не ответил.");
    assert!(joke.is_russian);
}

#[tokio::test]
async fn baneks_empty_description_is_a_failure() {
    let page = "<html><head><meta name=\"description\" content=\"   \"></head></html>";

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/random");
            then.status(200).body(page);
        })
        .await;

    let provider = BaneksProvider::with_url(server.url("/random"));
    let err = provider.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Extraction { .. }));
}

#[tokio::test]
async fn baneks_without_meta_tag_is_a_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/random");
            then.status(200).body("<html><head><title>x</title></head></html>");
        })
        .await;

    let provider = BaneksProvider::with_url(server.url("/random"));
    let err = provider.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Extraction { .. }));
}

#[tokio::test]
async fn jokeapi_error_flag_carries_the_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/joke/Any");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"error":true,"message":"API is overloaded"}"#);
        })
        .await;

    let provider = JokeApiProvider::with_url(server.url("/joke/Any?type=single"));
    let err = provider.fetch().await.unwrap_err();
    match &err {
        FetchError::Upstream { message, .. } => assert_eq!(message, "API is overloaded"),
        other => panic!("expected upstream error, got {other:?}"),
    }
    assert!(err.to_string().contains("API is overloaded"));
}

#[tokio::test]
async fn jokeapi_prefers_single_joke_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/joke/Any");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"error":false,"joke":"I would tell a UDP joke, but you might not get it."}"#);
        })
        .await;

    let provider = JokeApiProvider::with_url(server.url("/joke/Any?type=single"));
    let joke = provider.fetch().await.unwrap();
    assert_eq!(joke.text, "I would tell a UDP joke, but you might not get it.");
    assert!(!joke.is_russian);
}

#[tokio::test]
async fn jokeapi_falls_back_to_setup_and_delivery() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/joke/Any");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"error":false,"setup":"Why do programmers prefer dark mode?","delivery":"Because light attracts bugs."}"#);
        })
        .await;

    let provider = JokeApiProvider::with_url(server.url("/joke/Any?type=single"));
    let joke = provider.fetch().await.unwrap();
    assert_eq!(
        joke.text,
        "Why do programmers prefer dark mode?\nBecause light attracts bugs."
    );
}

#[tokio::test]
async fn jokeapi_with_no_content_is_a_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/joke/Any");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"error":false,"joke":"","setup":"only half","delivery":""}"#);
        })
        .await;

    let provider = JokeApiProvider::with_url(server.url("/joke/Any?type=single"));
    let err = provider.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Extraction { .. }));
}

#[tokio::test]
async fn facade_times_out_a_silent_provider() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"joke":"too late"}"#)
                .delay(Duration::from_secs(10));
        })
        .await;

    let provider = DadJokeProvider::with_url(server.base_url());
    let service = JokeService::new(
        ProviderRegistry::new(vec![Box::new(provider)], vec![1]),
        Duration::from_millis(200),
    );

    let started = std::time::Instant::now();
    let err = service.fetch(None).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, FetchError::Network { .. }));
    assert!(
        elapsed < Duration::from_secs(2),
        "timeout should fire near the 200ms budget, took {elapsed:?}"
    );
}
