//! Resolver tests against mocked upstreams.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytr_models::VideoReference;
use ytr_youtube::{
    AttemptOutcome, MetadataResolver, MetadataSource, ResolverConfig, Tier, YoutubeResolver,
};

const VIDEO_ID: &str = "dQw4w9WgXcQ";

fn video() -> VideoReference {
    VideoReference::parse(VIDEO_ID).unwrap()
}

fn config_for(server: &MockServer, api_key: Option<&str>) -> ResolverConfig {
    ResolverConfig {
        api_key: api_key.map(str::to_string),
        data_api_base: server.uri(),
        oembed_url: format!("{}/oembed", server.uri()),
        watch_base: format!("{}/watch", server.uri()),
        request_timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
        ..Default::default()
    }
}

fn data_api_body() -> serde_json::Value {
    json!({
        "items": [{
            "snippet": {
                "title": "Never Gonna Give You Up",
                "channelTitle": "Rick Astley",
                "description": "The official video",
                "publishedAt": "2009-10-25T06:57:33Z",
                "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"}}
            },
            "contentDetails": {"duration": "PT3M33S"},
            "statistics": {"viewCount": "1500000000"}
        }]
    })
}

fn oembed_body() -> serde_json::Value {
    json!({
        "title": "Never Gonna Give You Up",
        "author_name": "Rick Astley",
        "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    })
}

const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"videoDetails":{"videoId":"dQw4w9WgXcQ","lengthSeconds":"212"}};</script></html>"#;

async fn mount_oembed(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
        .and(query_param("format", "json"))
        .and(header("user-agent", "YouTranscript/1.0"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_watch(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", VIDEO_ID))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_data_api_success_short_circuits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", VIDEO_ID))
        .and(query_param("key", "test-key"))
        .and(query_param("part", "snippet,contentDetails,statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_api_body()))
        .expect(1)
        .mount(&server)
        .await;
    mount_oembed(&server, ResponseTemplate::new(200), 0).await;
    mount_watch(&server, ResponseTemplate::new(200), 0).await;

    let resolver = YoutubeResolver::new(config_for(&server, Some("test-key"))).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(resolution.source, MetadataSource::DataApi);
    assert_eq!(resolution.attempted_tiers(), vec![Tier::DataApi]);
    assert!(!resolution.not_found);

    let meta = resolution.into_confirmed().unwrap();
    assert_eq!(meta.title, "Never Gonna Give You Up");
    assert_eq!(meta.channel_name, "Rick Astley");
    assert_eq!(meta.duration_seconds, 213);
    assert_eq!(meta.view_count, Some(1_500_000_000));
}

#[tokio::test]
async fn test_without_key_uses_oembed_and_scrape() {
    let server = MockServer::start().await;

    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(oembed_body()), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let resolver = YoutubeResolver::new(config_for(&server, None)).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(resolution.source, MetadataSource::OEmbed);
    assert_eq!(
        resolution.attempted_tiers(),
        vec![Tier::OEmbed, Tier::PageScrape]
    );
    assert_eq!(resolution.attempts[0].outcome, AttemptOutcome::Skipped);

    let meta = resolution.into_metadata();
    assert_eq!(meta.title, "Never Gonna Give You Up");
    assert_eq!(meta.duration_seconds, 212);
    assert!(meta.description.is_empty());
    assert_eq!(meta.view_count, None);
}

#[tokio::test]
async fn test_data_api_error_falls_through() {
    let server = MockServer::start().await;

    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(oembed_body()), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let resolver = YoutubeResolver::new(config_for(&server, Some("test-key"))).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(
        resolution.attempted_tiers(),
        vec![Tier::DataApi, Tier::OEmbed, Tier::PageScrape]
    );
    assert!(matches!(
        resolution.attempts[0].outcome,
        AttemptOutcome::Failed(ref reason) if reason.contains("500")
    ));
    assert_eq!(resolution.metadata.duration_seconds, 212);
}

#[tokio::test]
async fn test_malformed_data_api_json_falls_through() {
    let server = MockServer::start().await;

    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .expect(1)
        .mount(&server)
        .await;
    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(oembed_body()), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let resolver = YoutubeResolver::new(config_for(&server, Some("test-key"))).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(resolution.source, MetadataSource::OEmbed);
    assert_eq!(resolution.metadata.channel_name, "Rick Astley");
}

#[tokio::test]
async fn test_oembed_404_is_not_found_without_scrape() {
    let server = MockServer::start().await;

    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;
    mount_oembed(&server, ResponseTemplate::new(404), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 0).await;

    let resolver = YoutubeResolver::new(config_for(&server, Some("test-key"))).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert!(resolution.not_found);
    assert_eq!(
        resolution.attempted_tiers(),
        vec![Tier::DataApi, Tier::OEmbed]
    );
    assert!(resolution.degradation().is_none());

    let err = resolution.into_confirmed().unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_oembed_failure_degrades_and_still_scrapes() {
    let server = MockServer::start().await;

    mount_oembed(&server, ResponseTemplate::new(503), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let resolver = YoutubeResolver::new(config_for(&server, None)).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert!(!resolution.not_found);
    assert_eq!(resolution.source, MetadataSource::Fallback);
    assert!(resolution.degradation().is_some());

    let meta = resolution.into_confirmed().unwrap();
    assert_eq!(meta.title, "Unable to fetch title");
    assert_eq!(meta.channel_name, "Unable to fetch channel");
    assert_eq!(
        meta.thumbnail_url,
        "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
    assert_eq!(meta.duration_seconds, 212);
}

#[tokio::test]
async fn test_oembed_missing_fields_use_unknown_placeholders() {
    let server = MockServer::start().await;

    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(json!({})), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string("<html></html>"), 1).await;

    let resolver = YoutubeResolver::new(config_for(&server, None)).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert!(matches!(
        resolution.attempts[2].outcome,
        AttemptOutcome::Failed(_)
    ));

    let meta = resolution.into_metadata();
    assert_eq!(meta.title, "Unknown Title");
    assert_eq!(meta.channel_name, "Unknown Channel");
    assert_eq!(meta.duration_seconds, 0);
}

#[tokio::test]
async fn test_scrape_disabled() {
    let server = MockServer::start().await;

    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(oembed_body()), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 0).await;

    let config = ResolverConfig {
        scrape_duration: false,
        ..config_for(&server, None)
    };
    let resolver = YoutubeResolver::new(config).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(resolution.attempted_tiers(), vec![Tier::OEmbed]);
    assert_eq!(resolution.metadata.duration_seconds, 0);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;

    mount_oembed(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(oembed_body())
            .set_delay(Duration::from_secs(3)),
        1,
    )
    .await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let config = ResolverConfig {
        request_timeout: Duration::from_millis(200),
        ..config_for(&server, None)
    };
    let resolver = YoutubeResolver::new(config).unwrap();
    let resolution = resolver.resolve(&video()).await;

    assert_eq!(resolution.source, MetadataSource::Fallback);
    assert!(!resolution.not_found);
    assert_eq!(resolution.metadata.duration_seconds, 212);
}

#[tokio::test]
async fn test_trait_object_resolution() {
    let server = MockServer::start().await;

    mount_oembed(&server, ResponseTemplate::new(200).set_body_json(oembed_body()), 1).await;
    mount_watch(&server, ResponseTemplate::new(200).set_body_string(WATCH_PAGE), 1).await;

    let resolver: Box<dyn MetadataResolver> =
        Box::new(YoutubeResolver::new(config_for(&server, None)).unwrap());
    let resolution = resolver.resolve(&video()).await.unwrap();

    assert_eq!(resolution.metadata.id.as_str(), VIDEO_ID);

    let info = resolver.describe();
    assert!(!info.has_api_key);
    assert!(info.scrape_duration);
    assert_eq!(info.request_timeout_secs, 2);
}
