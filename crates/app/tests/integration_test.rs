//! End-to-end scenarios: real HTTP client against a mock backend, through
//! the fetcher and into the rendered view.

use std::time::Duration;

use api_client::{ClientConfig, PosterConfig};
use app::{
    AppConfig, CardGrid, FetchOutcome, InputBar, PosterDisplay, RecommendationFetcher, View,
    render_view,
};
use model::{FAILURE_MESSAGE, RequestState, VALIDATION_MESSAGE};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        backend: ClientConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        },
        ..AppConfig::default()
    }
}

fn fetcher_for(config: &AppConfig) -> RecommendationFetcher {
    let source = config.recommendation_source().expect("Failed to build client");
    RecommendationFetcher::new(source, config.top_k)
}

async fn mount_recommendations(server: &MockServer, user_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("user_id", user_id))
        .and(query_param("top_k", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_result_scenario() {
    let server = MockServer::start().await;
    mount_recommendations(
        &server,
        "1",
        json!([{
            "movieId": 1,
            "title": "A",
            "predicted_rating": 4.5,
            "match_percentage": 92.3,
            "genres": ["Drama"],
            "explanation": "..."
        }]),
    )
    .await;

    let config = config_for(&server);
    let fetcher = fetcher_for(&config);
    let mut input = InputBar::new();
    input.set_text("1");

    let pending = input.submit(&fetcher).unwrap();
    assert_eq!(
        render_view(&fetcher.snapshot(), None),
        View::Loading { placeholders: 10 }
    );

    assert_eq!(pending.resolve().await, FetchOutcome::Committed);

    let snapshot = fetcher.snapshot();
    let results = snapshot.state.results().unwrap();
    let grid = CardGrid::mount(snapshot.generation, results, config.poster_source());

    let View::Grid(cards) = render_view(&snapshot, Some(&grid)) else {
        panic!("expected a grid");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "A");
    assert_eq!(cards[0].rating, "4.50");
    assert_eq!(cards[0].match_label, "92.3%");
    assert_eq!(cards[0].genres, vec!["Drama"]);
    assert_eq!(cards[0].explanation, None);
}

#[tokio::test]
async fn test_grid_keeps_response_order() {
    let server = MockServer::start().await;
    let body: Vec<_> = [318u32, 858, 50, 527, 1221]
        .iter()
        .map(|id| json!({"movieId": id, "title": format!("Movie {}", id)}))
        .collect();
    mount_recommendations(&server, "4", json!(body)).await;

    let config = config_for(&server);
    let fetcher = fetcher_for(&config);
    fetcher.fetch("4").await.unwrap();

    let View::Grid(cards) = render_view(&fetcher.snapshot(), None) else {
        panic!("expected a grid");
    };
    let keys: Vec<_> = cards.iter().map(|c| c.key).collect();
    assert_eq!(keys, vec![318, 858, 50, 527, 1221]);
}

#[tokio::test]
async fn test_empty_result_renders_empty_state() {
    let server = MockServer::start().await;
    mount_recommendations(&server, "99999", json!([])).await;

    let fetcher = fetcher_for(&config_for(&server));
    fetcher.fetch("99999").await.unwrap();

    assert_eq!(fetcher.snapshot().state, RequestState::Success(vec![]));
    assert_eq!(render_view(&fetcher.snapshot(), None), View::Empty);
}

#[tokio::test]
async fn test_blank_query_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&config_for(&server));
    let input = InputBar::new();
    assert!(input.submit(&fetcher).is_err());

    let snapshot = fetcher.snapshot();
    assert_eq!(snapshot.state, RequestState::Idle);
    assert_eq!(
        render_view(&snapshot, None),
        View::Invalid(VALIDATION_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_server_error_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&config_for(&server));
    fetcher.fetch("1").await.unwrap();

    let view = render_view(&fetcher.snapshot(), None);
    assert_eq!(view, View::Failed(FAILURE_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_network_error_scenario() {
    let config = AppConfig {
        backend: ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
        },
        ..AppConfig::default()
    };
    let fetcher = fetcher_for(&config);
    fetcher.fetch("1").await.unwrap();

    let view = render_view(&fetcher.snapshot(), None);
    assert_eq!(view, View::Failed(FAILURE_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_slow_earlier_request_does_not_overwrite_later_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("user_id", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"movieId": 1, "title": "Slow"}]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_recommendations(&server, "2", json!([{"movieId": 2, "title": "Fast"}])).await;

    let fetcher = fetcher_for(&config_for(&server));
    let first = fetcher.submit("1").unwrap();
    let second = fetcher.submit("2").unwrap();

    let (first, second) = tokio::join!(first.resolve(), second.resolve());
    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Committed);

    let View::Grid(cards) = render_view(&fetcher.snapshot(), None) else {
        panic!("expected a grid");
    };
    assert_eq!(cards[0].title, "Fast");
}

#[tokio::test]
async fn test_posters_are_looked_up_per_card() {
    let backend = MockServer::start().await;
    mount_recommendations(
        &backend,
        "10",
        json!([
            {"movieId": 1, "title": "Toy Story", "tmdbId": 862},
            {"movieId": 2, "title": "Jumanji", "tmdbId": 8844},
            {"movieId": 3, "title": "Heat", "poster": "https://direct/heat.jpg", "tmdbId": 949}
        ]),
    )
    .await;

    let posters = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/862"))
        .and(query_param("api_key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"poster_path": "/toy.jpg"})))
        .expect(1)
        .mount(&posters)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/8844"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&posters)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/949"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"poster_path": "/heat.jpg"})))
        .expect(0)
        .mount(&posters)
        .await;

    let mut poster_config = PosterConfig::new("k");
    poster_config.api_base = posters.uri();
    poster_config.image_base = "https://img.test/w500".to_string();
    let config = AppConfig {
        poster: Some(poster_config),
        ..config_for(&backend)
    };

    let fetcher = fetcher_for(&config);
    fetcher.fetch("10").await.unwrap();
    let snapshot = fetcher.snapshot();
    let grid = CardGrid::mount(
        snapshot.generation,
        snapshot.state.results().unwrap(),
        config.poster_source(),
    );
    grid.wait_posters().await;

    let View::Grid(cards) = render_view(&snapshot, Some(&grid)) else {
        panic!("expected a grid");
    };
    assert_eq!(
        cards[0].poster,
        PosterDisplay::Image("https://img.test/w500/toy.jpg".to_string())
    );
    assert_eq!(cards[1].poster, PosterDisplay::Placeholder);
    assert_eq!(
        cards[2].poster,
        PosterDisplay::Image("https://direct/heat.jpg".to_string())
    );
}

#[tokio::test]
async fn test_replacing_grid_discards_late_posters() {
    let posters = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/862"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"poster_path": "/late.jpg"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&posters)
        .await;

    let mut poster_config = PosterConfig::new("k");
    poster_config.api_base = posters.uri();
    let config = AppConfig {
        poster: Some(poster_config),
        ..AppConfig::default()
    };
    let source = config.poster_source();
    assert!(source.is_some());

    let records: Vec<model::Recommendation> =
        serde_json::from_value(json!([{"movieId": 1, "title": "Toy Story", "tmdbId": 862}]))
            .unwrap();
    let old = CardGrid::mount(1, &records, source.clone());
    let current = CardGrid::mount(2, &[], source);

    let outstanding = old.unmount();
    assert_eq!(outstanding.len(), 1);
    for handle in outstanding {
        assert!(!handle.await.unwrap());
    }
    assert!(current.is_empty());
}
