mod common;

use std::time::Duration;

use cinemood_client::{
    error::{ErrorKind, TransportError},
    models::MovieQuery,
    services::{AiService, MovieService},
    state::{MovieList, QueryStatus, Recommendation, SimilarMovies},
    transport::HttpResponse,
    views::{DetailView, HomePage, MovieDetailPage},
};
use common::{list_body, ScriptedTransport};

const TIMEOUT: Duration = Duration::from_secs(30);

const WEEKEND_BODY: &str = r#"{
    "query": "輕鬆搞笑的週末電影",
    "intent": {"mood": "輕鬆", "genres": ["喜劇"], "keywords": ["週末"]},
    "recommendations": [
        {"movie_id": "a1", "title": "Paddington 2", "genres": ["Comedy", "Family"], "similarity_score": 0.92, "reason": "溫馨又好笑"},
        {"movie_id": "a2", "title": "The Grand Budapest Hotel", "genres": ["Comedy"], "similarity_score": 0.88},
        {"movie_id": "a3", "genres": ["Comedy"], "similarity_score": 0.85, "reason": "no title"},
        {"movie_id": "a4", "title": "Game Night", "genres": ["Comedy", "Crime"], "similarity_score": 0.81, "reason": "節奏明快"}
    ],
    "total": 4
}"#;

fn create_test_home(transport: &ScriptedTransport) -> HomePage {
    let client = transport.client(TIMEOUT);
    HomePage::new(MovieService::new(client.clone()), AiService::new(client))
}

#[tokio::test]
async fn test_weekend_comedy_recommendation_drops_untitled_item() {
    let transport = ScriptedTransport::always_ok(WEEKEND_BODY);
    let recommendation = Recommendation::new(AiService::new(transport.client(TIMEOUT)));

    recommendation
        .recommend("輕鬆搞笑的週末電影", 5)
        .await
        .unwrap();

    let shown = recommendation.recommendations();
    assert_eq!(shown.len(), 3);
    assert!(shown
        .iter()
        .all(|d| !d.movie.id.is_empty() && !d.movie.title.is_empty()));
    assert_eq!(shown[0].similarity_score, 0.92);
    assert_eq!(shown[0].reason.as_deref(), Some("溫馨又好笑"));
    assert_eq!(shown[1].reason, None);
    assert_eq!(shown[2].reason.as_deref(), Some("節奏明快"));

    // Request body carries exactly query and top_k
    let sent = transport.requests();
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({"query": "輕鬆搞笑的週末電影", "top_k": 5}))
    );
}

#[tokio::test]
async fn test_recommend_list_never_exceeds_top_k() {
    let transport = ScriptedTransport::always_ok(WEEKEND_BODY);
    let recommendation = Recommendation::new(AiService::new(transport.client(TIMEOUT)));

    for k in 1..=5 {
        recommendation.recommend("weekend", k).await.unwrap();
        assert!(recommendation.recommendations().len() <= k);
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let transport = ScriptedTransport::new(|_| {
        (
            Duration::from_secs(5),
            Ok(HttpResponse::ok(WEEKEND_BODY)),
        )
    });
    let recommendation =
        Recommendation::new(AiService::new(transport.client(Duration::from_millis(50))));

    let err = recommendation.recommend("slow", 5).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(recommendation.status(), QueryStatus::Error);
    assert!(recommendation.error().unwrap().is_timeout());
    assert!(recommendation.recommendations().is_empty());
}

#[tokio::test]
async fn test_server_error_detail_reaches_state() {
    let transport = ScriptedTransport::new(|_| {
        (
            Duration::ZERO,
            Ok(HttpResponse {
                status: 500,
                body: r#"{"detail":"vector index unavailable"}"#.to_string(),
            }),
        )
    });
    let similar = SimilarMovies::new(AiService::new(transport.client(TIMEOUT)));

    similar
        .set_movie(Some("m1".to_string()), 5)
        .unwrap()
        .await
        .unwrap();

    let err = similar.error().unwrap();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.detail.as_deref(), Some("vector index unavailable"));
    assert_eq!(similar.status(), QueryStatus::Error);
}

#[tokio::test]
async fn test_similar_without_id_makes_no_requests() {
    let transport = ScriptedTransport::always_ok("{}");
    let similar = SimilarMovies::new(AiService::new(transport.client(TIMEOUT)));

    assert!(similar.set_movie(None, 5).is_none());

    assert_eq!(transport.request_count(), 0);
    assert_eq!(similar.status(), QueryStatus::Idle);
}

#[tokio::test]
async fn test_rapid_page_changes_settle_on_last_page() {
    // Earlier pages answer more slowly than later ones
    let transport = ScriptedTransport::new(|req| {
        let page: u32 = req.query_param("page").unwrap().parse().unwrap();
        let delay = Duration::from_millis(u64::from(60 - page * 10));
        (delay, Ok(HttpResponse::ok(list_body(page, &["Movie"]))))
    });
    let list = MovieList::new(MovieService::new(transport.client(TIMEOUT)));

    let mut handles = Vec::new();
    for page in 1..=5 {
        handles.extend(list.set_query(MovieQuery::default().page(page)));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(transport.request_count(), 5);
    assert_eq!(list.page(), 5);
    assert_eq!(list.movies()[0].id, "p5-0");
    assert_eq!(list.status(), QueryStatus::Success);
}

#[tokio::test]
async fn test_failed_refresh_keeps_last_good_list() {
    let transport = ScriptedTransport::new(|req| {
        if req.query_param("page") == Some("1") {
            (Duration::ZERO, Ok(HttpResponse::ok(list_body(1, &["Heat", "Ronin"]))))
        } else {
            (
                Duration::ZERO,
                Err(TransportError::Network("connection reset".to_string()).into()),
            )
        }
    });
    let list = MovieList::new(MovieService::new(transport.client(TIMEOUT)));

    list.set_query(MovieQuery::default()).unwrap().await.unwrap();
    list.set_query(MovieQuery::default().page(2))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(list.status(), QueryStatus::Error);
    assert_eq!(list.error().unwrap().kind, ErrorKind::Network);
    assert_eq!(list.movies().len(), 2);
}

#[tokio::test]
async fn test_home_page_flow() {
    let transport = ScriptedTransport::new(|req| {
        let body = if req.path == "/api/v1/movies" {
            list_body(1, &["Heat", "Ronin", "Thief"])
        } else {
            WEEKEND_BODY.to_string()
        };
        (Duration::ZERO, Ok(HttpResponse::ok(body)))
    });
    let home = create_test_home(&transport);

    // Mount loads the popular strip once
    home.mount().unwrap().await.unwrap();
    assert!(home.mount().is_none());
    assert_eq!(home.popular_movies().len(), 3);
    assert_eq!(home.popular_status(), QueryStatus::Success);

    let popular_request = &transport.requests()[0];
    assert_eq!(popular_request.query_param("page_size"), Some("6"));
    assert_eq!(popular_request.query_param("sort_by"), Some("rating"));

    // Submit a mood query
    assert!(!home.shows_recommendations());
    home.submit_query("輕鬆搞笑的週末電影").await.unwrap();

    assert!(home.shows_recommendations());
    assert_eq!(home.user_query().as_deref(), Some("輕鬆搞笑的週末電影"));
    assert_eq!(home.recommendations().len(), 3);
    assert_eq!(home.intent().unwrap().mood.as_deref(), Some("輕鬆"));
    assert_eq!(home.recommendation_status(), QueryStatus::Success);
}

#[tokio::test]
async fn test_home_page_submit_failure_is_returned() {
    let transport = ScriptedTransport::new(|_| {
        (
            Duration::ZERO,
            Ok(HttpResponse {
                status: 503,
                body: String::new(),
            }),
        )
    });
    let home = create_test_home(&transport);

    let err = home.submit_query("anything").await.unwrap_err();

    assert_eq!(err.status, Some(503));
    assert_eq!(home.recommendation_status(), QueryStatus::Error);
    assert!(home.recommendations().is_empty());
}

#[tokio::test]
async fn test_movie_detail_page_navigation() {
    let transport = ScriptedTransport::new(|req| {
        let body = if req.path.starts_with("/api/v1/ai/similar/") {
            r#"{"similar_movies": [{"movie_id": "m2", "title": "Thief", "genres": ["Crime"], "similarity_score": 0.8}], "total": 1}"#
                .to_string()
        } else {
            r#"{"id": "m1", "title": "Heat", "release_date": "1995-12-15"}"#.to_string()
        };
        (Duration::ZERO, Ok(HttpResponse::ok(body)))
    });
    let client = transport.client(TIMEOUT);
    let page = MovieDetailPage::new(MovieService::new(client.clone()), AiService::new(client));

    // Router has not produced an id yet
    assert!(page.navigate(None).is_empty());
    assert_eq!(page.view(), DetailView::NotFound);
    assert_eq!(transport.request_count(), 0);

    for handle in page.navigate(Some("m1".to_string())) {
        handle.await.unwrap();
    }

    match page.view() {
        DetailView::Ready(movie) => {
            assert_eq!(movie.title, "Heat");
            assert_eq!(movie.release_year(), Some(1995));
        }
        other => panic!("expected movie, got {:?}", other),
    }
    assert_eq!(page.similar_movies()[0].movie.title, "Thief");
    assert_eq!(transport.request_count(), 2);

    // Same id again is not refetched
    assert!(page.navigate(Some("m1".to_string())).is_empty());
    assert_eq!(transport.request_count(), 2);
}
