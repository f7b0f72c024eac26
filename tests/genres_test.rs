mod common;

use std::collections::BTreeMap;

use common::{MockSpotify, default_features, ids, temp_cache, track};
use genremap::{
    spotify::*,
    types::{RecommendationParams, Seeds},
    utils::default_repeat,
};

fn similar_rock_artists(seed: &str) -> MockSpotify {
    MockSpotify::new()
        .with_recommendations(
            seed,
            vec![
                track("t10", &["a2"]),
                track("t11", &["a3"]),
                track("t12", &["a4"]),
            ],
        )
        .with_genres("a2", &["rock", "indie rock"])
        .with_genres("a3", &["rock"])
        .with_genres("a4", &["rock", "jazz"])
}

#[tokio::test]
async fn test_artist_genre_cached_across_clients() {
    let (_dir, cache) = temp_cache().await;
    let first = MockSpotify::new().with_genres("a1", &["shoegaze"]);
    let second = MockSpotify::new().with_genres("a1", &["something else"]);

    let genres = request_artist_genre(&first, &cache, "a1").await.unwrap();
    let cached = request_artist_genre(&second, &cache, "a1").await.unwrap();

    assert_eq!(genres, vec!["shoegaze"]);
    assert_eq!(cached, genres);
    assert_eq!(MockSpotify::count(&first.artist_calls), 1);
    assert_eq!(MockSpotify::count(&second.artist_calls), 0);
}

#[tokio::test]
async fn test_recommendations_repeat_keeps_duplicates() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_recommendations("a1", vec![track("t1", &["a2"])]);
    let params = RecommendationParams {
        limit: 5,
        repeat: 3,
    };

    let tracks = request_recommendations(&client, &cache, &Seeds::artist("a1"), &params)
        .await
        .unwrap();
    assert_eq!(tracks.len(), 3);
    assert!(tracks.iter().all(|t| t.id == "t1"));
    assert_eq!(MockSpotify::count(&client.recommendation_calls), 3);

    request_recommendations(&client, &cache, &Seeds::artist("a1"), &params)
        .await
        .unwrap();
    assert_eq!(MockSpotify::count(&client.recommendation_calls), 3);
}

#[tokio::test]
async fn test_similar_artists_exclude_seeds() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_recommendations(
        "a1",
        vec![
            track("t1", &["a1", "a3"]),
            track("t2", &["a2"]),
            track("t3", &["a3"]),
        ],
    );
    let params = RecommendationParams {
        limit: 10,
        repeat: 2,
    };

    let similar = get_similar_artists(&client, &cache, &Seeds::artist("a1"), &params)
        .await
        .unwrap();
    assert_eq!(similar, vec!["a2", "a3"]);
}

#[tokio::test]
async fn test_similar_artists_empty_seeds() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new();

    let similar = get_similar_artists(&client, &cache, &Seeds::default(), &RecommendationParams::default())
        .await
        .unwrap();
    assert!(similar.is_empty());
    assert_eq!(MockSpotify::count(&client.recommendation_calls), 0);
}

#[tokio::test]
async fn test_approximate_genres_keeps_dominant_genre() {
    let (_dir, cache) = temp_cache().await;
    let client = similar_rock_artists("a1");
    let params = RecommendationParams {
        limit: 10,
        repeat: 1,
    };

    let genres = approximate_genres(&client, &cache, &Seeds::artist("a1"), &params)
        .await
        .unwrap();
    assert_eq!(genres, vec!["rock"]);
}

#[tokio::test]
async fn test_single_artist_genres_direct() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_genres("a1", &["shoegaze", "dream pop"]);

    let genres = get_single_artist_genres(&client, &cache, "a1").await.unwrap();
    assert_eq!(genres, vec!["shoegaze", "dream pop"]);
    assert_eq!(MockSpotify::count(&client.recommendation_calls), 0);
}

#[tokio::test]
async fn test_single_artist_genres_approximated() {
    let (_dir, cache) = temp_cache().await;
    let client = similar_rock_artists("a1");

    let genres = get_single_artist_genres(&client, &cache, "a1").await.unwrap();
    assert_eq!(genres, vec!["rock"]);
    assert_eq!(
        MockSpotify::count(&client.recommendation_calls),
        default_repeat()
    );
}

#[tokio::test]
async fn test_artist_genres_order_independent() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new()
        .with_genres("a1", &["rock", "pop"])
        .with_genres("a2", &["pop", "jazz"]);

    let forward = get_artist_genres(&client, &cache, &ids(&["a1", "a2"]))
        .await
        .unwrap();
    let backward = get_artist_genres(&client, &cache, &ids(&["a2", "a1"]))
        .await
        .unwrap();

    assert_eq!(forward, vec!["jazz", "pop", "rock"]);
    assert_eq!(forward, backward);
}

#[tokio::test]
async fn test_tracks_requested_in_batches() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new();
    let track_ids: Vec<String> = (0..120).map(|i| format!("t{}", i)).collect();

    let tracks = get_tracks_from_id(&client, &cache, &track_ids).await.unwrap();

    let returned: Vec<String> = tracks.into_iter().map(|t| t.id).collect();
    assert_eq!(returned, track_ids);
    assert_eq!(*client.track_batches.lock().unwrap(), vec![50, 50, 20]);
}

#[tokio::test]
async fn test_audio_features_selected_keys() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_features("t1", default_features());

    let features = request_audio_features(&client, &cache, "t1", &ids(&["tempo", "energy"]))
        .await
        .unwrap();
    assert_eq!(
        features,
        BTreeMap::from([("energy".to_string(), 0.8), ("tempo".to_string(), 120.0)])
    );
}

#[tokio::test]
async fn test_audio_features_missing() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_features("t1", default_features());

    // Requested key absent from the features
    assert!(
        request_audio_features(&client, &cache, "t1", &ids(&["loudness"]))
            .await
            .is_err()
    );
    // Non numeric value
    assert!(
        request_audio_features(&client, &cache, "t1", &ids(&["type"]))
            .await
            .is_err()
    );
    // Track without features
    assert!(
        request_audio_features(&client, &cache, "t2", &ids(&["tempo"]))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_cleaned_track_data() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new()
        .with_genres("a1", &["shoegaze", "dream pop"])
        .with_genres("a2", &["dream pop"])
        .with_features("t1", default_features());
    let keys = ids(&["danceability", "tempo"]);

    let record = cleaned_track_data(&client, &cache, &track("t1", &["a1", "a2"]), &keys)
        .await
        .unwrap();

    assert_eq!(record.spotify_id, "t1");
    assert_eq!(record.title, "Track t1");
    assert_eq!(record.artists, vec!["Artist a1", "Artist a2"]);
    assert_eq!(record.artists_id, vec!["a1", "a2"]);
    assert_eq!(record.genres, vec!["dream pop", "shoegaze"]);
    assert_eq!(record.popularity, 42);
    assert_eq!(record.audio_features.len(), 2);

    // Audio features are flattened into the record
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["tempo"], 120.0);
    assert_eq!(json["danceability"], 0.5);
    assert_eq!(json["genres"][0], "dream pop");
    assert_eq!(record.missing_genres_report(), None);
}

#[tokio::test]
async fn test_cleaned_track_data_track_seed_fallback() {
    let (_dir, cache) = temp_cache().await;
    let client = similar_rock_artists("t1").with_features("t1", default_features());

    let record = cleaned_track_data(&client, &cache, &track("t1", &["a1"]), &ids(&["energy"]))
        .await
        .unwrap();
    assert_eq!(record.genres, vec!["rock"]);
}

#[tokio::test]
async fn test_cleaned_track_data_without_genres() {
    let (_dir, cache) = temp_cache().await;
    let client = MockSpotify::new().with_features("t1", default_features());

    let record = cleaned_track_data(&client, &cache, &track("t1", &["a1"]), &ids(&["energy"]))
        .await
        .unwrap();
    assert!(record.genres.is_empty());
    assert_eq!(record.audio_features["energy"], 0.8);

    let report = record.missing_genres_report().unwrap();
    assert!(report.contains("'Track t1'"));
    assert!(report.contains("(id: 't1')"));
}
