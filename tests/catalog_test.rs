use std::{collections::HashMap, sync::Mutex};

use chartcli::{
    Res,
    catalog::{
        self, CatalogError, MissPolicy, Session, add_tracks, ensure_playlist, playlist_name,
        resolve, search_query,
    },
    chart::{ChartEntry, ChartKey, ParseStrategy, parse},
    types::{CatalogRef, Playlist, PlaylistOwner, Track},
};
use indicatif::ProgressBar;

// In-memory stand-in for the streaming service.
#[derive(Default)]
struct StubSession {
    catalog: HashMap<String, Vec<Track>>,
    playlists: Mutex<Vec<Playlist>>,
    searches: Mutex<Vec<String>>,
    created: Mutex<usize>,
    appended: Mutex<Vec<(String, Vec<CatalogRef>)>>,
    reject_append: bool,
}

impl StubSession {
    fn with_hits(entries: &[ChartEntry]) -> Self {
        let catalog = entries
            .iter()
            .map(|e| (search_query(e), vec![track(&e.track)]))
            .collect();
        Self {
            catalog,
            ..Default::default()
        }
    }
}

fn track(name: &str) -> Track {
    let id = name.to_lowercase().replace(' ', "-");
    Track {
        id: id.clone(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
    }
}

fn entry(rank: usize, track: &str, artist: &str) -> ChartEntry {
    ChartEntry {
        rank,
        track: track.to_string(),
        artist: artist.to_string(),
    }
}

fn playlist(id: &str, name: &str) -> Playlist {
    owned_playlist(id, name, "user1")
}

fn owned_playlist(id: &str, name: &str, owner: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: owner.to_string(),
        },
        public: Some(true),
    }
}

impl Session for StubSession {
    fn user_id(&self) -> &str {
        "user1"
    }

    async fn search_tracks(&self, query: &str) -> Res<Vec<Track>> {
        self.searches.lock().unwrap().push(query.to_string());
        Ok(self.catalog.get(query).cloned().unwrap_or_default())
    }

    async fn list_playlists(&self, _user_id: &str) -> Res<Vec<Playlist>> {
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn create_playlist(&self, user_id: &str, name: &str) -> Res<Playlist> {
        let mut created = self.created.lock().unwrap();
        *created += 1;
        let new = owned_playlist(&format!("pl-{}", *created), name, user_id);
        self.playlists.lock().unwrap().push(new.clone());
        Ok(new)
    }

    async fn append_tracks(&self, playlist_id: &str, refs: &[CatalogRef]) -> Res<()> {
        if self.reject_append {
            return Err("Invalid base62 id".into());
        }
        self.appended
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), refs.to_vec()));
        Ok(())
    }
}

#[test]
fn test_search_query_combines_track_and_artist() {
    let query = search_query(&entry(1, "Flowers", "Miley Cyrus"));
    assert_eq!(query, "track:Flowers artist:Miley Cyrus");
}

#[test]
fn test_playlist_name() {
    let key: ChartKey = "2024-05".parse().unwrap();
    assert_eq!(playlist_name(&key), "2024-05 Billboard Top 100");
}

#[tokio::test]
async fn test_resolve_keeps_chart_order() {
    let entries = vec![
        entry(1, "Song A", "Artist A"),
        entry(2, "Song B", "Artist B"),
        entry(3, "Song C", "Artist C"),
    ];
    let session = StubSession::with_hits(&entries);

    let resolution = resolve(&session, &entries, MissPolicy::Skip, &ProgressBar::hidden())
        .await
        .unwrap();

    let found = resolution.found();
    let uris: Vec<&str> = found.iter().map(|r| r.as_str()).collect();
    assert_eq!(
        uris,
        vec![
            "spotify:track:song-a",
            "spotify:track:song-b",
            "spotify:track:song-c"
        ]
    );
    assert!(resolution.missed().is_empty());

    let searches = session.searches.lock().unwrap();
    assert_eq!(searches.len(), 3);
    assert_eq!(searches[0], "track:Song A artist:Artist A");
}

#[tokio::test]
async fn test_resolve_skip_reports_missed_entries() {
    let entries = vec![
        entry(1, "Song A", "Artist A"),
        entry(2, "Unknown", "Nobody"),
        entry(3, "Song C", "Artist C"),
    ];
    let session = StubSession::with_hits(&[entries[0].clone(), entries[2].clone()]);

    let resolution = resolve(&session, &entries, MissPolicy::Skip, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(resolution.len(), 3);
    assert!(resolution.slots()[0].is_some());
    assert!(resolution.slots()[1].is_none());
    assert!(resolution.slots()[2].is_some());
    assert_eq!(resolution.found().len(), 2);
    assert_eq!(resolution.missed(), &[entries[1].clone()]);
}

#[tokio::test]
async fn test_resolve_abort_fails_on_first_miss() {
    let entries = vec![
        entry(1, "Song A", "Artist A"),
        entry(2, "Unknown", "Nobody"),
        entry(3, "Song C", "Artist C"),
    ];
    let session = StubSession::with_hits(&[entries[0].clone(), entries[2].clone()]);

    let err = resolve(&session, &entries, MissPolicy::Abort, &ProgressBar::hidden())
        .await
        .unwrap_err();

    let miss = err.downcast_ref::<CatalogError>().unwrap();
    assert!(matches!(miss, CatalogError::NoMatch { rank: 2, .. }));
    // Stops right at the miss
    assert_eq!(session.searches.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_ensure_playlist_creates_once_for_empty_account() {
    let session = StubSession::default();

    let first = ensure_playlist(&session, "user1", "2024-05 Billboard Top 100")
        .await
        .unwrap();
    let second = ensure_playlist(&session, "user1", "2024-05 Billboard Top 100")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(*session.created.lock().unwrap(), 1);
    assert_eq!(session.playlists.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ensure_playlist_finds_match_after_other_playlists() {
    let session = StubSession::default();
    session.playlists.lock().unwrap().extend([
        playlist("pl-a", "Road Trip"),
        playlist("pl-b", "2024-04 Billboard Top 100"),
        playlist("pl-c", "2024-05 Billboard Top 100"),
    ]);

    let id = ensure_playlist(&session, "user1", "2024-05 Billboard Top 100")
        .await
        .unwrap();

    assert_eq!(id, "pl-c");
    assert_eq!(*session.created.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_ensure_playlist_requires_exact_name() {
    let session = StubSession::default();
    session
        .playlists
        .lock()
        .unwrap()
        .push(playlist("pl-a", "2024-05 billboard top 100"));

    let id = ensure_playlist(&session, "user1", "2024-05 Billboard Top 100")
        .await
        .unwrap();

    assert_eq!(id, "pl-1");
    assert_eq!(*session.created.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_ensure_playlist_ignores_followed_playlist_with_same_name() {
    let session = StubSession::default();
    session.playlists.lock().unwrap().push(owned_playlist(
        "pl-followed",
        "2024-05 Billboard Top 100",
        "billboard",
    ));

    let id = ensure_playlist(&session, "user1", "2024-05 Billboard Top 100")
        .await
        .unwrap();

    assert_eq!(id, "pl-1");
    assert_eq!(*session.created.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_add_tracks_skips_empty_batch() {
    let session = StubSession::default();
    add_tracks(&session, "pl-1", &[]).await.unwrap();
    assert!(session.appended.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_tracks_surfaces_rejection() {
    let session = StubSession {
        reject_append: true,
        ..Default::default()
    };
    let refs = vec![CatalogRef("spotify:track:bad".to_string())];

    let err = add_tracks(&session, "pl-1", &refs).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid base62 id");
}

#[tokio::test]
async fn test_chart_to_playlist_end_to_end() {
    let markup = "<html><body><div>\
        <div><ul><li><ul><li><h3> Song A </h3><span>Artist A</span></li></ul></li></ul></div>\
        <div><ul><li><ul><li><h3>Song B</h3><span> Artist B </span></li></ul></li></ul></div>\
        </div></body></html>";

    let entries = parse(markup, ParseStrategy::Rows).unwrap();
    assert_eq!(
        entries,
        vec![entry(1, "Song A", "Artist A"), entry(2, "Song B", "Artist B")]
    );

    let session = StubSession::with_hits(&entries);
    let resolution = catalog::resolve(&session, &entries, MissPolicy::Skip, &ProgressBar::hidden())
        .await
        .unwrap();
    let refs = resolution.found();
    assert_eq!(refs.len(), 2);

    let playlist_id = ensure_playlist(&session, session.user_id(), "2024-05 Chart")
        .await
        .unwrap();
    assert_eq!(*session.created.lock().unwrap(), 1);

    add_tracks(&session, &playlist_id, &refs).await.unwrap();

    let appended = session.appended.lock().unwrap();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].0, playlist_id);
    assert_eq!(
        appended[0].1,
        vec![
            CatalogRef("spotify:track:song-a".to_string()),
            CatalogRef("spotify:track:song-b".to_string()),
        ]
    );
}
