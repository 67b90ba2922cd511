use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res,
    catalog::Session,
    config,
    management::TokenManager,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CatalogRef,
        CreatePlaylistRequest, GetUserPlaylistsResponse, Playlist, SearchResponse, Track, User,
    },
    warning,
};

use super::auth;

/// Maximum number of URIs the append endpoint accepts per request.
pub const TRACKS_PER_REQUEST: usize = 100;

const PLAYLISTS_PER_PAGE: u32 = 50;

/// Spotify Web API session for one run.
///
/// Holds an access token validated at [`SpotifySession::open`] and the id of
/// the user it belongs to.
pub struct SpotifySession {
    client: Client,
    api_url: String,
    access_token: String,
    user_id: String,
}

impl SpotifySession {
    /// Opens a session with a valid access token.
    ///
    /// Uses `SPOTIFY_ACCESS_TOKEN` when set. Otherwise loads the cached token
    /// (refreshing it if it is about to expire), or runs the authorization
    /// flow when no token has been cached yet.
    ///
    /// # Errors
    ///
    /// Fails if the cached token file exists but cannot be read or parsed,
    /// if refreshing or authorizing fails, or if `GET /me` is rejected.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let session = SpotifySession::open().await?;
    /// info!("Signed in as {}", session.user_id());
    /// ```
    pub async fn open() -> Res<Self> {
        let access_token = match config::spotify_access_token() {
            Some(token) => token,
            None => {
                let mut token_mgr = match TokenManager::load().await? {
                    Some(mgr) => mgr,
                    None => {
                        warning!("No cached Spotify token found, starting authorization.");
                        auth::authorize(Arc::new(Mutex::new(None))).await?
                    }
                };
                token_mgr.get_valid_token().await?
            }
        };

        Self::with_token(config::spotify_apiurl(), access_token).await
    }

    /// Builds a session from an access token and looks up its user.
    pub async fn with_token(api_url: String, access_token: String) -> Res<Self> {
        let mut session = Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
            user_id: String::new(),
        };

        let me: User = session.get_json(&format!("{}/me", session.api_url)).await?;
        session.user_id = me.id;
        Ok(session)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Res<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

impl Session for SpotifySession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn search_tracks(&self, query: &str) -> Res<Vec<Track>> {
        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let json = response.json::<SearchResponse>().await?;
        Ok(json.tracks.items)
    }

    async fn list_playlists(&self, user_id: &str) -> Res<Vec<Playlist>> {
        let mut playlists = Vec::new();
        let mut next = Some(format!(
            "{uri}/users/{user_id}/playlists?limit={limit}",
            uri = self.api_url,
            user_id = user_id,
            limit = PLAYLISTS_PER_PAGE
        ));

        while let Some(url) = next {
            let page: GetUserPlaylistsResponse = self.get_json(&url).await?;
            playlists.extend(page.items);
            next = page.next;
        }

        Ok(playlists)
    }

    async fn create_playlist(&self, user_id: &str, name: &str) -> Res<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: format!("Created by {}", env!("CARGO_PKG_NAME")),
            public: true,
        };

        let response = self
            .client
            .post(format!("{}/users/{}/playlists", self.api_url, user_id))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Playlist>().await?)
    }

    async fn append_tracks(&self, playlist_id: &str, refs: &[CatalogRef]) -> Res<()> {
        let url = format!("{}/playlists/{}/tracks", self.api_url, playlist_id);

        for chunk in refs.chunks(TRACKS_PER_REQUEST) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.iter().map(|r| r.as_str().to_string()).collect(),
            };

            self.client
                .post(&url)
                .bearer_auth(&self.access_token)
                .json(&body)
                .send()
                .await?
                .error_for_status()?
                .json::<AddTrackToPlaylistResponse>()
                .await?;
        }

        Ok(())
    }
}
