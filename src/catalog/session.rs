use std::future::Future;

use crate::{
    Res,
    types::{CatalogRef, Playlist, Track},
};

/// An authenticated handle on the streaming service.
///
/// Opened once per run and passed by reference to the resolver and the
/// playlist manager.
pub trait Session {
    /// Id of the account the session was opened for.
    fn user_id(&self) -> &str;

    /// Free-text track search; results in relevance order.
    fn search_tracks(&self, query: &str) -> impl Future<Output = Res<Vec<Track>>>;

    /// All playlists of `user_id`.
    fn list_playlists(&self, user_id: &str) -> impl Future<Output = Res<Vec<Playlist>>>;

    /// Creates a public playlist.
    fn create_playlist(&self, user_id: &str, name: &str) -> impl Future<Output = Res<Playlist>>;

    /// Appends `refs` to the playlist, keeping their order.
    fn append_tracks(
        &self,
        playlist_id: &str,
        refs: &[CatalogRef],
    ) -> impl Future<Output = Res<()>>;
}
