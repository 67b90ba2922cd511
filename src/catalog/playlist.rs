use crate::{Res, chart::ChartKey, types::CatalogRef};

use super::Session;

pub fn playlist_name(key: &ChartKey) -> String {
    format!("{key} Billboard Top 100")
}

/// Returns the id of the user's playlist called `name`, creating it if none
/// of the user's playlists matches exactly.
///
/// The listing also contains playlists the user follows; only playlists
/// owned by `user_id` count as a match.
///
/// # Arguments
///
/// * `session` - Catalog session used for listing and creating
/// * `user_id` - Id of the account that owns the playlist
/// * `name` - Exact, case-sensitive playlist name
///
/// # Returns
///
/// The id of the existing or newly created playlist.
///
/// # Errors
///
/// Returns the session's error if listing any page or creating the playlist
/// fails.
///
/// # Example
///
/// ```ignore
/// let name = playlist_name(&key);
/// let playlist_id = ensure_playlist(&session, session.user_id(), &name).await?;
/// ```
pub async fn ensure_playlist<S: Session>(session: &S, user_id: &str, name: &str) -> Res<String> {
    let playlists = session.list_playlists(user_id).await?;
    if let Some(existing) = playlists
        .into_iter()
        .find(|p| p.name == name && p.owner.id == user_id)
    {
        return Ok(existing.id);
    }

    let created = session.create_playlist(user_id, name).await?;
    Ok(created.id)
}

/// Appends `refs` in order as one batch. Nothing is sent for an empty batch.
///
/// # Arguments
///
/// * `session` - Catalog session to append through
/// * `playlist_id` - Target playlist, usually from [`ensure_playlist`]
/// * `refs` - Track references in the order they should appear
///
/// # Errors
///
/// Returns the first rejection from the service. Requests already accepted
/// before it are not rolled back.
pub async fn add_tracks<S: Session>(
    session: &S,
    playlist_id: &str,
    refs: &[CatalogRef],
) -> Res<()> {
    if refs.is_empty() {
        return Ok(());
    }
    session.append_tracks(playlist_id, refs).await
}
