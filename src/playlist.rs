//! Ordered playlist navigation.
//!
//! A playlist is the resolved track list for one category, in catalog
//! order. Navigation is by track id so the caller can ask "what follows
//! the track that just ended" without tracking indices itself. There is
//! no wraparound: both ends of the list are hard boundaries.

use crate::catalog::Track;

#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// The track after `id`, or `None` at the end of the list or when
    /// `id` is not in the playlist.
    pub fn next_after(&self, id: &str) -> Option<&Track> {
        let idx = self.position_of(id)?;
        self.tracks.get(idx + 1)
    }

    /// The track before `id`, or `None` at the start of the list or when
    /// `id` is not in the playlist.
    pub fn previous_before(&self, id: &str) -> Option<&Track> {
        let idx = self.position_of(id)?;
        idx.checked_sub(1).and_then(|i| self.tracks.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            uri: format!("/media/{id}.mp3"),
            title: id.into(),
            singer: None,
            duration: None,
            display: id.into(),
        }
    }

    fn playlist() -> Playlist {
        Playlist::new(vec![track("a"), track("b"), track("c")])
    }

    #[test]
    fn next_follows_catalog_order() {
        let p = playlist();
        assert_eq!(p.next_after("a").unwrap().id, "b");
        assert_eq!(p.next_after("b").unwrap().id, "c");
    }

    #[test]
    fn no_wraparound_at_either_end() {
        let p = playlist();
        assert!(p.next_after("c").is_none());
        assert!(p.previous_before("a").is_none());
    }

    #[test]
    fn unknown_id_navigates_nowhere() {
        let p = playlist();
        assert!(p.next_after("zz").is_none());
        assert!(p.previous_before("zz").is_none());
        assert!(p.position_of("zz").is_none());
    }

    #[test]
    fn previous_walks_backwards() {
        let p = playlist();
        assert_eq!(p.previous_before("c").unwrap().id, "b");
        assert_eq!(p.previous_before("b").unwrap().id, "a");
    }

    #[test]
    fn empty_playlist_has_no_tracks() {
        let p = Playlist::default();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert!(p.get(0).is_none());
    }
}
