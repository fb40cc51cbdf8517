use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Song;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::shuffle::shuffle;

pub const IDLE_LABEL: &str = "No song playing";
pub const PLAYBACK_ERROR_STATUS: &str = "Error playing song";

/// The audio side of the playlist. Implementations own the actual playback;
/// the playlist only tells them what to start and stop.
pub trait Player {
    /// Starts `song` from the beginning.
    fn play(&mut self, song: &Song) -> std::result::Result<(), String>;

    /// Stops `song` and rewinds it to the start.
    fn stop(&mut self, song: &Song);
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SongRow {
    pub title: String,
    pub active: bool,
    /// "Play" or "Pause".
    pub button: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlaylistView {
    pub now_playing: String,
    pub status: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub rows: Vec<SongRow>,
}

/// A shuffled list of songs with at most one of them playing.
pub struct Playlist<P, R = StdRng> {
    catalog: Vec<Song>,
    songs: Vec<Song>,
    active: Cursor,
    status: Option<String>,
    player: P,
    rng: R,
}

impl<P: Player> Playlist<P, StdRng> {
    pub fn new(catalog: Vec<Song>, player: P) -> Self {
        Self::with_rng(catalog, player, StdRng::from_entropy())
    }
}

impl<P: Player, R: Rng> Playlist<P, R> {
    /// Songs in catalog order, nothing playing.
    pub fn with_rng(catalog: Vec<Song>, player: P, rng: R) -> Self {
        Self {
            active: Cursor::unselected(catalog.len()),
            songs: catalog.clone(),
            catalog,
            status: None,
            player,
            rng,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn active(&self) -> Option<usize> {
        self.active.position()
    }

    pub fn active_song(&self) -> Option<&Song> {
        self.active.position().and_then(|p| self.songs.get(p))
    }

    pub fn is_playing(&self) -> bool {
        self.active.position().is_some()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Play/pause button for the song at `index`: pauses it when it is the one
    /// playing, otherwise stops whatever plays and starts it.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.songs.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.songs.len(),
            });
        }
        if self.active.position() == Some(index) {
            self.stop();
            return Ok(());
        }

        self.stop();
        self.status = None;
        let song = &self.songs[index];
        match self.player.play(song) {
            Ok(()) => {
                log::info!("Playing {:?}", song.title);
                self.active.jump_to(index)
            }
            Err(reason) => {
                log::warn!("Playback of {:?} failed: {}", song.title, reason);
                self.status = Some(PLAYBACK_ERROR_STATUS.to_string());
                Err(Error::PlaybackFailure(reason))
            }
        }
    }

    /// Stops the playing song, if any, rewinding it.
    pub fn stop(&mut self) {
        if let Some(song) = self.active.position().and_then(|p| self.songs.get(p)) {
            log::info!("Stopping {:?}", song.title);
            self.player.stop(song);
        }
        self.active.clear();
    }

    /// Called when the playing song ran to its end on its own.
    pub fn advance_on_natural_end(&mut self) -> Result<()> {
        match self.active.position() {
            Some(p) if p + 1 < self.songs.len() => self.select(p + 1),
            Some(_) => {
                log::debug!("Reached the end of the playlist");
                self.stop();
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Hook for the playback collaborator.
    pub fn notify_playback_ended(&mut self) -> Result<()> {
        self.advance_on_natural_end()
    }

    /// Next button: the following song, the first one when idle, or stop at
    /// the end.
    pub fn next(&mut self) -> Result<()> {
        match self.active.position() {
            Some(_) if self.active.can_go_forward() => {
                let next = self.active.position().map_or(0, |p| p + 1);
                self.select(next)
            }
            None if !self.songs.is_empty() => self.select(0),
            _ => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Previous button: the song before, or the first one when idle.
    pub fn prev(&mut self) -> Result<()> {
        match self.active.position() {
            Some(p) if p > 0 => self.select(p - 1),
            None if !self.songs.is_empty() => self.select(0),
            _ => Ok(()),
        }
    }

    /// Stops playback and reshuffles a fresh copy of the catalog.
    pub fn shuffle(&mut self) {
        self.stop();
        self.songs = shuffle(&self.catalog, &mut self.rng);
        self.active.reset_unselected(self.songs.len());
        self.status = None;
        log::debug!("Shuffled {} songs", self.songs.len());
    }

    pub fn view(&self) -> PlaylistView {
        let active = self.active.position();
        PlaylistView {
            now_playing: self
                .active_song()
                .map_or_else(|| IDLE_LABEL.to_string(), |song| song.title.clone()),
            status: self.status.clone(),
            can_go_back: self.active.can_go_back(),
            can_go_forward: self.active.can_go_forward(),
            rows: self
                .songs
                .iter()
                .enumerate()
                .map(|(i, song)| {
                    let playing = Some(i) == active;
                    SongRow {
                        title: song.title.clone(),
                        active: playing,
                        button: if playing { "Pause" } else { "Play" },
                    }
                })
                .collect(),
        }
    }
}
