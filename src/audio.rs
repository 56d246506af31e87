//! Audio capability consumed by the UI managers.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// A named track the UI can play.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Track {
    name: String,
    file: String,
    looped: bool,
    volume: Option<f32>,
}

impl Track {
    /// Creates a track at full volume.
    #[instrument(skip(name, file))]
    pub fn new(name: impl Into<String>, file: impl Into<String>, looped: bool) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            looped,
            volume: None,
        }
    }

    /// Sets the track volume (`0.0..=1.0`).
    #[instrument(skip(self))]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume.clamp(0.0, 1.0));
        self
    }
}

/// Playback capability.
///
/// Track names are a flat namespace: registering a name twice replaces the
/// earlier track.
pub trait Audio: fmt::Debug {
    /// Registers tracks by name.
    fn add_music_list(&mut self, tracks: Vec<Track>);
    /// Starts a track. Unknown names are ignored.
    fn music_play(&mut self, name: &str);
    /// Stops a track. Stopping a silent track is a no-op.
    fn music_stop(&mut self, name: &str);
}

/// Audio handle shared by the UI managers.
pub type SharedAudio = Rc<RefCell<dyn Audio>>;

/// One recorded playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCue {
    /// `music_play(name)` on a known track.
    Play(String),
    /// `music_stop(name)`.
    Stop(String),
}

/// Track registry with playback bookkeeping.
///
/// Playback is reported through tracing; one-shot effects can additionally
/// ring the terminal bell.
#[derive(Debug, Default, Getters)]
pub struct AudioManager {
    tracks: BTreeMap<String, Track>,
    playing: BTreeSet<String>,
    journal: Vec<AudioCue>,
    muted: bool,
    bell: bool,
    #[getter(skip)]
    master_volume: f32,
}

impl AudioManager {
    /// Creates an empty manager.
    #[instrument]
    pub fn new(muted: bool, bell: bool, master_volume: f32) -> Self {
        debug!("Creating audio manager");
        Self {
            muted,
            bell,
            master_volume: master_volume.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// True while a looping track is playing.
    #[instrument(skip(self))]
    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.contains(name)
    }

    /// Effective volume of a registered track.
    #[instrument(skip(self))]
    pub fn effective_volume(&self, name: &str) -> Option<f32> {
        self.tracks
            .get(name)
            .map(|t| t.volume.unwrap_or(1.0) * self.master_volume)
    }

    #[instrument(skip(self))]
    fn ring_bell(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            debug!(error = %e, "Terminal bell unavailable");
        }
    }
}

impl Audio for AudioManager {
    #[instrument(skip(self, tracks), fields(count = tracks.len()))]
    fn add_music_list(&mut self, tracks: Vec<Track>) {
        for track in tracks {
            if self.tracks.contains_key(&track.name) {
                debug!(name = %track.name, "Replacing registered track");
            }
            self.tracks.insert(track.name.clone(), track);
        }
    }

    #[instrument(skip(self))]
    fn music_play(&mut self, name: &str) {
        let Some(track) = self.tracks.get(name) else {
            warn!(name, "Play requested for unknown track");
            return;
        };
        let looped = track.looped;
        let file = track.file.clone();

        if looped {
            self.playing.insert(name.to_string());
        }
        self.journal.push(AudioCue::Play(name.to_string()));

        if self.muted {
            debug!(name, "Muted, not playing");
            return;
        }

        info!(name, file = %file, looped, volume = ?self.effective_volume(name), "Playing track");
        if self.bell && !looped {
            self.ring_bell();
        }
    }

    #[instrument(skip(self))]
    fn music_stop(&mut self, name: &str) {
        self.journal.push(AudioCue::Stop(name.to_string()));
        if self.playing.remove(name) {
            info!(name, "Stopped track");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looped_track_tracks_playing_state() {
        let mut audio = AudioManager::new(true, false, 1.0);
        audio.add_music_list(vec![
            Track::new("menu", "menu.mp3", true).with_volume(0.3),
            Track::new("button", "button.mp3", false),
        ]);

        audio.music_play("menu");
        audio.music_play("button");
        assert!(audio.is_playing("menu"));
        assert!(!audio.is_playing("button"));

        audio.music_stop("menu");
        assert!(!audio.is_playing("menu"));
    }

    #[test]
    fn test_unknown_track_is_ignored() {
        let mut audio = AudioManager::new(true, false, 1.0);
        audio.music_play("missing");
        assert!(audio.journal().is_empty());
    }

    #[test]
    fn test_duplicate_names_resolve_to_one_track() {
        let mut audio = AudioManager::new(true, false, 0.5);
        audio.add_music_list(vec![Track::new("enter", "enter.mp3", false)]);
        audio.add_music_list(vec![Track::new("enter", "enter.mp3", false)]);
        assert_eq!(audio.tracks().len(), 1);
        assert_eq!(audio.effective_volume("enter"), Some(0.5));
    }
}
