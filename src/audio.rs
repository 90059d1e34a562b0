//! Play OGG sound assets.
//!
//! Sounds are loaded lazily on first play and cached by identifier until the
//! backend shuts down. When no audio device is available the whole module
//! degrades to a logged no-op so a game can still run on machines without
//! sound hardware.

use std::io::Cursor;

use hashbrown::HashMap;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::{
        static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
        PlaybackState,
    },
    tween::Tween,
};

use crate::assets::{AssetSource, LoadError};

/// Sound playback component of a backend adapter.
pub struct Audio {
    /// Manager to play the sounds on.
    ///
    /// `None` when no audio device could be opened.
    manager: Option<AudioManager<DefaultBackend>>,
    /// Decoded sounds by asset identifier.
    sounds: HashMap<String, StaticSoundData>,
    /// Handles of sounds that may still be playing.
    handles: Vec<StaticSoundHandle>,
    /// Volume multiplier applied to every played sound.
    master_volume: f64,
}

impl Audio {
    /// Start the audio manager on the default device.
    pub(crate) fn new() -> Self {
        let manager = match AudioManager::new(AudioManagerSettings::default()) {
            Ok(manager) => Some(manager),
            Err(err) => {
                log::warn!("No audio device available, sound is disabled: {err}");

                None
            }
        };

        Self {
            manager,
            sounds: HashMap::new(),
            handles: Vec::new(),
            master_volume: 1.0,
        }
    }

    /// Play a sound asset from start to end at the master volume.
    ///
    /// # Errors
    ///
    /// - When the sound asset is missing or not decodable as OGG.
    pub fn play(&mut self, id: &str, source: &AssetSource) -> Result<(), LoadError> {
        self.play_with_volume(id, source, 1.0)
    }

    /// Play a sound asset with an extra volume multiplier in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// - When the sound asset is missing or not decodable as OGG.
    pub fn play_with_volume(
        &mut self,
        id: &str,
        source: &AssetSource,
        volume: f64,
    ) -> Result<(), LoadError> {
        let sound = self.sound(id, source)?.clone();
        let volume = (volume * self.master_volume).clamp(0.0, 1.0);

        let Some(manager) = &mut self.manager else {
            // No device, loading still validated the asset
            return Ok(());
        };

        // Forget handles of sounds that already finished
        self.handles
            .retain(|handle| handle.state() != PlaybackState::Stopped);

        let sound = sound.with_settings(StaticSoundSettings::new().volume(volume));
        match manager.play(sound) {
            Ok(handle) => self.handles.push(handle),
            Err(err) => log::warn!("Error playing sound '{id}': {err}"),
        }

        Ok(())
    }

    /// Set the volume multiplier in `[0, 1]` applied to every played sound.
    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Stop all currently playing sounds.
    pub fn stop_all(&mut self) {
        for mut handle in self.handles.drain(..) {
            handle.stop(Tween::default());
        }
    }

    /// Stop playback and drop all cached sounds and the device.
    pub(crate) fn shutdown(&mut self) {
        self.stop_all();
        self.sounds.clear();
        self.manager = None;
    }

    /// Get a cached sound, loading and decoding it on first reference.
    fn sound(&mut self, id: &str, source: &AssetSource) -> Result<&StaticSoundData, LoadError> {
        if !self.sounds.contains_key(id) {
            let bytes = source.raw(id, "ogg")?;

            // Parse the sound file
            let data = StaticSoundData::from_cursor(Cursor::new(bytes)).map_err(|err| {
                LoadError::Decode {
                    id: id.to_owned(),
                    source: Box::new(err),
                }
            })?;

            self.sounds.insert(id.to_owned(), data);
        }

        Ok(&self.sounds[id])
    }
}
