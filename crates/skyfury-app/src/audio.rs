//! Audio output. The simulation only requests sounds; a sink decides what
//! playing them means.

use std::collections::HashMap;

use skyfury_core::enums::{MusicTrack, SoundCue};
use skyfury_core::events::AudioEvent;

/// Anything that can play the game's sound effects and music.
pub trait AudioSink {
    fn play_sound(&mut self, cue: SoundCue);
    fn play_music(&mut self, track: MusicTrack, looped: bool);
    fn stop_music(&mut self);
}

/// Sound file backing each cue, under `<asset root>/sounds`.
pub fn sound_file(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Shoot | SoundCue::Missile | SoundCue::Powerup | SoundCue::Shield => "shoot.wav",
        SoundCue::Laser | SoundCue::LevelComplete => "shootLaser.wav",
        SoundCue::Explosion => "enemyKill.wav",
        SoundCue::PlayerExplosion | SoundCue::GameOver => "fighterKill.wav",
        SoundCue::Hit | SoundCue::ShieldHit => "hit.wav",
    }
}

pub fn music_file(_track: MusicTrack) -> &'static str {
    "background.mp3"
}

/// Forward a frame's audio requests to `sink`, in order.
pub fn dispatch(sink: &mut dyn AudioSink, events: &[AudioEvent]) {
    for event in events {
        match *event {
            AudioEvent::PlaySound { cue } => sink.play_sound(cue),
            AudioEvent::PlayMusic { track, looped } => sink.play_music(track, looped),
            AudioEvent::StopMusic => sink.stop_music(),
        }
    }
}

/// Headless sink: logs what would play and keeps count.
#[derive(Debug)]
pub struct LoggingSink {
    music_volume: f64,
    sfx_volume: f64,
    current_track: Option<MusicTrack>,
    played: HashMap<SoundCue, u32>,
}

impl LoggingSink {
    pub fn new(music_volume: f64, sfx_volume: f64) -> Self {
        Self {
            music_volume: music_volume.clamp(0.0, 1.0),
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            current_track: None,
            played: HashMap::new(),
        }
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    pub fn times_played(&self, cue: SoundCue) -> u32 {
        self.played.get(&cue).copied().unwrap_or(0)
    }

    pub fn total_sounds(&self) -> u32 {
        self.played.values().sum()
    }

    pub fn volumes(&self) -> (f64, f64) {
        (self.music_volume, self.sfx_volume)
    }
}

impl AudioSink for LoggingSink {
    fn play_sound(&mut self, cue: SoundCue) {
        *self.played.entry(cue).or_insert(0) += 1;
        log::trace!("sfx {:?} ({}) at {:.2}", cue, sound_file(cue), self.sfx_volume);
    }

    fn play_music(&mut self, track: MusicTrack, looped: bool) {
        if self.current_track == Some(track) {
            return;
        }
        self.current_track = Some(track);
        log::debug!(
            "music {:?} ({}) looped={looped} at {:.2}",
            track,
            music_file(track),
            self.music_volume
        );
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current_track.take() {
            log::debug!("music {track:?} stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_tracks_music_and_sounds() {
        let mut sink = LoggingSink::new(0.4, 0.6);
        dispatch(
            &mut sink,
            &[
                AudioEvent::PlayMusic {
                    track: MusicTrack::Level,
                    looped: true,
                },
                AudioEvent::PlaySound {
                    cue: SoundCue::Shoot,
                },
                AudioEvent::PlaySound {
                    cue: SoundCue::Shoot,
                },
                AudioEvent::PlaySound {
                    cue: SoundCue::Explosion,
                },
            ],
        );
        assert_eq!(sink.current_track(), Some(MusicTrack::Level));
        assert_eq!(sink.times_played(SoundCue::Shoot), 2);
        assert_eq!(sink.times_played(SoundCue::Laser), 0);
        assert_eq!(sink.total_sounds(), 3);

        dispatch(&mut sink, &[AudioEvent::StopMusic]);
        assert_eq!(sink.current_track(), None);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let sink = LoggingSink::new(2.0, -1.0);
        assert_eq!(sink.volumes(), (1.0, 0.0));
        assert_eq!(LoggingSink::new(0.25, 0.5).volumes(), (0.25, 0.5));
    }

    #[test]
    fn test_sound_manifest() {
        assert_eq!(sound_file(SoundCue::Laser), "shootLaser.wav");
        assert_eq!(sound_file(SoundCue::ShieldHit), "hit.wav");
        assert_eq!(music_file(MusicTrack::Boss), "background.mp3");
    }
}
