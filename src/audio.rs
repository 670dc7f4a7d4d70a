use std::cell::RefCell;
use std::rc::Rc;

/// Sounds the simulation asks for. Playback is up to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Jump,
    WallHit,
    BombCorrect,
    BombWrong,
    MonsterHit,
    MonsterDefeated,
    CoinCollected,
    PowerModeStart,
    LevelComplete,
    GameOver,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Default when no audio backend is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, sound: Sound) {
        log::trace!("audio (silent): {:?}", sound);
    }
}

/// Records every request. Clones share one log, so a handle kept outside
/// the engine sees what the engine played.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<Sound>>>,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<Sound> {
        self.played.borrow().clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.borrow_mut().push(sound);
    }
}
