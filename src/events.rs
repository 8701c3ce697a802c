use serde::Serialize;

use crate::board::{Color, Position};

/// Structured notifications raised by the engine for the presentation
/// layer. One user input can produce several of these in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    SelectionChanged {
        selected: Position,
        targets: Vec<Position>,
    },
    PieceMoved {
        from: Position,
        to: Position,
    },
    PieceCaptured {
        from: Position,
        to: Position,
        captured: Position,
    },
    PiecePromoted {
        at: Position,
    },
    GameOver {
        winner: Color,
    },
}

/// One oscillator beep. `waveform` serializes to the Web Audio
/// `OscillatorType` strings, `duration` is in seconds, and `delay_ms`
/// lets a cue schedule tones without the engine ever waiting on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub frequency: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

pub const MOVE_CUE: [Tone; 1] = [Tone {
    frequency: 600.0,
    duration: 0.08,
    waveform: Waveform::Triangle,
    delay_ms: 0,
}];

pub const CAPTURE_CUE: [Tone; 1] = [Tone {
    frequency: 250.0,
    duration: 0.15,
    waveform: Waveform::Square,
    delay_ms: 0,
}];

pub const PROMOTION_CUE: [Tone; 1] = [Tone {
    frequency: 900.0,
    duration: 0.2,
    waveform: Waveform::Sawtooth,
    delay_ms: 0,
}];

/// Rising three-tone jingle, staggered so the tones play in sequence.
pub const VICTORY_CUE: [Tone; 3] = [
    Tone {
        frequency: 400.0,
        duration: 0.25,
        waveform: Waveform::Sine,
        delay_ms: 0,
    },
    Tone {
        frequency: 600.0,
        duration: 0.25,
        waveform: Waveform::Sine,
        delay_ms: 200,
    },
    Tone {
        frequency: 800.0,
        duration: 0.35,
        waveform: Waveform::Sine,
        delay_ms: 400,
    },
];

impl GameEvent {
    /// Sound cue the presentation layer plays for this event. Selection
    /// changes are silent.
    pub fn sound_cue(&self) -> &'static [Tone] {
        match self {
            GameEvent::SelectionChanged { .. } => &[],
            GameEvent::PieceMoved { .. } => &MOVE_CUE,
            GameEvent::PieceCaptured { .. } => &CAPTURE_CUE,
            GameEvent::PiecePromoted { .. } => &PROMOTION_CUE,
            GameEvent::GameOver { .. } => &VICTORY_CUE,
        }
    }
}
