mod display;
mod durations;
mod engine;

pub use display::{format_remaining, phase_label};
pub use durations::{BreakMinutes, WorkMinutes};
pub use engine::{transition, Phase, PomodoroEngine, PomodoroState, TimerCommand, TimerEffect};
