//! Pomodoro engine implementation.
//!
//! The engine is a tick-driven state machine with no internal thread. The
//! caller owns the one-second clock: it starts ticking on
//! [`TimerEffect::StartTicking`], stops on [`TimerEffect::StopTicking`],
//! and feeds [`TimerCommand::Tick`] in between.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running(Work) <--phase complete--> Running(Break)
//!        Running(*) --pause--> Paused --resume--> Running(*)
//!        any --stop--> Idle (Work, full duration)
//! ```
//!
//! Pausing does not stop the clock. Ticks keep arriving and are ignored
//! until the engine is resumed.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::default();
//! engine.start();
//! // Once per second:
//! if let Some(Event::PhaseCompleted { .. }) = engine.tick() { ring_bell(); }
//! ```

use serde::{Deserialize, Serialize};

use super::durations::{BreakMinutes, WorkMinutes};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

/// Complete engine state. `running` means the tick clock is on; `paused`
/// suppresses the countdown while it stays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
    pub paused: bool,
    pub work: WorkMinutes,
    #[serde(rename = "break")]
    pub brk: BreakMinutes,
}

impl PomodoroState {
    pub fn new(work: WorkMinutes, brk: BreakMinutes) -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: work.seconds(),
            running: false,
            paused: false,
            work,
            brk,
        }
    }

    /// Configured length of `phase` in seconds.
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work.seconds(),
            Phase::Break => self.brk.seconds(),
        }
    }

    /// Counting down right now.
    pub fn is_counting(&self) -> bool {
        self.running && !self.paused
    }
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self::new(WorkMinutes::default(), BreakMinutes::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Tick,
    SetWorkDuration(WorkMinutes),
    SetBreakDuration(BreakMinutes),
}

/// Side effects the driver must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEffect {
    StartTicking,
    StopTicking,
    /// Audible cue: an interval just ran out.
    PhaseComplete { from: Phase, to: Phase },
}

/// Pure transition function.
pub fn transition(state: PomodoroState, command: TimerCommand) -> (PomodoroState, Vec<TimerEffect>) {
    let mut next = state;
    let mut effects = Vec::new();

    match command {
        TimerCommand::Start => {
            if !state.running {
                next.running = true;
                next.paused = false;
                effects.push(TimerEffect::StartTicking);
            }
        }
        TimerCommand::Pause => {
            if state.running {
                next.paused = true;
            }
        }
        TimerCommand::Resume => {
            if state.running {
                next.paused = false;
            }
        }
        TimerCommand::Stop => {
            if state.running {
                effects.push(TimerEffect::StopTicking);
            }
            next.running = false;
            next.paused = false;
            next.phase = Phase::Work;
            next.remaining_secs = state.work.seconds();
        }
        TimerCommand::Tick => {
            if state.is_counting() {
                next.remaining_secs = state.remaining_secs.saturating_sub(1);
                if next.remaining_secs == 0 {
                    let to = state.phase.next();
                    next.phase = to;
                    next.remaining_secs = next.duration_secs(to);
                    effects.push(TimerEffect::PhaseComplete {
                        from: state.phase,
                        to,
                    });
                }
            }
        }
        TimerCommand::SetWorkDuration(work) => {
            next.work = work;
            if state.phase == Phase::Work && !state.running {
                next.remaining_secs = work.seconds();
            }
        }
        TimerCommand::SetBreakDuration(brk) => {
            next.brk = brk;
            if state.phase == Phase::Break && !state.running {
                next.remaining_secs = brk.seconds();
            }
        }
    }

    (next, effects)
}

/// Core pomodoro engine.
///
/// Wraps [`transition`] and turns its effects into [`Event`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PomodoroEngine {
    state: PomodoroState,
}

impl PomodoroEngine {
    pub fn new(work: WorkMinutes, brk: BreakMinutes) -> Self {
        Self {
            state: PomodoroState::new(work, brk),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &PomodoroState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn work_minutes(&self) -> WorkMinutes {
        self.state.work
    }

    pub fn break_minutes(&self) -> BreakMinutes {
        self.state.brk
    }

    pub fn total_secs(&self) -> u32 {
        self.state.duration_secs(self.state.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - f64::from(self.state.remaining_secs) / f64::from(total)).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            running: self.state.running,
            paused: self.state.paused,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one command through the state machine.
    pub fn apply(&mut self, command: TimerCommand) -> Vec<TimerEffect> {
        let (next, effects) = transition(self.state, command);
        self.state = next;
        effects
    }

    /// Returns `None` when already running.
    pub fn start(&mut self) -> Option<Event> {
        let effects = self.apply(TimerCommand::Start);
        effects.contains(&TimerEffect::StartTicking).then(|| Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        let was_paused = self.state.paused;
        self.apply(TimerCommand::Pause);
        (self.state.paused && !was_paused).then(|| Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        let was_paused = self.state.paused;
        self.apply(TimerCommand::Resume);
        (was_paused && !self.state.paused).then(|| Event::TimerResumed {
            remaining_secs: self.state.remaining_secs,
        })
    }

    /// Returns `None` when already idle.
    pub fn stop(&mut self) -> Option<Event> {
        let effects = self.apply(TimerCommand::Stop);
        effects.contains(&TimerEffect::StopTicking).then(|| Event::TimerStopped {
            remaining_secs: self.state.remaining_secs,
        })
    }

    /// Call once per second while running.
    /// Returns `Some(Event::PhaseCompleted)` when an interval runs out.
    pub fn tick(&mut self) -> Option<Event> {
        self.apply(TimerCommand::Tick)
            .into_iter()
            .find_map(|effect| match effect {
                TimerEffect::PhaseComplete { from, to } => Some(Event::PhaseCompleted { from, to }),
                _ => None,
            })
    }

    pub fn set_work_duration(&mut self, work: WorkMinutes) {
        self.apply(TimerCommand::SetWorkDuration(work));
    }

    pub fn set_break_duration(&mut self, brk: BreakMinutes) {
        self.apply(TimerCommand::SetBreakDuration(brk));
    }
}
