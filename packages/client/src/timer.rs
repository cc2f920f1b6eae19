//! Local Pomodoro countdown.
//!
//! The timer is advanced once per second by the session loop. Every state the
//! room broadcasts overwrites the local one, so the last writer wins.

use pomoroom_server::infrastructure::dto::websocket::TimerStatePayload;
use pomoroom_shared::time::{Clock, timestamp_to_local_clock};
use serde_json::Value;

/// Which half of the cycle the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }
}

/// Phase lengths in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 10,
            break_minutes: 5,
        }
    }
}

impl TimerSettings {
    pub fn minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    pub fn length_secs(&self, phase: Phase) -> i64 {
        i64::from(self.minutes(phase)) * 60
    }
}

/// A finished phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLogEntry {
    pub phase: Phase,
    pub duration_minutes: u32,
    /// Local wall-clock time of completion ("HH:MM")
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// One second elapsed; the new state should be shared
    Ticked,
    /// A phase ran out and the next one was loaded
    Completed(SessionLogEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    time_left: i64,
    is_running: bool,
    is_break: bool,
    settings: TimerSettings,
}

impl PomodoroTimer {
    /// A stopped timer loaded with a full focus phase
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            time_left: settings.length_secs(Phase::Focus),
            is_running: false,
            is_break: false,
            settings,
        }
    }

    pub fn time_left(&self) -> i64 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_break(&self) -> bool {
        self.is_break
    }

    pub fn phase(&self) -> Phase {
        if self.is_break {
            Phase::Break
        } else {
            Phase::Focus
        }
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Stop and reset to the full length of the current phase
    pub fn stop(&mut self) {
        self.is_running = false;
        self.time_left = self.settings.length_secs(self.phase());
    }

    /// Advance the countdown by one second.
    ///
    /// A running timer at zero completes its phase instead: a finished focus
    /// phase starts the break right away, a finished break loads the next
    /// focus phase without starting it.
    pub fn tick(&mut self, clock: &dyn Clock) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        if self.time_left > 0 {
            self.time_left -= 1;
            return TickOutcome::Ticked;
        }

        if self.time_left < 0 {
            return TickOutcome::Idle;
        }

        let finished = self.phase();
        let entry = SessionLogEntry {
            phase: finished,
            duration_minutes: self.settings.minutes(finished),
            time: timestamp_to_local_clock(clock.now_millis()),
        };

        match finished {
            Phase::Focus => {
                self.is_break = true;
                self.time_left = self.settings.length_secs(Phase::Break);
                self.is_running = true;
            }
            Phase::Break => {
                self.is_break = false;
                self.time_left = self.settings.length_secs(Phase::Focus);
                self.is_running = false;
            }
        }

        TickOutcome::Completed(entry)
    }

    /// Overwrite local state with a state received from the room.
    ///
    /// Absent, `null` and wrong-typed fields keep their local value.
    /// Fractional seconds are truncated.
    /// Returns `true` when the running flag or the phase changed.
    pub fn apply_sync(&mut self, state: &TimerStatePayload) -> bool {
        let before = (self.is_running, self.is_break);

        if let Some(time_left) = state
            .time_left
            .as_ref()
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.trunc() as i64)))
        {
            self.time_left = time_left;
        }
        if let Some(is_running) = state.is_running.as_ref().and_then(Value::as_bool) {
            self.is_running = is_running;
        }
        if let Some(is_break) = state.is_break.as_ref().and_then(Value::as_bool) {
            self.is_break = is_break;
        }

        before != (self.is_running, self.is_break)
    }

    pub fn to_payload(&self) -> TimerStatePayload {
        TimerStatePayload {
            time_left: Some(Value::from(self.time_left)),
            is_running: Some(Value::Bool(self.is_running)),
            is_break: Some(Value::Bool(self.is_break)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomoroom_shared::time::FixedClock;
    use serde_json::json;

    const NOW: i64 = 1_672_498_800_000;

    fn short_settings() -> TimerSettings {
        TimerSettings {
            focus_minutes: 1,
            break_minutes: 1,
        }
    }

    #[test]
    fn test_new_timer_is_stopped_focus() {
        // テスト項目: 初期状態はフォーカスの全長で停止中
        // given (前提条件):
        let settings = TimerSettings::default();

        // when (操作):
        let timer = PomodoroTimer::new(settings);

        // then (期待する結果):
        assert_eq!(timer.time_left(), 600);
        assert!(!timer.is_running());
        assert!(!timer.is_break());
    }

    #[test]
    fn test_tick_when_paused_is_idle() {
        // テスト項目: 停止中の tick では何も変わらない
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);

        // when (操作):
        let outcome = timer.tick(&clock);

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(timer.time_left(), 600);
    }

    #[test]
    fn test_tick_decrements_running_timer() {
        // テスト項目: 動作中の tick で残り時間が 1 秒減る
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);
        timer.start();

        // when (操作):
        let outcome = timer.tick(&clock);

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Ticked);
        assert_eq!(timer.time_left(), 599);
    }

    #[test]
    fn test_focus_completion_starts_break() {
        // テスト項目: フォーカス終了でログが残り、休憩が自動で始まる
        // given (前提条件):
        let mut timer = PomodoroTimer::new(short_settings());
        let clock = FixedClock::new(NOW);
        timer.start();
        for _ in 0..60 {
            assert_eq!(timer.tick(&clock), TickOutcome::Ticked);
        }

        // when (操作):
        let outcome = timer.tick(&clock);

        // then (期待する結果):
        assert_eq!(
            outcome,
            TickOutcome::Completed(SessionLogEntry {
                phase: Phase::Focus,
                duration_minutes: 1,
                time: timestamp_to_local_clock(NOW),
            })
        );
        assert!(timer.is_break());
        assert!(timer.is_running());
        assert_eq!(timer.time_left(), 60);
    }

    #[test]
    fn test_break_completion_loads_focus_without_starting() {
        // テスト項目: 休憩終了でフォーカスが読み込まれるが開始はされない
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);
        timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(0)),
            is_running: Some(json!(true)),
            is_break: Some(json!(true)),
        });

        // when (操作):
        let outcome = timer.tick(&clock);

        // then (期待する結果):
        let TickOutcome::Completed(entry) = outcome else {
            panic!("expected completion, got {:?}", outcome);
        };
        assert_eq!(entry.phase, Phase::Break);
        assert_eq!(entry.duration_minutes, 5);
        assert!(!timer.is_break());
        assert!(!timer.is_running());
        assert_eq!(timer.time_left(), 600);
    }

    #[test]
    fn test_stop_resets_current_phase() {
        // テスト項目: stop で停止し、現在のフェーズの全長に戻る
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);
        timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(12)),
            is_running: Some(json!(true)),
            is_break: Some(json!(true)),
        });
        timer.tick(&clock);

        // when (操作):
        timer.stop();

        // then (期待する結果):
        assert!(!timer.is_running());
        assert!(timer.is_break());
        assert_eq!(timer.time_left(), 300);
    }

    #[test]
    fn test_pause_keeps_time_left() {
        // テスト項目: pause は残り時間を保ったまま停止する
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);
        timer.start();
        timer.tick(&clock);

        // when (操作):
        timer.pause();

        // then (期待する結果):
        assert!(!timer.is_running());
        assert_eq!(timer.time_left(), 599);
    }

    #[test]
    fn test_apply_sync_overwrites_even_backwards() {
        // テスト項目: 受信した状態は古い値でも無条件に上書きされる
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(100)),
            is_running: Some(json!(true)),
            is_break: Some(json!(false)),
        });

        // when (操作):
        let changed = timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(300)),
            is_running: Some(json!(true)),
            is_break: Some(json!(false)),
        });

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(timer.time_left(), 300);
    }

    #[test]
    fn test_apply_sync_with_missing_and_fractional_fields() {
        // テスト項目: 欠けたフィールドは保持され、小数は切り捨てられる
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());

        // when (操作):
        let changed = timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(42.9)),
            is_running: None,
            is_break: Some(json!(true)),
        });

        // then (期待する結果):
        assert!(changed);
        assert_eq!(timer.time_left(), 42);
        assert!(!timer.is_running());
        assert!(timer.is_break());
    }

    #[test]
    fn test_negative_time_left_never_completes() {
        // テスト項目: 負の残り時間では tick してもフェーズが終わらない
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        let clock = FixedClock::new(NOW);
        timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!(-5)),
            is_running: Some(json!(true)),
            is_break: Some(json!(false)),
        });

        // when (操作):
        let outcome = timer.tick(&clock);

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(timer.time_left(), -5);
    }

    #[test]
    fn test_to_payload_reflects_state() {
        // テスト項目: 現在の状態が送信用ペイロードに変換される
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        timer.start();

        // when (操作):
        let payload = timer.to_payload();

        // then (期待する結果):
        assert_eq!(payload.time_left, Some(json!(600)));
        assert_eq!(payload.is_running, Some(json!(true)));
        assert_eq!(payload.is_break, Some(json!(false)));
    }

    #[test]
    fn test_apply_sync_ignores_wrong_typed_fields() {
        // テスト項目: 型の違う値や null は無視され、ローカルの値が保たれる
        // given (前提条件):
        let mut timer = PomodoroTimer::new(TimerSettings::default());
        timer.start();

        // when (操作):
        let changed = timer.apply_sync(&TimerStatePayload {
            time_left: Some(json!("42")),
            is_running: Some(json!(1)),
            is_break: Some(Value::Null),
        });

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(timer.time_left(), 600);
        assert!(timer.is_running());
        assert!(!timer.is_break());
    }
}
