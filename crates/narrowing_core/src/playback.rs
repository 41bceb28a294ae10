//! Cursor and play/pause state over an immutable step sequence.
//!
//! The host owns the timer: while [`PlayState::Playing`], it waits
//! [`Playback::step_delay_ms`] and then applies [`Action::NextStep`]. Every transition
//! is a single synchronous update, so cancelling the timer at any point is safe.

use crate::config::NarrowingConfig;
use crate::error::Result;
use crate::steps::{generate_steps, ApproximationStep};
use crate::table::{generate_comparison_table, ComparisonRow};
use crate::viewport::visual_bounds;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Idle,
    Playing,
    Paused,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    Play,
    Pause,
    NextStep,
    PrevStep,
    GoToStep(usize),
    SetSpeed(f64),
    Faster,
    Slower,
    Reset,
    ToggleTable,
    Announce(String),
    ClearAnnouncements,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playback {
    pub play_state: PlayState,
    pub current_step: usize,
    pub speed: f64,
    pub precision: usize,
    pub steps: Vec<ApproximationStep>,
    pub table_visible: bool,
    /// Messages for a polite screen-reader live region, oldest first.
    pub announcements: Vec<String>,
    #[serde(skip)]
    config: NarrowingConfig,
}

impl Playback {
    pub fn new(config: NarrowingConfig) -> Result<Self> {
        config.validate()?;
        let steps = config.generate_steps(config.default_precision as i64)?;
        Ok(Self {
            play_state: PlayState::Idle,
            current_step: 0,
            speed: config.default_speed,
            precision: config.default_precision,
            steps,
            table_visible: false,
            announcements: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &NarrowingConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&ApproximationStep> {
        self.steps.get(self.current_step)
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_step >= self.last_index()
    }

    /// Delay before the host should apply the next auto-advance.
    pub fn step_delay_ms(&self) -> f64 {
        self.config.step_duration_ms / self.speed
    }

    pub fn comparison_table(&self) -> Vec<ComparisonRow> {
        generate_comparison_table(&self.steps, self.current_step)
    }

    /// Value range the number line should show for the current step.
    pub fn visual_bounds(&self) -> Option<(f64, f64)> {
        self.current()
            .map(|step| visual_bounds(step, self.config.view_padding))
    }

    fn announce(&mut self, message: String) {
        self.announcements.push(message);
    }

    fn step_message(&self, prefix: &str, index: usize) -> String {
        let description = self
            .steps
            .get(index)
            .map(|step| step.description.as_str())
            .unwrap_or_default();
        format!("{prefix} {}: {description}", index + 1)
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, step = self.current_step, state = ?self.play_state, "playback action");
        match action {
            Action::Play => {
                if self.is_at_end() {
                    self.play_state = PlayState::Finished;
                } else {
                    self.play_state = PlayState::Playing;
                    self.announce("Playback started".to_string());
                }
            }
            Action::Pause => {
                self.play_state = PlayState::Paused;
                self.announce("Playback paused".to_string());
            }
            Action::NextStep => {
                if self.is_at_end() {
                    self.play_state = PlayState::Finished;
                    self.announce("Reached the final step".to_string());
                    return;
                }
                self.current_step += 1;
                if self.is_at_end() {
                    self.play_state = PlayState::Finished;
                }
                let message = self.step_message("Step", self.current_step);
                self.announce(message);
            }
            Action::PrevStep => {
                if self.current_step == 0 {
                    return;
                }
                self.current_step -= 1;
                self.play_state = PlayState::Paused;
                let message = self.step_message("Back to step", self.current_step);
                self.announce(message);
            }
            Action::GoToStep(target) => {
                self.current_step = target.min(self.last_index());
                self.play_state = if self.is_at_end() {
                    PlayState::Finished
                } else {
                    PlayState::Paused
                };
                let message = self.step_message("Jumped to step", self.current_step);
                self.announce(message);
            }
            Action::SetSpeed(speed) => self.change_speed(speed),
            Action::Faster => self.change_speed(self.speed + self.config.speed_step),
            Action::Slower => self.change_speed(self.speed - self.config.speed_step),
            Action::Reset => {
                self.play_state = PlayState::Idle;
                self.current_step = 0;
                self.announce("Reset to the initial step".to_string());
            }
            Action::ToggleTable => {
                self.table_visible = !self.table_visible;
                let message = if self.table_visible {
                    "Comparison table shown"
                } else {
                    "Comparison table hidden"
                };
                self.announce(message.to_string());
            }
            Action::Announce(message) => self.announce(message),
            Action::ClearAnnouncements => self.announcements.clear(),
        }
    }

    // Non-positive or non-finite speeds are ignored; the rest are clamped into range.
    fn change_speed(&mut self, speed: f64) {
        let Ok(speed) = self.config.clamp_speed(speed) else {
            debug!(speed, "ignoring invalid speed");
            return;
        };
        self.speed = speed;
        self.announce(format!("Playback speed set to {speed}×"));
    }

    /// Replaces the sequence with one generated at `requested` precision.
    ///
    /// On error the current sequence, cursor and state are left untouched.
    pub fn set_precision(&mut self, requested: i64) -> Result<()> {
        let precision = self.config.check_precision(requested)?;
        let steps = generate_steps(precision as i64)?;

        self.steps = steps;
        self.precision = precision;
        self.current_step = self.current_step.min(self.last_index());
        self.play_state = PlayState::Idle;
        self.announce(format!("Precision set to {precision} decimal places"));
        debug!(precision, step = self.current_step, "regenerated step sequence");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrowingError;

    fn playback() -> Playback {
        Playback::new(NarrowingConfig::default()).expect("playback")
    }

    #[test]
    fn starts_idle_at_default_precision() {
        let playback = playback();
        assert_eq!(playback.play_state, PlayState::Idle);
        assert_eq!(playback.current_step, 0);
        assert_eq!(playback.precision, 3);
        assert_eq!(playback.steps.len(), 4);
        assert_eq!(playback.speed, 1.0);
        assert!(!playback.table_visible);
        assert!(playback.announcements.is_empty());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = NarrowingConfig {
            min_precision: 4,
            max_precision: 2,
            ..NarrowingConfig::default()
        };
        assert!(matches!(
            Playback::new(config),
            Err(NarrowingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn next_step_advances_and_finishes_at_the_end() {
        let mut playback = playback();
        playback.apply(Action::Play);
        assert_eq!(playback.play_state, PlayState::Playing);

        playback.apply(Action::NextStep);
        assert_eq!(playback.current_step, 1);
        assert_eq!(playback.play_state, PlayState::Playing);
        assert!(playback
            .announcements
            .last()
            .expect("announcement")
            .starts_with("Step 2: Compare squares"));

        playback.apply(Action::NextStep);
        playback.apply(Action::NextStep);
        assert_eq!(playback.current_step, 3);
        assert_eq!(playback.play_state, PlayState::Finished);

        playback.apply(Action::NextStep);
        assert_eq!(playback.current_step, 3);
        assert_eq!(
            playback.announcements.last().map(String::as_str),
            Some("Reached the final step")
        );
    }

    #[test]
    fn play_at_last_step_finishes_without_announcement() {
        let mut playback = playback();
        playback.apply(Action::GoToStep(3));
        let before = playback.announcements.len();
        playback.apply(Action::Play);
        assert_eq!(playback.play_state, PlayState::Finished);
        assert_eq!(playback.announcements.len(), before);
    }

    #[test]
    fn prev_step_pauses_and_is_noop_at_start() {
        let mut playback = playback();
        playback.apply(Action::PrevStep);
        assert_eq!(playback.current_step, 0);
        assert_eq!(playback.play_state, PlayState::Idle);
        assert!(playback.announcements.is_empty());

        playback.apply(Action::Play);
        playback.apply(Action::NextStep);
        playback.apply(Action::PrevStep);
        assert_eq!(playback.current_step, 0);
        assert_eq!(playback.play_state, PlayState::Paused);
        assert!(playback
            .announcements
            .last()
            .expect("announcement")
            .starts_with("Back to step 1: First"));
    }

    #[test]
    fn go_to_step_clamps_to_sequence() {
        let mut playback = playback();
        playback.apply(Action::GoToStep(1));
        assert_eq!(playback.current_step, 1);
        assert_eq!(playback.play_state, PlayState::Paused);

        playback.apply(Action::GoToStep(99));
        assert_eq!(playback.current_step, 3);
        assert_eq!(playback.play_state, PlayState::Finished);
    }

    #[test]
    fn speed_is_clamped_and_scales_delay() {
        let mut playback = playback();
        assert_eq!(playback.step_delay_ms(), 800.0);

        playback.apply(Action::SetSpeed(2.0));
        assert_eq!(playback.step_delay_ms(), 400.0);

        playback.apply(Action::Faster);
        assert_eq!(playback.speed, 2.0);

        for _ in 0..10 {
            playback.apply(Action::Slower);
        }
        assert_eq!(playback.speed, 0.25);
        assert_eq!(playback.step_delay_ms(), 3200.0);

        let before = playback.announcements.len();
        playback.apply(Action::SetSpeed(f64::NAN));
        assert_eq!(playback.speed, 0.25);
        assert_eq!(playback.announcements.len(), before);
    }

    #[test]
    fn reset_returns_to_idle_start() {
        let mut playback = playback();
        playback.apply(Action::GoToStep(2));
        playback.apply(Action::Reset);
        assert_eq!(playback.current_step, 0);
        assert_eq!(playback.play_state, PlayState::Idle);
    }

    #[test]
    fn toggle_table_and_announcements() {
        let mut playback = playback();
        playback.apply(Action::ToggleTable);
        assert!(playback.table_visible);
        playback.apply(Action::ToggleTable);
        assert!(!playback.table_visible);

        playback.apply(Action::Announce("hello".to_string()));
        assert_eq!(playback.announcements.last().map(String::as_str), Some("hello"));

        playback.apply(Action::ClearAnnouncements);
        assert!(playback.announcements.is_empty());
    }

    #[test]
    fn set_precision_rebuilds_sequence_and_keeps_preferences() {
        let mut playback = playback();
        playback.apply(Action::SetSpeed(1.5));
        playback.apply(Action::ToggleTable);
        playback.apply(Action::GoToStep(3));

        playback.set_precision(2).expect("precision 2");
        assert_eq!(playback.precision, 2);
        assert_eq!(playback.steps.len(), 3);
        assert_eq!(playback.current_step, 2);
        assert_eq!(playback.speed, 1.5);
        assert!(playback.table_visible);
        assert_eq!(playback.play_state, PlayState::Idle);

        playback.set_precision(6).expect("precision 6");
        assert_eq!(playback.steps.len(), 7);
        assert_eq!(playback.current_step, 2);
    }

    #[test]
    fn invalid_precision_keeps_previous_sequence() {
        let mut playback = playback();
        playback.apply(Action::GoToStep(2));
        let steps = playback.steps.clone();

        let err = playback.set_precision(9).expect_err("outside configured range");
        assert!(err.to_string().contains("configured range"));
        assert_eq!(playback.steps, steps);
        assert_eq!(playback.precision, 3);
        assert_eq!(playback.current_step, 2);
        assert_eq!(playback.play_state, PlayState::Paused);
    }

    #[test]
    fn derived_views_follow_cursor() {
        let mut playback = playback();
        playback.apply(Action::GoToStep(1));
        assert_eq!(playback.comparison_table().len(), 4);

        let (min, max) = playback.visual_bounds().expect("bounds");
        let step = playback.current().expect("current step");
        assert!(min < step.lower && step.upper < max);
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: Action =
            serde_json::from_str(r#"{"type":"go_to_step","value":2}"#).expect("action");
        assert_eq!(action, Action::GoToStep(2));
        let action: Action = serde_json::from_str(r#"{"type":"play"}"#).expect("action");
        assert_eq!(action, Action::Play);
    }
}
