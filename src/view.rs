use crate::game::Game;
use crate::layout::{ButtonColor, Position};
use crate::timers::Severity;

/// What the screen needs to draw one button
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    /// `None` for the target
    pub decoy_id: Option<usize>,
    pub label: String,
    pub color: ButtonColor,
    pub position: Position,
}

impl ButtonView {
    pub fn is_target(&self) -> bool {
        self.decoy_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownView {
    pub seconds: u32,
    pub severity: Severity,
}

impl CountdownView {
    pub fn label(&self) -> String {
        format!("Panic timer: {}s", self.seconds)
    }
}

/// Read-only projection of a [`Game`] for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub target: ButtonView,
    pub decoys: Vec<ButtonView>,
    pub current_clicks: u32,
    pub required_clicks: u32,
    pub elapsed: String,
    pub countdown: Option<CountdownView>,
    pub is_terminal: bool,
}

impl GameView {
    pub fn project(game: &Game) -> Self {
        let session = game.session();
        let target = ButtonView {
            decoy_id: None,
            label: session.target.label().to_string(),
            color: session.target.color,
            position: session.target.position,
        };
        let decoys = session
            .decoys
            .iter()
            .map(|d| ButtonView {
                decoy_id: Some(d.id),
                label: d.label.to_string(),
                color: d.color,
                position: d.position,
            })
            .collect();

        Self {
            target,
            decoys,
            current_clicks: session.current_clicks,
            required_clicks: session.required_clicks,
            elapsed: game.elapsed().formatted(),
            countdown: game.countdown().map(|c| CountdownView {
                seconds: c.seconds_remaining(),
                severity: c.severity(),
            }),
            is_terminal: session.is_terminal(),
        }
    }

    /// Text of the clicks pill
    pub fn progress_label(&self) -> String {
        format!(" Clicks: {} / {} ", self.current_clicks, self.required_clicks)
    }
}

#[cfg(test)]
mod tests {
    use crate::game::{Game, Variant};
    use crate::random::ScriptedSource;
    use crate::timers::Severity;
    use std::time::Duration;

    #[test]
    fn test_projection_matches_session() {
        let game = Game::with_source(Variant::Classic, Box::new(ScriptedSource::constant(0.0)));
        let view = game.view();

        assert!(view.target.is_target());
        assert_eq!(view.target.label, "Leave Call");
        assert_eq!(view.decoys.len(), game.session().decoys.len());
        assert!(view.decoys.iter().all(|d| !d.is_target()));
        assert_eq!(view.progress_label(), " Clicks: 0 / 5 ");
        assert_eq!(view.elapsed, "00:00:00");
        assert!(view.countdown.is_none());
        assert!(!view.is_terminal);
    }

    #[test]
    fn test_countdown_projection() {
        let mut game = Game::with_source(Variant::Panic, Box::new(ScriptedSource::constant(0.0)));
        game.advance(Duration::from_secs(12));
        let view = game.view();
        let countdown = view.countdown.expect("panic variant shows a countdown");
        assert_eq!(countdown.seconds, 18);
        assert_eq!(countdown.severity, Severity::Warning);
        assert_eq!(view.elapsed, "00:00:12");
        assert_eq!(countdown.label(), "Panic timer: 18s");
    }

    #[test]
    fn test_progress_after_clicks() {
        let mut game = Game::with_source(Variant::Classic, Box::new(ScriptedSource::constant(0.0)));
        game.on_target_click();
        game.on_target_click();
        assert_eq!(game.view().progress_label(), " Clicks: 2 / 5 ");
    }
}
