use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::view::{ButtonView, GameView};

/// Blank cells on each side of a label
const TARGET_PADDING: u16 = 3;
const DECOY_PADDING: u16 = 2;
pub const TOGGLE_WIDTH: u16 = 3;

/// Below this the screen shows a notice instead of the call
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 10;

/// What a mouse click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    ThemeToggle,
    Target,
    Decoy(usize),
}

pub fn button_width(button: &ButtonView) -> u16 {
    let padding = if button.is_target() {
        TARGET_PADDING
    } else {
        DECOY_PADDING
    };
    button.label.width() as u16 + padding * 2
}

/// One-row rect centered on the button's percentage position, kept on screen
pub fn button_rect(button: &ButtonView, area: Rect) -> Rect {
    let width = button_width(button).min(area.width);
    let center_x = area.x as f64 + area.width as f64 * button.position.x / 100.0;
    let center_y = area.y as f64 + area.height as f64 * button.position.y / 100.0;

    let max_x = area.x + area.width - width;
    let x = (center_x - width as f64 / 2.0)
        .round()
        .clamp(area.x as f64, max_x as f64) as u16;
    let max_y = (area.y + area.height).saturating_sub(1).max(area.y);
    let y = center_y.floor().clamp(area.y as f64, max_y as f64) as u16;

    Rect::new(x, y, width, area.height.min(1))
}

pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Rect of `text` centered on row `y`, or nothing if the row is off the area
fn centered_text(area: Rect, y: u16, text: &str) -> Option<Rect> {
    if y >= area.y + area.height {
        return None;
    }
    let width = (text.width() as u16).min(area.width);
    let x = area.x + (area.width - width) / 2;
    Some(Rect::new(x, y, width, 1))
}

/// The clicks pill, one row below the top edge
pub fn progress_rect(view: &GameView, area: Rect) -> Option<Rect> {
    centered_text(area, area.y + 1, &view.progress_label())
}

/// The panic timer, under the clicks pill
pub fn countdown_rect(view: &GameView, area: Rect) -> Option<Rect> {
    let countdown = view.countdown?;
    centered_text(area, area.y + 2, &countdown.label())
}

pub fn theme_toggle_rect(area: Rect) -> Rect {
    let width = TOGGLE_WIDTH.min(area.width);
    let x = (area.x + area.width).saturating_sub(width + 1).max(area.x);
    Rect::new(x, area.y, width, area.height.min(1))
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Topmost thing under the cell: the toggle, then the target, then the status
/// text, then decoys (later decoys sit above earlier ones). Nothing is
/// clickable while the area is too small to draw the call.
pub fn hit_test(view: &GameView, area: Rect, column: u16, row: u16) -> Option<Hit> {
    if !fits(area) {
        return None;
    }
    if contains(theme_toggle_rect(area), column, row) {
        return Some(Hit::ThemeToggle);
    }
    if view.is_terminal {
        return None;
    }
    if contains(button_rect(&view.target, area), column, row) {
        return Some(Hit::Target);
    }
    let status = [progress_rect(view, area), countdown_rect(view, area)];
    if status.iter().flatten().any(|r| contains(*r, column, row)) {
        return None;
    }
    view.decoys
        .iter()
        .rev()
        .find(|d| contains(button_rect(d, area), column, row))
        .and_then(|d| d.decoy_id)
        .map(Hit::Decoy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ButtonColor, Position};
    use crate::timers::Severity;
    use crate::view::CountdownView;

    fn button(decoy_id: Option<usize>, label: &str, x: f64, y: f64) -> ButtonView {
        ButtonView {
            decoy_id,
            label: label.to_string(),
            color: ButtonColor::Blue,
            position: Position::new(x, y),
        }
    }

    fn view(target: ButtonView, decoys: Vec<ButtonView>) -> GameView {
        GameView {
            target,
            decoys,
            current_clicks: 0,
            required_clicks: 5,
            elapsed: "00:00:00".into(),
            countdown: None,
            is_terminal: false,
        }
    }

    #[test]
    fn test_button_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = button_rect(&button(None, "Leave Call", 50.0, 50.0), area);
        assert_eq!(rect.width, 16);
        assert_eq!(rect.height, 1);
        assert_eq!(rect.x, 42);
        assert_eq!(rect.y, 25);
    }

    #[test]
    fn test_button_rect_stays_on_screen() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = button_rect(&button(Some(0), "Disconnect", 90.0, 90.0), area);
        assert!(rect.x + rect.width <= area.width);
        assert!(rect.y < area.height);
    }

    #[test]
    fn test_target_sits_above_decoys() {
        let area = Rect::new(0, 0, 100, 50);
        let v = view(
            button(None, "Leave Call", 50.0, 50.0),
            vec![button(Some(0), "Leave Call", 50.0, 50.0)],
        );
        assert_eq!(hit_test(&v, area, 50, 25), Some(Hit::Target));
    }

    #[test]
    fn test_later_decoys_sit_above_earlier() {
        let area = Rect::new(0, 0, 100, 50);
        let v = view(
            button(None, "Leave Call", 20.0, 20.0),
            vec![
                button(Some(0), "Hang Up", 70.0, 70.0),
                button(Some(1), "Hang Up", 70.0, 70.0),
            ],
        );
        assert_eq!(hit_test(&v, area, 70, 35), Some(Hit::Decoy(1)));
        assert_eq!(hit_test(&v, area, 5, 45), None);
    }

    #[test]
    fn test_terminal_hides_buttons_but_not_toggle() {
        let area = Rect::new(0, 0, 100, 50);
        let mut v = view(button(None, "Leave Call", 50.0, 50.0), vec![]);
        v.is_terminal = true;
        assert_eq!(hit_test(&v, area, 50, 25), None);
        let toggle = theme_toggle_rect(area);
        assert_eq!(
            hit_test(&v, area, toggle.x, toggle.y),
            Some(Hit::ThemeToggle)
        );
    }

    #[test]
    fn test_undersized_area_has_nothing_to_click() {
        let area = Rect::new(0, 0, 20, 5);
        let v = view(button(None, "Leave Call", 50.0, 50.0), vec![]);
        let target = button_rect(&v.target, area);
        let toggle = theme_toggle_rect(area);

        assert!(!fits(area));
        assert_eq!(hit_test(&v, area, target.x + target.width / 2, target.y), None);
        assert_eq!(hit_test(&v, area, toggle.x, toggle.y), None);
        assert!(fits(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT)));
    }

    #[test]
    fn test_status_text_covers_decoys_under_it() {
        let area = Rect::new(0, 0, 100, 40);
        let mut v = view(
            button(None, "Leave Call", 20.0, 80.0),
            vec![
                button(Some(0), "Hang Up", 50.0, 2.5),
                button(Some(1), "Hang Up", 50.0, 5.0),
                button(Some(2), "Hang Up", 20.0, 2.5),
            ],
        );
        v.countdown = Some(CountdownView {
            seconds: 42,
            severity: Severity::Normal,
        });

        let pill = progress_rect(&v, area).unwrap();
        assert_eq!(pill.y, 1);
        assert_eq!(hit_test(&v, area, 50, 1), None);
        assert_eq!(hit_test(&v, area, 50, 2), None);

        // a decoy on row 1 is still reachable beside the pill text
        let beside = button_rect(&v.decoys[2], area);
        assert_eq!(beside.y, 1);
        assert!(beside.x + beside.width <= pill.x);
        assert_eq!(hit_test(&v, area, beside.x, 1), Some(Hit::Decoy(2)));

        v.countdown = None;
        assert_eq!(countdown_rect(&v, area), None);
        assert_eq!(hit_test(&v, area, 50, 2), Some(Hit::Decoy(1)));
    }
}
