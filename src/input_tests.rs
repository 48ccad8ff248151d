/*
 * Unit tests for the input module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_edge_trigger_fires_once_per_press
 * - test_button_panel_samples_both_buttons
 * - test_button_panel_release_between_presses
 * - test_parse_command
 * - test_parse_command_rejects_garbage
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod input_tests {
    use crate::input::{parse_command, Button, ButtonPanel, EdgeTrigger, InputEvent};
    use crate::shared::CallOrigin;

    #[test]
    fn test_edge_trigger_fires_once_per_press() {
        // Arrange
        let mut trigger = EdgeTrigger::default();

        // Act
        let fired: Vec<bool> = [false, true, true, true, false, true]
            .iter()
            .map(|&pressed| trigger.rising(pressed))
            .collect();

        // Assert
        assert_eq!(fired, vec![false, true, false, false, false, true]);
    }

    #[test]
    fn test_button_panel_samples_both_buttons() {
        // Arrange
        let mut panel = ButtonPanel::new();

        // Act
        let first = panel.sample(true, true);
        let held = panel.sample(true, true);
        let b_again = panel.sample(true, false);
        let released = panel.sample(false, true);

        // Assert
        assert_eq!(first, vec![Button::A, Button::B]);
        assert!(held.is_empty());
        assert!(b_again.is_empty());
        assert_eq!(released, vec![Button::B]);
        assert_eq!(Button::A.origin(), CallOrigin::Internal);
        assert_eq!(Button::B.origin(), CallOrigin::External);
    }

    #[test]
    fn test_button_panel_release_between_presses() {
        // Purpose: the same key typed in consecutive cycles fires each time

        // Arrange
        let mut panel = ButtonPanel::new();

        // Act
        let first = panel.sample(true, false);
        panel.release();
        let second = panel.sample(true, true);
        panel.release();
        let idle = panel.sample(false, false);
        let third = panel.sample(false, true);

        // Assert
        assert_eq!(first, vec![Button::A]);
        assert_eq!(second, vec![Button::A, Button::B]);
        assert!(idle.is_empty());
        assert_eq!(third, vec![Button::B]);
    }

    #[test]
    fn test_parse_command() {
        // Act / Assert
        assert_eq!(parse_command("a"), Some(InputEvent::Press(Button::A)));
        assert_eq!(parse_command("  B "), Some(InputEvent::Press(Button::B)));
        assert_eq!(parse_command("quit"), Some(InputEvent::Quit));
        assert_eq!(parse_command("i 4"), Some(InputEvent::Manual(CallOrigin::Internal, 4)));
        assert_eq!(parse_command("E 12"), Some(InputEvent::Manual(CallOrigin::External, 12)));
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        // Act / Assert
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command("i"), None);
        assert_eq!(parse_command("e -1"), None);
        assert_eq!(parse_command("e 300"), None);
        assert_eq!(parse_command("a b"), None);
        assert_eq!(parse_command("i 3 4"), None);
    }
}
