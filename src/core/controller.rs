/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyX,
    KeyY,
    KeyZ,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// Controller - button states plus pointer motion for one frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Check if button went down since the last frame reset
    fn was_pressed(&self, button: Button) -> bool;

    /// Cursor position in physical pixels, if the cursor is over the window
    fn pointer(&self) -> Option<(f32, f32)>;

    /// Cursor motion since the last frame reset
    fn pointer_delta(&self) -> (f32, f32);

    /// Wheel motion since the last frame reset, positive away from the user
    fn scroll_delta(&self) -> f32;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Scriptable controller for control tests
    #[derive(Default)]
    pub struct MockController {
        pub down: Vec<Button>,
        pub pressed: Vec<Button>,
        pub pointer: Option<(f32, f32)>,
        pub delta: (f32, f32),
        pub scroll: f32,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.down.contains(&button)
        }

        fn was_pressed(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn pointer(&self) -> Option<(f32, f32)> {
            self.pointer
        }

        fn pointer_delta(&self) -> (f32, f32) {
            self.delta
        }

        fn scroll_delta(&self) -> f32 {
            self.scroll
        }
    }

    #[test]
    fn test_button_hash() {
        let mut set = HashSet::new();
        set.insert(Button::KeyX);
        set.insert(Button::MouseLeft);
        set.insert(Button::KeyX);

        assert!(set.contains(&Button::KeyX));
        assert!(!set.contains(&Button::KeyY));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            down: vec![Button::MouseLeft, Button::KeyZ],
            ..Default::default()
        };

        assert!(controller.is_down(Button::MouseLeft));
        assert!(controller.is_down(Button::KeyZ));
        assert!(!controller.is_down(Button::MouseRight));
        assert!(!controller.was_pressed(Button::MouseLeft));
    }
}
