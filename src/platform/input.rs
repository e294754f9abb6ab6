//! Keyboard mapping

use crate::sim::Direction;

/// Map a `KeyboardEvent.key` value to a direction. Everything else is ignored.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(direction_for_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::Right));
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ["w", "Enter", " ", "Escape", "arrowup", ""] {
            assert_eq!(direction_for_key(key), None, "{:?}", key);
        }
    }
}
