use screenalign_randr::Status;

use crate::layout::{Horizontal, Vertical};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Extend {
        horizontal: Horizontal,
        vertical: Vertical,
    },
    Clone,
    ExternalOnly,
    InternalOnly,
}

/// Next step of the internal -> clone -> external -> internal cycle.
pub fn toggle(status: &Status, internal: &str) -> Action {
    let mut externals = status.connected().filter(|o| o.name != internal).peekable();
    if externals.peek().is_none() {
        return Action::InternalOnly;
    }

    let external_active = externals.any(|o| o.is_active());
    let internal_active = status.get(internal).is_some_and(|o| o.is_active());

    match (internal_active, external_active) {
        (_, false) => Action::Clone,
        (true, true) => Action::ExternalOnly,
        (false, true) => Action::InternalOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenalign_randr::parse_status;

    const UNPLUGGED_ACTIVE: &str =
        include_str!("../../screenalign-randr/testdata/unplugged_active.txt");

    const INTERNAL_ONLY: &str = "\
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.05*+
HDMI-1 connected (normal left inverted right x axis y axis)
   2560x1440     59.95 +
   1920x1080     60.00
";

    const BOTH_ACTIVE: &str = "\
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.05*+
HDMI-1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440     59.95 +
   1920x1080     60.00*
";

    const EXTERNAL_ACTIVE: &str = "\
eDP-1 connected (normal left inverted right x axis y axis)
   1920x1080     60.05 +
HDMI-1 connected primary 2560x1440+0+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440     59.95*+
   1920x1080     60.00
";

    const NO_EXTERNAL: &str = "\
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.05*+
HDMI-1 disconnected (normal left inverted right x axis y axis)
";

    const NOTHING_ACTIVE: &str = "\
eDP-1 connected (normal left inverted right x axis y axis)
   1920x1080     60.05 +
HDMI-1 connected (normal left inverted right x axis y axis)
   1920x1080     60.00 +
";

    #[test]
    fn test_toggle_internal_to_clone() {
        assert_eq!(toggle(&parse_status(INTERNAL_ONLY), "eDP-1"), Action::Clone);
    }

    #[test]
    fn test_toggle_both_to_external() {
        assert_eq!(toggle(&parse_status(BOTH_ACTIVE), "eDP-1"), Action::ExternalOnly);
    }

    #[test]
    fn test_toggle_external_to_internal() {
        assert_eq!(toggle(&parse_status(EXTERNAL_ACTIVE), "eDP-1"), Action::InternalOnly);
    }

    #[test]
    fn test_toggle_without_external() {
        assert_eq!(toggle(&parse_status(NO_EXTERNAL), "eDP-1"), Action::InternalOnly);
    }

    #[test]
    fn test_toggle_nothing_active() {
        assert_eq!(toggle(&parse_status(NOTHING_ACTIVE), "eDP-1"), Action::Clone);
    }

    #[test]
    fn test_toggle_full_cycle() {
        let states = [INTERNAL_ONLY, BOTH_ACTIVE, EXTERNAL_ACTIVE];
        let actions: Vec<_> = states
            .iter()
            .map(|text| toggle(&parse_status(text), "eDP-1"))
            .collect();
        assert_eq!(
            actions,
            vec![Action::Clone, Action::ExternalOnly, Action::InternalOnly]
        );
    }

    #[test]
    fn test_toggle_unplugged_external_returns_to_internal() {
        assert_eq!(toggle(&parse_status(UNPLUGGED_ACTIVE), "eDP-1"), Action::InternalOnly);
    }
}
