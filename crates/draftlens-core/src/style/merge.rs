//! Override engine: resolving an effective style from its three layers.
//!
//! The effective style of a (class, mode) pair is a pure function of the
//! General configuration, the mode's override delta, and the mode's enable
//! flag. Resolution never mutates General; a disabled or absent override
//! resolves to General value-equal.

use super::config::{StyleConfig, StyleDelta};

/// Resolve the effective style from the three configuration layers.
///
/// Laws (covered by the tests below):
/// * `resolve(G, Some(&G.diff(&C)), true) == C` for any customized `C`
/// * `resolve(G, Some(&O), false) == G` for any override `O`
pub fn resolve<T: StyleConfig>(general: &T, delta: Option<&T::Delta>, enabled: bool) -> T {
    match delta {
        Some(d) if enabled => general.apply(d),
        _ => *general,
    }
}

/// Minimal delta turning `general` into `customized`.
///
/// Thin alias over [`StyleConfig::diff`] so call sites read symmetrically
/// with [`resolve`].
pub fn delta_between<T: StyleConfig>(general: &T, customized: &T) -> T::Delta {
    general.diff(customized)
}

/// Fold a new patch into an existing override delta, keeping the stored
/// override minimal relative to `general`.
pub fn fold_delta<T: StyleConfig>(
    general: &T,
    existing: Option<&T::Delta>,
    patch: &T::Delta,
) -> Option<T::Delta> {
    let customized = resolve(general, existing, true).apply(patch);
    let folded = general.diff(&customized);
    (!folded.is_empty()).then_some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::config::{ArcStyle, LineStyle, LineStyleDelta};
    use crate::style::{LinePattern, StyleColor};

    #[test]
    fn test_merge_diff_inverse_law() {
        let general = LineStyle::default();
        let customized = LineStyle {
            color: StyleColor::rgb(0xFF, 0x8C, 0x00),
            width: 4.0,
            pattern: LinePattern::Dashed,
        };

        let delta = delta_between(&general, &customized);
        assert_eq!(resolve(&general, Some(&delta), true), customized);
    }

    #[test]
    fn test_merge_diff_inverse_law_with_partial_change() {
        let general = ArcStyle::default();
        let customized = ArcStyle {
            construction_color: StyleColor::rgb(0x40, 0x40, 0x40),
            ..general
        };

        let delta = delta_between(&general, &customized);
        assert_eq!(resolve(&general, Some(&delta), true), customized);
    }

    #[test]
    fn test_disabled_override_is_noop() {
        let general = LineStyle::default();
        let delta = LineStyleDelta {
            color: Some(StyleColor::BLACK),
            width: Some(9.0),
            pattern: Some(LinePattern::Dotted),
        };

        assert_eq!(resolve(&general, Some(&delta), false), general);
    }

    #[test]
    fn test_absent_override_is_noop() {
        let general = LineStyle::default();
        assert_eq!(resolve::<LineStyle>(&general, None, true), general);
    }

    #[test]
    fn test_resolution_is_pure() {
        let general = LineStyle::default();
        let delta = LineStyleDelta {
            width: Some(5.0),
            ..Default::default()
        };

        let first = resolve(&general, Some(&delta), true);
        let second = resolve(&general, Some(&delta), true);
        assert_eq!(first, second);
        // General itself is untouched by resolution.
        assert_eq!(general, LineStyle::default());
    }

    #[test]
    fn test_fold_delta_accumulates_and_stays_minimal() {
        let general = LineStyle::default();
        let first = LineStyleDelta {
            width: Some(4.0),
            ..Default::default()
        };
        let folded = fold_delta(&general, None, &first);
        assert_eq!(folded.unwrap().width, Some(4.0));

        // A second patch touching another field keeps the first one.
        let second = LineStyleDelta {
            color: Some(StyleColor::BLACK),
            ..Default::default()
        };
        let folded = fold_delta(&general, folded.as_ref(), &second).unwrap();
        assert_eq!(folded.width, Some(4.0));
        assert_eq!(folded.color, Some(StyleColor::BLACK));

        // Patching a field back to its General value drops it again.
        let revert = LineStyleDelta {
            width: Some(general.width),
            color: Some(StyleColor::BLACK),
            ..Default::default()
        };
        let folded = fold_delta(&general, Some(&folded), &revert).unwrap();
        assert!(folded.width.is_none());
    }

    #[test]
    fn test_fold_delta_to_general_clears_override() {
        let general = LineStyle::default();
        let delta = LineStyleDelta {
            width: Some(4.0),
            ..Default::default()
        };
        let folded = fold_delta(&general, None, &delta);

        let revert = LineStyleDelta {
            width: Some(general.width),
            ..Default::default()
        };
        assert_eq!(fold_delta(&general, folded.as_ref(), &revert), None);
    }
}
