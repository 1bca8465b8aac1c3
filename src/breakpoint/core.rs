use serde::Serialize;

/// Screen size class, ordered from narrowest to widest.
///
/// The thresholds are a fixed step function over the superview width:
/// phone-portrait widths classify as `Xs`, split-screen and phone-landscape
/// widths as `Sm`, tablet portrait as `Md`, tablet landscape as `Lg` and
/// large-tablet landscape as `Xl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// All classes in ascending order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Map a width in pixels to its size class.
    ///
    /// The exact thresholds are load-bearing: they decide which span a
    /// column resolves to on a given device, so they must not drift.
    pub fn classify(width: f64) -> Breakpoint {
        if width <= 450.0 {
            return Breakpoint::Xs;
        }
        if width <= 768.0 {
            return Breakpoint::Sm;
        }
        if width < 1024.0 {
            return Breakpoint::Md;
        }
        if width < 1366.0 {
            return Breakpoint::Lg;
        }
        Breakpoint::Xl
    }

    /// Position within [`Breakpoint::ALL`].
    pub fn index(self) -> usize {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 1,
            Breakpoint::Md => 2,
            Breakpoint::Lg => 3,
            Breakpoint::Xl => 4,
        }
    }

    /// Whether the current class is strictly narrower than `other`.
    pub fn smaller_than(self, other: Breakpoint) -> bool {
        self < other
    }

    /// This class followed by every narrower class, widest first.
    ///
    /// This is the lookup order for cascade resolution: an unset breakpoint
    /// inherits the nearest narrower explicit value.
    pub fn cascade(self) -> impl Iterator<Item = Breakpoint> {
        (0..=self.index()).rev().map(|i| Breakpoint::ALL[i])
    }
}

/// Notification emitted when reclassification lands in a different class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointChange {
    pub previous: Option<Breakpoint>,
    pub current: Breakpoint,
}

/// Observable holder for the current size class.
///
/// One resolver is owned by the reflow controller; there is no process-wide
/// shared instance. `observe` returns a change only when the class actually
/// moved, so a width fluctuating inside one class's range produces no
/// notifications.
#[derive(Debug, Default, Clone)]
pub struct BreakpointResolver {
    current: Option<Breakpoint>,
    last_width: Option<f64>,
}

impl BreakpointResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reclassify for a new width, reporting a change when the class moved.
    pub fn observe(&mut self, width: f64) -> Option<BreakpointChange> {
        self.last_width = Some(width);
        let next = Breakpoint::classify(width);
        if self.current == Some(next) {
            return None;
        }
        let change = BreakpointChange {
            previous: self.current,
            current: next,
        };
        self.current = Some(next);
        Some(change)
    }

    /// The class stored by the most recent `observe` call.
    pub fn current(&self) -> Option<Breakpoint> {
        self.current
    }

    /// The width stored by the most recent `observe` call.
    pub fn last_width(&self) -> Option<f64> {
        self.last_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_threshold_table() {
        let cases = [
            (320.0, Breakpoint::Xs),
            (450.0, Breakpoint::Xs),
            (451.0, Breakpoint::Sm),
            (768.0, Breakpoint::Sm),
            (769.0, Breakpoint::Md),
            (1023.0, Breakpoint::Md),
            (1024.0, Breakpoint::Lg),
            (1365.0, Breakpoint::Lg),
            (1366.0, Breakpoint::Xl),
            (2048.0, Breakpoint::Xl),
        ];
        for (width, expected) in cases {
            assert_eq!(Breakpoint::classify(width), expected, "width {width}");
        }
    }

    #[test]
    fn ordering_and_smaller_than() {
        assert!(Breakpoint::Xs < Breakpoint::Xl);
        assert!(Breakpoint::Sm.smaller_than(Breakpoint::Md));
        assert!(!Breakpoint::Lg.smaller_than(Breakpoint::Lg));
        assert!(!Breakpoint::Xl.smaller_than(Breakpoint::Md));
    }

    #[test]
    fn cascade_walks_down_to_xs() {
        let order: Vec<_> = Breakpoint::Lg.cascade().collect();
        assert_eq!(
            order,
            vec![
                Breakpoint::Lg,
                Breakpoint::Md,
                Breakpoint::Sm,
                Breakpoint::Xs
            ]
        );
        let just_xs: Vec<_> = Breakpoint::Xs.cascade().collect();
        assert_eq!(just_xs, vec![Breakpoint::Xs]);
    }

    #[test]
    fn observe_reports_class_changes_only() {
        let mut resolver = BreakpointResolver::new();

        let first = resolver.observe(400.0).expect("first observe notifies");
        assert_eq!(first.previous, None);
        assert_eq!(first.current, Breakpoint::Xs);

        // Same class, different width: no notification.
        assert!(resolver.observe(430.0).is_none());
        assert_eq!(resolver.last_width(), Some(430.0));

        let change = resolver.observe(800.0).expect("class moved to md");
        assert_eq!(change.previous, Some(Breakpoint::Xs));
        assert_eq!(change.current, Breakpoint::Md);
        assert_eq!(resolver.current(), Some(Breakpoint::Md));
    }
}
