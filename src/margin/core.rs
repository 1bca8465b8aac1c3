use serde::Serialize;

use crate::breakpoint::Breakpoint;

/// Abstract margin magnitude for container edges.
///
/// Steps scale with the current size class so the same layout breathes more
/// on wider screens: the pixel value is `unit(step) * interval(class)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStep {
    Zero,
    #[default]
    One,
    Two,
    Three,
    Four,
    Five,
}

impl MarginStep {
    fn unit(self) -> f64 {
        match self {
            MarginStep::Zero => 0.0,
            MarginStep::One => 2.0,
            MarginStep::Two => 4.0,
            MarginStep::Three => 6.0,
            MarginStep::Four => 8.0,
            MarginStep::Five => 10.0,
        }
    }

    fn interval(class: Breakpoint) -> f64 {
        match class {
            Breakpoint::Xs => 1.0,
            Breakpoint::Sm => 2.0,
            Breakpoint::Md => 3.0,
            Breakpoint::Lg => 4.0,
            Breakpoint::Xl => 5.0,
        }
    }

    /// Pixel value of this step at the given size class.
    pub fn px(self, class: Breakpoint) -> f64 {
        self.unit() * Self::interval(class)
    }
}

/// Four-sided outer margin of a container, in scale steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxMargin {
    pub left: MarginStep,
    pub top: MarginStep,
    pub right: MarginStep,
    pub bottom: MarginStep,
}

impl BoxMargin {
    pub fn none() -> Self {
        Self::uniform(MarginStep::Zero)
    }

    pub fn uniform(step: MarginStep) -> Self {
        Self {
            left: step,
            top: step,
            right: step,
            bottom: step,
        }
    }

    /// Resolve all four sides to pixels for the given size class.
    pub fn px(&self, class: Breakpoint) -> ResolvedMargin {
        ResolvedMargin {
            left: self.left.px(class),
            top: self.top.px(class),
            right: self.right.px(class),
            bottom: self.bottom.px(class),
        }
    }
}

/// A [`BoxMargin`] resolved to pixels at one size class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedMargin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Raw pixel gutters around one column's content.
///
/// Left/right inset the content inside the column box; top/bottom offset the
/// column against the line above and the row bottom. Gutters never enter the
/// span arithmetic, so they cannot change widths or wrap decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColumnMargin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ColumnMargin {
    pub fn uniform(px: f64) -> Self {
        Self {
            left: px,
            top: px,
            right: px,
            bottom: px,
        }
    }
}
