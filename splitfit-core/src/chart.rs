//! Static data for the split-flexibility progress chart.
//!
//! The chart widget itself is an external collaborator; it consumes a
//! fixed ordered sequence of angle values plus a title and legend.

use std::fmt;

/// Split variants offered by the segmented picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitKind {
    /// Legs sideways (middle/straddle split).
    #[default]
    Straddle,
    /// Right leg forward.
    Right,
    /// Left leg forward.
    Left,
}

impl SplitKind {
    pub const ALL: [SplitKind; 3] = [SplitKind::Straddle, SplitKind::Right, SplitKind::Left];

    pub fn as_label(self) -> &'static str {
        match self {
            SplitKind::Straddle => "Straddle",
            SplitKind::Right => "Right",
            SplitKind::Left => "Left",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A line-chart payload for the external chart collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub legend: String,
    /// Ordered angle measurements, oldest first.
    pub values: Vec<f32>,
    /// Suffix appended to rendered values (degree sign).
    pub value_suffix: &'static str,
}

/// The recorded split-angle progression shown on the screen.
const FLEXIBILITY_PROGRESSION: [f32; 21] = [
    141.0, 141.0, 142.0, 141.0, 140.0, 143.0, 143.0, 144.0, 145.0, 145.0, 147.0, 147.0, 150.0,
    151.0, 152.0, 152.0, 151.0, 150.0, 153.0, 154.0, 154.0,
];

/// Build the chart payload for the selected split variant.
pub fn flexibility_series(kind: SplitKind) -> ChartSeries {
    ChartSeries {
        title: format!("{} split", kind.as_label()),
        legend: format!(
            "{:.0}\u{b0} is a full split",
            crate::angle::FULL_SPLIT_DEGREES
        ),
        values: FLEXIBILITY_PROGRESSION.to_vec(),
        value_suffix: "\u{b0}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_carries_the_full_progression() {
        let series = flexibility_series(SplitKind::Straddle);
        assert_eq!(series.values.len(), 21);
        assert_eq!(series.values.first(), Some(&141.0));
        assert_eq!(series.values.last(), Some(&154.0));
    }

    #[test]
    fn values_stay_below_a_full_split() {
        let series = flexibility_series(SplitKind::Right);
        assert!(
            series
                .values
                .iter()
                .all(|v| *v > 0.0 && *v < crate::angle::FULL_SPLIT_DEGREES)
        );
    }

    #[test]
    fn title_reflects_the_selected_kind() {
        for kind in SplitKind::ALL {
            let series = flexibility_series(kind);
            assert!(series.title.contains(kind.as_label()));
        }
    }
}
