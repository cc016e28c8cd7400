use std::collections::VecDeque;

use crate::error::{GeneticError, Result};

/// Number of recent generations whose worst fitness sets the scaling reference.
pub const DEFAULT_SCALING_WINDOW: usize = 5;

/// Largest value among the last `width` entries of `history`.
///
/// Returns `None` for an empty history or a zero width.
///
/// ```
/// use ccga::fitness::calculate_f_max;
///
/// let history = [999.0, 123.0, 999.0, 242.0, 452.0, 12.0, 125.0, 124.0];
/// assert_eq!(calculate_f_max(&history, 5), Some(452.0));
/// assert_eq!(calculate_f_max(&[], 5), None);
/// ```
pub fn calculate_f_max(history: &[f64], width: usize) -> Option<f64> {
    let start = history.len().saturating_sub(width);
    history[start..].iter().copied().reduce(f64::max)
}

/// Sliding window over the worst fitness of recent generations.
///
/// The window's maximum, `f_max`, is the reference that turns a raw
/// minimization score into a selection weight `|f_max - fitness|`. Before the
/// first worst fitness is pushed `f_max` is zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingWindow {
    width: usize,
    worst_history: VecDeque<f64>,
    f_max: f64,
}

impl ScalingWindow {
    /// # Errors
    ///
    /// Returns a configuration error for a zero width.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(GeneticError::Configuration(
                "Scaling window width cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            width,
            worst_history: VecDeque::with_capacity(width),
            f_max: 0.0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn f_max(&self) -> f64 {
        self.f_max
    }

    /// Worst fitness values still inside the window, oldest first.
    pub fn worst_history(&self) -> Vec<f64> {
        self.worst_history.iter().copied().collect()
    }

    /// Records a generation's worst fitness and returns the new `f_max`.
    pub fn push_worst(&mut self, worst: f64) -> f64 {
        if self.worst_history.len() == self.width {
            self.worst_history.pop_front();
        }
        self.worst_history.push_back(worst);

        self.f_max = self
            .worst_history
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(0.0);
        self.f_max
    }
}

impl Default for ScalingWindow {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCALING_WINDOW,
            worst_history: VecDeque::with_capacity(DEFAULT_SCALING_WINDOW),
            f_max: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_f_max_full_window() {
        let history = [123.0, 321.0, 242.0, 452.0, 12.0];
        assert_eq!(calculate_f_max(&history, 5), Some(452.0));
    }

    #[test]
    fn test_calculate_f_max_ignores_old_entries() {
        let history = [999.0, 123.0, 999.0, 242.0, 452.0, 12.0, 125.0, 124.0];
        assert_eq!(calculate_f_max(&history, 5), Some(452.0));
    }

    #[test]
    fn test_calculate_f_max_short_history() {
        assert_eq!(calculate_f_max(&[7.0, 3.0], 5), Some(7.0));
        assert_eq!(calculate_f_max(&[], 5), None);
        assert_eq!(calculate_f_max(&[1.0], 0), None);
    }

    #[test]
    fn test_window_slides() {
        let mut window = ScalingWindow::new(3).unwrap();
        assert_eq!(window.f_max(), 0.0);

        assert_eq!(window.push_worst(10.0), 10.0);
        assert_eq!(window.push_worst(4.0), 10.0);
        assert_eq!(window.push_worst(6.0), 10.0);
        // 10.0 drops out of the window
        assert_eq!(window.push_worst(5.0), 6.0);
        assert_eq!(window.worst_history(), vec![4.0, 6.0, 5.0]);
    }

    #[test]
    fn test_window_matches_calculate_f_max() {
        let history = [999.0, 123.0, 999.0, 242.0, 452.0, 12.0, 125.0, 124.0];
        let mut window = ScalingWindow::default();
        for &worst in &history {
            window.push_worst(worst);
        }
        assert_eq!(Some(window.f_max()), calculate_f_max(&history, DEFAULT_SCALING_WINDOW));
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            ScalingWindow::new(0),
            Err(GeneticError::Configuration(_))
        ));
    }
}
