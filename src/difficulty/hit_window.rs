/// Hit-window scale derived once per chart from the overall difficulty
/// setting.
///
/// Higher OD shrinks the window and therefore the scale. The second line
/// caps the scale for very lenient settings; it is a no-op for any `x` at or
/// below 0.09.
pub(crate) fn hit_window_scale(od: f32) -> f64 {
    let od = f64::from(od.clamp(0.0, 10.0));
    let x = 0.3 * ((64.5 - (3.0 * od).ceil()) / 500.0).sqrt();

    x.min(0.6 * (x - 0.09) + 0.09)
}

#[cfg(test)]
mod tests {
    use super::hit_window_scale;

    #[test]
    fn od_five_scale() {
        let x = hit_window_scale(5.0);
        let expected = 0.6 * (0.3 * (49.5_f64 / 500.0).sqrt() - 0.09) + 0.09;

        assert!((x - expected).abs() < 1e-12);
    }

    #[test]
    fn scale_shrinks_with_od() {
        assert!(hit_window_scale(0.0) > hit_window_scale(5.0));
        assert!(hit_window_scale(5.0) > hit_window_scale(10.0));
    }

    #[test]
    fn out_of_range_od_is_clamped() {
        assert_eq!(hit_window_scale(-3.0), hit_window_scale(0.0));
        assert_eq!(hit_window_scale(25.0), hit_window_scale(10.0));
    }
}
