//! Zero-gamma crossing

/// First spot at which net GEX changes sign.
///
/// `curve` holds `(spot, net_gex)` points; it is scanned in ascending spot
/// order. Points sitting exactly on zero are skipped and each nonzero value
/// is compared with the previous nonzero one. A sign change across adjacent
/// points, or across a run of zeros, is located by linear interpolation
/// between the two nonzero points. A single zero point between opposite
/// signs is returned as is. Returns `None` when the curve never changes sign.
pub fn find_zero_crossing(curve: &[(f64, f64)]) -> Option<f64> {
    let mut points = curve.to_vec();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut last_nonzero: Option<(f64, f64)> = None;
    let mut zeros: Vec<f64> = Vec::new();

    for (p2, g2) in points {
        if g2 == 0.0 {
            zeros.push(p2);
            continue;
        }
        if let Some((p1, g1)) = last_nonzero {
            if g1 * g2 < 0.0 {
                return match zeros.as_slice() {
                    [single] => Some(*single),
                    _ => Some((p1 * g2 - p2 * g1) / (g2 - g1)),
                };
            }
        }
        last_nonzero = Some((p2, g2));
        zeros.clear();
    }

    None
}
