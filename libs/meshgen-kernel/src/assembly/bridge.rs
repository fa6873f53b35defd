//! # Ring Bridging
//!
//! Stitches two vertex rings into a strip of quads, or fans a single apex
//! vertex onto a ring. Every ring-based primitive is assembled from these.

use crate::error::{KernelError, KernelResult};

/// Faces joining ring `a` to ring `b`.
///
/// - `a.len() == b.len() == n`: `n - 1` quads `(a[i], b[i], b[i+1], a[i+1])`,
///   plus the closing quad `(a[n-1], b[n-1], b[0], a[0])` appended last when
///   `closed` and `n >= 3`.
/// - `a.len() == 1 < b.len()`: triangles `(a[0], b[i], b[i+1])`, plus
///   `(a[0], b[n-1], b[0])` when `closed` and `b.len() >= 3`.
///
/// `flipped` reverses every face. Any other combination of lengths fails
/// with `InvalidArgument`.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::assembly::bridge;
///
/// let faces = bridge(&[0, 1, 2], &[3, 4, 5], true, false).unwrap();
/// assert_eq!(faces, vec![vec![0, 3, 4, 1], vec![1, 4, 5, 2], vec![2, 5, 3, 0]]);
/// ```
pub fn bridge(a: &[usize], b: &[usize], closed: bool, flipped: bool) -> KernelResult<Vec<Vec<usize>>> {
    if a.is_empty() || b.is_empty() {
        return Err(KernelError::invalid_argument("cannot bridge an empty ring"));
    }
    if a.len() < 2 && b.len() < 2 {
        return Err(KernelError::invalid_argument(
            "bridging needs at least one ring of two or more vertices",
        ));
    }

    let mut faces = if a.len() == 1 {
        fan(a[0], b, closed)
    } else if a.len() == b.len() {
        strip(a, b, closed)
    } else {
        return Err(KernelError::invalid_argument(format!(
            "cannot bridge rings of {} and {} vertices",
            a.len(),
            b.len()
        )));
    };

    if flipped {
        for face in &mut faces {
            face.reverse();
        }
    }
    Ok(faces)
}

fn fan(apex: usize, ring: &[usize], closed: bool) -> Vec<Vec<usize>> {
    let n = ring.len();
    let mut faces: Vec<Vec<usize>> = ring
        .windows(2)
        .map(|pair| vec![apex, pair[0], pair[1]])
        .collect();
    if closed && n >= 3 {
        faces.push(vec![apex, ring[n - 1], ring[0]]);
    }
    faces
}

fn strip(a: &[usize], b: &[usize], closed: bool) -> Vec<Vec<usize>> {
    let n = a.len();
    let mut faces: Vec<Vec<usize>> = (0..n - 1)
        .map(|i| vec![a[i], b[i], b[i + 1], a[i + 1]])
        .collect();
    // With two vertices per ring the closing quad would repeat the only one.
    if closed && n >= 3 {
        faces.push(vec![a[n - 1], b[n - 1], b[0], a[0]]);
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_open_strip() {
        let faces = bridge(&[0, 1, 2], &[3, 4, 5], false, false).unwrap();
        assert_eq!(faces, vec![vec![0, 3, 4, 1], vec![1, 4, 5, 2]]);
    }

    #[test]
    fn test_bridge_closed_strip_appends_last() {
        let faces = bridge(&[0, 1, 2], &[3, 4, 5], true, false).unwrap();
        assert_eq!(faces.last(), Some(&vec![2, 5, 3, 0]));
        assert_eq!(faces.len(), 3);
    }

    #[test]
    fn test_bridge_flipped_reverses_each_face() {
        let plain = bridge(&[0, 1, 2], &[3, 4, 5], false, false).unwrap();
        let flipped = bridge(&[0, 1, 2], &[3, 4, 5], false, true).unwrap();
        for (p, f) in plain.iter().zip(&flipped) {
            let mut reversed = p.clone();
            reversed.reverse();
            assert_eq!(&reversed, f);
        }
    }

    #[test]
    fn test_bridge_fan() {
        let faces = bridge(&[9], &[0, 1, 2, 3], true, false).unwrap();
        assert_eq!(
            faces,
            vec![vec![9, 0, 1], vec![9, 1, 2], vec![9, 2, 3], vec![9, 3, 0]]
        );
        let open = bridge(&[9], &[0, 1, 2], false, false).unwrap();
        assert_eq!(open.len(), 2);
    }

    #[test]
    fn test_bridge_two_vertex_rings() {
        let faces = bridge(&[0, 1], &[2, 3], true, false).unwrap();
        assert_eq!(faces, vec![vec![0, 2, 3, 1]]);
    }

    #[test]
    fn test_bridge_rejects_bad_lengths() {
        assert!(bridge(&[], &[0, 1], false, false).is_err());
        assert!(bridge(&[0, 1], &[], false, false).is_err());
        assert!(bridge(&[0], &[1], false, false).is_err());
        assert!(bridge(&[0, 1, 2], &[3, 4], false, false).is_err());
        assert!(bridge(&[0, 1, 2], &[3], false, false).is_err());
    }

    #[test]
    fn test_bridge_faces_have_three_or_four_vertices() {
        for faces in [
            bridge(&[0], &[1, 2, 3, 4], true, true).unwrap(),
            bridge(&[0, 1, 2, 3], &[4, 5, 6, 7], true, true).unwrap(),
        ] {
            assert!(faces.iter().all(|f| f.len() == 3 || f.len() == 4));
        }
    }
}
