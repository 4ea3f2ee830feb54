// Re-export glam for convenience
pub use glam::*;

// Odyssey math helpers
mod rotation;
pub use rotation::EulerDegrees;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_narrowing() {
        let v = DVec3::new(1.5, -2.25, 1000.0).as_vec3();
        assert_eq!(v, Vec3::new(1.5, -2.25, 1000.0));
    }
}
