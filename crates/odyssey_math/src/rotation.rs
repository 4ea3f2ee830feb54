// Euler rotation utilities for scene placement
//
// Object rotations arrive as per-axis degrees. Hosts work in radians and
// quaternions, so these helpers do the conversion in one place.

use glam::{DVec3, Quat};

/// Extension trait for per-axis Euler angles stored in degrees.
pub trait EulerDegrees {
    /// Convert every component from degrees to radians.
    fn degrees_to_radians(self) -> DVec3;

    /// Build a rotation from XYZ Euler degrees.
    ///
    /// X is applied first, then Y, then Z (the Blender `XYZ` rotation mode),
    /// so the resulting matrix is `Rz * Ry * Rx`.
    fn euler_xyz_quat(self) -> Quat;
}

impl EulerDegrees for DVec3 {
    fn degrees_to_radians(self) -> DVec3 {
        DVec3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }

    fn euler_xyz_quat(self) -> Quat {
        let r = self.degrees_to_radians();
        Quat::from_rotation_z(r.z as f32)
            * Quat::from_rotation_y(r.y as f32)
            * Quat::from_rotation_x(r.x as f32)
    }
}
