//! Interpolation helpers:
//! - lerp for scalars and component-wise vectors
//! - quaternion NLERP with shortest-arc normalization
//! - lerp_value dispatching over Value kinds

use crate::value::Value;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    let d = dot4(a, b);
    if d < 0.0 {
        b[0] = -b[0];
        b[1] = -b[1];
        b[2] = -b[2];
        b[3] = -b[3];
    }
    normalize4(lerp_vec4(a, b, t))
}

/// Linear interpolation across Value kinds (quaternions use NLERP).
///
/// Kind mismatches are rejected when a tween is constructed, so both sides
/// always share a kind here; if one slips through we prefer left (fail-soft).
pub fn lerp_value(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Scalar(va), Value::Scalar(vb)) => Value::Scalar(lerp_f32(*va, *vb, t)),
        (Value::Vec2(va), Value::Vec2(vb)) => Value::Vec2(lerp_vec2(*va, *vb, t)),
        (Value::Vec3(va), Value::Vec3(vb)) => Value::Vec3(lerp_vec3(*va, *vb, t)),
        (Value::Vec4(va), Value::Vec4(vb)) => Value::Vec4(lerp_vec4(*va, *vb, t)),
        (Value::Quat(qa), Value::Quat(qb)) => Value::Quat(nlerp_quat(*qa, *qb, t)),
        (Value::Color(ca), Value::Color(cb)) => Value::Color(lerp_vec4(*ca, *cb, t)),
        _ => {
            debug_assert!(false, "lerp_value called with mismatched kinds");
            a.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm4(q: [f32; 4]) -> f32 {
        (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt()
    }

    #[test]
    fn lerp_scalar_endpoints_and_mid() {
        assert_eq!(lerp_f32(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp_f32(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp_f32(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn lerp_value_componentwise() {
        let a = Value::Vec3([0.0, 10.0, -2.0]);
        let b = Value::Vec3([1.0, 20.0, 2.0]);
        if let Value::Vec3(v) = lerp_value(&a, &b, 0.5) {
            assert_eq!(v, [0.5, 15.0, 0.0]);
        } else {
            panic!();
        }
    }

    #[test]
    fn nlerp_unit_norm_and_shortest_arc() {
        // 180 deg around Y: from identity to [0,1,0,0]
        let q = nlerp_quat([0.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 0.0], 0.5);
        assert!((norm4(q) - 1.0).abs() < 1e-4);
        // Flipped sign input takes the short path
        let q2 = nlerp_quat([0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, -1.0], 0.5);
        assert!((norm4(q2) - 1.0).abs() < 1e-4);
        assert!(q2[3] > 0.0);
    }
}
