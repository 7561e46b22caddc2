//! GPU-ready vertex format shared by terrain and water meshes.

/// A single heightfield vertex, laid out for direct upload.
///
/// Layout (36 bytes total):
///   - `[0..12]`  position `[f32; 3]`, chunk-local
///   - `[12..24]` normal `[f32; 3]`, unit length
///   - `[24..36]` color `[f32; 3]`, linear RGB in `[0, 1]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 36]);

impl TerrainVertex {
    pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_36_bytes() {
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 36);
    }

    #[test]
    fn test_vertex_casts_to_bytes() {
        let v = TerrainVertex::new([1.0, 2.0, 3.0], TerrainVertex::UP, [0.5, 0.5, 0.5]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }
}
