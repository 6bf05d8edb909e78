//! Static scene geometry: the floor grid and the joint sphere mesh.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Line-list vertices for the floor grid on the y = 0 plane.
///
/// Extents are halved and snapped down to a whole number of cells, so a
/// 2000x2000 grid with spacing 100 runs from -1000 to 1000 on each axis.
pub fn grid_lines(x_extent: u32, z_extent: u32, spacing: u32) -> Vec<[f32; 3]> {
    assert!(spacing > 0 && spacing <= x_extent && spacing <= z_extent);

    let x_size = (((x_extent / 2) / spacing) * spacing) as i32;
    let z_size = (((z_extent / 2) / spacing) * spacing) as i32;
    let x_max = x_size + spacing as i32;
    let z_max = z_size + spacing as i32;

    let mut vertices = Vec::new();
    for x in (-x_size..x_max).step_by(spacing as usize) {
        vertices.push([x as f32, 0.0, -z_size as f32]);
        vertices.push([x as f32, 0.0, z_size as f32]);
    }
    for z in (-z_size..z_max).step_by(spacing as usize) {
        vertices.push([x_size as f32, 0.0, z as f32]);
        vertices.push([-x_size as f32, 0.0, z as f32]);
    }
    vertices
}

/// UV sphere with `subdivisions` rings and sectors, normals pointing out.
pub fn uv_sphere(radius: f32, subdivisions: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    assert!(subdivisions >= 3);
    let rings = subdivisions;
    let sectors = subdivisions;

    let mut vertices = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);
    for ring in 0..=rings {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for sector in 0..=sectors {
            let phi = std::f32::consts::TAU * sector as f32 / sectors as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            vertices.push(MeshVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let stride = sectors + 1;
    let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);
    for ring in 0..rings {
        for sector in 0..sectors {
            let a = ring * stride + sector;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    (vertices, indices)
}
