//! Renders a solution's placements into a dense 3D label volume.

use crate::model::{Container, Solution};

/// A dense `(X, Y, Z)` label volume; `""` marks an unoccupied voxel,
/// otherwise the voxel holds the id of the box placed there.
pub type LabelVolume = Vec<Vec<Vec<String>>>;

/// Allocates a `container.dims`-shaped volume and writes each placement's
/// box id into every voxel it occupies.
pub fn format_to_label_volume(solution: &Solution, container: &Container) -> LabelVolume {
    let (x, y, z) = container.dims;
    let (x, y, z) = (x as usize, y as usize, z as usize);
    let mut volume: LabelVolume = vec![vec![vec![String::new(); z]; y]; x];

    for placement in &solution.placements {
        let (ox, oy, oz) = placement.origin;
        let (ex, ey, ez) = placement.orientation;
        for i in ox..ox + ex {
            for j in oy..oy + ey {
                for k in oz..oz + ez {
                    volume[i as usize][j as usize][k as usize] = placement.box_id.clone();
                }
            }
        }
    }

    volume
}
