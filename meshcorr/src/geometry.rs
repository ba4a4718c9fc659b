//! Edge lengths from node coordinates
//!
//! Element connections come out of the bulk reader with a correlation of
//! `0.0`. Measuring replaces that with the distance between the two nodes,
//! which is the value node-connection `reduce` filters on.

use meshcorr_core::{BulkModel, ConnectionMatrix};
use tracing::{debug, warn};

/// Euclidean distance between two points
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Set every element edge's correlation to its length
///
/// Edges naming an unknown node keep their value. Returns how many edges
/// could not be measured.
pub fn measure_edges(model: &mut BulkModel) -> usize {
    let nodes = &model.nodes;
    let index = nodes.key_index();
    let position = |key: &str| index.get(key).and_then(|&i| nodes.coordinates_at(i).ok());

    let unresolved: usize = [&mut model.bars, &mut model.triangles, &mut model.quads]
        .into_iter()
        .map(|edges| measure(&position, edges))
        .sum();
    if unresolved > 0 {
        warn!(unresolved, "edges reference nodes missing from the model");
    }
    unresolved
}

fn measure<F>(position: &F, edges: &mut ConnectionMatrix) -> usize
where
    F: Fn(&str) -> Option<[f64; 3]>,
{
    let lengths: Vec<Option<f64>> = edges
        .iter()
        .map(|edge| Some(distance(position(edge.first)?, position(edge.last)?)))
        .collect();

    let mut unresolved = 0;
    for (i, length) in lengths.into_iter().enumerate() {
        match length {
            Some(length) => {
                // lengths has one entry per edge
                let _ = edges.set_correlation(i, length);
            }
            None => unresolved += 1,
        }
    }
    debug!(edges = edges.connection_count(), unresolved, "measured edges");
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshcorr_core::BulkReader;

    #[test]
    fn test_distance() {
        assert_eq!(distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]), 5.0);
        assert_eq!(distance([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_measure_edges() {
        let deck = "GRID,1,,0.0,0.0,0.0\n\
                    GRID,2,,3.0,0.0,0.0\n\
                    GRID,3,,3.0,4.0,0.0\n\
                    CBAR,10,1,1,2\n\
                    CTRIA3,20,1,1,2,3\n\
                    CBAR,11,1,2,99\n";
        let (mut model, _) = BulkReader::default().read(deck).unwrap();

        assert_eq!(measure_edges(&mut model), 1);
        assert_eq!(model.bars.correlation(0).unwrap(), 3.0);
        assert_eq!(model.bars.correlation(1).unwrap(), 0.0);
        assert_eq!(model.triangles.correlation(0).unwrap(), 3.0);
        assert_eq!(model.triangles.correlation(1).unwrap(), 4.0);
        assert_eq!(model.triangles.correlation(2).unwrap(), 5.0);
    }
}
