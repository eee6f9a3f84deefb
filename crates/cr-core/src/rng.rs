//! Deterministic sampling RNG.
//!
//! Query nodes are drawn from the network with a fixed seed so that two runs
//! over the same network assess the same nodes.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::NodeId;

/// Seeded RNG used to pick query nodes.
pub struct SampleRng(SmallRng);

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        SampleRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw `k` distinct node ids out of `0..node_count`, in draw order.
    ///
    /// When `k >= node_count` every node is returned in ascending order.
    pub fn sample_nodes(&mut self, node_count: usize, k: usize) -> Vec<NodeId> {
        if k >= node_count {
            return (0..node_count).map(|i| NodeId(i as u32)).collect();
        }
        rand::seq::index::sample(&mut self.0, node_count, k)
            .into_iter()
            .map(|i| NodeId(i as u32))
            .collect()
    }
}
