//! Property tests over randomly generated topologies.

use flock_graph::{desired_squared_distances, incidence, laplacian, Edge, FormationShape, Topology};
use nalgebra::Vector2;
use proptest::prelude::*;

/// Random valid topology: 2..=8 agents, edges drawn from distinct pairs.
fn arb_topology() -> impl Strategy<Value = Topology> {
    (2usize..=8).prop_flat_map(|n| {
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        proptest::sample::subsequence(pairs.clone(), 1..=pairs.len()).prop_map(move |chosen| {
            let edges = chosen.into_iter().map(|(t, h)| Edge::new(t, h)).collect();
            Topology::new(n, edges).expect("generated edges are valid")
        })
    })
}

proptest! {
    #[test]
    fn incidence_columns_sum_to_zero(topo in arb_topology()) {
        let e = incidence(&topo);
        for col in 0..e.ncols() {
            let sum: f64 = e.column(col).iter().sum();
            prop_assert!(sum.abs() < 1e-12);
        }
    }

    #[test]
    fn laplacian_rows_sum_to_zero_and_symmetric(topo in arb_topology()) {
        let l = laplacian(&topo, false);
        prop_assert_eq!(l.clone(), l.transpose());
        for row in 0..l.nrows() {
            let sum: f64 = l.row(row).iter().sum();
            prop_assert!(sum.abs() < 1e-12);
        }
    }

    #[test]
    fn laplacian_is_incidence_gram(topo in arb_topology()) {
        let e = incidence(&topo);
        let l = laplacian(&topo, false);
        let gram = &e * e.transpose();
        prop_assert!((l - gram).abs().max() < 1e-12);
    }

    #[test]
    fn desired_distances_nonnegative(topo in arb_topology(), scale in 0.1f64..4.0) {
        let n = topo.agents();
        let shape = FormationShape::new(
            (0..n).map(|a| Vector2::new(a as f64 * scale, (a % 2) as f64)).collect(),
        );
        let distances = desired_squared_distances(&shape, &incidence(&topo));
        for d in distances.iter() {
            prop_assert!(*d >= 0.0);
        }
    }
}
