//! Property-based tests for the scheduling environment and the search.
//!
//! Random precedence DAGs are explored with random or search-guided
//! decisions while checking:
//! - done and remaining partition the task universe
//! - a task becomes available only after all its prerequisites are done,
//!   and at most once
//! - clones never leak mutations back into the source
//! - visit counts are conserved and values stay within the observed range

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use u_crew::config::TeamConfig;
use u_crew::env::{Environment, ScheduleEnv};
use u_crew::mcts::{Mcts, MctsConfig};
use u_crew::models::TaskId;
use u_crew::precedence::PrecedenceGraph;

const CATEGORIES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

// =============================================================================
// Strategies
// =============================================================================

/// Random DAG as successor rows. Edges only point from lower to higher
/// task positions, so the graph is acyclic by construction.
fn arb_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    (2usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0usize..CATEGORIES.len(), n),
            prop::collection::vec(any::<bool>(), n * n),
        )
            .prop_map(move |(cats, edges)| {
                let ids: Vec<String> = cats
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| format!("{}{}", CATEGORIES[c], i + 1))
                    .collect();
                (0..n)
                    .map(|i| {
                        let mut row = vec![ids[i].clone()];
                        row.extend(
                            ((i + 1)..n)
                                .filter(|&j| edges[i * n + j])
                                .map(|j| ids[j].clone()),
                        );
                        row
                    })
                    .collect()
            })
    })
}

fn arb_team() -> impl Strategy<Value = TeamConfig> {
    prop_oneof![
        (1usize..4, 1usize..4).prop_map(|(h, r)| TeamConfig::mixed(h, r)),
        (1usize..4).prop_map(TeamConfig::homogeneous),
    ]
}

fn build(rows: &[Vec<String>], team: TeamConfig, seed: u64) -> (ScheduleEnv, ChaCha8Rng) {
    let graph = PrecedenceGraph::from_rows(rows.iter().map(|r| r.iter())).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let env = ScheduleEnv::new(graph, team, &mut rng).unwrap();
    (env, rng)
}

fn check_state(env: &ScheduleEnv, ever_available: &mut BTreeSet<TaskId>) -> Result<(), TestCaseError> {
    let tracker = env.tracker();
    let universe = tracker.graph().universe();
    let done = tracker.done();
    let remaining = tracker.remaining();

    // Partition invariant
    prop_assert!(done.is_disjoint(remaining));
    let expected: BTreeSet<TaskId> = universe.difference(done).copied().collect();
    prop_assert_eq!(remaining, &expected);

    // Unlock correctness
    let available = tracker.available();
    let unique: BTreeSet<TaskId> = available.iter().copied().collect();
    prop_assert_eq!(unique.len(), available.len(), "duplicate in available");
    for &task in available {
        if let Some(prereqs) = tracker.graph().prerequisites(task) {
            prop_assert!(prereqs.is_subset(done), "{} available too early", task);
        }
        if ever_available.insert(task) {
            prop_assert!(!tracker.history().contains(&task), "{} released twice", task);
        }
    }
    for task in tracker.history() {
        prop_assert!(!unique.contains(task), "{} assigned but still available", task);
    }

    // Agents: busy iff remaining > 0
    for agent in env.pool().iter() {
        prop_assert_eq!(agent.current_task().is_some(), agent.remaining() > 0);
    }
    Ok(())
}

// =============================================================================
// Environment invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_walk_keeps_invariants(
        rows in arb_rows(),
        team in arb_team(),
        seed in any::<u64>(),
    ) {
        let (mut env, mut rng) = build(&rows, team, seed);
        let mut ever_available = BTreeSet::new();
        check_state(&env, &mut ever_available)?;

        while !env.is_terminal() {
            let task = *env.available_actions().choose(&mut rng).unwrap();
            env.apply(task, &mut rng).unwrap();
            check_state(&env, &mut ever_available)?;
        }

        prop_assert_eq!(env.history().len(), rows.len());
        prop_assert_eq!(env.timeline().len() as u64, env.clock());
        prop_assert!(env.pool().iter().all(|a| a.is_idle()));
    }

    #[test]
    fn prop_clone_independence(
        rows in arb_rows(),
        team in arb_team(),
        seed in any::<u64>(),
    ) {
        let (env, mut rng) = build(&rows, team, seed);
        let done = env.tracker().done().clone();
        let available = env.tracker().available().to_vec();
        let agents: Vec<_> = env.pool().iter().cloned().collect();
        let clock = env.clock();

        let mut copy = env.clone();
        while !copy.is_terminal() {
            let task = *copy.available_actions().choose(&mut rng).unwrap();
            copy.apply(task, &mut rng).unwrap();
        }

        prop_assert_eq!(env.tracker().done(), &done);
        prop_assert_eq!(env.tracker().available(), available.as_slice());
        prop_assert_eq!(env.pool().iter().cloned().collect::<Vec<_>>(), agents);
        prop_assert_eq!(env.clock(), clock);
    }
}

// =============================================================================
// Search invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_visit_conservation_and_value_bounds(
        rows in arb_rows(),
        team in arb_team(),
        seed in any::<u64>(),
        playouts in 1usize..40,
    ) {
        let (env, _) = build(&rows, team, seed);
        prop_assume!(!env.is_terminal());

        let mut search: Mcts<ScheduleEnv, _> =
            Mcts::new(MctsConfig::with_playouts(playouts), ChaCha8Rng::seed_from_u64(seed));
        let mut values = Vec::new();
        for _ in 0..playouts {
            values.push(search.playout(env.clone()).unwrap());
        }

        let tree = search.tree();
        prop_assert_eq!(tree.root().visits() as usize, playouts);

        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for (_, node) in tree.iter() {
            let through_children: u32 = node
                .children()
                .iter()
                .map(|&(_, child)| tree.get(child).visits())
                .sum();
            prop_assert!(through_children <= node.visits());
            if node.visits() > 0 {
                prop_assert!(node.q() >= lo - 1e-9 && node.q() <= hi + 1e-9);
            }
        }
    }

    #[test]
    fn prop_get_move_is_reproducible(
        rows in arb_rows(),
        team in arb_team(),
        seed in any::<u64>(),
    ) {
        let (env, _) = build(&rows, team, seed);
        prop_assume!(!env.is_terminal());

        let mut first: Mcts<ScheduleEnv, _> =
            Mcts::new(MctsConfig::with_playouts(15), ChaCha8Rng::seed_from_u64(seed));
        let mut second = first.clone();

        let a = first.get_move(&env).unwrap();
        let b = second.get_move(&env).unwrap();
        prop_assert_eq!(a, b);
        prop_assert!(env.available_actions().contains(&a));
    }
}

#[test]
fn test_tree_reuse_keeps_statistics_across_decisions() {
    let rows: Vec<Vec<String>> = vec![
        vec!["A1".into(), "C1".into()],
        vec!["A2".into(), "C1".into()],
        vec!["C1".into(), "D1".into()],
    ];
    let (mut env, mut rng) = build(&rows, TeamConfig::mixed(1, 2), 5);
    let mut search: Mcts<ScheduleEnv, _> =
        Mcts::new(MctsConfig::with_playouts(30), ChaCha8Rng::seed_from_u64(5));

    let task = search.get_move(&env).unwrap();
    let root = search.tree().root_id();
    let kept = search.tree().child(root, task).map(|c| search.tree().get(c).visits());
    env.apply(task, &mut rng).unwrap();
    search.update_with_move(task);

    assert_eq!(Some(search.tree().root().visits()), kept);
    assert_eq!(search.tree().root().parent(), None);

    // The reused tree keeps serving decisions on the advanced state.
    let next = search.get_move(&env).unwrap();
    assert!(env.available_actions().contains(&next));
}
