//! End-to-end scenarios through the public API.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use u_crew::config::{PlannerConfig, TeamConfig};
use u_crew::env::{fit, Environment, FitMarker, ScheduleEnv};
use u_crew::mcts::{Mcts, MctsConfig};
use u_crew::models::{AgentCategory, TaskId};
use u_crew::precedence::PrecedenceGraph;
use u_crew::scheduler::Planner;
use u_crew::ScheduleError;

fn task(s: &str) -> TaskId {
    s.parse().unwrap()
}

/// Single-category team where every agent may do A and B.
fn ab_team(agents: usize, a: u32, b: u32) -> TeamConfig {
    TeamConfig::homogeneous(agents)
        .with_durations([('A', a), ('B', b)])
        .with_eligibility(AgentCategory::Humanoid, ['A', 'B'])
}

#[test]
fn linear_chain_single_agent_takes_eight_ticks() {
    let graph = PrecedenceGraph::from_table_str("A1, B1").unwrap();
    let config = PlannerConfig {
        team: ab_team(1, 5, 3),
        search: MctsConfig::with_playouts(10),
        reuse_tree: true,
    };

    let kpi = Planner::seeded(config, 0).unwrap().run(graph).unwrap();
    assert_eq!(kpi.makespan, 8);
    assert_eq!(kpi.history, vec![task("A1"), task("B1")]);
    assert_eq!(kpi.idle.total, 0);
}

#[test]
fn parallel_tasks_finish_at_longest_duration() {
    let graph = PrecedenceGraph::from_table_str("A1\nB1").unwrap();
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut env = ScheduleEnv::new(graph.clone(), ab_team(2, 5, 3), &mut rng).unwrap();
        let mut b_agent = None;

        while !env.is_terminal() {
            let next = env.available_actions()[0];
            if next == task("B1") {
                b_agent = env.actor();
            }
            env.apply(next, &mut rng).unwrap();
        }

        assert_eq!(env.clock(), 5);
        let report = env.idle_report();
        assert_eq!(report.per_agent[&b_agent.unwrap()], 2);
    }
}

#[test]
fn heterogeneous_fit_only_draws_humanoids() {
    // One humanoid task (C) available, robot work (A) locked behind it.
    let graph = PrecedenceGraph::from_table_str("C1, A1").unwrap();
    let team = TeamConfig::mixed(3, 2);

    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let env = ScheduleEnv::new(graph.clone(), team.clone(), &mut rng).unwrap();

        assert_eq!(
            fit(env.tracker().available(), env.pool().idle_counts(), env.team()),
            FitMarker::HumanoidOnly
        );
        let actor = env.pool().get(env.actor().unwrap()).unwrap();
        assert_eq!(actor.category(), AgentCategory::Humanoid);
        assert_eq!(env.available_actions(), &[task("C1")]);
    }
}

#[test]
fn get_move_is_idempotent_under_identical_seeds() {
    let graph =
        PrecedenceGraph::from_table_str("A1, C1, D1\nA2, C2\nC1, F1\nC2, F1\nD1, H1\nF1, H1")
            .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let env = ScheduleEnv::new(graph, TeamConfig::default(), &mut rng).unwrap();

    let pick = || {
        let mut search: Mcts<ScheduleEnv, _> =
            Mcts::new(MctsConfig::with_playouts(25), ChaCha8Rng::seed_from_u64(77));
        search.get_move(&env).unwrap()
    };
    assert_eq!(pick(), pick());
}

#[test]
fn cyclic_graph_fails_before_scheduling() {
    let err = PrecedenceGraph::from_table_str("A1, B1\nB1, C1\nC1, A2\nA2, B1").unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidGraph(_)));
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("u-crew-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "reuse_tree = false\n[team]\nhumanoids = 1\nrobots = 1\n[search]\nplayouts = 5\n",
    )
    .unwrap();

    let config = PlannerConfig::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(!config.reuse_tree);
    assert_eq!(config.team.humanoids, 1);
    assert_eq!(config.team.duration('F').unwrap(), 20);
    assert_eq!(config.search.playouts, 5);

    let graph = PrecedenceGraph::from_table_str("E1, H1").unwrap();
    let kpi = Planner::seeded(config, 3).unwrap().run(graph).unwrap();
    assert_eq!(kpi.makespan, 5 + 5);
}

#[test]
fn missing_config_file_is_io_error() {
    let err = PlannerConfig::load_from_path("/nonexistent/u-crew.toml").unwrap_err();
    assert!(matches!(err, ScheduleError::Io(_)));
}
