//! Step interface tests: reset, agent decisions, rewards, encoders.

use spinner_dominoes::core::{GameConfig, PlayerConfig, PlayerId};
use spinner_dominoes::env::{ActionSpace, SpinnerEnv, StateEncoder, TwoExposedEnds, UsableEnds, WIN_REWARD};
use spinner_dominoes::SpinnerError;

fn agent_config() -> GameConfig {
    GameConfig::new(6)
        .with_hand_size(5)
        .with_end_round(3)
        .with_player(PlayerConfig::new("random").verbose())
        .with_player(PlayerConfig::new("agent"))
}

#[test]
fn test_observed_seat_is_the_first_agent() {
    let env = SpinnerEnv::new(agent_config(), 1, UsableEnds, ActionSpace::Direct).unwrap();
    assert_eq!(env.observed(), PlayerId::new(1));

    let no_agent = GameConfig::new(4)
        .with_player(PlayerConfig::new("play_low"))
        .with_player(PlayerConfig::new("play_high"));
    let env = SpinnerEnv::new(no_agent, 1, UsableEnds, ActionSpace::Direct).unwrap();
    assert_eq!(env.observed(), PlayerId::new(0));
}

#[test]
fn test_reset_stops_at_an_agent_choice() {
    let mut env = SpinnerEnv::new(agent_config(), 17, TwoExposedEnds, ActionSpace::Hierarchical).unwrap();
    let step = env.reset().unwrap();

    if !step.done {
        assert!(env.game().awaiting_agent());
        assert_eq!(env.game().current_player_id(), env.observed());
        assert_eq!(step.reward, 0.0);
    }
    let expected = TwoExposedEnds::encode_ends(&env.game().usable_ends()).unwrap();
    assert_eq!(step.state, expected);
}

#[test]
fn test_hierarchical_episode_rewards_only_a_win() {
    for seed in 0..20 {
        let mut env = SpinnerEnv::new(agent_config(), seed, TwoExposedEnds, ActionSpace::Hierarchical).unwrap();
        let mut step = env.reset().unwrap();
        let mut turns = 0;

        while !step.done {
            assert_eq!(step.reward, 0.0);
            assert!(step.state < TwoExposedEnds::STATES);
            step = env.execute_index(turns % 3).unwrap();
            turns += 1;
        }

        let won = env.game().winner() == env.observed();
        assert_eq!(step.reward, if won { WIN_REWARD } else { 0.0 }, "seed {}", seed);
    }
}

#[test]
fn test_direct_episode_runs_to_completion() {
    let config = agent_config().with_spinner(true).with_chickenfoot(true);
    let mut env = SpinnerEnv::new(config, 5, UsableEnds, ActionSpace::Direct).unwrap();
    let mut step = env.reset().unwrap();

    while !step.done {
        let actions = env.game().current_player().legal_actions(env.game().board());
        assert!(actions.len() >= 2);
        step = env.execute_index(actions.len() - 1).unwrap();
        assert_eq!(step.state, env.game().usable_ends().to_vec());
    }
    assert!(env.game().is_game_done());
}

#[test]
fn test_action_index_out_of_range() {
    let mut env = SpinnerEnv::new(agent_config(), 3, UsableEnds, ActionSpace::Hierarchical).unwrap();
    env.reset().unwrap();

    assert_eq!(
        env.decode(3),
        Err(SpinnerError::ActionIndexOutOfRange { index: 3, count: 3 })
    );
    assert_eq!(ActionSpace::Hierarchical.action_count(), Some(3));
    assert_eq!(ActionSpace::Direct.action_count(), None);
}

#[test]
fn test_acting_after_the_game_ends_fails() {
    let config = GameConfig::new(4)
        .with_end_round(3)
        .with_player(PlayerConfig::new("random"))
        .with_player(PlayerConfig::new("play_high"));
    let mut env = SpinnerEnv::new(config, 12, UsableEnds, ActionSpace::Hierarchical).unwrap();

    // Without an agent seat the whole game runs inside reset.
    let step = env.reset().unwrap();
    assert!(step.done);

    let result = env.execute_index(0);
    assert!(matches!(result, Err(SpinnerError::NotAgentTurn { .. })));
}

#[test]
fn test_encoder_state_counts() {
    let env = SpinnerEnv::new(agent_config(), 1, TwoExposedEnds, ActionSpace::Hierarchical).unwrap();
    assert_eq!(env.encoder().state_count(), Some(111));
    assert_eq!(env.action_space(), ActionSpace::Hierarchical);
}
