mod utils;
use utils::{GameBuilder, TestSetupBuilder};

#[tokio::test]
async fn empty_history_has_zero_average() {
    let setup = TestSetupBuilder::new().build();

    let board = setup.stats_service.leaderboard().await.unwrap();

    assert_eq!(board.total_games, 0);
    assert_eq!(board.average_score, 0.0);
    assert!(board.top_players.is_empty());
    assert_eq!(board.lucky_score, None);
}

#[tokio::test]
async fn pooled_scores_pick_lucky_without_unlucky() {
    let two = TestSetupBuilder::new().with_two_players().build();
    GameBuilder::new()
        .hand_scores(3, &[20, 20])
        .submit_with_setup(&two)
        .await;

    // Same services, three seats this time
    let three = utils::TestSetup {
        players: vec!["Alice".into(), "Bob".into(), "Cara".into()],
        ..two
    };
    GameBuilder::new()
        .hand_scores(3, &[35, 35, 35])
        .submit_with_setup(&three)
        .await;

    let board = three.stats_service.leaderboard().await.unwrap();

    assert_eq!(board.total_games, 2);
    assert_eq!(board.lucky_score, Some(35));
    assert_eq!(board.unlucky_score, None);
    assert_eq!(board.average_score, 29.0);

    let consistent = board.most_consistent.unwrap();
    assert_eq!(consistent.name, "Cara");
    assert_eq!(consistent.score_range, 0);
}

#[tokio::test]
async fn top_five_ranked_by_wins() {
    let setup = TestSetupBuilder::new()
        .with_players(vec!["P1", "P2", "P3", "P4", "P5", "P6"])
        .build();

    // Player i wins i + 1 times (P6 wins most)
    for winner in 0..6usize {
        for _ in 0..=winner {
            let mut values = [10u32; 6];
            values[winner] = 1;
            GameBuilder::new()
                .hand_scores(3, &values)
                .submit_with_setup(&setup)
                .await;
        }
    }

    let board = setup.stats_service.leaderboard().await.unwrap();

    let names: Vec<&str> = board.top_players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["P6", "P5", "P4", "P3", "P2"]);
    assert_eq!(board.top_players[0].wins, 6);
    assert_eq!(board.total_games, 21);
    assert_eq!(board.lucky_score, Some(10));
    assert_eq!(board.unlucky_score, None);
    assert_eq!(board.highest_score.unwrap().score, 10);
    assert_eq!(board.lowest_score.unwrap().score, 1);
}
