use chroma_flood::core::{solve, Board};
use chroma_flood::engine::{place_obstacles, ObstacleConfig, ObstacleRequest};
use chroma_flood::types::{CellTag, Color, Position, OBSTACLE_RETRY_LIMIT};

fn busy_request() -> ObstacleRequest {
    ObstacleRequest {
        stone_count: 4,
        ice_count: 3,
        ice_layers: 2,
        countdown_count: 1,
        wall_count: 5,
        portal_pair_count: 1,
        bonus_count: 2,
        ..ObstacleRequest::default()
    }
}

fn apply(size: usize, colors: usize, seed: u64, config: &ObstacleConfig) -> Board {
    let mut board = Board::generate(size, Color::palette(colors), seed);
    config.apply_to(&mut board);
    board
}

#[test]
fn test_placed_layouts_are_solvable() {
    for seed in 0..20 {
        let result = place_obstacles(9, 5, seed, &busy_request());
        let board = apply(9, 5, seed, &result.config);

        assert!(board.is_playable(Position::ORIGIN), "seed {}", seed);
        let solution = solve(&board, Color::palette(5));
        assert!(solution.complete, "seed {}", seed);
        assert!(solution.move_count() < 81, "seed {}", seed);
        assert!(result.attempts >= 1 && result.attempts <= OBSTACLE_RETRY_LIMIT);
    }
}

#[test]
fn test_placement_is_deterministic() {
    let a = place_obstacles(9, 5, 1234, &busy_request());
    let b = place_obstacles(9, 5, 1234, &busy_request());
    assert_eq!(a, b);
}

#[test]
fn test_requested_counts_on_first_success() {
    let result = place_obstacles(9, 5, 7, &busy_request());
    if result.attempts <= OBSTACLE_RETRY_LIMIT / 2 {
        let config = &result.config;
        assert_eq!(config.stones.len(), 4);
        assert_eq!(config.ice.len(), 3);
        assert!(config.ice.iter().all(|&(_, layers)| layers == 2));
        assert_eq!(config.countdowns.len(), 1);
        assert_eq!(config.countdowns[0].1, 5);
        assert_eq!(config.walls.len(), 5);
        assert_eq!(config.portals.len(), 1);
        assert_eq!(config.bonuses.len(), 2);
    }
}

#[test]
fn test_origin_is_never_an_obstacle() {
    for seed in 0..10 {
        let mut request = busy_request();
        request.void_positions = vec![Position::ORIGIN, Position::new(4, 4)];
        let result = place_obstacles(6, 4, seed, &request);
        let board = apply(6, 4, seed, &result.config);

        assert_eq!(board.tag_at(Position::ORIGIN), CellTag::Normal);
        assert_eq!(board.tag_at(Position::new(4, 4)), CellTag::Void);
        assert!(!result.config.voids.contains(&Position::ORIGIN));
        for wall in board.walls() {
            assert_ne!(wall.pos, Position::ORIGIN);
        }
    }
}

#[test]
fn test_unsolvable_shape_falls_back_to_voids() {
    // Voids wall off two corners; once their colors differ no layout can finish.
    let voids = vec![
        Position::new(0, 2),
        Position::new(1, 3),
        Position::new(2, 3),
        Position::new(3, 2),
    ];
    let seed = (0u64..)
        .find(|&seed| {
            let b = Board::generate(4, Color::palette(3), seed);
            b.color_at(Position::new(0, 3)) != b.color_at(Position::new(3, 3))
        })
        .unwrap();

    let request = ObstacleRequest {
        bonus_count: 1,
        void_positions: voids.clone(),
        ..ObstacleRequest::default()
    };
    let result = place_obstacles(4, 3, seed, &request);

    assert!(result.fell_back);
    assert_eq!(result.attempts, OBSTACLE_RETRY_LIMIT);
    assert_eq!(result.config, ObstacleConfig::voids_only(voids));
}
