#[cfg(test)]
mod tests {
    use crate::cadence::Cadence;
    use crate::catalog::PieceKind;
    use crate::components::*;
    use crate::game::{SPAWN_COLUMN, SPAWN_ROW};
    use crate::systems::*;
    use crate::tests::test_utils::{create_test_world, create_test_world_with_rules, fill_row_except};
    use bevy_ecs::world::World;
    use std::time::Duration;

    const SPRITE: SpriteId = SpriteId::new(2);

    fn piece(world: &mut World) -> ActivePiece {
        active_piece(world).expect("an active piece").1
    }

    fn piece_count(world: &mut World) -> usize {
        world.query::<&ActivePiece>().iter(world).count()
    }

    #[test]
    fn test_start_session() {
        let mut world = create_test_world(PieceKind::T, SPRITE);
        start_session(&mut world, GameMode::Hardcore);

        let state = world.resource::<GameState>().clone();
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.mode, GameMode::Hardcore);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.next_piece.map(|p| p.kind), Some(PieceKind::T));

        assert_eq!(piece_count(&mut world), 1);
        let current = piece(&mut world);
        assert_eq!((current.col, current.row), (SPAWN_COLUMN, SPAWN_ROW));

        let cadence = world.resource::<Cadence>();
        assert!(cadence.is_running());
        assert_eq!(cadence.period(), Duration::from_millis(400));
    }

    #[test]
    fn test_restart_clears_previous_session() {
        let mut world = create_test_world(PieceKind::Square, SPRITE);
        start_session(&mut world, GameMode::Classic);
        world.resource_mut::<Board>().set(0, 19, Some(SPRITE));
        world.resource_mut::<GameState>().score = 120;

        start_session(&mut world, GameMode::Classic);
        assert_eq!(world.resource::<Board>().get(0, 19), Some(None));
        assert_eq!(world.resource::<GameState>().score, 0);
        assert_eq!(piece_count(&mut world), 1);
    }

    #[test]
    fn test_move_commands() {
        let mut world = create_test_world(PieceKind::Line, SPRITE);
        start_session(&mut world, GameMode::Classic);

        assert!(apply_command(&mut world, Command::MoveLeft));
        assert_eq!(piece(&mut world).col, SPAWN_COLUMN - 1);

        // Walk into the left wall
        for _ in 0..10 {
            apply_command(&mut world, Command::MoveLeft);
        }
        assert_eq!(piece(&mut world).col, 0);
        assert!(!apply_command(&mut world, Command::MoveLeft));

        assert!(apply_command(&mut world, Command::MoveRight));
        assert_eq!(piece(&mut world).col, 1);
    }

    #[test]
    fn test_rotate_blocked_by_wall_is_a_no_op() {
        let mut world = create_test_world(PieceKind::Line, SPRITE);
        start_session(&mut world, GameMode::Classic);

        assert!(apply_command(&mut world, Command::Rotate));
        assert_eq!(piece(&mut world).rotation, 1);

        // Vertical line hugging the left wall has its box one column out
        for _ in 0..10 {
            apply_command(&mut world, Command::MoveLeft);
        }
        assert_eq!(piece(&mut world).col, -1);

        assert!(!apply_command(&mut world, Command::Rotate));
        let stuck = piece(&mut world);
        assert_eq!((stuck.col, stuck.rotation), (-1, 1));
    }

    #[test]
    fn test_square_does_not_rotate() {
        let mut world = create_test_world(PieceKind::Square, SPRITE);
        start_session(&mut world, GameMode::Classic);

        assert!(!apply_command(&mut world, Command::Rotate));
        assert_eq!(piece(&mut world).rotation, 0);
    }

    #[test]
    fn test_soft_drop_moves_without_locking() {
        let mut world = create_test_world(PieceKind::Square, SPRITE);
        start_session(&mut world, GameMode::Classic);

        assert!(apply_command(&mut world, Command::SoftDrop));
        assert_eq!(piece(&mut world).row, 17);
        assert_eq!(world.resource::<Board>().get(4, 19), Some(None));

        // Nothing left to drop
        assert!(!apply_command(&mut world, Command::SoftDrop));

        game_tick_system(&mut world);
        assert_eq!(world.resource::<Board>().get(4, 19), Some(Some(SPRITE)));
        assert_eq!(piece(&mut world).row, SPAWN_ROW);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut world = create_test_world(PieceKind::T, SPRITE);

        assert!(!apply_command(&mut world, Command::MoveLeft));
        assert!(!apply_command(&mut world, Command::Rotate));
        assert!(!apply_command(&mut world, Command::TogglePause));
        assert_eq!(world.resource::<GameState>().phase, Phase::NotStarted);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut world = create_test_world(PieceKind::T, SPRITE);
        start_session(&mut world, GameMode::Classic);
        let before = piece(&mut world);

        assert!(apply_command(&mut world, Command::TogglePause));
        assert_eq!(world.resource::<GameState>().phase, Phase::Paused);
        assert!(!world.resource::<Cadence>().is_running());

        // Movement and gravity are frozen
        assert!(!apply_command(&mut world, Command::MoveLeft));
        assert!(!apply_command(&mut world, Command::SoftDrop));
        assert_eq!(advance_cadence(&mut world, Duration::from_secs(5)), 0);
        game_tick_system(&mut world);
        assert_eq!(piece(&mut world), before);

        assert!(apply_command(&mut world, Command::TogglePause));
        assert_eq!(world.resource::<GameState>().phase, Phase::Playing);
        let cadence = world.resource::<Cadence>();
        assert!(cadence.is_running());
        assert_eq!(cadence.until_next(), Some(Duration::from_millis(400)));
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut world = create_test_world(PieceKind::T, SPRITE);

        start_session(&mut world, GameMode::Classic);
        assert!(apply_command(&mut world, Command::Quit));
        assert_eq!(world.resource::<GameState>().phase, Phase::NotStarted);
        assert_eq!(piece_count(&mut world), 0);
        assert!(!world.resource::<Cadence>().is_running());

        start_session(&mut world, GameMode::Classic);
        apply_command(&mut world, Command::TogglePause);
        assert!(apply_command(&mut world, Command::Quit));
        assert_eq!(world.resource::<GameState>().phase, Phase::NotStarted);

        // Quitting reports no score
        assert!(take_final_scores(&mut world).is_empty());
    }

    #[test]
    fn test_tick_descends_one_row() {
        let mut world = create_test_world(PieceKind::T, SPRITE);
        start_session(&mut world, GameMode::Classic);

        game_tick_system(&mut world);
        assert_eq!(piece(&mut world).row, SPAWN_ROW + 1);
        game_tick_system(&mut world);
        assert_eq!(piece(&mut world).row, SPAWN_ROW + 2);
    }

    #[test]
    fn test_advance_cadence_runs_due_ticks() {
        let mut world = create_test_world(PieceKind::T, SPRITE);
        start_session(&mut world, GameMode::Classic);

        assert_eq!(advance_cadence(&mut world, Duration::from_millis(399)), 0);
        assert_eq!(advance_cadence(&mut world, Duration::from_millis(801)), 3);
        assert_eq!(piece(&mut world).row, SPAWN_ROW + 3);
    }

    #[test]
    fn test_level_up_rearms_cadence() {
        let rules = Rules {
            lines_per_level: 1,
            ..Rules::default()
        };
        let mut world = create_test_world_with_rules(PieceKind::Line, SPRITE, rules);
        start_session(&mut world, GameMode::Classic);
        fill_row_except(&mut world.resource_mut::<Board>(), 19, &[3, 4, 5, 6], SPRITE);

        apply_command(&mut world, Command::SoftDrop);
        game_tick_system(&mut world);

        let state = world.resource::<GameState>().clone();
        assert_eq!(state.score, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.fall_interval, Duration::from_millis(350));
        assert_eq!(
            world.resource::<Cadence>().period(),
            Duration::from_millis(350)
        );
    }

    #[test]
    fn test_level_up_drops_remaining_due_ticks() {
        let rules = Rules {
            lines_per_level: 1,
            ..Rules::default()
        };
        let mut world = create_test_world_with_rules(PieceKind::Line, SPRITE, rules);
        start_session(&mut world, GameMode::Classic);
        fill_row_except(&mut world.resource_mut::<Board>(), 19, &[3, 4, 5, 6], SPRITE);
        apply_command(&mut world, Command::SoftDrop);

        // Three ticks are due at 400ms, but the first one locks and levels up
        assert_eq!(advance_cadence(&mut world, Duration::from_millis(1200)), 1);

        assert_eq!(world.resource::<GameState>().level, 2);
        assert_eq!(piece(&mut world).row, SPAWN_ROW);
        let cadence = world.resource::<Cadence>();
        assert_eq!(cadence.period(), Duration::from_millis(350));
        assert_eq!(cadence.until_next(), Some(Duration::from_millis(350)));
    }

    #[test]
    fn test_overflow_on_lock_ends_game() {
        let mut world = create_test_world(PieceKind::Square, SPRITE);
        start_session(&mut world, GameMode::Classic);
        world.resource_mut::<GameState>().score = 40;

        // Block the square while its top half is still above the grid
        {
            let mut board = world.resource_mut::<Board>();
            board.set(4, 1, Some(SPRITE));
            board.set(5, 1, Some(SPRITE));
        }

        game_tick_system(&mut world);

        assert_eq!(world.resource::<GameState>().phase, Phase::Over);
        assert!(!world.resource::<Cadence>().is_running());
        assert_eq!(piece_count(&mut world), 0);
        assert_eq!(
            take_final_scores(&mut world),
            vec![FinalScore {
                score: 40,
                level: 1,
                mode: GameMode::Classic,
            }]
        );
    }

    #[test]
    fn test_final_score_sent_once() {
        let mut world = create_test_world(PieceKind::Square, SPRITE);
        start_session(&mut world, GameMode::Hardcore);
        {
            let mut board = world.resource_mut::<Board>();
            board.set(4, 1, Some(SPRITE));
            board.set(5, 1, Some(SPRITE));
        }

        game_tick_system(&mut world);
        game_tick_system(&mut world);
        advance_cadence(&mut world, Duration::from_secs(10));

        let scores = take_final_scores(&mut world);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].mode, GameMode::Hardcore);
        assert!(take_final_scores(&mut world).is_empty());

        // Nothing moves once the game is over
        assert!(!apply_command(&mut world, Command::MoveLeft));
        assert!(!apply_command(&mut world, Command::TogglePause));
    }
}
