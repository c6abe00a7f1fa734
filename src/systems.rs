use bevy_ecs::event::Events;
use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::cadence::Cadence;
use crate::components::{
    ActivePiece, Board, Command, FinalScore, GameMode, GameState, Phase, Rules,
};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::provider::PieceSource;

/// Inserts every resource a session needs into `world`.
pub fn init_session_world(world: &mut World, rules: Rules, source: PieceSource) {
    world.insert_resource(Board::new(BOARD_WIDTH, BOARD_HEIGHT));
    world.insert_resource(GameState::new(&rules, GameMode::Classic));
    world.insert_resource(Cadence::new(rules.initial_fall_interval));
    world.insert_resource(rules);
    world.insert_resource(source);
    world.init_resource::<Events<FinalScore>>();
}

fn next_from_source(world: &mut World) -> ActivePiece {
    let mut source = world.resource_mut::<PieceSource>();
    let kind = source.0.next_kind();
    let sprite = source.0.next_sprite();
    ActivePiece::spawn(kind, sprite)
}

/// The falling piece entity, if one exists.
pub fn active_piece(world: &mut World) -> Option<(Entity, ActivePiece)> {
    let mut query = world.query::<(Entity, &ActivePiece)>();
    query.iter(world).next().map(|(entity, piece)| (entity, *piece))
}

fn despawn_active(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<ActivePiece>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
}

/// Resets the board and counters and puts a fresh piece pair in play.
pub fn start_session(world: &mut World, mode: GameMode) {
    despawn_active(world);
    world.resource_mut::<Board>().reset();

    let rules = world.resource::<Rules>().clone();
    let current = next_from_source(world);
    let next = next_from_source(world);

    {
        let mut game_state = world.resource_mut::<GameState>();
        *game_state = GameState::new(&rules, mode);
        game_state.phase = Phase::Playing;
        game_state.next_piece = Some(next);
    }

    world.spawn(current);
    world
        .resource_mut::<Cadence>()
        .rearm(rules.initial_fall_interval);

    info!(
        "Session started in {mode} mode with {:?} (next {:?})",
        current.kind, next.kind
    );
}

/// Tears the session down without reporting a score.
pub fn stop_session(world: &mut World) {
    despawn_active(world);
    world.resource_mut::<Cadence>().stop();

    let mut game_state = world.resource_mut::<GameState>();
    game_state.phase = Phase::NotStarted;
    game_state.next_piece = None;
    info!("Session stopped");
}

fn finish_session(world: &mut World) {
    world.resource_mut::<Cadence>().stop();

    let final_score = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.phase = Phase::Over;
        FinalScore {
            score: game_state.score,
            level: game_state.level,
            mode: game_state.mode,
        }
    };

    info!(
        "Game over: score {} at level {} ({})",
        final_score.score, final_score.level, final_score.mode
    );
    world.send_event(final_score);
}

// Promotes the queued piece and queues a fresh one behind it.
fn promote_next_piece(world: &mut World) {
    let queued = world.resource_mut::<GameState>().next_piece.take();
    let current = match queued {
        Some(piece) => piece,
        None => next_from_source(world),
    };
    let next = next_from_source(world);
    world.resource_mut::<GameState>().next_piece = Some(next);
    world.spawn(current);
    trace!("Spawned {:?}, next {:?}", current.kind, next.kind);
}

/// One step of gravity: fall a row, or lock, clear lines and respawn.
pub fn game_tick_system(world: &mut World) {
    if world.resource::<GameState>().phase != Phase::Playing {
        return;
    }

    let Some((entity, mut piece)) = active_piece(world) else {
        debug!("No active piece, spawning one");
        promote_next_piece(world);
        return;
    };

    let can_fall = world
        .resource::<Board>()
        .can_place(piece.kind, piece.rotation, piece.col, piece.row + 1);

    if can_fall {
        piece.translate(0, 1);
        world.entity_mut(entity).insert(piece);
        trace!("Piece fell to row {}", piece.row);
        return;
    }

    if world.resource::<Board>().is_topped() {
        finish_session(world);
        return;
    }

    let locked = world.resource_mut::<Board>().lock(&piece);
    world.despawn(entity);
    debug!(
        "Locked {:?} at ({}, {}) rotation {}",
        piece.kind, piece.col, piece.row, piece.rotation
    );

    if locked.is_err() {
        debug!("Piece locked above the playfield");
        finish_session(world);
        return;
    }

    let mode = world.resource::<GameState>().mode;
    let lines = world.resource_mut::<Board>().clear_filled_lines(mode);
    if lines > 0 {
        record_lines(world, lines);
    }

    promote_next_piece(world);
}

fn record_lines(world: &mut World, lines: usize) {
    let rules = world.resource::<Rules>().clone();
    let mut new_interval = None;

    {
        let mut game_state = world.resource_mut::<GameState>();
        let level_before = game_state.level;
        for _ in 0..lines {
            if let Some(interval) = game_state.record_line(&rules) {
                new_interval = Some(interval);
            }
        }

        debug!(
            "Cleared {lines} line(s): score {}, total lines {}",
            game_state.score, game_state.lines_cleared
        );
        if game_state.level != level_before {
            info!(
                "Level {} reached, fall interval {:?}",
                game_state.level, game_state.fall_interval
            );
        }
    }

    if let Some(interval) = new_interval {
        world.resource_mut::<Cadence>().rearm(interval);
    }
}

fn try_move(world: &mut World, d_col: i32, d_row: i32) -> bool {
    let Some((entity, mut piece)) = active_piece(world) else {
        return false;
    };

    let fits = world.resource::<Board>().can_place(
        piece.kind,
        piece.rotation,
        piece.col + d_col,
        piece.row + d_row,
    );
    if fits {
        piece.translate(d_col, d_row);
        world.entity_mut(entity).insert(piece);
    }
    fits
}

fn soft_drop(world: &mut World) -> bool {
    let Some((entity, mut piece)) = active_piece(world) else {
        return false;
    };

    let mut distance = 0;
    {
        let board = world.resource::<Board>();
        while board.can_place(piece.kind, piece.rotation, piece.col, piece.row + 1) {
            piece.translate(0, 1);
            distance += 1;
        }
    }

    if distance > 0 {
        world.entity_mut(entity).insert(piece);
        trace!("Soft drop moved piece {distance} row(s)");
    }
    distance > 0
}

fn try_rotate(world: &mut World) -> bool {
    let Some((entity, mut piece)) = active_piece(world) else {
        return false;
    };
    let Some(rotation) = piece.next_rotation() else {
        return false;
    };

    let fits = world
        .resource::<Board>()
        .can_place(piece.kind, rotation, piece.col, piece.row);
    if fits {
        piece.set_rotation(rotation);
        world.entity_mut(entity).insert(piece);
    }
    fits
}

fn toggle_pause(world: &mut World) -> bool {
    let (phase, interval) = {
        let game_state = world.resource::<GameState>();
        (game_state.phase, game_state.fall_interval)
    };

    match phase {
        Phase::Playing => {
            world.resource_mut::<GameState>().phase = Phase::Paused;
            world.resource_mut::<Cadence>().stop();
            info!("Paused");
            true
        }
        Phase::Paused => {
            world.resource_mut::<GameState>().phase = Phase::Playing;
            world.resource_mut::<Cadence>().rearm(interval);
            info!("Resumed");
            true
        }
        Phase::NotStarted | Phase::Over => false,
    }
}

/// Applies a player command. Returns whether it changed anything.
///
/// Movement commands are ignored unless the session is playing.
pub fn apply_command(world: &mut World, command: Command) -> bool {
    match command {
        Command::Quit => {
            stop_session(world);
            return true;
        }
        Command::TogglePause => return toggle_pause(world),
        _ => {}
    }

    if world.resource::<GameState>().phase != Phase::Playing {
        return false;
    }

    match command {
        Command::MoveLeft => try_move(world, -1, 0),
        Command::MoveRight => try_move(world, 1, 0),
        Command::SoftDrop => soft_drop(world),
        Command::Rotate => try_rotate(world),
        Command::TogglePause | Command::Quit => false,
    }
}

/// Feeds elapsed time to the cadence and runs the ticks that fell due.
pub fn advance_cadence(world: &mut World, delta: Duration) -> u32 {
    let due = world.resource_mut::<Cadence>().advance(delta);
    let arms = world.resource::<Cadence>().arms();
    let mut ran = 0;
    for _ in 0..due {
        if world.resource::<GameState>().phase != Phase::Playing {
            break;
        }
        game_tick_system(world);
        ran += 1;

        // A level-up restarted the count at the new period
        if world.resource::<Cadence>().arms() != arms {
            break;
        }
    }
    ran
}

/// Drains the final score reported by the last finished session, if any.
pub fn take_final_scores(world: &mut World) -> Vec<FinalScore> {
    world
        .resource_mut::<Events<FinalScore>>()
        .drain()
        .collect()
}
