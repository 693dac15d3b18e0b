use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Part this session plays in a shared game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncRole {
    /// Not shared.
    #[default]
    Solo,
    /// Shared the game, the only member that starts new games.
    Leader,
    /// Joined a shared game, mirrors the leader's new games.
    Follower,
}

impl SyncRole {
    pub const fn is_sharing(self) -> bool {
        !matches!(self, Self::Solo)
    }

    pub const fn is_leader(self) -> bool {
        !matches!(self, Self::Follower)
    }
}

/// What the status line should say.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Playing,
    Won,
    /// Won, and the next game is on a larger grid.
    LevelUp { edge: Edge },
    Solving,
}

/// Work for the host, drained with [`Session::drain_effects`].
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Send to every other member of the shared game.
    Broadcast(PeerMessage),
    /// Hand the task back to [`Session::run_task`] once its delay has passed.
    Schedule(ScheduledTask),
    /// The best-time table changed and should be persisted.
    SaveBestTimes(BestTimes),
    Status(Status),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub solve_step_delay: Duration,
    pub advance_delay: Duration,
    pub initial_edge: Edge,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            solve_step_delay: SOLVE_STEP_DELAY,
            advance_delay: ADVANCE_DELAY,
            initial_edge: MIN_EDGE,
        }
    }
}

/// One player's view of a flip game: the grid, its history, level progression, timing and peer synchronization.
///
/// The session never blocks and never schedules anything itself. Timers, broadcasts and persistence are requested
/// through [`Effect`]s that the host drains after each call.
#[derive(Debug)]
pub struct Session<C = SystemClock, S = RandomMoveSource> {
    config: SessionConfig,
    grid: Grid,
    history: MoveHistory,
    progression: ProgressionTracker,
    timer: TimeKeeper,
    best_times: BestTimes,
    role: SyncRole,
    status: Status,
    won: bool,
    solving: bool,
    generation: Generation,
    clock: C,
    moves: S,
    effects: Vec<Effect>,
}

impl Session {
    pub fn new(best_times: BestTimes) -> Self {
        Self::with_parts(
            SessionConfig::default(),
            best_times,
            SystemClock,
            RandomMoveSource::from_entropy(),
        )
    }
}

impl<C: Clock, S: MoveSource> Session<C, S> {
    pub fn with_parts(config: SessionConfig, best_times: BestTimes, clock: C, moves: S) -> Self {
        let progression = ProgressionTracker::with_edge(config.initial_edge);
        Self {
            config,
            grid: Grid::new(progression.edge()),
            history: MoveHistory::new(),
            progression,
            timer: TimeKeeper::new(),
            best_times,
            role: SyncRole::Solo,
            status: Status::Playing,
            won: false,
            solving: false,
            generation: Generation::default(),
            clock,
            moves,
            effects: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn edge(&self) -> Edge {
        self.grid.edge()
    }

    pub fn progression(&self) -> &ProgressionTracker {
        &self.progression
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    pub fn role(&self) -> SyncRole {
        self.role
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_solving(&self) -> bool {
        self.solving
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Whole seconds spent on the current game, including time played before it was restored.
    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs(self.clock.now())
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        core::mem::take(&mut self.effects)
    }

    /// Called when the game gets shared (`Leader`) or joined (`Follower`).
    pub fn set_role(&mut self, role: SyncRole) {
        if role != self.role {
            log::info!("Sync role changed from {:?} to {:?}", self.role, role);
            self.role = role;
        }
    }

    /// Scrambles a fresh grid at the current level. Followers cannot start games, they wait for the leader's.
    pub fn new_game(&mut self) -> Result<()> {
        if !self.role.is_leader() {
            return Err(GameError::NotLeader);
        }
        self.start_new_game();
        Ok(())
    }

    /// Sends the current grid to the other members, for instance when someone joins late.
    pub fn announce_game(&mut self) -> Result<()> {
        if !self.role.is_leader() {
            return Err(GameError::NotLeader);
        }
        if self.role.is_sharing() {
            self.broadcast(self.new_game_message());
        }
        Ok(())
    }

    /// A local click. Remote clicks go through [`Session::receive`] instead.
    pub fn click(&mut self, index: CellIndex) -> Result<ClickOutcome> {
        let index = self.grid.validate_index(index)?;
        let outcome = self.apply_click(index);
        if outcome.has_update() && self.role.is_sharing() {
            log::debug!("Sending click at {} to the share", index);
            self.broadcast(PeerMessage::DotClick(index));
        }
        Ok(outcome)
    }

    /// Undoes the most recent move and keeps undoing one move per [`TaskKind::SolveStep`] until the history is empty.
    /// Returns the undone index, `None` if there was nothing to undo or a solve is already running.
    pub fn solve(&mut self) -> Option<CellIndex> {
        if self.won {
            log::debug!("Nothing to solve on a finished game");
            return None;
        }
        if self.solving {
            log::debug!("Solve already running");
            return None;
        }
        self.solve_step()
    }

    /// Runs a task previously requested with [`Effect::Schedule`]. Tasks from an earlier game are discarded.
    /// Returns whether the task did anything.
    pub fn run_task(&mut self, task: ScheduledTask) -> bool {
        if !task.is_current(self.generation) {
            log::debug!(
                "Discarding stale {:?} from generation {}, now at {}",
                task.kind,
                task.generation.value(),
                self.generation.value()
            );
            return false;
        }

        match task.kind {
            TaskKind::SolveStep => self.solving && self.solve_step().is_some(),
            TaskKind::Advance => {
                if self.won && self.role.is_leader() {
                    self.start_new_game();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Applies a message from another member of the shared game.
    ///
    /// Invalid messages are rejected without touching any state.
    pub fn receive(&mut self, message: PeerMessage) -> Result<ReceiveOutcome> {
        match message {
            PeerMessage::NewGame {
                dot_list,
                move_list,
            } => {
                if self.role != SyncRole::Follower {
                    log::warn!("Ignoring new game from a peer, only followers accept them");
                    return Ok(ReceiveOutcome::Ignored);
                }
                let grid = Grid::from_values(&dot_list).inspect_err(|err| {
                    log::warn!("Rejecting new game from the leader: {}", err);
                })?;
                let history = MoveHistory::from_moves(move_list);
                history.validate_for(&grid).inspect_err(|err| {
                    log::warn!("Rejecting new game from the leader: {}", err);
                })?;

                log::debug!("Received a new {}x{} game", grid.edge(), grid.edge());
                self.progression.adopt_edge(grid.edge());
                self.grid = grid;
                self.history = history;
                self.reset_round(0);
                Ok(ReceiveOutcome::Replaced)
            }
            PeerMessage::DotClick(index) => {
                if !self.role.is_sharing() {
                    log::warn!("Ignoring remote click at {} outside a share", index);
                    return Ok(ReceiveOutcome::Ignored);
                }
                let index = self.grid.validate_index(index).inspect_err(|err| {
                    log::warn!("Rejecting remote click: {}", err);
                })?;
                Ok(ReceiveOutcome::Clicked(self.apply_click(index)))
            }
        }
    }

    /// Decodes and applies a message straight off the wire.
    pub fn receive_bytes(&mut self, bytes: &[u8]) -> Result<ReceiveOutcome> {
        let message = PeerMessage::decode(bytes).inspect_err(|err| {
            log::warn!("Dropping peer message: {}", err);
        })?;
        self.receive(message)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dot_list: self.grid.clone(),
            move_list: self.history.clone(),
            paused_time: self.elapsed_secs(),
            won: self.won,
        }
    }

    /// Continues a saved game. The time already played carries over, the time spent unloaded does not.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let Snapshot {
            dot_list,
            move_list,
            paused_time,
            won: _,
        } = snapshot;

        log::debug!(
            "Restoring a {}x{} game with {} moves and {}s played",
            dot_list.edge(),
            dot_list.edge(),
            move_list.len(),
            paused_time
        );
        self.progression.adopt_edge(dot_list.edge());
        self.grid = dot_list;
        self.history = move_list;
        self.reset_round(paused_time);

        if self.role == SyncRole::Leader {
            self.broadcast(self.new_game_message());
        }
    }

    /// Restores the stored snapshot when there is a usable one, starts a new game otherwise.
    pub fn restore_or_new_game(&mut self, bytes: Option<&[u8]>) -> Result<()> {
        match bytes.map(Snapshot::from_bytes) {
            Some(Ok(snapshot)) if snapshot.is_restorable() => {
                self.restore(snapshot);
                return Ok(());
            }
            Some(Ok(_)) => log::debug!("Stored game was already won, starting a new one"),
            Some(Err(err)) => log::warn!("Ignoring stored game: {}", err),
            None => {}
        }
        self.new_game()
    }

    fn apply_click(&mut self, index: CellIndex) -> ClickOutcome {
        if self.won {
            log::debug!("Ignoring click at {} on a finished game", index);
            return ClickOutcome::NoChange;
        }

        self.grid.flip_valid(index);
        self.history.push(index);

        if self.grid.is_won() {
            self.finish_round();
            ClickOutcome::Won
        } else {
            self.set_status(if self.solving {
                Status::Solving
            } else {
                Status::Playing
            });
            ClickOutcome::Flipped
        }
    }

    fn finish_round(&mut self) {
        let now = self.clock.now();
        let edge = self.grid.edge();

        self.won = true;
        self.solving = false;
        // pending solve steps belong to the finished round
        self.generation.advance();
        self.timer.stop(now);
        let elapsed = self.timer.elapsed_secs(now);
        log::debug!("Won a {}x{} grid in {}s", edge, edge, elapsed);

        if self.best_times.record(edge, elapsed) {
            self.effects.push(Effect::SaveBestTimes(self.best_times));
        }
        self.timer.set_paused_secs(0);

        let progress = self.progression.record_win();
        self.set_status(match progress {
            Progress::LevelUp => Status::LevelUp {
                edge: self.progression.edge(),
            },
            Progress::Stay | Progress::Restart => Status::Won,
        });

        // followers get their next game from the leader
        if self.role.is_leader() {
            self.schedule(TaskKind::Advance, self.config.advance_delay);
        }
    }

    fn solve_step(&mut self) -> Option<CellIndex> {
        let Some(index) = self.history.undo_last(&mut self.grid) else {
            self.solving = false;
            return None;
        };

        if self.history.is_empty() {
            self.solving = false;
            self.set_status(Status::Playing);
        } else {
            self.solving = true;
            self.set_status(Status::Solving);
            self.schedule(TaskKind::SolveStep, self.config.solve_step_delay);
        }
        Some(index)
    }

    fn start_new_game(&mut self) {
        if self.grid.edge() != self.progression.edge() {
            self.grid.resize(self.progression.edge());
        }
        scramble(&mut self.grid, &mut self.history, &mut self.moves);
        self.reset_round(0);

        if self.role.is_sharing() {
            log::debug!("Sending a new game");
            self.broadcast(self.new_game_message());
        }
    }

    /// Common bookkeeping whenever a different game takes over the grid.
    fn reset_round(&mut self, paused_secs: u32) {
        self.generation.advance();
        self.won = false;
        self.solving = false;
        self.timer.set_paused_secs(paused_secs);
        self.timer.start(self.clock.now());
        self.set_status(Status::Playing);
    }

    fn new_game_message(&self) -> PeerMessage {
        PeerMessage::NewGame {
            dot_list: self.grid.to_values(),
            move_list: self.history.as_slice().to_vec(),
        }
    }

    fn broadcast(&mut self, message: PeerMessage) {
        self.effects.push(Effect::Broadcast(message));
    }

    fn schedule(&mut self, kind: TaskKind, delay: Duration) {
        let task = ScheduledTask::new(kind, self.generation, delay);
        self.effects.push(Effect::Schedule(task));
    }

    fn set_status(&mut self, status: Status) {
        if status != self.status {
            self.status = status;
            self.effects.push(Effect::Status(status));
        }
    }
}
