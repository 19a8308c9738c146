use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Deferred continuation for a mismatched pair. The embedder schedules it
/// after [`GameConfig::mismatch_delay`] and hands it back through
/// [`MatchEngine::resolve_flip_back`]. The generation stamp ties the task to
/// the board it was created for, so a task outliving a `build`/`restore` is
/// ignored instead of mutating the new board. Tasks are in-process
/// continuations only and are deliberately not serializable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlipBackTask {
    generation: u64,
    indices: [CardIndex; 2],
}

impl FlipBackTask {
    pub const fn generation(self) -> u64 {
        self.generation
    }

    pub const fn indices(self) -> [CardIndex; 2] {
        self.indices
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Board {
    rows: Coord,
    columns: Coord,
    cards: Vec<Card>,
}

impl Board {
    // placeholder until the first build or restore; never checkpointed
    const fn unbuilt() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cards: Vec::new(),
        }
    }

    fn fresh(deck: &Deck) -> Self {
        Self {
            rows: deck.rows(),
            columns: deck.columns(),
            cards: deck.ids().iter().map(|&id| Card::hidden(id)).collect(),
        }
    }

    fn restored(record: &SaveRecord) -> Self {
        Self {
            rows: record.rows,
            columns: record.columns,
            cards: record
                .card_ids
                .iter()
                .zip(&record.matched_flags)
                .map(|(&id, &matched)| Card::restored(id, matched))
                .collect(),
        }
    }
}

/// The single-threaded turn state machine driving the reveal/compare/resolve
/// cycle. Driven exclusively by discrete external calls; the only temporal
/// element is the [`FlipBackTask`] the embedder schedules.
pub struct MatchEngine<S = MemoryStore> {
    config: GameConfig,
    board: Board,
    current_pair: SmallVec<[CardIndex; 2]>,
    locked: BTreeSet<CardIndex>,
    score: Score,
    game_over: bool,
    generation: u64,
    events: Vec<GameEvent>,
    store: S,
    save_key: &'static str,
}

impl<S: SaveStore> MatchEngine<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self {
            config,
            board: Board::unbuilt(),
            current_pair: SmallVec::new(),
            locked: BTreeSet::new(),
            score: 0,
            game_over: false,
            generation: 0,
            events: Vec::new(),
            store,
            save_key: DEFAULT_SAVE_KEY,
        }
    }

    pub fn with_save_key(mut self, save_key: &'static str) -> Self {
        self.save_key = save_key;
        self
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn is_built(&self) -> bool {
        !self.board.cards.is_empty()
    }

    pub fn rows(&self) -> Coord {
        self.board.rows
    }

    pub fn columns(&self) -> Coord {
        self.board.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.board.cards
    }

    pub fn card_at(&self, index: CardIndex) -> Option<Card> {
        self.board.cards.get(usize::from(index)).copied()
    }

    pub fn current_pair(&self) -> &[CardIndex] {
        &self.current_pair
    }

    pub fn is_locked(&self, index: CardIndex) -> bool {
        self.locked.contains(&index)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Board epoch, bumped by every `build`/`restore`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Events queued since the last drain, in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Generates a fresh deck and replaces the whole session. On error the
    /// previous session is left untouched.
    pub fn build<G: DeckGenerator>(&mut self, generator: G) -> Result<()> {
        let deck = generator.generate(self.config)?;
        log::debug!(
            "Built {}x{} board, {} cards",
            deck.rows(),
            deck.columns(),
            deck.total_cards()
        );
        self.install(Board::fresh(&deck), 0);
        Ok(())
    }

    /// Reconstructs a session from a save record, or fails without touching
    /// any state so the caller can fall back to [`build`](Self::build).
    pub fn restore(&mut self, record: SaveRecord) -> Result<()> {
        record.validate()?;
        log::debug!(
            "Restored {}x{} board, score {}",
            record.rows,
            record.columns,
            record.score
        );
        self.install(Board::restored(&record), record.score);
        Ok(())
    }

    /// Tries the persisted checkpoint first and builds fresh when it is
    /// absent or rejected.
    pub fn load_or_build<G: DeckGenerator>(&mut self, generator: G) -> Result<()> {
        if let Some(raw) = self.store.load(self.save_key) {
            match SaveRecord::from_json(&raw).and_then(|record| self.restore(record)) {
                Ok(()) => return Ok(()),
                Err(err) => log::warn!("Discarding saved game: {err}"),
            }
        }
        self.build(generator)
    }

    /// Retry path: drops the checkpoint and starts over.
    pub fn new_game<G: DeckGenerator>(&mut self, generator: G) -> Result<()> {
        self.store.clear(self.save_key);
        self.build(generator)
    }

    fn install(&mut self, board: Board, score: Score) {
        self.board = board;
        self.current_pair.clear();
        self.locked.clear();
        self.score = score;
        self.game_over = false;
        self.generation += 1;
        self.events.push(GameEvent::BoardBuilt);
        self.checkpoint();
    }

    /// One user-initiated flip attempt. Clicking a finished, matched,
    /// face-up, or locked card is a valid no-op; an out-of-range index is a
    /// caller bug and fails loudly.
    pub fn reveal(&mut self, index: CardIndex) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let i = usize::from(index);
        if i >= self.board.cards.len() {
            return Err(GameError::IndexOutOfRange);
        }

        let card = self.board.cards[i];
        if self.game_over || card.is_matched() || card.is_face_up() || self.locked.contains(&index)
        {
            return Ok(Ignored);
        }

        self.board.cards[i].flip_up();
        self.current_pair.push(index);
        self.events.push(GameEvent::CardRevealed(index));
        log::trace!("Revealed card {index}, id {}", card.id());

        if self.current_pair.len() < 2 {
            self.checkpoint();
            return Ok(Waiting);
        }

        let first = self.current_pair[0];
        let second = self.current_pair[1];
        let indices = [first, second];
        self.current_pair.clear();

        // compared in reveal order, equality only
        if self.board.cards[usize::from(first)].id() == self.board.cards[usize::from(second)].id()
        {
            self.board.cards[usize::from(first)].set_matched();
            self.board.cards[usize::from(second)].set_matched();
            self.score = self.score.saturating_add(self.config.match_score_value);
            self.events.push(GameEvent::PairResolved {
                matched: true,
                indices,
            });
            log::debug!("Pair {indices:?} matched, score {}", self.score);

            let outcome = if self.all_matched() {
                self.game_over = true;
                self.events.push(GameEvent::GameOver {
                    final_score: self.score,
                });
                Won
            } else {
                Matched
            };

            self.checkpoint();
            Ok(outcome)
        } else {
            self.locked.insert(first);
            self.locked.insert(second);
            self.board.cards[usize::from(first)].lock();
            self.board.cards[usize::from(second)].lock();
            self.events.push(GameEvent::PairResolved {
                matched: false,
                indices,
            });
            log::debug!("Pair {indices:?} mismatched, locked until flip-back");
            self.checkpoint();
            Ok(Mismatched(FlipBackTask {
                generation: self.generation,
                indices,
            }))
        }
    }

    /// Runs the deferred mismatch resolution once the embedder's timer
    /// elapses. Tasks stamped for a superseded board are ignored.
    pub fn resolve_flip_back(&mut self, task: FlipBackTask) -> FlipBackOutcome {
        if task.generation != self.generation {
            log::debug!("Ignoring flip-back for superseded board");
            return FlipBackOutcome::NoChange;
        }

        for &index in &task.indices {
            let Some(card) = self.board.cards.get_mut(usize::from(index)) else {
                continue;
            };
            if !card.is_matched() {
                card.flip_down();
            }
            card.unlock();
            self.locked.remove(&index);
        }

        self.checkpoint();
        FlipBackOutcome::FlippedBack
    }

    /// Full snapshot of the current session, or `None` before the first
    /// build.
    pub fn to_record(&self) -> Option<SaveRecord> {
        if !self.is_built() {
            return None;
        }
        Some(SaveRecord {
            rows: self.board.rows,
            columns: self.board.columns,
            score: self.score,
            card_ids: self.board.cards.iter().map(|card| card.id()).collect(),
            matched_flags: self.board.cards.iter().map(|card| card.is_matched()).collect(),
        })
    }

    // full linear scan; only worth running right after a successful match
    fn all_matched(&self) -> bool {
        self.board.cards.iter().all(|card| card.is_matched())
    }

    fn checkpoint(&mut self) {
        let Some(record) = self.to_record() else {
            return;
        };
        match record.to_json() {
            Ok(json) => {
                if let Err(err) = self.store.save(self.save_key, &json) {
                    log::warn!("Checkpoint write failed: {err}");
                }
            }
            Err(err) => log::warn!("Checkpoint skipped: {err}"),
        }
    }
}
