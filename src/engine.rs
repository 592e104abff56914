//! Entry point for the surrounding system: the bracket operations over one
//! match store and one registration source.

use crate::logic::{self, ApprovalOverride};
use crate::models::{
    BracketKey, BracketMatch, BracketView, EngineError, MatchId, MatchResult, Standing, TeamId,
};
use crate::store::{MatchStore, TeamRegistry};
use rand::Rng;

/// Stateless apart from its collaborators: every call is a function of the
/// stored matches plus its inputs. Randomness is passed in per call.
#[derive(Debug, Default)]
pub struct TournamentEngine<S, R> {
    store: S,
    registry: R,
}

impl<S: MatchStore, R: TeamRegistry> TournamentEngine<S, R> {
    pub fn new(store: S, registry: R) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Round 1 from the teams registered for `key`.
    pub fn generate_bracket<G: Rng + ?Sized>(
        &self,
        key: BracketKey,
        rng: &mut G,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        let teams = self.registry.list_registered_teams(key)?;
        logic::generate_bracket(&self.store, key, &teams, rng)
    }

    pub fn submit_result(
        &self,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
        evidence: Option<String>,
    ) -> Result<BracketMatch, EngineError> {
        let result = MatchResult::new(score_a, score_b).with_evidence(evidence);
        logic::submit_result(&self.store, match_id, result)
    }

    /// Submit with a fully built result (evidence and notes).
    pub fn submit(
        &self,
        match_id: MatchId,
        result: MatchResult,
    ) -> Result<BracketMatch, EngineError> {
        logic::submit_result(&self.store, match_id, result)
    }

    pub fn approve_result(
        &self,
        match_id: MatchId,
        decision: Option<ApprovalOverride>,
    ) -> Result<BracketMatch, EngineError> {
        logic::approve_result(&self.store, match_id, decision)
    }

    pub fn reject_result(&self, match_id: MatchId) -> Result<BracketMatch, EngineError> {
        logic::reject_result(&self.store, match_id)
    }

    pub fn advance_round<G: Rng + ?Sized>(
        &self,
        key: BracketKey,
        rng: &mut G,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        logic::advance_round(&self.store, key, rng)
    }

    pub fn advance_round_from<G: Rng + ?Sized>(
        &self,
        key: BracketKey,
        from_round: Option<u32>,
        rng: &mut G,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        logic::advance_round_from(&self.store, key, from_round, rng)
    }

    pub fn get_champion(&self, key: BracketKey) -> Result<TeamId, EngineError> {
        logic::get_champion(&self.store, key)
    }

    pub fn get_match(&self, match_id: MatchId) -> Result<BracketMatch, EngineError> {
        self.store.get_match(match_id)
    }

    pub fn bracket(&self, key: BracketKey) -> Result<BracketView, EngineError> {
        logic::bracket_view(&self.store, key)
    }

    pub fn pending_results(&self, key: BracketKey) -> Result<Vec<BracketMatch>, EngineError> {
        logic::pending_results(&self.store, key)
    }

    pub fn standings(&self, key: BracketKey) -> Result<Vec<Standing>, EngineError> {
        logic::standings(&self.store, key)
    }

    pub fn export_csv(&self, key: BracketKey) -> Result<String, EngineError> {
        logic::export_bracket_csv(&self.store, key)
    }
}
