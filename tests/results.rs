//! Integration tests for the submit / approve / reject lifecycle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_progression::{
    approve_result, generate_bracket, reject_result, submit_result, ApprovalOverride,
    BracketKey, BracketMatch, EngineError, InMemoryMatchStore, MatchResult, MatchStatus,
    MatchStore,
};
use uuid::Uuid;

/// Store holding a bracket of `n` teams; returns its round 1.
fn bracket_with_teams(n: usize) -> (InMemoryMatchStore, Vec<BracketMatch>) {
    let store = InMemoryMatchStore::new();
    let key = BracketKey::new(Uuid::new_v4(), Uuid::new_v4());
    let teams: Vec<_> = (0..n).map(|_| Uuid::new_v4()).collect();
    let mut rng = StdRng::seed_from_u64(11);
    let matches = generate_bracket(&store, key, &teams, &mut rng).unwrap();
    (store, matches)
}

#[test]
fn higher_score_wins_on_approval() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];

    let pending = submit_result(&store, m.id, MatchResult::new(3, 1)).unwrap();
    assert_eq!(pending.status, MatchStatus::ResultPending);
    assert_eq!(pending.winner, None);

    let done = approve_result(&store, m.id, None).unwrap();
    assert_eq!(done.status, MatchStatus::Completed);
    assert_eq!(done.winner, Some(m.team_a));
    assert!(done.completed_at.is_some());
    assert_eq!(store.get_match(m.id).unwrap(), done);
}

#[test]
fn side_b_can_win() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    submit_result(&store, m.id, MatchResult::new(0, 2)).unwrap();
    let done = approve_result(&store, m.id, None).unwrap();
    assert_eq!(done.winner, m.team_b);
    assert_eq!(done.loser(), Some(m.team_a));
}

#[test]
fn tie_without_override_is_ambiguous_and_stays_pending() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    submit_result(&store, m.id, MatchResult::new(2, 2)).unwrap();

    assert_eq!(
        approve_result(&store, m.id, None),
        Err(EngineError::AmbiguousResult(m.id))
    );
    let stored = store.get_match(m.id).unwrap();
    assert_eq!(stored.status, MatchStatus::ResultPending);
    assert_eq!(stored.winner, None);
}

#[test]
fn admin_winner_settles_a_tie() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    let b = m.team_b.unwrap();
    submit_result(&store, m.id, MatchResult::new(1, 1)).unwrap();

    let done = approve_result(&store, m.id, Some(ApprovalOverride::winner(b))).unwrap();
    assert_eq!(done.winner, Some(b));
    assert_eq!(done.status, MatchStatus::Completed);
}

#[test]
fn override_scores_replace_the_submission() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    submit_result(&store, m.id, MatchResult::new(1, 1)).unwrap();

    let done = approve_result(&store, m.id, Some(ApprovalOverride::scores(1, 4))).unwrap();
    assert_eq!(done.winner, m.team_b);
    let result = done.result.unwrap();
    assert_eq!((result.score_a, result.score_b), (1, 4));
}

#[test]
fn override_winner_must_play_in_the_match() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    let outsider = Uuid::new_v4();
    submit_result(&store, m.id, MatchResult::new(5, 0)).unwrap();

    assert_eq!(
        approve_result(&store, m.id, Some(ApprovalOverride::winner(outsider))),
        Err(EngineError::InvalidOverride {
            match_id: m.id,
            team_id: outsider
        })
    );
    assert_eq!(store.get_match(m.id).unwrap().status, MatchStatus::ResultPending);
}

#[test]
fn cannot_submit_for_a_bye() {
    let (store, matches) = bracket_with_teams(3);
    let bye = matches.iter().find(|m| m.is_bye()).unwrap();
    assert_eq!(
        submit_result(&store, bye.id, MatchResult::new(1, 0)),
        Err(EngineError::InvalidMatchState {
            match_id: bye.id,
            expected: MatchStatus::Scheduled,
            actual: MatchStatus::Completed,
        })
    );
}

#[test]
fn cannot_submit_twice() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    submit_result(&store, m.id, MatchResult::new(1, 0)).unwrap();
    assert!(matches!(
        submit_result(&store, m.id, MatchResult::new(0, 1)),
        Err(EngineError::InvalidMatchState {
            actual: MatchStatus::ResultPending,
            ..
        })
    ));
    // first submission kept
    assert_eq!(store.get_match(m.id).unwrap().result.unwrap().score_a, 1);
}

#[test]
fn cannot_approve_without_submission_or_twice() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    assert!(matches!(
        approve_result(&store, m.id, None),
        Err(EngineError::InvalidMatchState {
            actual: MatchStatus::Scheduled,
            ..
        })
    ));

    submit_result(&store, m.id, MatchResult::new(2, 0)).unwrap();
    approve_result(&store, m.id, None).unwrap();
    assert!(matches!(
        approve_result(&store, m.id, None),
        Err(EngineError::InvalidMatchState {
            actual: MatchStatus::Completed,
            ..
        })
    ));
}

#[test]
fn reject_returns_match_to_scheduled() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    submit_result(&store, m.id, MatchResult::new(9, 0)).unwrap();

    let back = reject_result(&store, m.id).unwrap();
    assert_eq!(back.status, MatchStatus::Scheduled);
    assert!(back.result.is_none());

    submit_result(&store, m.id, MatchResult::new(0, 1)).unwrap();
    assert_eq!(approve_result(&store, m.id, None).unwrap().winner, m.team_b);
}

#[test]
fn reject_requires_pending_result() {
    let (store, matches) = bracket_with_teams(2);
    assert!(matches!(
        reject_result(&store, matches[0].id),
        Err(EngineError::InvalidMatchState { .. })
    ));
}

#[test]
fn evidence_and_notes_are_kept() {
    let (store, matches) = bracket_with_teams(2);
    let m = &matches[0];
    let result = MatchResult::new(2, 1)
        .with_evidence(Some("screenshots/final.png".to_string()))
        .with_notes(Some("overtime".to_string()));
    submit_result(&store, m.id, result).unwrap();

    let stored = store.get_match(m.id).unwrap().result.unwrap();
    assert_eq!(stored.evidence.as_deref(), Some("screenshots/final.png"));
    assert_eq!(stored.notes.as_deref(), Some("overtime"));
}

#[test]
fn unknown_match_is_reported() {
    let (store, _) = bracket_with_teams(2);
    let id = Uuid::new_v4();
    assert_eq!(
        submit_result(&store, id, MatchResult::new(1, 0)),
        Err(EngineError::MatchNotFound(id))
    );
    assert_eq!(approve_result(&store, id, None), Err(EngineError::MatchNotFound(id)));
}
