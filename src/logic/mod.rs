//! Bracket business logic: generation, results, advancement, queries.

mod advance;
mod champion;
mod export;
mod generate;
mod pairing;
mod results;

pub use advance::{advance_round, advance_round_from};
pub use champion::{bracket_view, get_champion, pending_results, standings};
pub use export::export_bracket_csv;
pub use generate::generate_bracket;
pub use pairing::{rounds_needed, shuffle_and_pair};
pub use results::{approve_result, reject_result, submit_result, winning_side, ApprovalOverride};
