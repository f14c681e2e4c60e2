//! Intent dispatch through the three-phase transition pipeline.

use tracing::debug;

use crate::action::{ActionError, ActionOutcome, ActionTransition, Intent};
use crate::env::BattleEnv;
use crate::state::BattleState;

use super::errors::TransitionPhase;

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<T::Result, ActionError>
where
    T: ActionTransition<Error = ActionError>,
{
    let fail = |phase: TransitionPhase, error: ActionError| {
        debug!(
            actor = %transition.actor(),
            phase = phase.as_str(),
            %error,
            "transition rejected"
        );
        error
    };

    transition
        .pre_validate(state, env)
        .map_err(|error| fail(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| fail(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| fail(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an intent to its transition.
pub(super) fn execute_transition(
    intent: &Intent,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<ActionOutcome, ActionError> {
    match intent {
        Intent::Move(transition) => drive_transition(transition, state, env),
        Intent::Attack(transition) => drive_transition(transition, state, env),
        Intent::Skill(transition) => drive_transition(transition, state, env),
    }
}
