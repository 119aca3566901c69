//! Ultimate activation

use crate::sim::content::{UltimateContext, UltimateDefinition, UltimateStateView};
use crate::sim::state::EngineState;

/// Fire the ultimate if both gates pass: the definition's own predicate and
/// the gauge cost. Returns whether it activated.
pub fn try_activate_ultimate(state: &mut EngineState, def: &UltimateDefinition) -> bool {
    let can_activate = (def.can_activate)(UltimateStateView {
        gauge: state.player.ultimate_gauge,
        max_gauge: state.player.ultimate_gauge_max,
    });
    if !can_activate {
        return false;
    }

    if state.player.ultimate_gauge < def.gauge_cost {
        return false;
    }

    let mut ctx = UltimateContext::new(&mut state.bullets);
    (def.activate)(&mut ctx);

    state.player.ultimate_gauge = (state.player.ultimate_gauge - def.gauge_cost).max(0.0);
    true
}
