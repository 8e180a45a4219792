//! Visibility resolution pipeline
//!
//! Keeps the models that are visible, authorized for `index` and not plain
//! embedded types, then orders them by weight and case-insensitive label.

use crate::bound::BoundModelConfig;
use crate::lazy_model::LazyModelConfig;
use admiral_core::types::AdminAction;
use admiral_core::{Bindings, Result};
use std::sync::Arc;
use tracing::trace;

/// Visible, authorized, top-level models in display order
///
/// The first failing rule or authorization check aborts the whole call.
pub fn visible_models(
    models: &[Arc<LazyModelConfig>],
    bindings: &Bindings,
) -> Result<Vec<BoundModelConfig>> {
    let mut kept = Vec::new();

    for model in models {
        let bound = model.with(bindings.clone());

        if !bound.visible()? {
            trace!(model = %bound.key(), "Hidden by visibility rule");
            continue;
        }
        if !bound.is_authorized(AdminAction::Index)? {
            trace!(model = %bound.key(), "Not authorized for index");
            continue;
        }
        if !bound.abstract_model().is_none_or(|m| m.is_top_level()) {
            trace!(model = %bound.key(), "Embedded model reached through its parent");
            continue;
        }

        let weight = bound.weight()?;
        let label = bound.label()?.to_lowercase();
        kept.push((weight, label, bound));
    }

    kept.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(kept.into_iter().map(|(_, _, bound)| bound).collect())
}
