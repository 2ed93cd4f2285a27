//! View subscriber trait

use std::sync::Arc;

use sv_charts::CompiledSpec;
use sv_data::ResolvedView;

/// What a renderer receives on every notification
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    pub view: Arc<ResolvedView>,
    pub spec: Arc<CompiledSpec>,
}

/// Trait for components that draw resolved views.
///
/// Subscribers are called while the controller is borrowed, so they must not
/// call back into it.
pub trait ViewSubscriber: Send + Sync {
    /// Called when a new view is ready
    fn on_view_update(&self, update: &ViewUpdate);
}
