use std::sync::Arc;

use crate::conntrack::ConnectionTracker;
use crate::metrics::Metrics;
use crate::relay::RelayDispatcher;
use crate::users::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub conntrack: Arc<ConnectionTracker>,
    pub relay: Arc<RelayDispatcher>,
    pub users: Arc<UserDirectory>,
    pub metrics: Arc<Metrics>,
}
